use serde::Serialize;
use serde_json::Value;

use crate::{error::AppResult, users::dto::UserResponse, validation::Fields};

const EMAIL_MSG: &str = "Email inválido";
const PASSWORD_TYPE_MSG: &str = "Senha deve ser uma string";
const PASSWORD_MIN_MSG: &str = "Senha deve ter pelo menos 6 caracteres";
const PASSWORD_MIN_LEN: usize = 6;

/// Request body for user registration.
#[derive(Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterRequest {
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let mut f = Fields::new(body);
        let email = f.email("email", EMAIL_MSG);
        let password = f.string("password", PASSWORD_MIN_LEN, PASSWORD_TYPE_MSG, PASSWORD_MIN_MSG);
        let name = f.string(
            "name",
            1,
            "Nome deve ser uma string",
            "Nome deve ter pelo menos 1 caractere",
        );

        match (email, password, name) {
            (Some(email), Some(password), Some(name)) if f.is_clean() => Ok(Self {
                email,
                password,
                name,
            }),
            _ => Err(f.into_error()),
        }
    }
}

/// Request body for login.
#[derive(Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let mut f = Fields::new(body);
        let email = f.email("email", EMAIL_MSG);
        let password = f.string("password", PASSWORD_MIN_LEN, PASSWORD_TYPE_MSG, PASSWORD_MIN_MSG);

        match (email, password) {
            (Some(email), Some(password)) if f.is_clean() => Ok(Self { email, password }),
            _ => Err(f.into_error()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}
