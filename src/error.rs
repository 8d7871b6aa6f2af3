use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{store::StoreError, validation::FieldErrors};

/// Kinds of records the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Pivot,
    Irrigation,
}

impl Resource {
    /// User-facing message for a missing (or not owned) record.
    pub fn not_found_message(self) -> &'static str {
        match self {
            Resource::User => "Usuário não encontrado",
            Resource::Pivot => "Pivô não encontrado",
            Resource::Irrigation => "Irrigação não encontrada",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::User => "user",
            Resource::Pivot => "pivot",
            Resource::Irrigation => "irrigation",
        };
        f.write_str(name)
    }
}

/// Why a request could not be tied to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingHeader,
    MalformedHeader,
    InvalidToken,
}

impl AuthRejection {
    pub fn message(self) -> &'static str {
        match self {
            AuthRejection::MissingHeader => "Token de acesso não fornecido",
            AuthRejection::MalformedHeader => "Formato de token inválido",
            AuthRejection::InvalidToken => "Token inválido ou expirado",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Record absent or owned by someone else. Deliberately indistinguishable.
    #[error("{0} not found")]
    NotFound(Resource),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("unauthenticated: {0:?}")]
    Unauthenticated(AuthRejection),

    #[error("duplicate value for {field}")]
    DuplicateUniqueField { field: &'static str },

    #[error("invalid request payload")]
    Validation(FieldErrors),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { resource, .. } => AppError::NotFound(resource),
            StoreError::DuplicateUniqueField { field, .. } => {
                AppError::DuplicateUniqueField { field }
            }
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

fn duplicate_message(field: &str) -> String {
    match field {
        "email" => "Email já cadastrado".to_string(),
        other => format!("Valor de {} já cadastrado", other),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                json!({ "message": resource.not_found_message(), "code": "E_ROW_NOT_FOUND" }),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Não autorizado", "code": "E_UNAUTHORIZED" }),
            ),
            AppError::Unauthenticated(reason) => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": reason.message() }),
            ),
            AppError::DuplicateUniqueField { field } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": duplicate_message(field), "code": "E_DUPLICATE" }),
            ),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Dados inválidos", "errors": errors }),
            ),
            AppError::Internal(e) => {
                error!(error = ?e, "unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Ocorreu um erro interno no servidor" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
