use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{error::AppResult, users::repo_types::User, validation::Fields};

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Body of `PUT /me`; every field optional.
#[derive(Debug, Default)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let mut f = Fields::new(body);
        let email = f.optional_email("email", "Email inválido");
        let name = f.optional_string(
            "name",
            1,
            "Nome deve ser uma string",
            "Nome deve ter pelo menos 1 caractere",
        );
        let password = f.optional_string(
            "password",
            6,
            "Senha deve ser uma string",
            "Senha deve ter pelo menos 6 caracteres",
        );

        if !f.is_clean() {
            return Err(f.into_error());
        }
        Ok(Self {
            email,
            name,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_response_hides_password_hash() {
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".into(),
            name: "Test".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["email"], "test@example.com");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn update_profile_validates_present_fields_only() {
        let req = UpdateProfileRequest::from_json(&json!({ "name": "New" })).unwrap();
        assert_eq!(req.name.as_deref(), Some("New"));
        assert!(req.email.is_none() && req.password.is_none());

        assert!(UpdateProfileRequest::from_json(&json!({ "password": "123" })).is_err());
        assert!(UpdateProfileRequest::from_json(&json!({ "email": "nope" })).is_err());
    }
}
