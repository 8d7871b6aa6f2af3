use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use super::services::SessionService;
use crate::{
    error::{AppError, AuthRejection},
    users::repo_types::User,
};

/// Resolves the bearer token to the calling user.
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    SessionService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AppError::Unauthenticated(AuthRejection::MissingHeader))?;

        // Expect "Bearer <token>"
        let token = header
            .to_str()
            .ok()
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthenticated(AuthRejection::MalformedHeader))?;

        let sessions = SessionService::from_ref(state);
        match sessions.authenticate(token).await? {
            Some(user) => Ok(AuthUser(user)),
            None => Err(AppError::Unauthenticated(AuthRejection::InvalidToken)),
        }
    }
}
