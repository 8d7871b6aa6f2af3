use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult, Resource};

/// `{ message, data }` body used by resource endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self { message, data }
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// Path ids that are not UUIDs can't name any record.
pub fn parse_id(raw: &str, resource: Resource) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(resource))
}

/// Request body as raw JSON, whatever the content type.
///
/// A missing or unparsable body becomes `Value::Null`, so it reaches
/// validation and is reported field by field like any other bad payload.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let value = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            debug!(error = %e, len = bytes.len(), "request body is not JSON");
            Value::Null
        });
        Ok(JsonBody(value))
    }
}
