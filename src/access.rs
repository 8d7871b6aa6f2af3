//! Ownership checks shared by the resource services.

use tracing::warn;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    store::Entity,
};

/// Records that belong to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// Turns a store lookup into a record the caller may act on.
///
/// Missing and foreign records both become `NotFound` so existence never
/// leaks; the foreign case is written to the audit log.
pub fn ensure_owner<E: Entity + Owned>(
    record: Option<E>,
    id: Uuid,
    caller: Uuid,
    operation: &'static str,
) -> AppResult<E> {
    let Some(record) = record else {
        return Err(AppError::NotFound(E::RESOURCE));
    };
    if record.owner_id() != caller {
        warn!(
            target: "audit",
            caller = %caller,
            resource = %E::RESOURCE,
            resource_id = %id,
            operation,
            "access to record owned by another user denied"
        );
        return Err(AppError::NotFound(E::RESOURCE));
    }
    Ok(record)
}
