//! Storage contracts shared by every entity kind.
//!
//! Services only see [`Repository`] (and the per-kind extensions such as
//! `UserRepository`), so the in-memory backend in [`memory`] can be replaced
//! by a persistent one without touching them.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::Resource;

pub mod memory;

pub use memory::MemoryStore;

/// A record a store can own.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Caller-supplied fields of a new record.
    type Draft: Send + 'static;
    /// Partial update; never carries identity or ownership.
    type Patch: Send + 'static;

    const RESOURCE: Resource;

    fn build(id: Uuid, draft: Self::Draft, now: OffsetDateTime) -> Self;

    fn id(&self) -> Uuid;

    /// Applies every field present in `patch` and refreshes `updated_at`.
    fn apply(&mut self, patch: Self::Patch, now: OffsetDateTime);

    /// `(field, value)` pairs that must be unique across the collection.
    fn unique_fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{resource} with id {id} already exists")]
    DuplicateIdentifier { resource: Resource, id: Uuid },

    #[error("{resource} with the same {field} already exists")]
    DuplicateUniqueField {
        resource: Resource,
        field: &'static str,
    },

    #[error("{resource} {id} not found")]
    NotFound { resource: Resource, id: Uuid },

    #[error("storage backend failure")]
    Backend(#[source] anyhow::Error),
}

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn create(&self, draft: E::Draft) -> Result<E, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, StoreError>;

    /// All records in insertion order.
    async fn find_all(&self) -> Result<Vec<E>, StoreError>;

    async fn update(&self, id: Uuid, patch: E::Patch) -> Result<E, StoreError>;

    /// Removing an id that is not present is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}
