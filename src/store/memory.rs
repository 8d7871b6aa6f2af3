use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{Entity, Repository, StoreError};

type IdSource = Box<dyn Fn() -> Uuid + Send + Sync>;

struct Inner<E> {
    records: Vec<E>,
    ids: HashSet<Uuid>,
    unique: HashMap<(&'static str, String), Uuid>,
}

impl<E> Default for Inner<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            ids: HashSet::new(),
            unique: HashMap::new(),
        }
    }
}

/// In-memory store for one entity kind.
///
/// Every mutation runs under the write lock, so uniqueness checks and the
/// insert they guard are a single critical section.
pub struct MemoryStore<E: Entity> {
    inner: RwLock<Inner<E>>,
    next_id: IdSource,
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::with_id_source(Uuid::new_v4)
    }

    pub fn with_id_source(next_id: impl Fn() -> Uuid + Send + Sync + 'static) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            next_id: Box::new(next_id),
        }
    }

    /// Looks a record up through one of its unique indices.
    pub async fn find_by_unique(&self, field: &'static str, value: &str) -> Option<E> {
        let inner = self.inner.read().await;
        let id = inner.unique.get(&(field, value.to_string()))?;
        inner.records.iter().find(|r| r.id() == *id).cloned()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryStore<E> {
    async fn create(&self, draft: E::Draft) -> Result<E, StoreError> {
        let mut inner = self.inner.write().await;

        let id = (self.next_id)();
        if inner.ids.contains(&id) {
            return Err(StoreError::DuplicateIdentifier {
                resource: E::RESOURCE,
                id,
            });
        }

        let record = E::build(id, draft, OffsetDateTime::now_utc());
        let keys = record.unique_fields();
        if let Some((field, _)) = keys.iter().find(|key| inner.unique.contains_key(*key)) {
            return Err(StoreError::DuplicateUniqueField {
                resource: E::RESOURCE,
                field: *field,
            });
        }

        for key in keys {
            inner.unique.insert(key, id);
        }
        inner.ids.insert(id);
        inner.records.push(record.clone());

        debug!(resource = %E::RESOURCE, %id, "record created");
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.records.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<E>, StoreError> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn update(&self, id: Uuid, patch: E::Patch) -> Result<E, StoreError> {
        let mut inner = self.inner.write().await;

        let pos = inner
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound {
                resource: E::RESOURCE,
                id,
            })?;

        let mut next = inner.records[pos].clone();
        next.apply(patch, OffsetDateTime::now_utc());

        let next_keys = next.unique_fields();
        for key in &next_keys {
            if matches!(inner.unique.get(key), Some(owner) if *owner != id) {
                return Err(StoreError::DuplicateUniqueField {
                    resource: E::RESOURCE,
                    field: key.0,
                });
            }
        }

        for key in inner.records[pos].unique_fields() {
            inner.unique.remove(&key);
        }
        for key in next_keys {
            inner.unique.insert(key, id);
        }
        inner.records[pos] = next.clone();

        debug!(resource = %E::RESOURCE, %id, "record updated");
        Ok(next)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        let Some(pos) = inner.records.iter().position(|r| r.id() == id) else {
            debug!(resource = %E::RESOURCE, %id, "delete of absent record ignored");
            return Ok(());
        };

        let removed = inner.records.remove(pos);
        for key in removed.unique_fields() {
            inner.unique.remove(&key);
        }
        inner.ids.remove(&id);

        debug!(resource = %E::RESOURCE, %id, "record deleted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.inner.write().await = Inner::default();
        Ok(())
    }
}
