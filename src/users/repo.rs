use async_trait::async_trait;

use crate::store::{MemoryStore, Repository, StoreError};
use crate::users::repo_types::User;

/// User persistence; the only kind with a secondary lookup.
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Find a user by email (exact, case-sensitive match).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl UserRepository for MemoryStore<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.find_by_unique("email", email).await)
    }
}
