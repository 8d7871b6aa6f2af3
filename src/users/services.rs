use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{dto::RegisterRequest, password::CredentialHasher},
    error::{AppError, AppResult, Resource},
    store::Repository,
    users::{
        dto::UpdateProfileRequest,
        repo::UserRepository,
        repo_types::{NewUser, User, UserPatch},
    },
};

/// Account management. Users are the identity root, so there is no
/// ownership scoping here.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: CredentialHasher) -> Self {
        Self { users, hasher }
    }

    pub async fn register(&self, req: RegisterRequest) -> AppResult<User> {
        let password_hash = self.hasher.hash(&req.password)?;
        let user = self
            .users
            .create(NewUser {
                email: req.email,
                name: req.name,
                password_hash,
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "user registration rejected");
                AppError::from(e)
            })?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(user)
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.find_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }

    /// A new password is re-hashed before it reaches the store.
    pub async fn update(&self, id: Uuid, req: UpdateProfileRequest) -> AppResult<User> {
        let password_hash = match req.password {
            Some(plain) => Some(self.hasher.hash(&plain)?),
            None => None,
        };
        let user = self
            .users
            .update(
                id,
                UserPatch {
                    email: req.email,
                    name: req.name,
                    password_hash,
                },
            )
            .await?;

        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    /// Owned pivots and irrigations are left in place.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.get_by_id(id).await?;
        self.users.delete(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, store::MemoryStore};

    fn service() -> UserService {
        let hasher = CredentialHasher::new(&AppConfig::for_tests().hashing).unwrap();
        UserService::new(Arc::new(MemoryStore::<User>::new()), hasher)
    }

    fn register_req(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: "secret1".into(),
            name: "A".into(),
        }
    }

    #[tokio::test]
    async fn register_hashes_password() {
        let svc = service();
        let user = svc.register(register_req("e@x.com")).await.unwrap();
        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_eq!(svc.get_by_email("e@x.com").await.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn second_registration_with_same_email_fails() {
        let svc = service();
        svc.register(register_req("e@x.com")).await.unwrap();
        let err = svc.register(register_req("e@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUniqueField { field: "email" }));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_to_taken_email_fails_but_own_email_succeeds() {
        let svc = service();
        svc.register(register_req("a@x.com")).await.unwrap();
        let b = svc.register(register_req("b@x.com")).await.unwrap();

        let err = svc
            .update(
                b.id,
                UpdateProfileRequest {
                    email: Some("a@x.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateUniqueField { .. }));

        let same = svc
            .update(
                b.id,
                UpdateProfileRequest {
                    email: Some("b@x.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.email, "b@x.com");
    }

    #[tokio::test]
    async fn update_rehashes_new_password() {
        let svc = service();
        let user = svc.register(register_req("a@x.com")).await.unwrap();
        let updated = svc
            .update(
                user.id,
                UpdateProfileRequest {
                    password: Some("another1".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_ne!(updated.password_hash, user.password_hash);
        assert!(!updated.password_hash.contains("another1"));
    }

    #[tokio::test]
    async fn delete_unknown_user_is_not_found() {
        let svc = service();
        let err = svc.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(Resource::User)));
    }

    #[tokio::test]
    async fn deleted_user_is_gone() {
        let svc = service();
        let user = svc.register(register_req("a@x.com")).await.unwrap();
        svc.delete(user.id).await.unwrap();
        assert!(matches!(
            svc.get_by_id(user.id).await,
            Err(AppError::NotFound(Resource::User))
        ));
    }
}
