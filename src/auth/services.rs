use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    auth::{jwt::JwtKeys, password::CredentialHasher},
    error::{AppError, AppResult},
    store::Repository,
    users::{repo::UserRepository, repo_types::User},
};

/// Issues bearer tokens and resolves them back to users.
///
/// Tokens are self-contained JWTs; nothing is stored server side.
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
    keys: JwtKeys,
    // verified against on unknown emails so both failures cost one Argon2 run
    dummy_hash: Arc<str>,
}

impl SessionService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: CredentialHasher,
        keys: JwtKeys,
    ) -> anyhow::Result<Self> {
        let dummy_hash = hasher.hash("irrigation-api-dummy-password")?.into();
        Ok(Self {
            users,
            hasher,
            keys,
            dummy_hash,
        })
    }

    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let Some(user) = self.users.find_by_email(email).await? else {
            self.hasher.verify(password, &self.dummy_hash)?;
            warn!(email = %email, "login unknown email");
            return Err(AppError::Unauthorized);
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "login invalid password");
            return Err(AppError::Unauthorized);
        }

        let token = self.keys.sign(user.id)?;
        info!(user_id = %user.id, "user logged in");
        Ok(token)
    }

    /// `None` for malformed, tampered, expired or foreign tokens.
    pub fn resolve_token(&self, token: &str) -> Option<Uuid> {
        match self.keys.verify(token) {
            Ok(claims) => Some(claims.sub),
            Err(e) => {
                debug!(error = %e, "token rejected");
                None
            }
        }
    }

    /// Resolves the token and loads its subject; a deleted user yields `None`.
    pub async fn authenticate(&self, token: &str) -> AppResult<Option<User>> {
        let Some(user_id) = self.resolve_token(token) else {
            return Ok(None);
        };
        let user = self.users.find_by_id(user_id).await?;
        if user.is_none() {
            debug!(user_id = %user_id, "token subject no longer exists");
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        store::MemoryStore,
        users::repo_types::NewUser,
    };
    use time::{Duration, OffsetDateTime};

    struct Fixture {
        store: Arc<MemoryStore<User>>,
        sessions: SessionService,
        keys: JwtKeys,
    }

    async fn fixture() -> (Fixture, User) {
        let cfg = AppConfig::for_tests();
        let hasher = CredentialHasher::new(&cfg.hashing).unwrap();
        let keys = JwtKeys::from(&cfg.jwt);
        let store = Arc::new(MemoryStore::<User>::new());
        let user = store
            .create(NewUser {
                email: "e@x.com".into(),
                name: "A".into(),
                password_hash: hasher.hash("secret1").unwrap(),
            })
            .await
            .unwrap();
        let sessions = SessionService::new(store.clone(), hasher, keys.clone()).unwrap();
        (
            Fixture {
                store,
                sessions,
                keys,
            },
            user,
        )
    }

    #[tokio::test]
    async fn login_token_resolves_to_user() {
        let (fx, user) = fixture().await;
        let token = fx.sessions.login("e@x.com", "secret1").await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(fx.sessions.resolve_token(&token), Some(user.id));
        let authed = fx.sessions.authenticate(&token).await.unwrap();
        assert_eq!(authed.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_the_same() {
        let (fx, _) = fixture().await;
        let unknown = fx.sessions.login("nobody@x.com", "secret1").await.unwrap_err();
        let wrong = fx.sessions.login("e@x.com", "wrong-pass").await.unwrap_err();
        assert!(matches!(unknown, AppError::Unauthorized));
        assert!(matches!(wrong, AppError::Unauthorized));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn tampered_token_is_absent() {
        let (fx, _) = fixture().await;
        let token = fx.sessions.login("e@x.com", "secret1").await.unwrap();
        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", unsigned, flipped, &signature[1..]);

        assert_eq!(fx.sessions.resolve_token(&tampered), None);
        assert_eq!(fx.sessions.resolve_token("not-a-jwt"), None);
        assert!(fx.sessions.authenticate(&tampered).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_token_is_absent() {
        let (fx, user) = fixture().await;
        let issued = OffsetDateTime::now_utc() - Duration::days(8);
        let token = fx.keys.sign_at(user.id, issued).unwrap();
        assert_eq!(fx.sessions.resolve_token(&token), None);
    }

    #[tokio::test]
    async fn deleting_user_invalidates_authentication() {
        let (fx, user) = fixture().await;
        let token = fx.sessions.login("e@x.com", "secret1").await.unwrap();
        fx.store.delete(user.id).await.unwrap();

        assert_eq!(fx.sessions.resolve_token(&token), Some(user.id));
        assert!(fx.sessions.authenticate(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dummy_hash_matches_configured_params() {
        let (fx, _) = fixture().await;
        let real = fx.store.find_by_email("e@x.com").await.unwrap().unwrap();
        let params = |h: &str| h.rsplitn(3, '$').nth(2).map(str::to_owned);

        assert!(fx.sessions.dummy_hash.starts_with("$argon2id$"));
        assert_eq!(params(&fx.sessions.dummy_hash), params(&real.password_hash));
        assert!(!fx
            .sessions
            .hasher
            .verify("secret1", &fx.sessions.dummy_hash)
            .unwrap());
    }
}
