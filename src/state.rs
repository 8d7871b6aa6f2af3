use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{jwt::JwtKeys, password::CredentialHasher, services::SessionService};
use crate::config::AppConfig;
use crate::irrigations::{repo_types::Irrigation, services::IrrigationService};
use crate::pivots::{repo_types::Pivot, services::PivotService};
use crate::store::MemoryStore;
use crate::users::{repo_types::User, services::UserService};

/// Composition root: every store is created here and handed to the
/// services that need it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionService,
    pub users: UserService,
    pub pivots: PivotService,
    pub irrigations: IrrigationService,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        Self::in_memory(AppConfig::from_env()?)
    }

    pub fn in_memory(config: AppConfig) -> anyhow::Result<Self> {
        let hasher = CredentialHasher::new(&config.hashing)?;
        let keys = JwtKeys::from(&config.jwt);

        let user_store = Arc::new(MemoryStore::<User>::new());
        let pivot_store = Arc::new(MemoryStore::<Pivot>::new());
        let irrigation_store = Arc::new(MemoryStore::<Irrigation>::new());

        Ok(Self {
            sessions: SessionService::new(user_store.clone(), hasher.clone(), keys)?,
            users: UserService::new(user_store, hasher),
            pivots: PivotService::new(pivot_store.clone()),
            irrigations: IrrigationService::new(irrigation_store, pivot_store),
            config: Arc::new(config),
        })
    }
}

impl FromRef<AppState> for SessionService {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
