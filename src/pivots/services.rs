use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    access::ensure_owner,
    error::AppResult,
    pivots::{
        dto::{CreatePivotRequest, UpdatePivotRequest},
        repo_types::{NewPivot, Pivot, PivotPatch},
    },
    store::Repository,
};

/// Pivot operations scoped to the calling user.
#[derive(Clone)]
pub struct PivotService {
    pivots: Arc<dyn Repository<Pivot>>,
}

impl PivotService {
    pub fn new(pivots: Arc<dyn Repository<Pivot>>) -> Self {
        Self { pivots }
    }

    pub async fn list(&self, caller: Uuid) -> AppResult<Vec<Pivot>> {
        let all = self.pivots.find_all().await?;
        Ok(all.into_iter().filter(|p| p.owner_id == caller).collect())
    }

    pub async fn create(&self, caller: Uuid, req: CreatePivotRequest) -> AppResult<Pivot> {
        let pivot = self
            .pivots
            .create(NewPivot {
                description: req.description,
                flow_rate: req.flow_rate,
                min_application_depth: req.min_application_depth,
                owner_id: caller,
            })
            .await?;
        info!(pivot_id = %pivot.id, user_id = %caller, "pivot created");
        Ok(pivot)
    }

    pub async fn get_by_id(&self, id: Uuid, caller: Uuid) -> AppResult<Pivot> {
        self.owned(id, caller, "read").await
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdatePivotRequest,
        caller: Uuid,
    ) -> AppResult<Pivot> {
        self.owned(id, caller, "update").await?;
        let pivot = self
            .pivots
            .update(
                id,
                PivotPatch {
                    description: req.description,
                    flow_rate: req.flow_rate,
                    min_application_depth: req.min_application_depth,
                },
            )
            .await?;
        info!(pivot_id = %id, user_id = %caller, "pivot updated");
        Ok(pivot)
    }

    pub async fn delete(&self, id: Uuid, caller: Uuid) -> AppResult<()> {
        self.owned(id, caller, "delete").await?;
        self.pivots.delete(id).await?;
        info!(pivot_id = %id, user_id = %caller, "pivot deleted");
        Ok(())
    }

    async fn owned(&self, id: Uuid, caller: Uuid, operation: &'static str) -> AppResult<Pivot> {
        let pivot = self.pivots.find_by_id(id).await?;
        ensure_owner(pivot, id, caller, operation)
    }
}
