use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    access::ensure_owner,
    error::AppResult,
    irrigations::{
        dto::CreateIrrigationRequest,
        repo_types::{Irrigation, NewIrrigation},
    },
    pivots::repo_types::Pivot,
    store::Repository,
};

/// Irrigation operations scoped to the calling user.
///
/// Creation reads the pivot store and then writes the irrigation store
/// without a combined lock: the pivot is guaranteed to have existed and
/// belonged to the caller when it was checked.
#[derive(Clone)]
pub struct IrrigationService {
    irrigations: Arc<dyn Repository<Irrigation>>,
    pivots: Arc<dyn Repository<Pivot>>,
}

impl IrrigationService {
    pub fn new(
        irrigations: Arc<dyn Repository<Irrigation>>,
        pivots: Arc<dyn Repository<Pivot>>,
    ) -> Self {
        Self { irrigations, pivots }
    }

    pub async fn list(&self, caller: Uuid) -> AppResult<Vec<Irrigation>> {
        let all = self.irrigations.find_all().await?;
        Ok(all.into_iter().filter(|i| i.owner_id == caller).collect())
    }

    pub async fn create(&self, caller: Uuid, req: CreateIrrigationRequest) -> AppResult<Irrigation> {
        let pivot = self.pivots.find_by_id(req.pivot_id).await?;
        ensure_owner(pivot, req.pivot_id, caller, "create irrigation")?;

        let irrigation = self
            .irrigations
            .create(NewIrrigation {
                pivot_id: req.pivot_id,
                description: req.description,
                application_amount: req.application_amount,
                irrigation_date: req.irrigation_date,
                owner_id: caller,
            })
            .await?;
        info!(
            irrigation_id = %irrigation.id,
            pivot_id = %irrigation.pivot_id,
            user_id = %caller,
            "irrigation created"
        );
        Ok(irrigation)
    }

    pub async fn get_by_id(&self, id: Uuid, caller: Uuid) -> AppResult<Irrigation> {
        let irrigation = self.irrigations.find_by_id(id).await?;
        ensure_owner(irrigation, id, caller, "read")
    }

    pub async fn delete(&self, id: Uuid, caller: Uuid) -> AppResult<()> {
        let irrigation = self.irrigations.find_by_id(id).await?;
        ensure_owner(irrigation, id, caller, "delete")?;
        self.irrigations.delete(id).await?;
        info!(irrigation_id = %id, user_id = %caller, "irrigation deleted");
        Ok(())
    }
}
