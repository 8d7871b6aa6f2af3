use time::OffsetDateTime;
use uuid::Uuid;

use crate::{access::Owned, error::Resource, store::Entity};

/// A recorded irrigation on one pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct Irrigation {
    pub id: Uuid,
    pub pivot_id: Uuid, // pivot owned by `owner_id` when recorded
    pub description: Option<String>,
    pub application_amount: f64,
    pub irrigation_date: OffsetDateTime,
    pub owner_id: Uuid, // copied from the creating caller
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewIrrigation {
    pub pivot_id: Uuid,
    pub description: Option<String>,
    pub application_amount: f64,
    pub irrigation_date: OffsetDateTime,
    pub owner_id: Uuid,
}

/// Irrigations are immutable once recorded; an update only touches
/// `updated_at`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IrrigationPatch;

impl Entity for Irrigation {
    type Draft = NewIrrigation;
    type Patch = IrrigationPatch;

    const RESOURCE: Resource = Resource::Irrigation;

    fn build(id: Uuid, draft: NewIrrigation, now: OffsetDateTime) -> Self {
        Self {
            id,
            pivot_id: draft.pivot_id,
            description: draft.description,
            application_amount: draft.application_amount,
            irrigation_date: draft.irrigation_date,
            owner_id: draft.owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, _patch: IrrigationPatch, now: OffsetDateTime) {
        self.updated_at = now;
    }
}

impl Owned for Irrigation {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}
