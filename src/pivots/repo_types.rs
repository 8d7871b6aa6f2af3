use time::OffsetDateTime;
use uuid::Uuid;

use crate::{access::Owned, error::Resource, store::Entity};

/// Irrigation pivot record.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    pub id: Uuid,
    pub description: Option<String>,
    pub flow_rate: f64,             // > 0
    pub min_application_depth: f64, // > 0
    pub owner_id: Uuid,             // fixed at creation
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewPivot {
    pub description: Option<String>,
    pub flow_rate: f64,
    pub min_application_depth: f64,
    pub owner_id: Uuid,
}

/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct PivotPatch {
    pub description: Option<Option<String>>,
    pub flow_rate: Option<f64>,
    pub min_application_depth: Option<f64>,
}

impl Entity for Pivot {
    type Draft = NewPivot;
    type Patch = PivotPatch;

    const RESOURCE: Resource = Resource::Pivot;

    fn build(id: Uuid, draft: NewPivot, now: OffsetDateTime) -> Self {
        Self {
            id,
            description: draft.description,
            flow_rate: draft.flow_rate,
            min_application_depth: draft.min_application_depth,
            owner_id: draft.owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, patch: PivotPatch, now: OffsetDateTime) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(rate) = patch.flow_rate {
            self.flow_rate = rate;
        }
        if let Some(depth) = patch.min_application_depth {
            self.min_application_depth = depth;
        }
        self.updated_at = now;
    }
}

impl Owned for Pivot {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}
