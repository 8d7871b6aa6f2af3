use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{error::AppResult, pivots::repo_types::Pivot, validation::Fields};

const DESCRIPTION_MSG: &str = "Descrição deve ser uma string";
const FLOW_RATE_TYPE_MSG: &str = "Taxa de vazão deve ser um número";
const FLOW_RATE_POSITIVE_MSG: &str = "Taxa de vazão deve ser positiva";
const DEPTH_TYPE_MSG: &str = "Profundidade mínima de aplicação deve ser um número";
const DEPTH_POSITIVE_MSG: &str = "Profundidade mínima de aplicação deve ser positiva";

#[derive(Debug)]
pub struct CreatePivotRequest {
    pub description: Option<String>,
    pub flow_rate: f64,
    pub min_application_depth: f64,
}

impl CreatePivotRequest {
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let mut f = Fields::new(body);
        let description = f.optional_string("description", 0, DESCRIPTION_MSG, DESCRIPTION_MSG);
        let flow_rate = f.positive_number("flowRate", FLOW_RATE_TYPE_MSG, FLOW_RATE_POSITIVE_MSG);
        let min_application_depth =
            f.positive_number("minApplicationDepth", DEPTH_TYPE_MSG, DEPTH_POSITIVE_MSG);

        match (flow_rate, min_application_depth) {
            (Some(flow_rate), Some(min_application_depth)) if f.is_clean() => Ok(Self {
                description,
                flow_rate,
                min_application_depth,
            }),
            _ => Err(f.into_error()),
        }
    }
}

/// Partial update; `description: null` clears it.
#[derive(Debug, Default)]
pub struct UpdatePivotRequest {
    pub description: Option<Option<String>>,
    pub flow_rate: Option<f64>,
    pub min_application_depth: Option<f64>,
}

impl UpdatePivotRequest {
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let mut f = Fields::new(body);
        let description = f.nullable_string("description", DESCRIPTION_MSG);
        let flow_rate =
            f.optional_positive_number("flowRate", FLOW_RATE_TYPE_MSG, FLOW_RATE_POSITIVE_MSG);
        let min_application_depth =
            f.optional_positive_number("minApplicationDepth", DEPTH_TYPE_MSG, DEPTH_POSITIVE_MSG);

        if !f.is_clean() {
            return Err(f.into_error());
        }
        Ok(Self {
            description,
            flow_rate,
            min_application_depth,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotResponse {
    pub id: Uuid,
    pub description: Option<String>,
    pub flow_rate: f64,
    pub min_application_depth: f64,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Pivot> for PivotResponse {
    fn from(p: Pivot) -> Self {
        Self {
            id: p.id,
            description: p.description,
            flow_rate: p.flow_rate,
            min_application_depth: p.min_application_depth,
            user_id: p.owner_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    #[test]
    fn create_requires_numbers() {
        let AppError::Validation(errors) = CreatePivotRequest::from_json(&json!({})).unwrap_err()
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("flowRate"), Some(&[FLOW_RATE_TYPE_MSG.to_string()][..]));
        assert_eq!(
            errors.get("minApplicationDepth"),
            Some(&[DEPTH_TYPE_MSG.to_string()][..])
        );
        assert!(errors.get("description").is_none());
    }

    #[test]
    fn create_accepts_optional_description() {
        let req = CreatePivotRequest::from_json(&json!({
            "flowRate": 10.5, "minApplicationDepth": 5.0
        }))
        .unwrap();
        assert_eq!(req.description, None);
        assert_eq!(req.flow_rate, 10.5);
    }

    #[test]
    fn update_reports_each_bad_field() {
        let AppError::Validation(errors) = UpdatePivotRequest::from_json(&json!({
            "flowRate": "invalid", "minApplicationDepth": -5, "description": 9999
        }))
        .unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("flowRate"), Some(&[FLOW_RATE_TYPE_MSG.to_string()][..]));
        assert_eq!(
            errors.get("minApplicationDepth"),
            Some(&[DEPTH_POSITIVE_MSG.to_string()][..])
        );
        assert_eq!(errors.get("description"), Some(&[DESCRIPTION_MSG.to_string()][..]));
    }

    #[test]
    fn update_distinguishes_null_from_absent() {
        let cleared = UpdatePivotRequest::from_json(&json!({ "description": null })).unwrap();
        assert_eq!(cleared.description, Some(None));
        let untouched = UpdatePivotRequest::from_json(&json!({ "flowRate": 2 })).unwrap();
        assert_eq!(untouched.description, None);
        assert_eq!(untouched.flow_rate, Some(2.0));
    }

    #[test]
    fn response_exposes_owner_as_user_id() {
        let now = OffsetDateTime::now_utc();
        let owner = Uuid::new_v4();
        let json = serde_json::to_value(PivotResponse::from(Pivot {
            id: Uuid::new_v4(),
            description: None,
            flow_rate: 10.5,
            min_application_depth: 5.0,
            owner_id: owner,
            created_at: now,
            updated_at: now,
        }))
        .unwrap();
        assert_eq!(json["userId"], owner.to_string());
        assert_eq!(json["flowRate"], 10.5);
        assert!(json["description"].is_null());
    }
}
