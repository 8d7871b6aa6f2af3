use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{error::AppResult, irrigations::repo_types::Irrigation, validation::Fields};

#[derive(Debug)]
pub struct CreateIrrigationRequest {
    pub pivot_id: Uuid,
    pub description: Option<String>,
    pub application_amount: f64,
    pub irrigation_date: OffsetDateTime,
}

impl CreateIrrigationRequest {
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let mut f = Fields::new(body);
        let pivot_id = f.uuid("pivotId", "ID do pivô deve ser um UUID");
        let description = f.optional_string(
            "description",
            0,
            "Descrição deve ser uma string",
            "Descrição deve ser uma string",
        );
        let application_amount = f.positive_number(
            "applicationAmount",
            "Quantidade de aplicação deve ser um número",
            "Quantidade de aplicação deve ser positiva",
        );
        let irrigation_date =
            f.datetime("irrigationDate", "Data de irrigação deve ser uma data válida");

        match (pivot_id, application_amount, irrigation_date) {
            (Some(pivot_id), Some(application_amount), Some(irrigation_date))
                if f.is_clean() =>
            {
                Ok(Self {
                    pivot_id,
                    description,
                    application_amount,
                    irrigation_date,
                })
            }
            _ => Err(f.into_error()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationResponse {
    pub id: Uuid,
    pub pivot_id: Uuid,
    pub description: Option<String>,
    pub application_amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub irrigation_date: OffsetDateTime,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Irrigation> for IrrigationResponse {
    fn from(i: Irrigation) -> Self {
        Self {
            id: i.id,
            pivot_id: i.pivot_id,
            description: i.description,
            application_amount: i.application_amount,
            irrigation_date: i.irrigation_date,
            user_id: i.owner_id,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}
