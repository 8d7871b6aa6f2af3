use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::{AppResult, Resource},
    http::{parse_id, Envelope, JsonBody, Message},
    irrigations::dto::{CreateIrrigationRequest, IrrigationResponse},
    state::AppState,
};

pub fn irrigation_routes() -> Router<AppState> {
    Router::new()
        .route("/irrigations", get(list_irrigations).post(create_irrigation))
        .route(
            "/irrigations/:id",
            get(get_irrigation).delete(delete_irrigation),
        )
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_irrigations(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Envelope<Vec<IrrigationResponse>>>> {
    let irrigations = state.irrigations.list(user.id).await?;
    Ok(Json(Envelope::new(
        "Irrigações listadas com sucesso",
        irrigations.into_iter().map(IrrigationResponse::from).collect(),
    )))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn create_irrigation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<Envelope<IrrigationResponse>>)> {
    let req = CreateIrrigationRequest::from_json(&body)?;
    let irrigation = state.irrigations.create(user.id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Irrigação criada com sucesso", irrigation.into())),
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_irrigation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<IrrigationResponse>>> {
    let id = parse_id(&id, Resource::Irrigation)?;
    let irrigation = state.irrigations.get_by_id(id, user.id).await?;
    Ok(Json(Envelope::new("Irrigação encontrada", irrigation.into())))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_irrigation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    let id = parse_id(&id, Resource::Irrigation)?;
    state.irrigations.delete(id, user.id).await?;
    Ok(Json(Message {
        message: "Irrigação deletada com sucesso",
    }))
}
