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
    pivots::dto::{CreatePivotRequest, PivotResponse, UpdatePivotRequest},
    state::AppState,
};

pub fn pivot_routes() -> Router<AppState> {
    Router::new()
        .route("/pivots", get(list_pivots).post(create_pivot))
        .route(
            "/pivots/:id",
            get(get_pivot).put(update_pivot).delete(delete_pivot),
        )
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_pivots(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Envelope<Vec<PivotResponse>>>> {
    let pivots = state.pivots.list(user.id).await?;
    Ok(Json(Envelope::new(
        "Pivôs listados com sucesso",
        pivots.into_iter().map(PivotResponse::from).collect(),
    )))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn create_pivot(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<Envelope<PivotResponse>>)> {
    let req = CreatePivotRequest::from_json(&body)?;
    let pivot = state.pivots.create(user.id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Pivô criado com sucesso", pivot.into())),
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_pivot(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<PivotResponse>>> {
    let id = parse_id(&id, Resource::Pivot)?;
    let pivot = state.pivots.get_by_id(id, user.id).await?;
    Ok(Json(Envelope::new("Pivô encontrado", pivot.into())))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn update_pivot(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<Envelope<PivotResponse>>> {
    let id = parse_id(&id, Resource::Pivot)?;
    let req = UpdatePivotRequest::from_json(&body)?;
    let pivot = state.pivots.update(id, req, user.id).await?;
    Ok(Json(Envelope::new("Pivô atualizado com sucesso", pivot.into())))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_pivot(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Message>> {
    let id = parse_id(&id, Resource::Pivot)?;
    state.pivots.delete(id, user.id).await?;
    Ok(Json(Message {
        message: "Pivô deletado com sucesso",
    }))
}
