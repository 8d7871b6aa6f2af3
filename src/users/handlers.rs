use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::AppResult,
    http::{Envelope, JsonBody, Message},
    state::AppState,
    users::dto::{UpdateProfileRequest, UserResponse},
};

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me).put(update_me).delete(delete_me))
}

#[instrument(skip(user), fields(user_id = %user.id))]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<Envelope<UserResponse>> {
    Json(Envelope::new("Usuário encontrado", user.into()))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<Envelope<UserResponse>>)> {
    let req = UpdateProfileRequest::from_json(&body)?;
    let updated = state.users.update(user.id, req).await?;
    Ok((
        StatusCode::OK,
        Json(Envelope::new("Usuário atualizado com sucesso", updated.into())),
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Message>> {
    state.users.delete(user.id).await?;
    Ok(Json(Message {
        message: "Usuário deletado com sucesso",
    }))
}
