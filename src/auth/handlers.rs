use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    auth::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    error::AppResult,
    http::JsonBody,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let req = RegisterRequest::from_json(&body)?;
    let user = state.users.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Usuário registrado com sucesso",
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let req = LoginRequest::from_json(&body)?;
    let token = state.sessions.login(&req.email, &req.password).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            message: "Usuário autenticado com sucesso",
            token,
        }),
    ))
}
