use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use uuid::Uuid;

use super::{parse_id, AppState};
use crate::auth::Identity;
use crate::errors::CoreError;
use crate::models::{HireResponse, User};

/// Client and trainer directory routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/trainers", get(list_trainers))
        .route("/hire/:id", put(hire_trainer))
}

#[tracing::instrument(skip(state))]
async fn list_clients(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<User>>, CoreError> {
    let clients = state.hiring.list_clients(&identity).await?;
    Ok(Json(clients))
}

#[tracing::instrument(skip(state))]
async fn list_trainers(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<User>>, CoreError> {
    let trainers = state.hiring.list_verified_trainers(&identity).await?;
    Ok(Json(trainers))
}

#[tracing::instrument(skip(state))]
async fn hire_trainer(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    trainer_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<HireResponse>, CoreError> {
    let trainer_id = parse_id(trainer_id, "Trainer not found or not verified")?;
    let response = state.hiring.hire_trainer(&identity, trainer_id).await?;
    Ok(Json(response))
}
