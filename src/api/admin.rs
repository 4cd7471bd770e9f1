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
use crate::models::{BulkVerifyResponse, User};

/// Trainer verification routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/pending", get(list_pending_trainers))
        .route("/verify/:id", put(verify_trainer))
        .route("/verify-all", put(verify_all_pending_trainers))
}

#[tracing::instrument(skip(state))]
async fn list_pending_trainers(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<User>>, CoreError> {
    let trainers = state.hiring.list_pending_trainers(&identity).await?;
    Ok(Json(trainers))
}

#[tracing::instrument(skip(state))]
async fn verify_trainer(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    trainer_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<User>, CoreError> {
    let trainer_id = parse_id(trainer_id, "Trainer not found")?;
    let trainer = state.hiring.verify_trainer(&identity, trainer_id).await?;
    Ok(Json(trainer))
}

#[tracing::instrument(skip(state))]
async fn verify_all_pending_trainers(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<BulkVerifyResponse>, CoreError> {
    let response = state.hiring.verify_all_pending_trainers(&identity).await?;
    Ok(Json(response))
}
