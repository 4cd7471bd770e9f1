use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};

use super::{parse_body, AppState};
use crate::auth::Identity;
use crate::errors::CoreError;
use crate::models::{CreateWorkoutLog, CreateWorkoutPlan, Stats, WorkoutLog, WorkoutPlan};

/// Plan, log and stats routes
pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/stats", get(get_stats))
        .route("/log", get(get_logs).post(log_workout))
}

#[tracing::instrument(skip(state))]
async fn list_plans(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<WorkoutPlan>>, CoreError> {
    let plans = state.plans.list_plans(&identity).await?;
    Ok(Json(plans))
}

#[tracing::instrument(skip(state, payload))]
async fn create_plan(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<CreateWorkoutPlan>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkoutPlan>), CoreError> {
    let request = parse_body(payload)?;
    let plan = state.plans.create_plan(&identity, request).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

#[tracing::instrument(skip(state))]
async fn get_stats(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Stats>, CoreError> {
    let stats = state.progress.stats(&identity).await?;
    Ok(Json(stats))
}

#[tracing::instrument(skip(state, payload))]
async fn log_workout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<CreateWorkoutLog>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkoutLog>), CoreError> {
    let request = parse_body(payload)?;
    let log = state.logs.log_workout(&identity, request).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

#[tracing::instrument(skip(state))]
async fn get_logs(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<WorkoutLog>>, CoreError> {
    let logs = state.logs.get_logs(&identity).await?;
    Ok(Json(logs))
}
