// HTTP boundary: routes and handlers over the domain services

pub mod admin;
pub mod health;
pub mod routes;
pub mod state;
pub mod users;
pub mod workouts;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use uuid::Uuid;

use crate::errors::CoreError;

pub use routes::create_routes;
pub use state::AppState;

/// Unwraps a JSON body, reporting malformed or incomplete payloads as validation failures
pub(crate) fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, CoreError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| CoreError::ValidationFailed(rejection.body_text()))
}

/// Unwraps a record id from the path. An id that cannot name a record is
/// reported as `not_found` with the caller's message.
pub(crate) fn parse_id(
    id: Result<Path<Uuid>, PathRejection>,
    not_found: &str,
) -> Result<Uuid, CoreError> {
    id.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "unparseable record id");
        CoreError::not_found(not_found)
    })
}
