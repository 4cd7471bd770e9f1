use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::admin::admin_routes;
use super::health::health_check;
use super::users::user_routes;
use super::workouts::workout_routes;
use super::AppState;
use crate::auth::{cors_layer, jwt_auth_middleware, security_headers_layer};

pub fn create_routes(state: AppState) -> Router {
    let require_identity = middleware::from_fn_with_state(state.auth.clone(), jwt_auth_middleware);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/workouts", workout_routes().route_layer(require_identity.clone()))
        .nest("/api/users", user_routes().route_layer(require_identity.clone()))
        .nest("/api/admin", admin_routes().route_layer(require_identity))
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
        .with_state(state)
}
