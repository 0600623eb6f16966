use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::admin_auth::handlers::{check_session, login, logout};
use crate::features::admin_auth::services::SessionGate;

/// Admin session routes (no authentication required)
pub fn routes(gate: Arc<SessionGate>) -> Router {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/check", get(check_session))
        .with_state(gate)
}
