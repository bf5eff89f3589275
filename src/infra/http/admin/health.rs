use axum::{extract::State, response::Response};

use super::super::source_health_response;
use super::AdminState;

pub(super) async fn admin_health(State(state): State<AdminState>) -> Response {
    source_health_response(state.blogs.source_health().await)
}
