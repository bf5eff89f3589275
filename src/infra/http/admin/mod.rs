mod blogs;
mod health;
mod selectors;
mod shared;
mod state;

pub use state::AdminState;

use axum::{
    Router, middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use crate::infra::assets;

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(admin_root))
        .route("/blogs", get(blogs::admin_blogs))
        .route(
            "/blogs/panel",
            get(blogs::admin_blogs_panel).post(blogs::admin_blogs_panel),
        )
        .route("/_health", get(health::admin_health))
        .route("/static/admin/{*path}", get(assets::serve_admin))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn admin_root() -> Response {
    Redirect::to("/blogs").into_response()
}
