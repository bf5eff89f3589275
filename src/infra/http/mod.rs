mod admin;
mod middleware;

pub use admin::{AdminState, build_admin_router};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{error::ErrorReport, sources::SourceError};

const DATASTAR_REQUEST_HEADER: &str = "datastar-request";

fn source_health_response(result: Result<usize, SourceError>) -> Response {
    match result {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::source_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
