//! HTTP mapping for request-scoped workload failures.
//!
//! Every workload error ends the request with 500 and a short plain-text body.
//! The process keeps serving.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use burnin_core::BurninError;

pub struct ApiError(pub BurninError);

impl From<BurninError> for ApiError {
    fn from(e: BurninError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.0.to_string(),
        )
            .into_response()
    }
}
