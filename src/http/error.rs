//! Mapping of service errors to HTTP responses.
//!
//! Every error body has the shape `{"detail": ...}`. Internal failures are logged and
//! answered with a generic message.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};

#[derive(Serialize)]
struct ErrorBody<T: Serialize> {
    detail: T,
}

fn respond<T: Serialize>(status: StatusCode, detail: T) -> Response {
    (status, Json(ErrorBody { detail })).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                debug!("Rejected request: {errors}");
                respond(StatusCode::UNPROCESSABLE_ENTITY, errors)
            }
            Self::DonationNotFound { id } => {
                debug!(id, "Donation not found");
                respond(StatusCode::NOT_FOUND, "Donation not found")
            }
            Self::MalformedBody { message } => respond(StatusCode::BAD_REQUEST, message),
            other => {
                error!("Request failed: {other}");
                respond(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
