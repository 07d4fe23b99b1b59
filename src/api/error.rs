//! Mapping of service errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mastermind_engine::EngineError;
use tracing::{error, warn};

use crate::api::ErrorResponse;
use crate::service::ServiceError;

/// Error returned by a request handler.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum ApiError {
    /// The service rejected or failed the request.
    #[display("{}", _0)]
    Service(ServiceError),

    /// The request body was missing, not JSON, or the wrong shape.
    #[display("Invalid request body: {}", _0)]
    Body(JsonRejection),

    /// The blocking task running the request panicked or was cancelled.
    #[display("Task failed: {}", _0)]
    Task(tokio::task::JoinError),
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// HTTP status and error kind for this error.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Service(ServiceError::GameNotFound(_)) => (StatusCode::NOT_FOUND, "GameNotFound"),
            Self::Service(ServiceError::Engine(engine)) => {
                let status = match engine {
                    EngineError::UnknownColor(_) | EngineError::InvalidGuess(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    EngineError::GameAlreadyFinished(_) => StatusCode::CONFLICT,
                    EngineError::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, engine.kind())
            }
            Self::Service(ServiceError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "StorageError")
            }
            Self::Body(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
            Self::Task(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.classify();
        if status.is_server_error() {
            error!(error = %self, kind, "Request failed");
        } else {
            warn!(error = %self, kind, "Request rejected");
        }

        let body = ErrorResponse {
            error: kind.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
