//! Mapping from service errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lullaby_error::{LullabyError, LullabyErrorKind, ValidationError};
use serde::Serialize;
use tracing::{error, warn};

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable reason
    pub error: String,
    /// Failing stage, for generation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

/// An error ready to be sent to the HTTP caller.
///
/// Validation failures become `422` (`400` when the body is not JSON at all),
/// generation failures become `502` tagged with their stage, and everything
/// else is an opaque `500`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// HTTP status that will be sent.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// JSON body that will be sent.
    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let status = if err.is_malformed() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        warn!(status = status.as_u16(), error = %err, "Rejected request");
        Self {
            status,
            body: ErrorBody {
                error: err.kind().to_string(),
                stage: None,
            },
        }
    }
}

impl From<LullabyError> for ApiError {
    fn from(err: LullabyError) -> Self {
        match err.kind() {
            LullabyErrorKind::Validation(validation) => validation.clone().into(),
            LullabyErrorKind::Generation(generation) => {
                error!(stage = generation.stage(), error = %generation, "Generation failed");
                Self {
                    status: StatusCode::BAD_GATEWAY,
                    body: ErrorBody {
                        error: format!(
                            "Generation failed in stage '{}': {}",
                            generation.stage(),
                            generation.provider_error().kind()
                        ),
                        stage: Some(generation.stage().to_string()),
                    },
                }
            }
            _ => {
                error!(error = %err, "Internal error while handling request");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorBody {
                        error: "Internal server error".to_string(),
                        stage: None,
                    },
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
