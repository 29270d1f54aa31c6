//! Mapping of lobby errors onto HTTP responses.

use crate::error::DuelError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl DuelError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DuelError::BadRequest { .. }
            | DuelError::InvalidName { .. }
            | DuelError::InvalidCoord(_) => StatusCode::BAD_REQUEST,
            DuelError::PlayerNotFound { .. }
            | DuelError::ChallengeNotFound { .. }
            | DuelError::GameNotFound { .. } => StatusCode::NOT_FOUND,
            DuelError::NotParticipant { .. } => StatusCode::FORBIDDEN,
            DuelError::SelfChallenge
            | DuelError::PlayerBusy { .. }
            | DuelError::ChallengeNotPending { .. }
            | DuelError::NotYourTurn { .. }
            | DuelError::Move(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<JsonRejection> for DuelError {
    fn from(rejection: JsonRejection) -> Self {
        DuelError::BadRequest {
            reason: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for DuelError {
    fn from(rejection: PathRejection) -> Self {
        DuelError::BadRequest {
            reason: rejection.body_text(),
        }
    }
}

impl IntoResponse for DuelError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        debug!(%status, error = %self, "Request rejected");
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
