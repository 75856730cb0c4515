use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A numeric-as-text feed field did not parse after separator stripping.
    #[error("malformed quantity: {0:?}")]
    MalformedQuantity(String),

    /// A raw feed record is missing a required field or has the wrong shape.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Negative or non-finite diameter/velocity handed to the physics engine.
    #[error("invalid physical input: {0}")]
    InvalidPhysicalInput(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{0} not found")]
    NotFound(String),

    /// Feed unreachable, non-2xx, timed out, or returned an unreadable body.
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::MalformedQuantity(_)
            | Self::MalformedRecord(_)
            | Self::InvalidPhysicalInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamFailure(_) | Self::Storage(_) | Self::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            AppError::NotFound("asteroid 1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidPhysicalInput("diameter".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::MalformedQuantity("abc".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::UpstreamFailure("timeout".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_subject() {
        let err = AppError::NotFound("asteroid 3542519".into());
        assert_eq!(err.to_string(), "asteroid 3542519 not found");
    }
}
