use axum::http::StatusCode;
use thiserror::Error;

use crate::view::ViewError;

/// Failures talking to the backend API or the session file.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("session file is malformed: {0}")]
    Session(#[from] serde_json::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "sign in required".to_string(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }

    pub fn bad_gateway(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(_) | ClientError::Status { .. } => Self::bad_gateway(err),
            ClientError::Storage(_) | ClientError::Session(_) => Self::internal(err),
        }
    }
}

impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
