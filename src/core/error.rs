//! Error taxonomy mapping every failure branch to an HTTP status
//!
//! Guard failures respond with their status code and an empty body.
//! Repository failures are logged and surface as 500; nothing else leaks
//! to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Failure taxonomy of the controller layer
#[derive(Debug)]
pub enum ControllerError {
    /// A request-handling method ran before `init`
    Uninitialized,

    /// Mutating verb on a readonly controller
    WriteDisabled,

    /// The token check rejected the request with this exact status
    TokenRejected(StatusCode),

    /// No entity with the requested id
    NotFound { resource: &'static str, id: i64 },

    /// The repository refused the delete
    DeletePrecondition { resource: &'static str, id: i64 },

    /// The repository operation itself failed
    Repository(anyhow::Error),
}

impl ControllerError {
    /// The HTTP status this error is surfaced as
    pub fn status_code(&self) -> StatusCode {
        match self {
            ControllerError::Uninitialized => StatusCode::INTERNAL_SERVER_ERROR,
            ControllerError::WriteDisabled => StatusCode::BAD_REQUEST,
            ControllerError::TokenRejected(status) => *status,
            ControllerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ControllerError::DeletePrecondition { .. } => StatusCode::PRECONDITION_FAILED,
            ControllerError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Uninitialized => {
                write!(f, "controller used before init")
            }
            ControllerError::WriteDisabled => {
                write!(f, "write request on a readonly controller")
            }
            ControllerError::TokenRejected(status) => {
                write!(f, "token check rejected the request with status {status}")
            }
            ControllerError::NotFound { resource, id } => {
                write!(f, "{resource} with id {id} not found")
            }
            ControllerError::DeletePrecondition { resource, id } => {
                write!(f, "delete precondition failed for {resource} with id {id}")
            }
            ControllerError::Repository(err) => {
                write!(f, "repository failure: {err}")
            }
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Repository(err) => err.source(),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for ControllerError {
    fn from(err: anyhow::Error) -> Self {
        ControllerError::Repository(err)
    }
}

impl From<serde_json::Error> for ControllerError {
    fn from(err: serde_json::Error) -> Self {
        ControllerError::Repository(err.into())
    }
}

impl IntoResponse for ControllerError {
    fn into_response(self) -> Response {
        if let ControllerError::Repository(err) = &self {
            tracing::error!("repository failure: {err:#}");
        }
        self.status_code().into_response()
    }
}
