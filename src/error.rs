use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::constants::{
    MSG_DUPLICATE_PREFIX, MSG_INVALID_EMAIL, MSG_RATE_LIMITED, MSG_SERVER_ERROR, MSG_SPAM_SUSPECTED,
};
use crate::models::response::ApiResponse;
use crate::models::signup::date_string;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Deserialization error: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Collaborator unreachable: {0}")]
    Unreachable(&'static str),

    #[error("Malformed request body: {0}")]
    InvalidBody(String),

    #[error("Too many signup attempts for this email")]
    RateLimited,

    #[error("Email failed the syntax check")]
    InvalidEmailFormat,

    #[error("Email flagged by the spam heuristic")]
    SpamSuspected,

    #[error("Email already registered")]
    DuplicateEmail { first_seen: i64 },
}

/// Convert AppError into the uniform response envelope.
///
/// Expected rejections answer with their specific message and are not
/// logged as errors; everything else is logged here and collapses to the
/// generic server-error message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, MSG_RATE_LIMITED.to_string()),
            AppError::InvalidEmailFormat => (StatusCode::BAD_REQUEST, MSG_INVALID_EMAIL.to_string()),
            AppError::SpamSuspected => (StatusCode::BAD_REQUEST, MSG_SPAM_SUSPECTED.to_string()),
            AppError::DuplicateEmail { first_seen } => (
                StatusCode::CONFLICT,
                format!("{} {}", MSG_DUPLICATE_PREFIX, date_string(*first_seen)),
            ),
            AppError::InvalidBody(reason) => {
                tracing::warn!("Malformed request body: {}", reason);
                (StatusCode::BAD_REQUEST, MSG_SERVER_ERROR.to_string())
            }
            other => {
                tracing::error!("Request failed: {:?}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_SERVER_ERROR.to_string())
            }
        };

        (status, Json(ApiResponse::err(message))).into_response()
    }
}

/// How the pipeline treats a failing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Surface the failure to the caller.
    Propagate,
    /// Substitute the permissive default and carry on; the collaborator is
    /// best-effort, never a hard dependency.
    FailOpen,
    /// Record the failure and continue as if the call had succeeded.
    LogAndIgnore,
}

impl FailurePolicy {
    /// Apply this policy to a collaborator result. `fallback` replaces the
    /// value whenever the failure is absorbed.
    pub fn resolve<T>(self, collaborator: &str, result: Result<T>, fallback: T) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => match self {
                FailurePolicy::Propagate => Err(err),
                FailurePolicy::FailOpen => {
                    tracing::warn!(collaborator, error = %err, "collaborator failed, failing open");
                    Ok(fallback)
                }
                FailurePolicy::LogAndIgnore => {
                    tracing::error!(collaborator, error = %err, "collaborator failed, continuing");
                    Ok(fallback)
                }
            },
        }
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
