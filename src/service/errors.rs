use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const NAME_MISSING: &str = "name missing";
pub const NUMBER_MISSING: &str = "number missing";
pub const NAME_NOT_UNIQUE: &str = "name must be unique";

// PostgreSQL error codes that mean the row failed the table's constraints.
const NOT_NULL_VIOLATION: &str = "23502";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";

pub type PhonebookResult<T> = Result<T, PhonebookError>;

#[derive(Debug, Error)]
pub enum PhonebookError {
    #[error("malformatted id")]
    InvalidId,

    #[error("{0}")]
    ValidationFailed(String),

    #[error("person not found")]
    NotFound,

    #[error("unknown endpoint")]
    UnknownEndpoint,

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PhonebookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PhonebookError::InvalidId | PhonebookError::ValidationFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            PhonebookError::NotFound | PhonebookError::UnknownEndpoint => StatusCode::NOT_FOUND,
            PhonebookError::StoreUnavailable(_) | PhonebookError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for PhonebookError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error = match &self {
            PhonebookError::NotFound => return status.into_response(),
            PhonebookError::StoreUnavailable(_) => {
                tracing::error!("request failed: {}", self);
                "store unavailable".to_owned()
            }
            PhonebookError::Internal(_) => {
                tracing::error!("request failed: {:?}", self);
                "internal server error".to_owned()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<JsonRejection> for PhonebookError {
    fn from(rejection: JsonRejection) -> Self {
        PhonebookError::ValidationFailed(rejection.to_string())
    }
}

impl From<sqlx::Error> for PhonebookError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code().map(|code| code.into_owned());

            match code.as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return PhonebookError::ValidationFailed(NAME_NOT_UNIQUE.to_owned())
                }
                Some(CHECK_VIOLATION) | Some(NOT_NULL_VIOLATION) => {
                    return PhonebookError::ValidationFailed(db_err.message().to_owned())
                }
                _ => {}
            }
        }

        let unavailable = matches!(
            err,
            sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed
        );

        if unavailable {
            PhonebookError::StoreUnavailable(err.to_string())
        } else {
            PhonebookError::Internal(err.into())
        }
    }
}
