//! # Error Handling for Query Parameters
//!
//! Every directive parser reports failures through [`QueryError`]. There is one
//! variant per violated contract and no recovery: the first error aborts the
//! call and is returned verbatim.
//!
//! All variants are client errors. When used as an axum rejection the error is
//! rendered as `400 Bad Request` with a JSON body:
//!
//! ```json
//! {"error": "invalid filter: 'not a valid filter'"}
//! ```
//!
//! ## Logging
//!
//! Rejections are logged at `debug` level through the `tracing` crate when they
//! are turned into a response. Nothing is printed unless the host application
//! installs a subscriber.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Error raised while decoding or interpreting query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The limit value is not a non-negative integer
    InvalidLimit { value: String },

    /// The offset value is not a non-negative integer
    InvalidOffset { value: String },

    /// The page value is not an integer, or the computed offset overflowed
    InvalidPage { value: String },

    /// A filter value does not match `<field> <operator> <value>`
    InvalidFilter { value: String },

    /// More filter values than the configured maximum
    TooManyFilters { count: usize, max: usize },

    /// A sort value does not match `<field> asc|desc`
    InvalidSort { value: String },

    /// More sort values than the configured maximum
    TooManySorts { count: usize, max: usize },

    /// A join value is not a lowercase alphanumeric relation name
    InvalidJoin { value: String },

    /// More join values than the configured maximum
    TooManyJoins { count: usize, max: usize },

    /// The raw query string could not be decoded
    Decode {
        /// Description of the malformed input
        message: String,
    },

    /// A filter value could not be converted to the requested type
    InvalidValue {
        /// The raw text that failed conversion
        value: String,
        /// Name of the requested type, e.g. "integer"
        expected: &'static str,
    },
}

impl QueryError {
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_value(value: &str, expected: &'static str) -> Self {
        Self::InvalidValue {
            value: value.to_string(),
            expected,
        }
    }

    /// HTTP status code for this error. Every query error is the client's fault.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// User-facing message. Only echoes the caller's own input back.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidLimit { value } => format!("invalid limit: '{value}'"),
            Self::InvalidOffset { value } => format!("invalid offset: '{value}'"),
            Self::InvalidPage { value } => format!("invalid page: '{value}'"),
            Self::InvalidFilter { value } => format!("invalid filter: '{value}'"),
            Self::InvalidSort { value } => format!("invalid sort: '{value}'"),
            Self::InvalidJoin { value } => format!("invalid join: '{value}'"),
            Self::TooManyFilters { count, max } => {
                format!("too many filters: {count} given, at most {max} allowed")
            }
            Self::TooManySorts { count, max } => {
                format!("too many sorts: {count} given, at most {max} allowed")
            }
            Self::TooManyJoins { count, max } => {
                format!("too many joins: {count} given, at most {max} allowed")
            }
            Self::Decode { message } => format!("malformed query string: {message}"),
            Self::InvalidValue { value, expected } => {
                format!("invalid {expected} value: '{value}'")
            }
        }
    }
}

/// Error response sent to users
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        tracing::debug!(
            error = %message,
            status = %status,
            "Rejected query parameters"
        );

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for QueryError {}
