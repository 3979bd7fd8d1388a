//! Error types for the HTTP binding layer.

use std::fmt;

/// Well-known binding-layer error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum RpcErrorCode {
    /// No registered operation matches the request URI.
    #[default]
    NotFound,
    /// The request could not be interpreted at all.
    InvalidRequest,
    /// The matched operation has no handler implementation.
    NotImplemented,
    /// An unexpected failure inside the service.
    InternalError,
}

impl RpcErrorCode {
    /// Returns the error code as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::InvalidRequest => "InvalidRequest",
            Self::NotImplemented => "NotImplemented",
            Self::InternalError => "InternalError",
        }
    }

    /// The HTTP status this code maps to.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::InvalidRequest => http::StatusCode::BAD_REQUEST,
            Self::NotImplemented => http::StatusCode::NOT_IMPLEMENTED,
            Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A binding-layer error carried back to the client as a structured body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct RpcError {
    /// The error code.
    pub code: RpcErrorCode,
    /// Human-readable detail.
    pub message: String,
}

impl RpcError {
    /// Create an error with the given code and message.
    #[must_use]
    pub fn with_message(code: RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The "no operation matches this URI" outcome.
    #[must_use]
    pub fn not_found() -> Self {
        Self::with_message(
            RpcErrorCode::NotFound,
            "No operation matches the requested URI",
        )
    }

    /// The matched operation has no handler implementation.
    #[must_use]
    pub fn not_implemented(operation: &str) -> Self {
        Self::with_message(
            RpcErrorCode::NotImplemented,
            format!("Operation {operation} is not implemented"),
        )
    }

    /// An unexpected internal failure.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(RpcErrorCode::InternalError, message)
    }

    /// The HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        self.code.status_code()
    }
}
