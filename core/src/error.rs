//! Error types for the product catalog client.
//!
//! # Design
//! Every non-2xx response lands in `Server` carrying the message the backend
//! put in its `{"message": ...}` body, or a fixed fallback when there is none.
//! `Validation` is raised before any request leaves the process, so a caller
//! seeing it knows the network was never touched. `InconsistentResponse`
//! covers a 2xx that lacks the entity the operation promised.

use std::fmt;

use thiserror::Error;

/// The remote operation an error or notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Errors returned by `ProductClient` parse methods and `ProductStore`
/// mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A client-side precondition failed; no request was issued.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// The request could not be completed at the transport level.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx response carried no entity where one was required.
    #[error("{operation} succeeded but the response carried no product")]
    InconsistentResponse { operation: Operation },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Text suitable for a user-facing notification.
    ///
    /// `Server` yields the backend's message verbatim; other variants use
    /// their `Display` form.
    pub fn message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
