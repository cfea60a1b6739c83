//! # Framework Errors
//!
//! Errors crossing the boundary between the list controller and the remote
//! resource API. Every variant is recoverable: the operator retries.

use crate::deletion::DeletionError;
use serde_json::Value;

/// Fallback text shown when a request failed without a server description.
pub const GENERIC_NETWORK_ERROR: &str = "The request could not be completed. Check your connection and try again.";

/// Errors returned by the remote resource API and the channels leading to it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request did not complete (connection reset, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a structured error payload.
    #[error("Server error: {description}")]
    Server {
        status: Option<u16>,
        description: String,
    },
    /// Rejected input. Owned by the resource forms; the list core only forwards it.
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

impl ApiError {
    /// Shorthand for a server error without an HTTP status.
    pub fn server(description: impl Into<String>) -> Self {
        Self::Server {
            status: None,
            description: description.into(),
        }
    }

    /// Builds a server error from a structured error body.
    ///
    /// Looks at `hydra:description`, `description`, `detail` and `hydra:title`
    /// in that order. A body with none of them yields an empty description,
    /// which [`ApiError::description`] replaces with the generic text.
    pub fn from_payload(status: Option<u16>, payload: &Value) -> Self {
        let description = ["hydra:description", "description", "detail", "hydra:title"]
            .iter()
            .find_map(|key| payload.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        Self::Server {
            status,
            description,
        }
    }

    /// Human-readable text for notifications.
    pub fn description(&self) -> String {
        match self {
            Self::Server { description, .. } if !description.is_empty() => description.clone(),
            Self::Validation(message) if !message.is_empty() => message.clone(),
            _ => GENERIC_NETWORK_ERROR.to_string(),
        }
    }
}

/// Errors returned by a [`ListHandle`](crate::ListHandle).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("No confirmation dialog is open")]
    NothingToConfirm,
    #[error(transparent)]
    Deletion(#[from] DeletionError),
    #[error("A merge is already in progress")]
    MergeInProgress,
    #[error("List controller stopped")]
    Closed,
}
