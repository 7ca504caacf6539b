//! Error types for resource operations.
//!
//! The enum is closed: every failure a backend can produce is collapsed
//! into one of four kinds, so callers can tell "does not exist" apart from
//! "the API broke" without inspecting strings.

use thiserror::Error;

/// Errors that can occur while operating on a single resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource does not exist on the backend.
    ///
    /// Read paths normally signal absence with `Ok(None)`; this variant is
    /// for operations that require the resource to exist.
    #[error("resource not found: {name}")]
    NotFound {
        /// Name of the missing resource
        name: String,
    },

    /// The declaration failed structural validation before any API call.
    #[error("validation failed: {message}")]
    ValidationFailed {
        /// What was wrong with the declaration
        message: String,
    },

    /// The backend API call failed (network, auth, server error).
    #[error("api error: {message}")]
    Api {
        /// Detailed error message from the failed call
        message: String,
    },

    /// A waiter exhausted its retry budget before the resource reached
    /// the expected terminal state.
    #[error("timed out waiting for {resource} to become {state}")]
    Timeout {
        /// Identifier of the resource being waited on
        resource: String,
        /// Terminal state that was never reached
        state: String,
    },
}

impl ResourceError {
    /// Whether this error is typically transient and worth retrying.
    ///
    /// Only API errors qualify: validation failures and timeouts will not
    /// fix themselves, and absence is a signal, not a fault.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Shorthand constructor for API errors.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }
}

/// Result type for resource operations.
pub type Result<T> = std::result::Result<T, ResourceError>;
