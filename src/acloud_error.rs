//! Error type shared by every client operation.
//!
//! Nothing in the retrieval core logs and swallows an error: each variant is
//! handed back to the immediate caller unchanged.

use thiserror::Error;

/// Error type for Avisi Cloud client operations.
#[derive(Debug, Error)]
pub enum AcloudError {
    /// Missing required environment variable.
    #[error("missing required env var: {0}")]
    MissingEnv(&'static str),

    /// Invalid environment variable value.
    #[error("invalid env var {key}={value:?}: {reason}")]
    InvalidEnv {
        /// The environment variable key.
        key: &'static str,
        /// The offending value.
        value: String,
        /// The reason for invalidity.
        reason: &'static str,
    },

    /// Transport failure (connect, timeout, TLS, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("{status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the raw body when it could not be decoded.
        message: String,
    },

    /// The server never flagged a last page within the paging bound.
    #[error("exceeded maximum paging loops ({max}) for {url}")]
    PagingLoopExceeded {
        /// Listing URL that was being walked.
        url: String,
        /// The bound that was hit.
        max: u32,
    },

    /// Response content did not match the requested type.
    #[error("json decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// One unit of a concurrent fan-out failed.
    #[error("failed to get {resource} for {parent}: {source}")]
    FanOut {
        /// Resource kind being listed (e.g. "clusters").
        resource: &'static str,
        /// Identifier of the parent entity whose listing failed.
        parent: String,
        /// Underlying error.
        #[source]
        source: Box<AcloudError>,
    },

    /// A lookup matched more than one entity.
    #[error("ambiguous results, expected {expected} {resource}, got {got}")]
    Ambiguous {
        /// Resource kind being looked up.
        resource: &'static str,
        /// Expected number of matches.
        expected: u64,
        /// Actual number of matches.
        got: u64,
    },

    /// A lookup matched nothing.
    #[error("{0} not found")]
    NotFound(String),
}

impl AcloudError {
    /// Whether this error (or the error wrapped by a fan-out) is the paging-loop sentinel.
    #[must_use]
    pub fn is_paging_loop_exceeded(&self) -> bool {
        match self {
            Self::PagingLoopExceeded { .. } => true,
            Self::FanOut { source, .. } => source.is_paging_loop_exceeded(),
            _ => false,
        }
    }

    /// HTTP status of an API error, looking through fan-out wrappers.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::FanOut { source, .. } => source.status(),
            _ => None,
        }
    }
}
