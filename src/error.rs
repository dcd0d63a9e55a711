//! Error types for Flowgen.
//!
//! All errors in Flowgen are represented by the `FlowgenError` enum,
//! which provides specific variants for different error categories. The
//! orchestrator decides how to advance between resolver tiers by matching
//! on the variant, so failure causes stay observable instead of being
//! swallowed inside each tier.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Flowgen operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum FlowgenError {
    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// A resolver tier has no credential configured. Treated as "skip the
    /// tier", never as a failure.
    #[error("{0}")]
    Credential(String),

    /// Remote endpoint returned a non-2xx status or the transport failed.
    #[error("{0}")]
    Http(String),

    /// Remote call exceeded its configured timeout.
    #[error("{0}")]
    Timeout(String),

    /// Data conversion errors (JSON parse, schema shape).
    #[error("{0}")]
    Convert(String),

    /// A produced graph violates the FlowGraph invariants.
    #[error("{0}")]
    Graph(String),

    /// Resolver-level errors that fit no other category.
    #[error("{0}")]
    Resolver(String),
}

impl From<FlowgenError> for String {
    fn from(val: FlowgenError) -> Self {
        val.to_string()
    }
}

impl From<serde_json::Error> for FlowgenError {
    fn from(error: serde_json::Error) -> Self {
        FlowgenError::Convert(error.to_string())
    }
}

impl From<jsonschema::ValidationError<'_>> for FlowgenError {
    fn from(error: jsonschema::ValidationError<'_>) -> Self {
        FlowgenError::Convert(error.to_string())
    }
}

impl From<reqwest::Error> for FlowgenError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FlowgenError::Timeout(error.to_string())
        } else {
            FlowgenError::Http(error.to_string())
        }
    }
}
