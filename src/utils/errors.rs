// src/utils/errors.rs
//! Error types for dependency resolution
//!
//! The interception layer itself produces no errors of its own during
//! matching; everything here is either surfaced by host resolvers (and
//! passed through the installed hook unchanged) or raised while building
//! a pattern predicate.

use thiserror::Error;

/// Resolution and predicate-construction errors
#[derive(Debug, Error)]
pub enum LoadError {
    /// The requested name could not be resolved by any rule or fallback
    #[error("Dependency not found: {0}")]
    NotFound(String),

    /// Host resolver failure other than a missing dependency
    #[error("Resolver error: {0}")]
    Resolver(String),

    /// A pattern predicate source failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, LoadError>;
