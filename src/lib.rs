// src/lib.rs
//! Loadmock Dependency Interception Library
//!
//! This library intercepts "load this named dependency" requests for test
//! isolation: tests register rules that redirect or suppress resolution
//! outcomes without touching the dependency's source or the code under
//! test. Unmatched requests fall through to the host's real resolver.
//!
//! # Architecture
//!
//! The crate is structured into three modules:
//!
//! - **interception**: the replaceable resolution entry point
//!   ([`ResolverSlot`]), the collaborator contract ([`Resolver`]), and the
//!   one-time hook installer
//! - **registry**: the ordered rule cache and the predicate-matching
//!   protocol (exact, pattern, and decision-function tests)
//! - **context**: [`MockContext`], tying one rule store to one slot with
//!   a documented lifecycle, plus the process-wide default pair
//!
//! # Example
//!
//! ```
//! use loadmock::{LoadRequest, MockContext, ResolverSlot};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let slot = Arc::new(ResolverSlot::unbound());
//! let mocks = MockContext::new(Arc::clone(&slot));
//!
//! mocks.mock("config.yaml", json!({ "pool_size": 4 }));
//! mocks.suppress("telemetry");
//!
//! // The host resolves through the slot; mocked names short-circuit.
//! let config = slot.resolve(&LoadRequest::new("config.yaml")).unwrap();
//! assert_eq!(config, Some(json!({ "pool_size": 4 })));
//!
//! // Suppressed names yield the "no value" outcome.
//! let silenced = slot.resolve(&LoadRequest::new("telemetry")).unwrap();
//! assert_eq!(silenced, None);
//! ```

// Public module exports
pub mod context;
pub mod interception;
pub mod registry;
pub mod utils;

// Re-export commonly used types
pub use context::{global, global_slot, ContextConfig, MockContext};
pub use interception::request::LoadRequest;
pub use interception::resolver::{Resolver, ResolverSlot};
pub use registry::rule::{Predicate, PredicateFn, Rule, RuleKind};
pub use registry::store::RuleStore;
pub use utils::errors::{LoadError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
