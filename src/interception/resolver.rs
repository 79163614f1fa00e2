// src/interception/resolver.rs
//! Replaceable resolution entry point
//!
//! The slot is the first-class stand-in for a host's dependency loader:
//! the host routes every load through [`ResolverSlot::resolve`], and the
//! interception installer swaps a rule-matching wrapper into the slot
//! while keeping the previous occupant reachable as a fallback.

use crate::interception::request::LoadRequest;
use crate::utils::errors::{LoadError, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Outcome contract for a dependency load
///
/// `Ok(Some(value))` is a resolved value, `Ok(None)` the explicit
/// "no value" outcome, and `Err(_)` a resolution failure.
pub trait Resolver: Send + Sync {
    fn resolve(&self, request: &LoadRequest) -> Result<Option<Value>>;
}

impl<F> Resolver for F
where
    F: Fn(&LoadRequest) -> Result<Option<Value>> + Send + Sync,
{
    fn resolve(&self, request: &LoadRequest) -> Result<Option<Value>> {
        self(request)
    }
}

/// Occupant of unbound slots: every lookup fails
struct Unbound;

impl Resolver for Unbound {
    fn resolve(&self, request: &LoadRequest) -> Result<Option<Value>> {
        Err(LoadError::NotFound(request.name.clone()))
    }
}

/// Replaceable resolution entry point
pub struct ResolverSlot {
    current: RwLock<Arc<dyn Resolver>>,
}

impl ResolverSlot {
    /// Create a slot over the host's real resolver
    pub fn new(host: Arc<dyn Resolver>) -> Self {
        Self {
            current: RwLock::new(host),
        }
    }

    /// Create a slot with no host resolver; every unmatched lookup fails
    /// with [`LoadError::NotFound`]
    pub fn unbound() -> Self {
        Self::new(Arc::new(Unbound))
    }

    /// Replace the current occupant (host setup)
    pub fn bind(&self, resolver: Arc<dyn Resolver>) {
        *self.current.write() = resolver;
    }

    /// Resolve a request through the current occupant.
    ///
    /// The occupant is cloned out of the lock before the call, so rule
    /// predicates and fallbacks may re-enter the slot.
    pub fn resolve(&self, request: &LoadRequest) -> Result<Option<Value>> {
        let resolver = Arc::clone(&self.current.read());
        resolver.resolve(request)
    }

    /// Current occupant
    pub fn current(&self) -> Arc<dyn Resolver> {
        Arc::clone(&self.current.read())
    }

    /// Swap in a wrapper built from the previous occupant, returning that
    /// previous occupant. Used by the interception installer.
    pub(crate) fn install<F>(&self, wrap: F) -> Arc<dyn Resolver>
    where
        F: FnOnce(Arc<dyn Resolver>) -> Arc<dyn Resolver>,
    {
        let mut current = self.current.write();
        let previous = Arc::clone(&current);
        *current = wrap(Arc::clone(&previous));
        debug!("Resolver slot occupant replaced");
        previous
    }
}

impl Default for ResolverSlot {
    fn default() -> Self {
        Self::unbound()
    }
}
