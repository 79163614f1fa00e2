// src/interception/installer.rs
//! One-time installation of the rule-matching hook
//!
//! The installer swaps an [`InterceptResolver`] into a slot exactly once,
//! capturing the slot's previous occupant as the fallback. Repeated
//! installs are no-ops, so the fallback can never be captured twice and
//! the wrapper can never end up wrapping itself.

use crate::interception::request::LoadRequest;
use crate::interception::resolver::{Resolver, ResolverSlot};
use crate::registry::store::RuleStore;
use crate::utils::errors::Result;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Wrapper resolver consulted for every request entering the slot
pub(crate) struct InterceptResolver {
    rules: RuleStore,
    fallback: Arc<dyn Resolver>,
    trace_requests: bool,
}

impl Resolver for InterceptResolver {
    fn resolve(&self, request: &LoadRequest) -> Result<Option<Value>> {
        if self.trace_requests {
            debug!("Intercepted load request for {}", request.name);
        }

        if let Some(rule) = self.rules.first_match(request) {
            debug!("{} rule matched {}", rule.kind, request.name);
            return Ok(rule.replacement);
        }

        // No rule matched; the fallback answers, errors included
        self.fallback.resolve(request)
    }
}

/// Install-once state for one context
#[derive(Default)]
pub(crate) struct Installer {
    fallback: Mutex<Option<Arc<dyn Resolver>>>,
}

impl Installer {
    /// Install the rule-matching hook into `slot` unless already
    /// installed. The slot's occupant is captured exactly once as the
    /// fallback.
    pub(crate) fn ensure_installed(
        &self,
        slot: &ResolverSlot,
        rules: &RuleStore,
        trace_requests: bool,
    ) {
        let mut fallback = self.fallback.lock();
        if fallback.is_some() {
            trace!("Resolution hook already installed");
            return;
        }

        let rules = rules.clone();
        let previous = slot.install(move |prev| {
            Arc::new(InterceptResolver {
                rules,
                fallback: prev,
                trace_requests,
            })
        });

        *fallback = Some(previous);
        info!("Resolution hook installed");
    }

    /// Restore the captured fallback into the slot and forget it. No-op
    /// when the hook is not installed.
    ///
    /// Restoration assumes the slot was not re-wrapped by someone else
    /// after installation.
    pub(crate) fn uninstall(&self, slot: &ResolverSlot) {
        if let Some(previous) = self.fallback.lock().take() {
            slot.bind(previous);
            info!("Resolution hook removed, fallback restored");
        }
    }

    /// Whether the hook currently holds a captured fallback
    pub(crate) fn is_installed(&self) -> bool {
        self.fallback.lock().is_some()
    }
}
