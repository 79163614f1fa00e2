// src/context.rs
//! Mocking context and lifecycle
//!
//! A [`MockContext`] ties one rule store to one resolver slot: it owns
//! the install-once state, exposes registration and removal, and carries
//! the documented lifecycle (`new` → registrations → `reset`/`uninstall`).
//! Multiple independent contexts can each intercept their own slot; the
//! process-wide [`global`] context covers hosts with a single resolution
//! entry point.
//!
//! The typical usage pattern brackets each test: register with
//! [`MockContext::mock`]/[`MockContext::suppress`], tear down with
//! [`MockContext::unmock_all`]/[`MockContext::unsuppress_all`].

use crate::interception::installer::Installer;
use crate::interception::request::LoadRequest;
use crate::interception::resolver::ResolverSlot;
use crate::registry::rule::{Predicate, Rule, RuleKind};
use crate::registry::store::RuleStore;
use crate::utils::errors::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Context behavior knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Install the resolution hook lazily on first registration
    pub auto_install: bool,

    /// Log every request entering the installed hook
    pub trace_requests: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            auto_install: true,
            trace_requests: false,
        }
    }
}

/// Rule registration, removal, and lifecycle over one resolver slot
pub struct MockContext {
    slot: Arc<ResolverSlot>,
    rules: RuleStore,
    installer: Installer,
    config: ContextConfig,
}

impl MockContext {
    /// Create a context over the given slot with default configuration
    pub fn new(slot: Arc<ResolverSlot>) -> Self {
        Self::with_config(slot, ContextConfig::default())
    }

    /// Create a context with explicit configuration
    pub fn with_config(slot: Arc<ResolverSlot>, config: ContextConfig) -> Self {
        Self {
            slot,
            rules: RuleStore::new(),
            installer: Installer::default(),
            config,
        }
    }

    /// Slot this context intercepts
    pub fn slot(&self) -> &ResolverSlot {
        &self.slot
    }

    /// Rule store backing this context
    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    /// Install the resolution hook now. Idempotent; called implicitly by
    /// registration when `auto_install` is on, so nothing in the slot
    /// changes until a rule actually exists.
    pub fn ensure_installed(&self) -> &Self {
        self.installer
            .ensure_installed(&self.slot, &self.rules, self.config.trace_requests);
        self
    }

    /// Whether the hook currently sits in the slot
    pub fn is_installed(&self) -> bool {
        self.installer.is_installed()
    }

    fn register(&self, rule: Rule) -> &Self {
        if self.config.auto_install {
            self.ensure_installed();
        }
        self.rules.register(rule);
        self
    }

    /// Mock matching loads with the given value.
    ///
    /// `value` accepts anything convertible to `Option<Value>`; passing
    /// `None` registers a mock that yields the "no value" outcome while
    /// still being removed by [`unmock`](Self::unmock), not
    /// [`unsuppress`](Self::unsuppress).
    pub fn mock(&self, test: impl Into<Predicate>, value: impl Into<Option<Value>>) -> &Self {
        self.register(Rule::mock(test, value.into()))
    }

    /// Suppress matching loads: they produce the "no value" outcome
    pub fn suppress(&self, test: impl Into<Predicate>) -> &Self {
        self.register(Rule::suppress(test))
    }

    /// Remove all mock rules whose predicate compares equal to `test`
    pub fn unmock(&self, test: impl Into<Predicate>) -> &Self {
        self.rules.remove(&test.into(), RuleKind::Mock);
        self
    }

    /// Remove all suppress rules whose predicate compares equal to `test`
    pub fn unsuppress(&self, test: impl Into<Predicate>) -> &Self {
        self.rules.remove(&test.into(), RuleKind::Suppress);
        self
    }

    /// Remove every mock rule, leaving suppressions intact
    pub fn unmock_all(&self) -> &Self {
        self.rules.remove_all(RuleKind::Mock);
        self
    }

    /// Remove every suppress rule, leaving mocks intact
    pub fn unsuppress_all(&self) -> &Self {
        self.rules.remove_all(RuleKind::Suppress);
        self
    }

    /// Remove every rule of both kinds. The installed hook stays; with an
    /// empty store it forwards everything to the fallback.
    pub fn reset(&self) -> &Self {
        self.rules.clear();
        self
    }

    /// Restore the captured fallback into the slot and forget it. A later
    /// registration installs the hook afresh.
    pub fn uninstall(&self) -> &Self {
        self.installer.uninstall(&self.slot);
        self
    }

    /// Resolve a request through the bound slot
    pub fn resolve(&self, request: &LoadRequest) -> Result<Option<Value>> {
        self.slot.resolve(request)
    }

    /// Shorthand for resolving a bare name
    pub fn resolve_name(&self, name: &str) -> Result<Option<Value>> {
        self.slot.resolve(&LoadRequest::new(name))
    }
}

static GLOBAL_SLOT: Lazy<Arc<ResolverSlot>> = Lazy::new(|| Arc::new(ResolverSlot::unbound()));

static GLOBAL_CONTEXT: Lazy<MockContext> =
    Lazy::new(|| MockContext::new(Arc::clone(&GLOBAL_SLOT)));

/// Process-wide default resolution entry point.
///
/// Starts unbound; hosts with a single loader bind the real resolver via
/// `global_slot().bind(..)` before tests register rules.
pub fn global_slot() -> Arc<ResolverSlot> {
    Arc::clone(&GLOBAL_SLOT)
}

/// Process-wide default context over [`global_slot`]
pub fn global() -> &'static MockContext {
    &GLOBAL_CONTEXT
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_default() {
        let config = ContextConfig::default();
        assert!(config.auto_install);
        assert!(!config.trace_requests);
    }

    #[test]
    fn test_hook_installs_on_first_registration() {
        let context = MockContext::new(Arc::new(ResolverSlot::unbound()));
        assert!(!context.is_installed());

        context.mock("dep", json!(1));
        assert!(context.is_installed());
    }

    #[test]
    fn test_auto_install_off_waits_for_explicit_install() {
        let slot = Arc::new(ResolverSlot::unbound());
        let config = ContextConfig {
            auto_install: false,
            ..ContextConfig::default()
        };
        let context = MockContext::with_config(slot, config);

        context.mock("dep", json!(1));
        assert!(!context.is_installed());
        assert!(context.resolve_name("dep").is_err());

        context.ensure_installed();
        assert_eq!(context.resolve_name("dep").unwrap(), Some(json!(1)));
    }

    #[test]
    fn test_operations_chain() {
        let context = MockContext::new(Arc::new(ResolverSlot::unbound()));

        context
            .mock("a", json!(1))
            .suppress("b")
            .mock("c", json!(3))
            .unmock("c");

        assert_eq!(context.rules().rule_count(), 2);
        assert_eq!(context.resolve_name("a").unwrap(), Some(json!(1)));
        assert_eq!(context.resolve_name("b").unwrap(), None);
    }

    #[test]
    fn test_mock_may_carry_the_sentinel() {
        let context = MockContext::new(Arc::new(ResolverSlot::unbound()));
        context.mock("ghost", None);

        assert_eq!(context.resolve_name("ghost").unwrap(), None);

        // Removed as a mock, not as a suppression
        context.unsuppress("ghost");
        assert_eq!(context.rules().rule_count(), 1);
        context.unmock("ghost");
        assert!(context.rules().is_empty());
    }

    #[test]
    fn test_reset_clears_both_kinds() {
        let context = MockContext::new(Arc::new(ResolverSlot::unbound()));
        context.mock("a", json!(1)).suppress("b");

        context.reset();

        assert!(context.rules().is_empty());
        assert!(context.is_installed());
        assert!(context.resolve_name("a").is_err());
    }

    #[test]
    fn test_global_context_is_shared() {
        assert!(std::ptr::eq(global(), global()));
        assert!(Arc::ptr_eq(&global_slot(), &global_slot()));
    }
}
