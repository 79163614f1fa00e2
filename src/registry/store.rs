// src/registry/store.rs
//! Ordered rule cache and matcher
//!
//! The store keeps rules most-recently-registered first: registration
//! prepends, so re-mocking an already mocked or suppressed name makes the
//! newest rule win without removing the old one. Matching is a single
//! ordered pass that stops at the first satisfied predicate; mock and
//! suppress rules share that one precedence order.

use crate::interception::request::LoadRequest;
use crate::registry::rule::{Predicate, Rule, RuleKind};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Ordered, shared rule cache
///
/// Clones share the same underlying cache, so the store can be handed to
/// the installed hook while the owning context keeps mutating it.
#[derive(Clone, Default)]
pub struct RuleStore {
    rules: Arc<Mutex<Vec<Rule>>>,
}

impl RuleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a rule so the newest registration matches first
    pub fn register(&self, rule: Rule) {
        debug!("Registering {} rule for {}", rule.kind, rule.predicate);
        self.rules.lock().insert(0, rule);
    }

    /// Remove every rule of the given kind whose predicate compares equal
    /// to `predicate`; rules of the other kind are untouched even when
    /// their predicate is identical. Removing nothing is not an error.
    pub fn remove(&self, predicate: &Predicate, kind: RuleKind) {
        let mut rules = self.rules.lock();
        let before = rules.len();
        rules.retain(|rule| rule.kind != kind || !rule.predicate.same_as(predicate));

        let removed = before - rules.len();
        if removed > 0 {
            debug!("Removed {} {} rule(s) for {}", removed, kind, predicate);
        }
    }

    /// Remove every rule of the given kind, leaving the other kind intact
    pub fn remove_all(&self, kind: RuleKind) {
        let mut rules = self.rules.lock();
        let before = rules.len();
        rules.retain(|rule| rule.kind != kind);
        debug!("Removed {} {} rule(s)", before - rules.len(), kind);
    }

    /// Remove every rule of both kinds
    pub fn clear(&self) {
        self.rules.lock().clear();
        debug!("Cleared rule cache");
    }

    /// First rule satisfied by the request, newest registration first.
    ///
    /// Predicates are evaluated on a snapshot taken outside the lock, so
    /// a decision function may re-enter the store. Each candidate's
    /// function predicate is invoked at most once per request.
    pub fn first_match(&self, request: &LoadRequest) -> Option<Rule> {
        let snapshot: Vec<Rule> = self.rules.lock().clone();
        snapshot
            .into_iter()
            .find(|rule| rule.predicate.matches(request))
    }

    /// Number of live rules of both kinds
    pub fn rule_count(&self) -> usize {
        self.rules.lock().len()
    }

    /// Whether no rules are registered
    pub fn is_empty(&self) -> bool {
        self.rules.lock().is_empty()
    }

    /// Ordered copy of the live rules, newest first
    pub fn snapshot(&self) -> Vec<Rule> {
        self.rules.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_register_prepends() {
        let store = RuleStore::new();
        store.register(Rule::mock("a", Some(json!(1))));
        store.register(Rule::mock("b", Some(json!(2))));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot[0].predicate.same_as(&Predicate::from("b")));
    }

    #[test]
    fn test_first_match_takes_newest() {
        let store = RuleStore::new();
        store.register(Rule::mock("dep", Some(json!("old"))));
        store.register(Rule::mock("dep", Some(json!("new"))));

        let matched = store.first_match(&LoadRequest::new("dep")).unwrap();
        assert_eq!(matched.replacement, Some(json!("new")));
    }

    #[test]
    fn test_no_match_on_exhaustion() {
        let store = RuleStore::new();
        store.register(Rule::mock("a", Some(json!(1))));
        assert!(store.first_match(&LoadRequest::new("b")).is_none());
    }

    #[test]
    fn test_remove_is_kind_scoped() {
        let store = RuleStore::new();
        store.register(Rule::mock("dep", Some(json!(1))));
        store.register(Rule::suppress("dep"));

        store.remove(&Predicate::from("dep"), RuleKind::Suppress);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].kind, RuleKind::Mock);
    }

    #[test]
    fn test_remove_takes_every_equal_rule_of_the_kind() {
        let store = RuleStore::new();
        store.register(Rule::mock("dep", Some(json!(1))));
        store.register(Rule::mock("dep", Some(json!(2))));
        store.register(Rule::mock("other", Some(json!(3))));

        store.remove(&Predicate::from("dep"), RuleKind::Mock);

        assert_eq!(store.rule_count(), 1);
        assert!(store.first_match(&LoadRequest::new("dep")).is_none());
    }

    #[test]
    fn test_remove_missing_is_a_noop() {
        let store = RuleStore::new();
        store.register(Rule::mock("a", Some(json!(1))));
        store.remove(&Predicate::from("never-registered"), RuleKind::Mock);
        assert_eq!(store.rule_count(), 1);
    }

    #[test]
    fn test_remove_all_leaves_the_other_kind() {
        let store = RuleStore::new();
        store.register(Rule::mock("a", Some(json!(1))));
        store.register(Rule::mock(Predicate::pattern("^b").unwrap(), Some(json!(2))));
        store.register(Rule::suppress("c"));

        store.remove_all(RuleKind::Mock);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].kind, RuleKind::Suppress);
    }

    #[test]
    fn test_function_predicate_runs_once_per_request() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);

        let store = RuleStore::new();
        store.register(Rule::mock("hit", Some(json!(1))));
        store.register(Rule::mock(
            Predicate::func(move |_: &LoadRequest| {
                counted.fetch_add(1, Ordering::SeqCst);
                false
            }),
            Some(json!(2)),
        ));

        let matched = store.first_match(&LoadRequest::new("hit")).unwrap();
        assert_eq!(matched.replacement, Some(json!(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    proptest! {
        /// For any stack of registrations over one name, the most
        /// recently registered rule decides the outcome, regardless of
        /// how mocks and suppressions interleave.
        #[test]
        fn prop_newest_registration_wins(kinds in proptest::collection::vec(any::<bool>(), 1..16)) {
            let store = RuleStore::new();
            for (index, is_mock) in kinds.iter().enumerate() {
                if *is_mock {
                    store.register(Rule::mock("dep", Some(json!(index))));
                } else {
                    store.register(Rule::suppress("dep"));
                }
            }

            let matched = store.first_match(&LoadRequest::new("dep")).unwrap();
            let last = kinds.len() - 1;
            if kinds[last] {
                prop_assert_eq!(matched.kind, RuleKind::Mock);
                prop_assert_eq!(matched.replacement, Some(json!(last)));
            } else {
                prop_assert_eq!(matched.kind, RuleKind::Suppress);
                prop_assert_eq!(matched.replacement, None);
            }
        }
    }
}
