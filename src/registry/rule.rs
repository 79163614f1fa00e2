// src/registry/rule.rs
//! Rule definitions
//!
//! A rule pairs a predicate with the replacement it yields when matched.
//! Predicates come in exactly three forms — exact name, pattern, and
//! decision function — each with its own removal-equality semantics.

use crate::interception::request::LoadRequest;
use crate::utils::errors::Result;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Decision function form of a predicate
pub type PredicateFn = Arc<dyn Fn(&LoadRequest) -> bool + Send + Sync>;

/// Matching test attached to a rule
#[derive(Clone)]
pub enum Predicate {
    /// Satisfied iff the token equals the requested name
    Exact(String),

    /// Satisfied iff the pattern matches the requested name
    Pattern(Regex),

    /// Satisfied iff the function returns true for the request
    Func(PredicateFn),
}

impl Predicate {
    /// Compile a pattern predicate from a regex source
    pub fn pattern(source: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(source)?))
    }

    /// Wrap a decision function
    pub fn func<F>(test: F) -> Self
    where
        F: Fn(&LoadRequest) -> bool + Send + Sync + 'static,
    {
        Self::Func(Arc::new(test))
    }

    /// Whether this predicate is satisfied by the given request.
    ///
    /// A decision function is invoked exactly once per call; if it
    /// panics, the unwind surfaces through the resolution path.
    pub fn matches(&self, request: &LoadRequest) -> bool {
        match self {
            Self::Exact(name) => name == &request.name,
            Self::Pattern(pattern) => pattern.is_match(&request.name),
            Self::Func(test) => test(request),
        }
    }

    /// Removal equality: value equality for exact tokens, textual
    /// equality of the source for patterns (two patterns compiled from
    /// the same source are the same rule even when they are distinct
    /// objects), identity for functions (a logically-equivalent but
    /// distinct closure does NOT compare equal). Different forms never
    /// compare equal.
    pub fn same_as(&self, other: &Predicate) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::Func(a), Self::Func(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Predicate {
    fn from(name: &str) -> Self {
        Self::Exact(name.to_string())
    }
}

impl From<String> for Predicate {
    fn from(name: String) -> Self {
        Self::Exact(name)
    }
}

impl From<Regex> for Predicate {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => f.debug_tuple("Exact").field(name).finish(),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => f.write_str(name),
            Self::Pattern(pattern) => write!(f, "/{}/", pattern.as_str()),
            Self::Func(_) => f.write_str("<function>"),
        }
    }
}

/// Rule category, used only for selective removal, never for precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Mock,
    Suppress,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => f.write_str("mock"),
            Self::Suppress => f.write_str("suppress"),
        }
    }
}

/// The unit stored in the rule cache
#[derive(Debug, Clone)]
pub struct Rule {
    /// Matching test
    pub predicate: Predicate,

    /// Value substituted on match; `None` is the "no value" sentinel
    pub replacement: Option<Value>,

    /// Category for selective removal
    pub kind: RuleKind,
}

impl Rule {
    /// Mock rule substituting the given replacement
    pub fn mock(predicate: impl Into<Predicate>, replacement: Option<Value>) -> Self {
        Self {
            predicate: predicate.into(),
            replacement,
            kind: RuleKind::Mock,
        }
    }

    /// Suppress rule substituting the "no value" sentinel
    pub fn suppress(predicate: impl Into<Predicate>) -> Self {
        Self {
            predicate: predicate.into(),
            replacement: None,
            kind: RuleKind::Suppress,
        }
    }
}
