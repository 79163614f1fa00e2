// src/interception/request.rs
//! Resolution request context
//!
//! A request carries everything a rule predicate may inspect: the
//! requested dependency name, the requesting module (if known), and
//! whether the load is an entry-point load.

use serde::{Deserialize, Serialize};

/// A single "load this named dependency" request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadRequest {
    /// Requested dependency name (e.g. "style.css")
    pub name: String,

    /// Name of the requesting module, if known
    pub requester: Option<String>,

    /// Whether this is an entry-point load
    pub entry_point: bool,
}

impl LoadRequest {
    /// Create a request for a bare name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requester: None,
            entry_point: false,
        }
    }

    /// Attach the requesting module
    pub fn with_requester(mut self, requester: impl Into<String>) -> Self {
        self.requester = Some(requester.into());
        self
    }

    /// Mark whether this load is an entry-point load
    pub fn with_entry_point(mut self, entry_point: bool) -> Self {
        self.entry_point = entry_point;
        self
    }
}
