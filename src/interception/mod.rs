// src/interception/mod.rs
//! Dependency-load interception layer
//!
//! This module owns the seam between a host's dependency loader and the
//! rule registry:
//!
//! - **Request**: the `(name, requester, entry_point)` resolution context
//! - **Resolver**: the collaborator contract and the replaceable slot a
//!   host routes loads through
//! - **Installer**: one-time swap of the rule-matching wrapper into a
//!   slot, capturing the previous occupant as the fallback
//!
//! # Architecture
//!
//! ```text
//! Code under test
//!     │
//!     └─ load "name" → ResolverSlot → InterceptResolver
//!                                         │
//!                            rule match? ─┤
//!                                yes ─ replacement (or "no value")
//!                                no  ─ captured fallback resolver
//! ```

pub(crate) mod installer;
pub mod request;
pub mod resolver;

// Re-export commonly used types
pub use request::LoadRequest;
pub use resolver::{Resolver, ResolverSlot};
