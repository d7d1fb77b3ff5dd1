//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `bcf` - Topic markup, issue aggregate and reconciliation rules

pub mod bcf;
pub mod foundation;
