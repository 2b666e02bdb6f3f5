//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! Everything here is pure arithmetic over exchange snapshots and can be tested
//! without network access.
//!
//! # Bounded Contexts
//!
//! - [`account`]: Per-currency account summaries and their USD conversion
//! - [`exposure`]: Open positions and the option exposure reduction rules
//! - [`report`]: Risk report aggregation (NAV, maintenance margin, margin usage)
//! - [`shared`]: Value objects and errors shared across contexts

pub mod account;
pub mod exposure;
pub mod report;
pub mod shared;
