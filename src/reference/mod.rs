//! Reference price module
//!
//! Applies the 30-day EU minimum rule when a fresh sale action is present
//! and falls back to the common price otherwise.

mod resolver;
mod types;

pub use resolver::ReferenceResolver;
pub use types::{InsufficiencyReason, PriceMeta, ReferenceResult};
