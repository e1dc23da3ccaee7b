//! Discount calculation module
//!
//! Real discounts are measured against a resolved reference price;
//! claimed discounts against the seller's own original price.

mod calculator;

pub use calculator::{claimed_discount, discount};
