//! real-discount: reference-price and real-discount engine
//!
//! Certifies whether an advertised discount is a genuine price reduction
//! under the EU 30-day reference-price rule. This library provides:
//! - Validation of persisted price histories
//! - Daily series normalization with outlier repair
//! - Detection of the last price drop and increase
//! - Reference price resolution (EU minimum or common price)
//! - Real and claimed discount calculation
//!
//! The engine is a pure computation: no I/O, no clock, no shared state.

pub mod change;
pub mod cli;
pub mod config;
pub mod discount;
pub mod engine;
pub mod error;
pub mod history;
pub mod reference;
pub mod telemetry;

pub use engine::{DiscountEngine, PriceAssessment};
pub use error::{EngineError, Result};
