//! Change detection module
//!
//! Locates the last downward and the last upward price step in a
//! normalized daily series.

mod detector;
mod types;

pub use detector::ChangeDetector;
pub use types::{ChangeSummary, PriceStep, StepDirection};
