//! Price history module
//!
//! Input boundary for persisted price histories and the daily series
//! normalizer every downstream computation runs on.

mod normalizer;
mod types;

pub use normalizer::SeriesNormalizer;
pub use types::{parse_date, parse_points, PriceHistory, PricePoint, PriceSeries, RawEntry};
