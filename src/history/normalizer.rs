//! Series normalization
//!
//! Turns irregular observations into one point per calendar day from the
//! first observation through the evaluation date, then repairs single-day
//! prices that jump implausibly far from the previous day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::types::{PricePoint, PriceSeries};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Forward-fill and outlier repair over a raw price history
#[derive(Debug, Clone)]
pub struct SeriesNormalizer {
    /// Smallest plausible previous/current ratio (exclusive)
    min_ratio: Decimal,
    /// Largest plausible previous/current ratio (exclusive)
    max_ratio: Decimal,
}

impl SeriesNormalizer {
    /// Create a normalizer with explicit ratio bounds
    pub fn new(min_ratio: Decimal, max_ratio: Decimal) -> Self {
        Self {
            min_ratio,
            max_ratio,
        }
    }

    /// Create a normalizer from engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.outlier_min_ratio, config.outlier_max_ratio)
    }

    /// Create a normalizer with the default `(0.005, 200)` bounds
    pub fn with_defaults() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// Normalize `raw` into a daily series ending at `today`
    ///
    /// `raw` must be ascending by date. Observations after `today` are
    /// dropped. An empty input yields an empty series.
    pub fn normalize(&self, raw: &[PricePoint], today: NaiveDate) -> Result<PriceSeries> {
        let Some(first) = raw.first() else {
            return Ok(PriceSeries::default());
        };
        if first.date > today {
            return Err(EngineError::HistoryStartsInFuture {
                first: first.date,
                today,
            });
        }

        let filled = forward_fill(raw, today);
        let series = self.repair_outliers(filled);

        tracing::trace!(
            observations = raw.len(),
            days = series.len(),
            "Normalized price series"
        );
        Ok(series)
    }

    /// Replace implausible jumps with the previous day's price
    ///
    /// Runs in date order; the previous price is the already repaired one.
    pub fn repair_outliers(&self, points: Vec<PricePoint>) -> PriceSeries {
        let repaired = points
            .into_iter()
            .scan(None::<Decimal>, |previous, mut point| {
                if let (Some(prev), Some(current)) = (*previous, point.usable_price()) {
                    let plausible = prev
                        .checked_div(current)
                        .is_some_and(|ratio| self.is_plausible(ratio));
                    if !plausible {
                        tracing::debug!(
                            date = %point.date,
                            previous = %prev,
                            observed = %current,
                            "Repairing deviated price"
                        );
                        point.current_price = Some(prev);
                    }
                }
                *previous = point.usable_price();
                Some(point)
            })
            .collect();
        PriceSeries::from_points(repaired)
    }

    fn is_plausible(&self, ratio: Decimal) -> bool {
        self.min_ratio < ratio && ratio < self.max_ratio
    }
}

impl Default for SeriesNormalizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// One point per day from the first observation to `today`
///
/// A day without an observation copies the most recent observed point.
fn forward_fill(raw: &[PricePoint], today: NaiveDate) -> Vec<PricePoint> {
    // Later entries for the same date overwrite earlier ones
    let by_date: HashMap<NaiveDate, PricePoint> = raw.iter().map(|p| (p.date, *p)).collect();

    let Some(start) = raw.first().map(|p| p.date) else {
        return Vec::new();
    };

    start
        .iter_days()
        .take_while(|date| *date <= today)
        .scan(None::<PricePoint>, |last_seen, date| {
            let source = by_date.get(&date).copied().or(*last_seen);
            *last_seen = source;
            source.map(|p| PricePoint { date, ..p })
        })
        .collect()
}
