//! Change detection
//!
//! Walks consecutive priced days and keeps the most recent drop and the
//! most recent rise.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{ChangeSummary, PriceStep, StepDirection};
use crate::history::PriceSeries;

/// Finds the last discount and last increase in a normalized series
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector;

impl ChangeDetector {
    pub fn new() -> Self {
        Self
    }

    /// Every strict price change, oldest first
    ///
    /// Days without a usable price are skipped, so a step may span an
    /// unavailable period. Zero deltas are not steps.
    pub fn steps(&self, series: &PriceSeries) -> Vec<PriceStep> {
        let priced: Vec<(NaiveDate, Decimal)> = series
            .points()
            .iter()
            .filter_map(|p| p.usable_price().map(|price| (p.date, price)))
            .collect();

        priced
            .windows(2)
            .filter_map(|pair| {
                let (_, before) = pair[0];
                let (date, after) = pair[1];
                let direction = if after < before {
                    StepDirection::Discount
                } else if after > before {
                    StepDirection::Increase
                } else {
                    return None;
                };
                Some(PriceStep { date, direction })
            })
            .collect()
    }

    /// Summarize the most recent step in each direction
    pub fn detect(&self, series: &PriceSeries) -> ChangeSummary {
        let summary = self
            .steps(series)
            .into_iter()
            .fold(ChangeSummary::default(), |mut acc, step| {
                match step.direction {
                    StepDirection::Discount => acc.last_discount_date = Some(step.date),
                    StepDirection::Increase => acc.last_increase_date = Some(step.date),
                }
                acc
            });

        tracing::trace!(
            last_discount = ?summary.last_discount_date,
            last_increase = ?summary.last_increase_date,
            "Detected price changes"
        );
        summary
    }
}
