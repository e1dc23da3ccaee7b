//! Assessment pipeline
//!
//! raw history → normalized series → change points → reference price →
//! real and claimed discount. Every call is independent; the engine holds
//! only configuration and can be shared across threads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::change::{ChangeDetector, ChangeSummary};
use crate::config::EngineConfig;
use crate::discount::claimed_discount;
use crate::error::Result;
use crate::history::{parse_points, PriceHistory, PriceSeries, SeriesNormalizer};
use crate::reference::{PriceMeta, ReferenceResolver, ReferenceResult};

/// Result of assessing one product's price history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAssessment {
    #[serde(flatten)]
    pub reference: ReferenceResult,
    /// What the seller's own original price implies
    #[serde(with = "rust_decimal::serde::float_option")]
    pub claimed_discount: Option<Decimal>,
}

/// Reference-price engine
#[derive(Debug, Clone)]
pub struct DiscountEngine {
    config: EngineConfig,
    normalizer: SeriesNormalizer,
    detector: ChangeDetector,
    resolver: ReferenceResolver,
}

impl DiscountEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            normalizer: SeriesNormalizer::from_config(&config),
            detector: ChangeDetector::new(),
            resolver: ReferenceResolver::from_config(&config),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate and normalize a persisted history up to `today`
    pub fn prepare(&self, history: &PriceHistory, today: NaiveDate) -> Result<PriceSeries> {
        let points = parse_points(history.entries())?;
        self.normalizer.normalize(&points, today)
    }

    /// Changes in an already normalized series
    pub fn changes(&self, series: &PriceSeries) -> ChangeSummary {
        self.detector.detect(series)
    }

    /// Assess a history, deriving every reference price from the series
    pub fn assess(&self, history: &PriceHistory, today: NaiveDate) -> Result<PriceAssessment> {
        let series = self.prepare(history, today)?;
        self.assess_series(&series, today)
    }

    /// Assess a history against caller-supplied reference prices
    pub fn assess_with_meta(
        &self,
        history: &PriceHistory,
        meta: &PriceMeta,
        today: NaiveDate,
    ) -> Result<PriceAssessment> {
        let series = self.prepare(history, today)?;
        let changes = self.changes(&series);
        let reference = self
            .resolver
            .resolve_with_meta(&series, &changes, meta, today)?;
        Ok(self.finish(&series, reference))
    }

    /// Assess an already normalized series
    pub fn assess_series(&self, series: &PriceSeries, today: NaiveDate) -> Result<PriceAssessment> {
        let changes = self.changes(series);
        let reference = self.resolver.resolve(series, &changes, today)?;
        Ok(self.finish(series, reference))
    }

    fn finish(&self, series: &PriceSeries, reference: ReferenceResult) -> PriceAssessment {
        let assessment = PriceAssessment {
            claimed_discount: claimed_discount(series),
            reference,
        };
        tracing::debug!(
            kind = assessment.reference.kind(),
            days = series.len(),
            real_discount = ?assessment.reference.real_discount(),
            claimed_discount = ?assessment.claimed_discount,
            "Assessed price history"
        );
        assessment
    }
}

impl Default for DiscountEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
