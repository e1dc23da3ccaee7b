//! Reference price resolution
//!
//! A price drop within the sale-action interval that was not followed by an
//! increase is a sale action. Its reference is the lowest price in the 30
//! days leading up to it (EU minimum rule). Without a sale action the
//! reference is the most frequent price over the common-price interval.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::types::{InsufficiencyReason, PriceMeta, ReferenceResult};
use crate::change::ChangeSummary;
use crate::config::EngineConfig;
use crate::discount::discount;
use crate::error::Result;
use crate::history::PriceSeries;

/// Decides between the EU minimum and the common price
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    sale_action_interval: Duration,
    common_price_interval: Duration,
    eu_minimum_window: Duration,
}

impl ReferenceResolver {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            sale_action_interval: Duration::days(config.sale_action_interval_days),
            common_price_interval: Duration::days(config.common_price_interval_days),
            eu_minimum_window: Duration::days(config.eu_minimum_window_days),
        }
    }

    /// Create a resolver with the 90/90/30 day defaults
    pub fn with_defaults() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// True when the last change is a drop dated within the sale-action interval
    pub fn is_sale_action_applicable(&self, changes: &ChangeSummary, today: NaiveDate) -> bool {
        let Some(discount_date) = changes.last_discount_date else {
            return false;
        };
        let recent = discount_date >= today - self.sale_action_interval && discount_date <= today;
        recent && changes.last_change_is_discount()
    }

    /// Lowest usable price in the window before a sale action
    ///
    /// The window ends on the last day before the drop and reaches back
    /// `eu_minimum_window` days from there: `[d - 31, d - 1]` by default.
    pub fn eu_minimum_price(
        &self,
        series: &PriceSeries,
        discount_date: NaiveDate,
    ) -> Option<Decimal> {
        let last_regular_day = discount_date - Duration::days(1);
        series
            .usable_prices_between(last_regular_day - self.eu_minimum_window, last_regular_day)
            .min()
    }

    /// Most frequent usable price in `[today - interval, today]`
    ///
    /// Among equally frequent prices the one seen first in date order wins.
    pub fn common_price(&self, series: &PriceSeries, today: NaiveDate) -> Option<Decimal> {
        // price -> (first position, count)
        let frequencies = series
            .usable_prices_between(today - self.common_price_interval, today)
            .enumerate()
            .fold(
                HashMap::<Decimal, (usize, usize)>::new(),
                |mut acc, (position, price)| {
                    acc.entry(price).or_insert((position, 0)).1 += 1;
                    acc
                },
            );

        frequencies
            .into_iter()
            .max_by(|(_, (first_a, count_a)), (_, (first_b, count_b))| {
                count_a.cmp(count_b).then(first_b.cmp(first_a))
            })
            .map(|(price, _)| price)
    }

    /// Resolve using only the series itself
    ///
    /// A sale action whose minimum window holds no usable price falls back
    /// to the common price.
    pub fn resolve(
        &self,
        series: &PriceSeries,
        changes: &ChangeSummary,
        today: NaiveDate,
    ) -> Result<ReferenceResult> {
        let Some(latest) = series.latest() else {
            return Ok(insufficient(None, changes, InsufficiencyReason::EmptySeries));
        };
        let current_price = latest.current_price;

        let sale_action = changes
            .last_discount_date
            .filter(|_| self.is_sale_action_applicable(changes, today))
            .and_then(|date| Some((date, self.eu_minimum_price(series, date)?)));

        if let Some((discount_date, min_price)) = sale_action {
            tracing::debug!(
                %discount_date,
                %min_price,
                "Sale action detected, using EU minimum price"
            );
            return Ok(ReferenceResult::EuMinimum {
                min_price,
                current_price,
                real_discount: discount(min_price, current_price)?,
                last_discount_date: discount_date,
                last_increase_date: changes.last_increase_date,
            });
        }

        match self.common_price(series, today) {
            Some(common_price) => {
                tracing::debug!(%common_price, "No sale action, using common price");
                Ok(ReferenceResult::CommonPrice {
                    common_price,
                    current_price,
                    real_discount: discount(common_price, current_price)?,
                    last_discount_date: changes.last_discount_date,
                    last_increase_date: changes.last_increase_date,
                })
            }
            None => Ok(insufficient(
                current_price,
                changes,
                InsufficiencyReason::NoPricesInCommonWindow,
            )),
        }
    }

    /// Resolve using reference prices supplied by the caller
    ///
    /// A missing or zero `min_price` always falls back to the common price.
    pub fn resolve_with_meta(
        &self,
        series: &PriceSeries,
        changes: &ChangeSummary,
        meta: &PriceMeta,
        today: NaiveDate,
    ) -> Result<ReferenceResult> {
        let Some(latest) = series.latest() else {
            return Ok(insufficient(None, changes, InsufficiencyReason::EmptySeries));
        };
        let current_price = latest.current_price;
        let min_price = meta.min_price.filter(|p| !p.is_zero());

        if let (Some(min_price), Some(discount_date), true) = (
            min_price,
            changes.last_discount_date,
            self.is_sale_action_applicable(changes, today),
        ) {
            tracing::debug!(%discount_date, %min_price, "Sale action detected, using supplied minimum");
            return Ok(ReferenceResult::EuMinimum {
                min_price,
                current_price,
                real_discount: discount(min_price, current_price)?,
                last_discount_date: discount_date,
                last_increase_date: changes.last_increase_date,
            });
        }

        Ok(ReferenceResult::CommonPrice {
            common_price: meta.common_price,
            current_price,
            real_discount: discount(meta.common_price, current_price)?,
            last_discount_date: changes.last_discount_date,
            last_increase_date: changes.last_increase_date,
        })
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn insufficient(
    current_price: Option<Decimal>,
    changes: &ChangeSummary,
    reason: InsufficiencyReason,
) -> ReferenceResult {
    tracing::warn!(?reason, "Insufficient price data for a reference price");
    ReferenceResult::InsufficientData {
        current_price,
        last_discount_date: changes.last_discount_date,
        last_increase_date: changes.last_increase_date,
        reason,
    }
}
