//! Reference price types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::change::ChangeSummary;

/// Why no reference price could be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsufficiencyReason {
    /// The history had no observations
    EmptySeries,
    /// No usable price in the common-price lookback
    NoPricesInCommonWindow,
}

/// Caller-supplied reference prices, computed elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMeta {
    pub common_price: Decimal,
    #[serde(default)]
    pub min_price: Option<Decimal>,
}

/// Resolved reference price and the real discount measured against it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReferenceResult {
    /// Fresh sale action: lowest price in the window before it
    #[serde(rename_all = "camelCase")]
    EuMinimum {
        #[serde(with = "rust_decimal::serde::float")]
        min_price: Decimal,
        #[serde(with = "rust_decimal::serde::float_option")]
        current_price: Option<Decimal>,
        #[serde(with = "rust_decimal::serde::float_option")]
        real_discount: Option<Decimal>,
        last_discount_date: NaiveDate,
        last_increase_date: Option<NaiveDate>,
    },
    /// No fresh sale action: most frequent recent price
    #[serde(rename_all = "camelCase")]
    CommonPrice {
        #[serde(with = "rust_decimal::serde::float")]
        common_price: Decimal,
        #[serde(with = "rust_decimal::serde::float_option")]
        current_price: Option<Decimal>,
        #[serde(with = "rust_decimal::serde::float_option")]
        real_discount: Option<Decimal>,
        last_discount_date: Option<NaiveDate>,
        last_increase_date: Option<NaiveDate>,
    },
    /// Not enough data for any reference price
    #[serde(rename_all = "camelCase")]
    InsufficientData {
        #[serde(with = "rust_decimal::serde::float_option")]
        current_price: Option<Decimal>,
        last_discount_date: Option<NaiveDate>,
        last_increase_date: Option<NaiveDate>,
        reason: InsufficiencyReason,
    },
}

impl ReferenceResult {
    /// Reference price the real discount was measured against
    pub fn reference_price(&self) -> Option<Decimal> {
        match self {
            ReferenceResult::EuMinimum { min_price, .. } => Some(*min_price),
            ReferenceResult::CommonPrice { common_price, .. } => Some(*common_price),
            ReferenceResult::InsufficientData { .. } => None,
        }
    }

    pub fn current_price(&self) -> Option<Decimal> {
        match self {
            ReferenceResult::EuMinimum { current_price, .. }
            | ReferenceResult::CommonPrice { current_price, .. }
            | ReferenceResult::InsufficientData { current_price, .. } => *current_price,
        }
    }

    pub fn real_discount(&self) -> Option<Decimal> {
        match self {
            ReferenceResult::EuMinimum { real_discount, .. }
            | ReferenceResult::CommonPrice { real_discount, .. } => *real_discount,
            ReferenceResult::InsufficientData { .. } => None,
        }
    }

    /// Change dates the decision was based on
    pub fn changes(&self) -> ChangeSummary {
        match self {
            ReferenceResult::EuMinimum {
                last_discount_date,
                last_increase_date,
                ..
            } => ChangeSummary {
                last_discount_date: Some(*last_discount_date),
                last_increase_date: *last_increase_date,
            },
            ReferenceResult::CommonPrice {
                last_discount_date,
                last_increase_date,
                ..
            }
            | ReferenceResult::InsufficientData {
                last_discount_date,
                last_increase_date,
                ..
            } => ChangeSummary {
                last_discount_date: *last_discount_date,
                last_increase_date: *last_increase_date,
            },
        }
    }

    /// Wire discriminator
    pub fn kind(&self) -> &'static str {
        match self {
            ReferenceResult::EuMinimum { .. } => "eu-minimum",
            ReferenceResult::CommonPrice { .. } => "common-price",
            ReferenceResult::InsufficientData { .. } => "insufficient-data",
        }
    }

    pub fn is_sale_action(&self) -> bool {
        matches!(self, ReferenceResult::EuMinimum { .. })
    }
}
