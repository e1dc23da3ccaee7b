//! Price history types
//!
//! Wire shapes delivered by the ingestion pipeline and the validated
//! per-day points the engine works on.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A single persisted observation, as stored by the ingest pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Current price, `null` when the product was unavailable
    #[serde(default)]
    pub c: Option<Decimal>,
    /// Seller-declared original price
    #[serde(default)]
    pub o: Option<Decimal>,
    /// ISO-8601 date or timestamp
    pub d: String,
}

/// Price history in either of the two persisted shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceHistory {
    /// Bare array of entries
    Entries(Vec<RawEntry>),
    /// Object wrapping the array
    Wrapped { entries: Vec<RawEntry> },
}

impl PriceHistory {
    /// Parse a history document in either shape
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Borrow the entries regardless of shape
    pub fn entries(&self) -> &[RawEntry] {
        match self {
            PriceHistory::Entries(entries) => entries,
            PriceHistory::Wrapped { entries } => entries,
        }
    }

    /// Take the entries regardless of shape
    pub fn into_entries(self) -> Vec<RawEntry> {
        match self {
            PriceHistory::Entries(entries) => entries,
            PriceHistory::Wrapped { entries } => entries,
        }
    }
}

/// One validated day of price data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub current_price: Option<Decimal>,
    pub original_price: Option<Decimal>,
}

impl PricePoint {
    /// Create a new price point
    pub fn new(
        date: NaiveDate,
        current_price: Option<Decimal>,
        original_price: Option<Decimal>,
    ) -> Self {
        Self {
            date,
            current_price,
            original_price,
        }
    }

    /// Current price if present and strictly positive
    ///
    /// Zero prices stay in the series but never enter ratios, change
    /// detection, minimums or frequency tables.
    pub fn usable_price(&self) -> Option<Decimal> {
        self.current_price.filter(|p| *p > Decimal::ZERO)
    }

    /// Original price if present and strictly positive
    pub fn usable_original_price(&self) -> Option<Decimal> {
        self.original_price.filter(|p| *p > Decimal::ZERO)
    }
}

/// Gap-free daily price series, ascending by date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Wrap points that are already one-per-day and ascending
    pub fn from_points(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent point
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Usable prices dated within `[start, end]`
    pub fn usable_prices_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = Decimal> + '_ {
        self.points
            .iter()
            .filter(move |p| p.date >= start && p.date <= end)
            .filter_map(PricePoint::usable_price)
    }

    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }
}

/// Years a history date may fall in
pub const VALID_YEARS: RangeInclusive<i32> = 1970..=9999;

/// Parse `YYYY-MM-DD`, falling back to an RFC 3339 timestamp's date
///
/// Dates outside [`VALID_YEARS`] are rejected; every day from the first
/// entry up to today gets filled, so the range bounds the series length.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .filter(|date| VALID_YEARS.contains(&date.year()))
}

/// Validate raw entries into dated points
///
/// Fails on unparseable dates, negative prices and descending dates.
/// Entries sharing a date are kept; normalization lets the last one win.
pub fn parse_points(entries: &[RawEntry]) -> Result<Vec<PricePoint>> {
    let mut points: Vec<PricePoint> = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let date = parse_date(&entry.d).ok_or_else(|| EngineError::InvalidDate {
            index,
            value: entry.d.clone(),
        })?;

        for price in [entry.c, entry.o].into_iter().flatten() {
            if price < Decimal::ZERO {
                return Err(EngineError::NegativePrice { index, price });
            }
        }

        if let Some(previous) = points.last() {
            if date < previous.date {
                return Err(EngineError::UnorderedHistory {
                    index,
                    date,
                    previous: previous.date,
                });
            }
        }

        points.push(PricePoint::new(date, entry.c, entry.o));
    }

    Ok(points)
}
