//! Engine error types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating a price history or computing a discount
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Input JSON does not match either accepted history shape
    #[error("Malformed price history: {0}")]
    MalformedInput(String),
    /// Date string is neither `YYYY-MM-DD` nor RFC 3339
    #[error("Invalid date {value:?} at entry {index}")]
    InvalidDate { index: usize, value: String },
    /// A current or original price below zero
    #[error("Negative price {price} at entry {index}")]
    NegativePrice { index: usize, price: Decimal },
    /// Entries are not sorted ascending by date
    #[error("Entry {index} dated {date} precedes {previous}")]
    UnorderedHistory {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
    /// First observation lies after the evaluation date
    #[error("History starts on {first}, after evaluation date {today}")]
    HistoryStartsInFuture { first: NaiveDate, today: NaiveDate },
    /// Reference price is zero, so no ratio exists
    #[error("Discount undefined for reference price {reference}")]
    UndefinedDiscount { reference: Decimal },
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::MalformedInput(e.to_string())
    }
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
