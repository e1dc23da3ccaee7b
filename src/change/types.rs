//! Change detection types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a day-over-day price step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    /// Price went down
    Discount,
    /// Price went up
    Increase,
}

/// A strict price change between two consecutive priced days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStep {
    /// Day the new price took effect
    pub date: NaiveDate,
    pub direction: StepDirection,
}

/// Most recent price decrease and increase in a series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub last_discount_date: Option<NaiveDate>,
    pub last_increase_date: Option<NaiveDate>,
}

impl ChangeSummary {
    /// True when the most recent change was a drop
    ///
    /// Says nothing about how recent that drop is.
    pub fn last_change_is_discount(&self) -> bool {
        match (self.last_discount_date, self.last_increase_date) {
            (Some(discount), Some(increase)) => discount > increase,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}
