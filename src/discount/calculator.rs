//! Discount arithmetic

use rust_decimal::Decimal;

use crate::error::{EngineError, Result};
use crate::history::PriceSeries;

/// Relative reduction from `previous` to `actual`
///
/// Positive when the price dropped, negative when it rose. `None` when
/// there is no actual price. A zero `previous` has no defined ratio.
pub fn discount(previous: Decimal, actual: Option<Decimal>) -> Result<Option<Decimal>> {
    let Some(actual) = actual else {
        return Ok(None);
    };
    (previous - actual)
        .checked_div(previous)
        .map(Some)
        .ok_or(EngineError::UndefinedDiscount {
            reference: previous,
        })
}

/// Discount the seller claims on the most recent day
///
/// Requires both an original and a current price on the latest point.
pub fn claimed_discount(series: &PriceSeries) -> Option<Decimal> {
    let latest = series.latest()?;
    let original = latest.usable_original_price()?;
    let current = latest.usable_price()?;
    discount(original, Some(current)).ok().flatten()
}
