// src/expiry.rs
//! Time to expiry as a year fraction (whole calendar days / 365).

use crate::analytics::bs_analytic::DAYS_PER_YEAR;
use crate::error::{EngineError, EngineResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Midnight at the start of `date`, the instant an expiry date is measured to
pub fn expiry_at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Whole days from `as_of` to `expiry`, truncated toward zero
pub fn days_to_expiry(as_of: NaiveDateTime, expiry: NaiveDateTime) -> i64 {
    (expiry - as_of).num_days()
}

/// Year fraction between `as_of` and `expiry`.
///
/// # Errors
/// `InvalidParameter` when fewer than one whole day remains. An expired or
/// same-day option has no Black-Scholes time value to compute.
pub fn year_fraction(as_of: NaiveDateTime, expiry: NaiveDateTime) -> EngineResult<f64> {
    let days = days_to_expiry(as_of, expiry);
    if days <= 0 {
        return Err(EngineError::invalid(
            "expiry",
            expiry,
            format!("must be at least one whole day after {}", as_of),
        ));
    }
    Ok(days as f64 / DAYS_PER_YEAR)
}
