//! Booking price preview
//!
//! The figure is a display estimate. The price of record is set by the
//! backend when the booking is created.

use chrono::NaiveDate;

/// Day count and total for a date range at a daily rate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceQuote {
    pub days: u32,
    pub total: f64,
}

/// Quote a rental, counting both the first and the last day.
///
/// Missing dates give an empty quote. Reversed dates are measured by their
/// absolute distance; callers reject them during validation.
pub fn quote(rate: f64, start: Option<NaiveDate>, end: Option<NaiveDate>) -> PriceQuote {
    let (Some(start), Some(end)) = (start, end) else {
        return PriceQuote::default();
    };

    let span = (end - start).num_days().unsigned_abs();
    let days = u32::try_from(span + 1).unwrap_or(u32::MAX);

    PriceQuote {
        days,
        total: f64::from(days) * rate,
    }
}
