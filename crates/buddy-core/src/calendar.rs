//! Calendar-month arithmetic.
//!
//! Every helper returns `None` only when the result falls outside the range
//! chrono can represent.

use chrono::{Datelike, NaiveDate};

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let last = days_in_month(date.year(), date.month())?;
    date.with_day(last)
}

/// Moves `date` by `months` calendar months, clamping the day to the target
/// month's length (Jan 31 + 1 month = Feb 28/29).
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}
