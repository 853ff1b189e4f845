//! Current and prior reporting periods relative to a reference instant.

use buddy_domain::Period;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{end_of_month, shift_months, start_of_month},
    CoreError,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportingPeriods {
    /// From the first of the current month through the reference date.
    pub current: Period,
    /// The whole preceding calendar month.
    pub prior: Period,
}

/// Computes the reporting periods for `now`, taken as a UTC calendar date.
///
/// The current period is partial (it ends at `now`) while the prior period is
/// a full month, so early in a month the comparison understates change.
pub fn reporting_periods(now: DateTime<Utc>) -> Result<ReportingPeriods, CoreError> {
    let today = now.date_naive();
    let month_start = start_of_month(today).ok_or_else(|| out_of_range(today))?;
    let prior_start = shift_months(month_start, -1).ok_or_else(|| out_of_range(month_start))?;
    let prior_end = end_of_month(prior_start).ok_or_else(|| out_of_range(prior_start))?;

    Ok(ReportingPeriods {
        current: Period::new(month_start, today)?,
        prior: Period::new(prior_start, prior_end)?,
    })
}

fn out_of_range(date: NaiveDate) -> CoreError {
    CoreError::OutOfRange(format!("no calendar month before or around {date}"))
}
