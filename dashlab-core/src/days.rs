//! Date range builder.
//!
//! Produces the inclusive, gap-free sequence of calendar days between
//! `today − m months` and `today`.

use crate::error::{PipelineError, PipelineResult};
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Ordered calendar days, one per step, start and end inclusive.
///
/// Invariant: strictly increasing by exactly one day, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NaiveDate>", into = "Vec<NaiveDate>")]
pub struct DayRange(Vec<NaiveDate>);

impl TryFrom<Vec<NaiveDate>> for DayRange {
    type Error = PipelineError;

    /// Accepts only a non-empty run of consecutive days.
    fn try_from(days: Vec<NaiveDate>) -> Result<Self, Self::Error> {
        if days.is_empty() {
            return Err(PipelineError::invalid("day range must contain at least one day"));
        }
        if let Some(pair) = days.windows(2).find(|p| p[0].succ_opt() != Some(p[1])) {
            return Err(PipelineError::invalid(format!(
                "day range must step one day at a time, found {} then {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self(days))
    }
}

impl From<DayRange> for Vec<NaiveDate> {
    fn from(range: DayRange) -> Self {
        range.0
    }
}

impl DayRange {
    pub fn start(&self) -> NaiveDate {
        self.0[0]
    }

    pub fn end(&self) -> NaiveDate {
        self.0[self.0.len() - 1]
    }

    /// ISO `YYYY-MM-DD` label for each day.
    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
    }

    pub fn into_vec(self) -> Vec<NaiveDate> {
        self.0
    }
}

impl Deref for DayRange {
    type Target = [NaiveDate];

    fn deref(&self) -> &[NaiveDate] {
        &self.0
    }
}

/// Day range ending on the local calendar date.
pub fn build_day_range(months: i64) -> PipelineResult<DayRange> {
    build_day_range_from(Local::now().date_naive(), months)
}

/// Day range ending on `today`.
pub fn build_day_range_from(today: NaiveDate, months: i64) -> PipelineResult<DayRange> {
    if months < 0 {
        return Err(PipelineError::invalid(format!(
            "month count must be >= 0, got {months}"
        )));
    }
    let start = sub_months_rollover(today, months).ok_or_else(|| {
        PipelineError::invalid(format!("{months} months before {today} is out of range"))
    })?;

    let days: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= today).collect();
    tracing::trace!(%start, end = %today, len = days.len(), "built day range");
    Ok(DayRange(days))
}

/// Subtract whole months, keeping the day-of-month and rolling any overflow
/// forward (2024-03-31 minus one month is 2024-03-02, not 2024-02-29).
fn sub_months_rollover(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) - months;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(date.day0())))
}
