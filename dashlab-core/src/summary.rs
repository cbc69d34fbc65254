//! Summary aggregator: period, totals and conversion rate.

use crate::error::{PipelineError, PipelineResult};
use crate::series::MetricSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Totals over a generated period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub total_visits: u64,
    pub total_signups: u64,
    pub total_conversions: u64,
    /// `conversions / signups × 100`; `None` when there were no signups.
    pub conversion_rate: Option<f64>,
}

impl Summary {
    /// Conversion rate to one decimal place. An undefined rate renders as
    /// `"0.0"`; the distinction stays available through `conversion_rate`.
    pub fn conversion_rate_percent(&self) -> String {
        format_rate(self.conversion_rate.unwrap_or(0.0))
    }
}

/// Reduce the series for `days` into a [`Summary`].
pub fn summarize(days: &[NaiveDate], series: &MetricSeries) -> PipelineResult<Summary> {
    if !series.is_aligned() || series.len() != days.len() {
        return Err(PipelineError::invalid(format!(
            "series lengths (visits {}, signups {}, conversions {}) must match {} days",
            series.visits.len(),
            series.signups.len(),
            series.conversions.len(),
            days.len()
        )));
    }

    let total_visits = total(&series.visits);
    let total_signups = total(&series.signups);
    let total_conversions = total(&series.conversions);

    Ok(Summary {
        period_start: days.first().copied(),
        period_end: days.last().copied(),
        total_visits,
        total_signups,
        total_conversions,
        conversion_rate: conversion_rate(total_conversions, total_signups),
    })
}

fn total(values: &[u32]) -> u64 {
    values.iter().map(|&v| u64::from(v)).sum()
}

fn conversion_rate(conversions: u64, signups: u64) -> Option<f64> {
    if signups == 0 {
        return None;
    }
    Some(conversions as f64 / signups as f64 * 100.0)
}

/// One decimal place, rounded once from the stored value with ties going up.
///
/// `{:.1}` rounds the exact binary expansion but may break exact ties to
/// even. A non-negative double lies exactly halfway between two tenths only
/// when it is an odd multiple of 0.25, where `rate × 10` is exact.
fn format_rate(rate: f64) -> String {
    let quarters = rate * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return format!("{:.1}", (rate * 10.0).ceil() / 10.0);
    }
    format!("{rate:.1}")
}
