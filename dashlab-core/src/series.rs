//! Synthetic metric series generator.
//!
//! Each day gets a growth trend plus seeded noise:
//!
//! ```text
//! trend        = 0.6 + 0.8 · i/N
//! noise        = 0.3 + u₀ · 0.7
//! visits[i]      = round(80 · trend · noise + 20)
//! signups[i]     = round(visits[i] · (0.08 + u₁ · 0.04))
//! conversions[i] = round(signups[i] · (0.25 + u₂ · 0.15))
//! ```
//!
//! `u₀ u₁ u₂` are consumed from one [`Lehmer`] stream in exactly that order per
//! day. Changing the order changes every value after it.

use crate::rng::Lehmer;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three simulated analytics metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Visits,
    Signups,
    Conversions,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Visits, Metric::Signups, Metric::Conversions];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Visits => "Visits",
            Metric::Signups => "Signups",
            Metric::Conversions => "Conversions",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Three index-aligned daily counts.
///
/// No relation between the series is enforced: extreme draws may in
/// principle put signups above visits and that is left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub visits: Vec<u32>,
    pub signups: Vec<u32>,
    pub conversions: Vec<u32>,
}

impl MetricSeries {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            visits: Vec::with_capacity(n),
            signups: Vec::with_capacity(n),
            conversions: Vec::with_capacity(n),
        }
    }

    pub fn get(&self, metric: Metric) -> &[u32] {
        match metric {
            Metric::Visits => &self.visits,
            Metric::Signups => &self.signups,
            Metric::Conversions => &self.conversions,
        }
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// True when all three series share one length.
    pub fn is_aligned(&self) -> bool {
        self.signups.len() == self.visits.len() && self.conversions.len() == self.visits.len()
    }
}

/// Generate visits, signups and conversions for every day in `days`.
pub fn generate_series(days: &[NaiveDate], seed: i64) -> MetricSeries {
    let n = days.len();
    let mut rng = Lehmer::new(seed);
    let mut series = MetricSeries::with_capacity(n);

    for i in 0..n {
        let trend = 0.6 + 0.8 * (i as f64 / n as f64);
        let noise = 0.3 + rng.next_f64() * 0.7;
        let visits = round_count(80.0 * trend * noise + 20.0);
        let signups = round_count(f64::from(visits) * (0.08 + rng.next_f64() * 0.04));
        let conversions = round_count(f64::from(signups) * (0.25 + rng.next_f64() * 0.15));

        series.visits.push(visits);
        series.signups.push(signups);
        series.conversions.push(conversions);
    }

    series
}

/// Round half up. Every input here is non-negative, where this matches
/// half-away-from-zero.
fn round_count(x: f64) -> u32 {
    x.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(n: usize) -> Vec<NaiveDate> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect()
    }

    #[test]
    fn single_day_seed_one() {
        // draws: 0.0000224779, 0.0850324491, 0.6013526053
        // visits = round(80·0.6·0.3000157 + 20) = round(34.4008) = 34
        // signups = round(34·0.0834013) = round(2.8356) = 3
        // conversions = round(3·0.3402029) = round(1.0206) = 1
        let s = generate_series(&days(1), 1);
        assert_eq!(s.visits, vec![34]);
        assert_eq!(s.signups, vec![3]);
        assert_eq!(s.conversions, vec![1]);
    }

    #[test]
    fn lengths_match_days() {
        let s = generate_series(&days(90), 202_311);
        assert_eq!(s.len(), 90);
        assert!(s.is_aligned());
    }

    #[test]
    fn empty_days_empty_series() {
        let s = generate_series(&[], 5);
        assert!(s.is_empty());
        assert!(s.is_aligned());
    }

    #[test]
    fn idempotent_for_same_inputs() {
        let d = days(30);
        assert_eq!(generate_series(&d, 99), generate_series(&d, 99));
    }

    #[test]
    fn seed_changes_output() {
        let d = days(30);
        assert_ne!(generate_series(&d, 1), generate_series(&d, 2));
    }

    #[test]
    fn visits_stay_within_formula_bounds() {
        // trend ∈ [0.6, 1.4), noise ∈ [0.3, 1.0) ⇒ visits ∈ [34, 132]
        let s = generate_series(&days(365), 202_311);
        for &v in &s.visits {
            assert!((34..=132).contains(&v), "visits out of bounds: {v}");
        }
    }

    #[test]
    fn get_selects_series() {
        let s = generate_series(&days(3), 11);
        assert_eq!(s.get(Metric::Visits), s.visits.as_slice());
        assert_eq!(s.get(Metric::Signups), s.signups.as_slice());
        assert_eq!(s.get(Metric::Conversions), s.conversions.as_slice());
    }
}
