//! Presentation boundary: range presets, metric toggles, chart datasets and
//! the owner of the live chart widget.
//!
//! The core stops at [`ChartData`], a renderer-agnostic description of what to
//! draw. Whatever draws it implements [`ChartWidget`] and is held by a
//! [`Dashboard`], which owns at most one widget and releases it before
//! building its replacement.

use crate::days::{build_day_range_from, DayRange};
use crate::error::{PipelineError, PipelineResult};
use crate::series::{generate_series, Metric, MetricSeries};
use crate::smoothing::{MovingAverage, DEFAULT_PERIOD};
use crate::summary::{summarize, Summary};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seed used for the demo data so reloads show the same numbers.
pub const DEMO_SEED: i64 = 202_311;

/// Curve smoothing applied to every line.
pub const LINE_TENSION: f64 = 0.25;

// ─── Controls ────────────────────────────────────────────────────────

/// Selectable look-back windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RangePreset {
    #[default]
    Months3,
    Months6,
    Months12,
}

impl RangePreset {
    pub const ALL: [RangePreset; 3] = [
        RangePreset::Months3,
        RangePreset::Months6,
        RangePreset::Months12,
    ];

    pub fn months(self) -> u32 {
        match self {
            RangePreset::Months3 => 3,
            RangePreset::Months6 => 6,
            RangePreset::Months12 => 12,
        }
    }
}

impl TryFrom<u32> for RangePreset {
    type Error = PipelineError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|p| p.months() == months)
            .ok_or_else(|| {
                PipelineError::invalid(format!("unsupported range: {months} months (use 3, 6 or 12)"))
            })
    }
}

impl From<RangePreset> for u32 {
    fn from(preset: RangePreset) -> u32 {
        preset.months()
    }
}

impl FromStr for RangePreset {
    type Err = PipelineError;

    /// Accepts `3`, `3m` and `months3` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let digits = s
            .strip_prefix("months")
            .or_else(|| s.strip_suffix('m'))
            .unwrap_or(&s);
        let months: u32 = digits
            .parse()
            .map_err(|_| PipelineError::invalid(format!("unrecognised range '{s}'")))?;
        Self::try_from(months)
    }
}

impl fmt::Display for RangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.months())
    }
}

/// Which metrics are drawn. Summary totals ignore these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricToggles {
    pub visits: bool,
    pub signups: bool,
    pub conversions: bool,
}

impl Default for MetricToggles {
    fn default() -> Self {
        Self {
            visits: true,
            signups: true,
            conversions: true,
        }
    }
}

impl MetricToggles {
    pub fn is_enabled(&self, metric: Metric) -> bool {
        match metric {
            Metric::Visits => self.visits,
            Metric::Signups => self.signups,
            Metric::Conversions => self.conversions,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(|m| self.is_enabled(*m))
    }
}

// ─── Chart description ───────────────────────────────────────────────

/// Line and fill colours for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricStyle {
    pub border_color: &'static str,
    pub background_color: &'static str,
}

pub fn metric_style(metric: Metric) -> MetricStyle {
    match metric {
        Metric::Visits => MetricStyle {
            border_color: "#3b82f6",
            background_color: "rgba(59,130,246,0.15)",
        },
        Metric::Signups => MetricStyle {
            border_color: "#22c55e",
            background_color: "rgba(34,197,94,0.15)",
        },
        Metric::Conversions => MetricStyle {
            border_color: "#f59e0b",
            background_color: "rgba(245,158,11,0.15)",
        },
    }
}

/// One smoothed line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub metric: Metric,
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
}

/// Everything a chart widget needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Smoothed datasets for the enabled metrics, in visits → signups →
/// conversions order.
pub fn build_chart(
    days: &DayRange,
    series: &MetricSeries,
    toggles: &MetricToggles,
    smoother: &MovingAverage,
) -> ChartData {
    let datasets = toggles
        .enabled()
        .map(|metric| {
            let style = metric_style(metric);
            Dataset {
                metric,
                label: format!("{metric} ({})", smoother.label()),
                data: smoother.compute(series.get(metric)),
                border_color: style.border_color.to_string(),
                background_color: style.background_color.to_string(),
                tension: LINE_TENSION,
            }
        })
        .collect();

    ChartData {
        labels: days.labels(),
        datasets,
    }
}

// ─── Update cycle ────────────────────────────────────────────────────

/// Inputs for one dashboard refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub range: RangePreset,
    pub toggles: MetricToggles,
    pub seed: i64,
    pub period: usize,
}

impl Default for UpdateRequest {
    fn default() -> Self {
        Self {
            range: RangePreset::default(),
            toggles: MetricToggles::default(),
            seed: DEMO_SEED,
            period: DEFAULT_PERIOD,
        }
    }
}

/// Output of one refresh. Built fresh each time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub days: DayRange,
    pub series: MetricSeries,
    pub chart: ChartData,
    pub summary: Summary,
}

/// Run the whole pipeline for a range ending on `today`.
pub fn run_update(today: NaiveDate, request: &UpdateRequest) -> PipelineResult<DashboardView> {
    let smoother = MovingAverage::new(request.period)?;
    let days = build_day_range_from(today, i64::from(request.range.months()))?;
    let series = generate_series(&days, request.seed);
    let chart = build_chart(&days, &series, &request.toggles, &smoother);
    let summary = summarize(&days, &series)?;

    tracing::debug!(
        range = %request.range,
        seed = request.seed,
        days = days.len(),
        datasets = chart.datasets.len(),
        "dashboard update computed"
    );

    Ok(DashboardView {
        days,
        series,
        chart,
        summary,
    })
}

// ─── Widget ownership ────────────────────────────────────────────────

/// A live chart built from one [`ChartData`] frame.
///
/// Widgets are never updated in place: the owner releases the old one and
/// creates another.
pub trait ChartWidget: Sized {
    type Error: From<PipelineError>;

    fn create(chart: &ChartData) -> Result<Self, Self::Error>;

    /// Tear down whatever the widget holds.
    fn release(self);
}

/// Owns the dashboard's single chart widget.
#[derive(Debug)]
pub struct Dashboard<W: ChartWidget> {
    widget: Option<W>,
    updates: u64,
}

impl<W: ChartWidget> Default for Dashboard<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ChartWidget> Dashboard<W> {
    pub fn new() -> Self {
        Self {
            widget: None,
            updates: 0,
        }
    }

    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    /// Successful updates so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Recompute and replace the chart. If the pipeline rejects the request
    /// the current widget is kept.
    pub fn update(
        &mut self,
        today: NaiveDate,
        request: &UpdateRequest,
    ) -> Result<DashboardView, W::Error> {
        let view = run_update(today, request)?;

        if let Some(old) = self.widget.take() {
            tracing::trace!(update = self.updates, "releasing chart widget");
            old.release();
        }
        self.widget = Some(W::create(&view.chart)?);
        self.updates += 1;

        Ok(view)
    }

    /// Release the widget, if any, and leave the dashboard empty.
    pub fn clear(&mut self) {
        if let Some(old) = self.widget.take() {
            old.release();
        }
    }
}

impl<W: ChartWidget> Drop for Dashboard<W> {
    fn drop(&mut self) {
        self.clear();
    }
}
