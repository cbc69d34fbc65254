//! Dashlab Core — deterministic demo data for the analytics dashboard.
//!
//! This crate holds the whole computation behind the dashboard:
//! - Day ranges ending today (`days`)
//! - A seeded Lehmer random source (`rng`)
//! - Visits / signups / conversions series with trend and noise (`series`)
//! - Trailing moving-average smoothing (`smoothing`)
//! - Totals and conversion rate (`summary`)
//! - Range presets, toggles, chart datasets and widget ownership (`dashboard`)
//!
//! Every function is synchronous and pure apart from the wall-clock read in
//! [`days::build_day_range`].

pub mod config;
pub mod dashboard;
pub mod days;
pub mod error;
pub mod rng;
pub mod series;
pub mod smoothing;
pub mod summary;

pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{
    build_chart, run_update, ChartData, ChartWidget, Dashboard, DashboardView, Dataset,
    MetricToggles, RangePreset, UpdateRequest, DEMO_SEED,
};
pub use days::{build_day_range, build_day_range_from, DayRange};
pub use error::{PipelineError, PipelineResult};
pub use rng::Lehmer;
pub use series::{generate_series, Metric, MetricSeries};
pub use smoothing::{moving_average, MovingAverage, DEFAULT_PERIOD};
pub use summary::{summarize, Summary};
