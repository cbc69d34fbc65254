//! Dashlab CLI: render the simulated analytics dashboard.
//!
//! Commands:
//! - `show`: summary table plus a line chart, or the full view as JSON
//! - `summary`: summary table only

mod chart;

use anyhow::{Context, Result};
use chart::{TerminalChart, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dashlab_core::{Dashboard, DashboardConfig, RangePreset, Summary, UpdateRequest};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "dashlab",
    about = "Dashlab CLI: simulated visits, signups and conversions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the summary table and a smoothed chart.
    Show {
        #[command(flatten)]
        opts: DashboardOpts,

        /// Emit the full view (days, series, chart, summary) as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print only the summary table.
    Summary {
        #[command(flatten)]
        opts: DashboardOpts,
    },
}

#[derive(Args)]
struct DashboardOpts {
    /// TOML config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Look-back window: 3, 6 or 12 months.
    #[arg(long)]
    range: Option<RangePreset>,

    /// Random seed for the simulated series.
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Moving-average window in days.
    #[arg(long)]
    period: Option<usize>,

    /// Hide visits from the chart. The `--no-*` flags only hide: a metric
    /// the config's `[toggles]` turned off stays off.
    #[arg(long, default_value_t = false)]
    no_visits: bool,

    /// Hide signups from the chart.
    #[arg(long, default_value_t = false)]
    no_signups: bool,

    /// Hide conversions from the chart.
    #[arg(long, default_value_t = false)]
    no_conversions: bool,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    today: Option<String>,
}

impl DashboardOpts {
    /// Config file (or defaults), then flags on top. `range`, `seed` and
    /// `period` replace the file's values; each toggle is the file's value
    /// AND NOT its `--no-*` flag.
    fn request(&self) -> Result<UpdateRequest> {
        let config = match &self.config {
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };
        let mut request = config.to_request();

        if let Some(range) = self.range {
            request.range = range;
        }
        if let Some(seed) = self.seed {
            request.seed = seed;
        }
        if let Some(period) = self.period {
            request.period = period;
        }
        request.toggles.visits &= !self.no_visits;
        request.toggles.signups &= !self.no_signups;
        request.toggles.conversions &= !self.no_conversions;

        Ok(request)
    }

    fn today(&self) -> Result<NaiveDate> {
        match self.today.as_deref() {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid --today '{s}', expected YYYY-MM-DD")),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }
}

/// Used when `RUST_LOG` is unset or unparseable.
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> Result<()> {
    // stderr keeps stdout clean for --json
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { opts, json } => run_show(&opts, json),
        Commands::Summary { opts } => run_summary(&opts),
    }
}

fn run_show(opts: &DashboardOpts, json: bool) -> Result<()> {
    let request = opts.request()?;
    let today = opts.today()?;
    tracing::info!(range = %request.range, seed = request.seed, %today, "rendering dashboard");

    let mut dashboard: Dashboard<TerminalChart> = Dashboard::new();
    let view = dashboard.update(today, &request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if let Some(widget) = dashboard.widget() {
        println!();
        if std::io::stdout().is_terminal() {
            widget
                .draw_inline(DEFAULT_HEIGHT)
                .context("failed to draw chart")?;
            println!();
        } else {
            for line in widget.to_lines(DEFAULT_WIDTH, DEFAULT_HEIGHT) {
                println!("{line}");
            }
        }
    }
    print_summary(&view.summary);
    Ok(())
}

fn run_summary(opts: &DashboardOpts) -> Result<()> {
    let request = opts.request()?;
    let today = opts.today()?;
    let view = dashlab_core::run_update(today, &request)?;
    print_summary(&view.summary);
    Ok(())
}

fn print_summary(summary: &Summary) {
    let date = |d: Option<NaiveDate>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    println!();
    println!("=== Summary ===");
    println!(
        "Period:          {} → {}",
        date(summary.period_start),
        date(summary.period_end)
    );
    println!("Visits:          {}", summary.total_visits);
    println!("Signups:         {}", summary.total_signups);
    println!("Conversions:     {}", summary.total_conversions);
    println!("Conversion Rate: {}%", summary.conversion_rate_percent());
}
