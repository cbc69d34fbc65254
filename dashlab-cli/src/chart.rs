//! Terminal chart widget: the smoothed series drawn with ratatui's `Chart`.
//!
//! On a terminal the chart is drawn into an inline viewport so colours
//! survive. Piped output gets the same frame rendered into an off-screen
//! buffer and printed as plain lines.

use dashlab_core::{ChartData, ChartWidget, PipelineError};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
    Terminal, TerminalOptions, Viewport,
};
use std::io;

pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 20;

/// One frame of chart data, held until the dashboard releases it.
#[derive(Debug)]
pub struct TerminalChart {
    chart: ChartData,
}

impl TerminalChart {
    pub fn new(chart: ChartData) -> Self {
        Self { chart }
    }

    /// Render off-screen and return each row with trailing blanks trimmed.
    pub fn to_lines(&self, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        self.render(area, &mut buf);

        (area.top()..area.bottom())
            .map(|y| {
                let row: String = (area.left()..area.right())
                    .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
                    .collect();
                row.trim_end().to_string()
            })
            .collect()
    }

    /// Draw below the cursor in the live terminal.
    pub fn draw_inline(&self, height: u16) -> io::Result<()> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        )?;
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }
}

impl Widget for &TerminalChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chart = &self.chart;

        let points: Vec<Vec<(f64, f64)>> = chart
            .datasets
            .iter()
            .map(|d| {
                d.data
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (i as f64, v))
                    .collect()
            })
            .collect();

        let datasets: Vec<Dataset> = chart
            .datasets
            .iter()
            .zip(&points)
            .map(|(d, data)| {
                Dataset::default()
                    .name(d.label.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(line_color(&d.border_color)))
                    .data(data)
            })
            .collect();

        let title = match (chart.labels.first(), chart.labels.last()) {
            _ if chart.datasets.is_empty() => " No metrics selected ".to_string(),
            (Some(first), Some(last)) => {
                format!(" {first} → {last} ({} days) ", chart.labels.len())
            }
            _ => " Daily metrics ".to_string(),
        };

        let x_max = chart.labels.len().saturating_sub(1).max(1) as f64;
        let (y_lower, y_upper) = y_bounds(chart);
        let y_mid = (y_lower + y_upper) / 2.0;

        Chart::new(datasets)
            .block(Block::default().title(title).borders(Borders::ALL))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, x_max])
                    .labels(x_labels(&chart.labels)),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_lower, y_upper])
                    .labels(vec![
                        Span::raw(format!("{y_lower:.0}")),
                        Span::raw(format!("{y_mid:.0}")),
                        Span::raw(format!("{y_upper:.0}")),
                    ]),
            )
            .render(area, buf);
    }
}

impl ChartWidget for TerminalChart {
    type Error = PipelineError;

    fn create(chart: &ChartData) -> Result<Self, PipelineError> {
        Ok(Self::new(chart.clone()))
    }

    fn release(self) {
        tracing::trace!(datasets = self.chart.datasets.len(), "terminal chart released");
    }
}

/// `#rrggbb` to a terminal colour; anything unparseable uses the default.
fn line_color(hex: &str) -> Color {
    hex.parse().unwrap_or(Color::Reset)
}

/// Y range over every plotted value, padded 5% each side.
fn y_bounds(chart: &ChartData) -> (f64, f64) {
    let values = chart.datasets.iter().flat_map(|d| d.data.iter().copied());
    let y_min = values.clone().fold(f64::INFINITY, f64::min);
    let y_max = values.fold(f64::NEG_INFINITY, f64::max);
    if !y_min.is_finite() || !y_max.is_finite() {
        return (0.0, 1.0);
    }

    let y_range = y_max - y_min;
    let y_pad = if y_range > 0.0 { y_range * 0.05 } else { 1.0 };
    ((y_min - y_pad).max(0.0), y_max + y_pad)
}

/// First, middle and last date.
fn x_labels(labels: &[String]) -> Vec<Span<'_>> {
    match labels {
        [] => vec![],
        [only] => vec![Span::raw(only.as_str())],
        _ => {
            let mid = &labels[labels.len() / 2];
            vec![
                Span::raw(labels[0].as_str()),
                Span::raw(mid.as_str()),
                Span::raw(labels[labels.len() - 1].as_str()),
            ]
        }
    }
}
