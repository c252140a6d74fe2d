//! Salary distribution charts.
//!
//! A group becomes a declarative [`ChartSpec`] first; a [`ChartRenderer`]
//! turns that description into PNG bytes. Keeping the two apart lets the
//! pipeline run against any renderer (the bitmap one in production, fakes in
//! tests).
//!
//! The bars do not plot salary magnitude: each record contributes one bar
//! labeled with its salary range, with height equal to its position (1..=N)
//! in the sorted group.

pub mod bitmap;

use serde::Serialize;

use crate::error::RenderResult;
use crate::models::Record;

pub use bitmap::BitmapRenderer;

/// Canvas width in pixels.
pub const CHART_WIDTH: u32 = 800;

/// Canvas height in pixels.
pub const CHART_HEIGHT: u32 = 600;

/// Label of the single data series ("Salary distribution").
pub const SERIES_LABEL: &str = "Maaş Dağılımı";

/// An RGBA color, alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Chart kinds. Only bar charts are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u32>,
    pub background_color: Rgba,
    pub border_color: Rgba,
    pub border_width: u32,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub width: u32,
    pub height: u32,
    /// Category labels, one per bar
    pub labels: Vec<String>,
    pub dataset: Dataset,
    pub y_begin_at_zero: bool,
    pub responsive: bool,
}

impl ChartSpec {
    /// Describe the chart of one sorted group.
    ///
    /// Labels are the records' salary ranges (`missing` when absent), values
    /// are the ordinals 1..=N.
    pub fn for_group(records: &[Record], salary_column: &str, missing: &str) -> Self {
        let labels = records
            .iter()
            .map(|r| r.get(salary_column).map(String::as_str).unwrap_or(missing).to_string())
            .collect();
        let data = (1..=records.len() as u32).collect();

        Self {
            kind: ChartKind::Bar,
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            labels,
            dataset: Dataset {
                label: SERIES_LABEL.to_string(),
                data,
                background_color: Rgba::new(75, 192, 192, 0.2),
                border_color: Rgba::new(75, 192, 192, 1.0),
                border_width: 1,
            },
            y_begin_at_zero: true,
            responsive: false,
        }
    }
}

/// Turns a chart description into PNG bytes.
///
/// Rendering is CPU-bound; the pipeline calls it from a blocking worker.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, spec: &ChartSpec) -> RenderResult<Vec<u8>>;
}
