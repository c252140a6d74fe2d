//! End-to-end run: read, group, sort, chart every group, write the snapshot.
//!
//! Groups are processed one at a time; a chart is rendered and written
//! before the next group starts. Any failure stops the run, and the snapshot
//! is only written once every chart has been written.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use survey_charts::{run, BitmapRenderer, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = run(&Config::default(), Arc::new(BitmapRenderer::new())).await?;
//!     println!("{} charts", summary.charts.len());
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use super::grouper::group_and_sort;
use super::key::KeyBuilder;
use crate::chart::{ChartRenderer, ChartSpec};
use crate::config::Config;
use crate::error::{PipelineError, PipelineResult, RenderError, RenderResult};
use crate::logs::{log_detail, log_done, log_group, log_stage, log_warning};
use crate::models::Record;
use crate::output::{build_path, ensure_dir, write_image, write_snapshot};
use crate::parser::load_records;

/// Message logged once every chart is written.
pub const CHARTS_DONE_MESSAGE: &str = "Charts generated and saved in the charts folder.";

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Records read from the input
    pub record_count: usize,
    /// Distinct group keys
    pub group_count: usize,
    /// Chart files, in group order
    pub charts: Vec<PathBuf>,
    /// Snapshot file
    pub snapshot_path: PathBuf,
}

/// Read the configured input and process it.
pub async fn run(config: &Config, renderer: Arc<dyn ChartRenderer>) -> PipelineResult<RunSummary> {
    log_stage(format!("📖 Reading {}...", config.input.display()));
    let parsed = load_records(&config.input, config.sheet.as_deref())?;
    log_detail(format!("{} rows from {}", parsed.records.len(), parsed.origin));
    log_detail(format!("{} columns", parsed.headers.len()));

    process_records(parsed.records, config, renderer).await
}

/// Group and sort `records`, write one chart per group, then the snapshot.
pub async fn process_records(
    records: Vec<Record>,
    config: &Config,
    renderer: Arc<dyn ChartRenderer>,
) -> PipelineResult<RunSummary> {
    let keys = KeyBuilder::new(config.columns.clone())
        .with_missing_placeholder(config.missing_placeholder.clone());
    let record_count = records.len();

    log_stage("📦 Grouping and sorting...");
    let grouped = group_and_sort(records, &keys);
    log_detail(format!("{} groups from {} records", grouped.len(), record_count));
    if grouped.is_empty() {
        log_warning("No records to chart");
    }

    ensure_dir(&config.charts_dir).await?;

    log_stage("📊 Rendering charts...");
    let total = grouped.len();
    let mut charts = Vec::with_capacity(total);
    for (i, (key, records)) in grouped.iter().enumerate() {
        log_group(i + 1, total, key);

        let spec =
            ChartSpec::for_group(records, &keys.columns().salary, keys.missing_placeholder());
        let bytes = render_chart(renderer.clone(), spec)
            .await
            .map_err(|source| PipelineError::Render {
                key: key.clone(),
                source,
            })?;

        let path = build_path(key, keys.missing_placeholder());
        ensure_dir(&path.directory(&config.charts_dir)).await?;
        let file = path.file(&config.charts_dir);
        write_image(&file, &bytes).await?;
        charts.push(file);
    }
    log_done(CHARTS_DONE_MESSAGE);

    write_snapshot(&config.snapshot_path, &grouped).await?;
    log_done(format!(
        "Data has been grouped, sorted, and saved to {}",
        config.snapshot_path.display()
    ));

    Ok(RunSummary {
        record_count,
        group_count: total,
        charts,
        snapshot_path: config.snapshot_path.clone(),
    })
}

/// Render on a blocking worker and wait for it.
async fn render_chart(renderer: Arc<dyn ChartRenderer>, spec: ChartSpec) -> RenderResult<Vec<u8>> {
    tokio::task::spawn_blocking(move || renderer.render(&spec))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}
