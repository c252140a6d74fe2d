//! # survey-charts - salary survey grouping and charting
//!
//! survey-charts reads a salary survey export, groups answers by profile
//! (identity, experience, job title, company size), sorts every group by
//! salary range and renders one bar chart per group.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │ XLSX / CSV  │────▶│   Parser    │────▶│  Group +    │────▶│ charts_grouped/  │
//! │   survey    │     │  (records)  │     │  sort       │     │ groupedData.json │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use survey_charts::{run, BitmapRenderer, Config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let summary = run(&Config::default(), Arc::new(BitmapRenderer::new())).await.unwrap();
//!     println!("{} groups charted", summary.group_count);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`models`] - Records, grouped data, survey columns
//! - [`config`] - Run configuration (defaults, env, CLI)
//! - [`parser`] - Spreadsheet and CSV loading
//! - [`transform`] - Keys, grouping, pipeline
//! - [`chart`] - Chart description and rendering
//! - [`output`] - Output paths and writers
//! - [`logs`] - Progress logging

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Input
pub mod parser;

// Grouping
pub mod transform;

// Output
pub mod chart;
pub mod output;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    PipelineError, PipelineResult, RenderError, RenderResult, SourceError, SourceResult,
    WriteError, WriteResult,
};

// =============================================================================
// Re-exports - Models & Config
// =============================================================================

pub use config::Config;
pub use models::{GroupedData, Record, SurveyColumns, KEY_DELIMITER};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{load_records, parse_bytes_auto, read_spreadsheet, InputFormat, ParseResult};

// =============================================================================
// Re-exports - Grouping
// =============================================================================

pub use transform::{group, group_and_sort, sanitize_job_title, sort_groups, KeyBuilder};

// =============================================================================
// Re-exports - Charts & Output
// =============================================================================

pub use chart::{BitmapRenderer, ChartRenderer, ChartSpec};
pub use output::{build_path, sanitize_filename, OutputPath};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{process_records, run, RunSummary};
