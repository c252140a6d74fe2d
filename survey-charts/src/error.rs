//! Error types for the survey grouping pipeline.
//!
//! One error type per stage:
//!
//! - [`SourceError`] - reading the survey file (spreadsheet or CSV)
//! - [`RenderError`] - turning a group into a PNG chart
//! - [`WriteError`] - creating directories, writing charts and the snapshot
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while loading survey records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a known spreadsheet or CSV format.
    #[error("Unsupported input format: '{0}'")]
    UnsupportedFormat(PathBuf),

    /// The spreadsheet could not be opened or decoded.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// The workbook has no sheet (or no sheet with the requested name).
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Failed to decode text content.
    #[error("Failed to decode content as {encoding}")]
    Encoding { encoding: String },

    /// Invalid CSV content.
    #[error("Invalid CSV at line {line}: {message}")]
    Csv { line: u64, message: String },

    /// No header row found.
    #[error("No header row found")]
    NoHeaders,
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors while rendering a chart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The chart has no bars to draw.
    #[error("Cannot render an empty chart")]
    EmptyChart,

    /// The drawing backend failed (fonts, layout, rasterization).
    #[error("Drawing failed: {0}")]
    Draw(String),

    /// The raster buffer could not be encoded as PNG.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(String),
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while persisting outputs.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Directory creation failed.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write failed.
    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot serialization failed.
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the input failed.
    #[error("Read error: {0}")]
    Source(#[from] SourceError),

    /// Rendering a group's chart failed.
    #[error("Render error for group '{key}': {source}")]
    Render {
        key: String,
        #[source]
        source: RenderError,
    },

    /// Writing an output failed.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for output operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
