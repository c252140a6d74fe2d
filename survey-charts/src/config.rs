//! Run configuration.
//!
//! Defaults reproduce the fixed layout: read `data.xlsx`, write charts under
//! `charts_grouped/` and the snapshot to `groupedData.json`. Environment
//! variables (optionally from a `.env` file) override the defaults, and the
//! CLI overrides both.

use std::env;
use std::path::PathBuf;

use crate::models::{SurveyColumns, DEFAULT_MISSING_PLACEHOLDER};

/// Default input spreadsheet.
pub const DEFAULT_INPUT: &str = "data.xlsx";

/// Default root directory for chart images.
pub const DEFAULT_CHARTS_DIR: &str = "charts_grouped";

/// Default snapshot file.
pub const DEFAULT_SNAPSHOT: &str = "groupedData.json";

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Survey file (spreadsheet or CSV)
    pub input: PathBuf,
    /// Sheet to read; `None` means the first sheet
    pub sheet: Option<String>,
    /// Root directory for chart images
    pub charts_dir: PathBuf,
    /// Grouped data snapshot file
    pub snapshot_path: PathBuf,
    /// Value used in keys and labels for absent fields
    pub missing_placeholder: String,
    /// Column labels
    pub columns: SurveyColumns,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            sheet: None,
            charts_dir: PathBuf::from(DEFAULT_CHARTS_DIR),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT),
            missing_placeholder: DEFAULT_MISSING_PLACEHOLDER.to_string(),
            columns: SurveyColumns::default(),
        }
    }
}

impl Config {
    /// Build a config from defaults overridden by `SURVEY_*` environment variables.
    pub fn from_env() -> Self {
        // Try loading .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(input) = lookup("SURVEY_INPUT") {
            config.input = PathBuf::from(input);
        }
        if let Some(sheet) = lookup("SURVEY_SHEET") {
            config.sheet = Some(sheet);
        }
        if let Some(dir) = lookup("SURVEY_CHARTS_DIR") {
            config.charts_dir = PathBuf::from(dir);
        }
        if let Some(snapshot) = lookup("SURVEY_SNAPSHOT") {
            config.snapshot_path = PathBuf::from(snapshot);
        }
        if let Some(placeholder) = lookup("SURVEY_MISSING_PLACEHOLDER") {
            config.missing_placeholder = placeholder;
        }

        config
    }

    /// Set the input file
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the charts root directory
    pub fn with_charts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.charts_dir = dir.into();
        self
    }

    /// Set the snapshot file
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }
}
