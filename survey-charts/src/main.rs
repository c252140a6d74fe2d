//! survey-charts CLI - group survey answers and chart every group
//!
//! ```bash
//! survey-charts                              # data.xlsx -> charts_grouped/ + groupedData.json
//! survey-charts --input answers.csv          # CSV export instead of a workbook
//! survey-charts --sheet "Form Responses 1"   # pick a worksheet
//! ```
//!
//! Every flag is optional; `SURVEY_*` environment variables (or a `.env`
//! file) set the same values.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use survey_charts::logs::log_error;
use survey_charts::{run, BitmapRenderer, Config};

#[derive(Parser)]
#[command(name = "survey-charts")]
#[command(
    about = "Group salary survey answers and render one bar chart per group",
    long_about = None
)]
struct Cli {
    /// Survey file (.xlsx, .xls, .ods, .csv) [default: data.xlsx]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Worksheet name (default: first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Root directory for charts [default: charts_grouped]
    #[arg(short, long)]
    charts_dir: Option<PathBuf>,

    /// Snapshot file [default: groupedData.json]
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Placeholder for missing answers [default: undefined]
    #[arg(long)]
    missing_placeholder: Option<String>,

    /// Font family used in charts
    #[arg(long, default_value = "sans-serif")]
    font: String,
}

impl Cli {
    fn into_config(self, mut config: Config) -> Config {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(sheet) = self.sheet {
            config.sheet = Some(sheet);
        }
        if let Some(dir) = self.charts_dir {
            config.charts_dir = dir;
        }
        if let Some(snapshot) = self.snapshot {
            config.snapshot_path = snapshot;
        }
        if let Some(placeholder) = self.missing_placeholder {
            config.missing_placeholder = placeholder;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let renderer = BitmapRenderer::new().with_font_family(&cli.font);
    let config = cli.into_config(Config::from_env());

    if let Err(e) = run(&config, Arc::new(renderer)).await {
        log_error(e.to_string());
        std::process::exit(1);
    }
}
