//! Command-line interface definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;

use crate::dashboard::{DashboardPaths, DEFAULT_DATASET, DEFAULT_MODEL, DEFAULT_SCALER};
use crate::view::View;

/// Customer churn dashboard: exploratory charts and model evaluation scores
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the dataset and the exported artifacts
    #[arg(short, long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Customer CSV file name inside the data directory
    #[arg(long, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Serialized model file name inside the data directory
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Serialized scaler file name inside the data directory
    #[arg(long, default_value = DEFAULT_SCALER)]
    pub scaler: String,

    /// Render a single view and exit instead of showing the menu
    #[arg(long, value_enum)]
    pub view: Option<View>,

    /// Also write charts as SVG files into this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolve the three startup files against the data directory
    pub fn paths(&self) -> DashboardPaths {
        DashboardPaths {
            dataset: self.data_dir.join(&self.dataset),
            model: self.data_dir.join(&self.model),
            scaler: self.data_dir.join(&self.scaler),
        }
    }
}
