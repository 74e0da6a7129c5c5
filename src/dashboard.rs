//! Startup loading and the load-then-render cycle run on every interaction

use std::path::{Path, PathBuf};

use crate::data::{load_customers, ChurnData};
use crate::model::{ArtifactKind, ModelArtifact};
use crate::view::{render, Surface, View};

pub const DEFAULT_DATASET: &str = "WA_Fn-UseC_-Telco-Customer-Churn.csv";
pub const DEFAULT_MODEL: &str = "modelo_final.pkl";
pub const DEFAULT_SCALER: &str = "scaler_final.pkl";

/// Locations of the three startup files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardPaths {
    pub dataset: PathBuf,
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl DashboardPaths {
    /// Default file names resolved against `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dataset: dir.join(DEFAULT_DATASET),
            model: dir.join(DEFAULT_MODEL),
            scaler: dir.join(DEFAULT_SCALER),
        }
    }
}

impl Default for DashboardPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}

/// Everything a view may read. Only constructed when all three files loaded.
#[derive(Debug)]
pub struct Bootstrap {
    pub data: ChurnData,
    pub model: ModelArtifact,
    pub scaler: ModelArtifact,
}

impl Bootstrap {
    /// Load the dataset, then the model, then the scaler. Stops at the first
    /// missing file.
    pub fn load(paths: &DashboardPaths) -> crate::Result<Self> {
        let data = load_customers(&paths.dataset)?;
        let model = ModelArtifact::load(ArtifactKind::Model, &paths.model)?;
        let scaler = ModelArtifact::load(ArtifactKind::Scaler, &paths.scaler)?;

        tracing::info!(
            customers = data.len(),
            dropped = data.dropped_rows,
            model_bytes = model.len(),
            scaler_bytes = scaler.len(),
            "dashboard inputs loaded"
        );

        Ok(Self {
            data,
            model,
            scaler,
        })
    }
}

/// Reload every input from disk and render `view`.
///
/// Nothing is cached between calls; a bootstrap failure returns before the
/// surface sees any output.
pub fn render_once<S: Surface + ?Sized>(
    paths: &DashboardPaths,
    view: View,
    surface: &mut S,
) -> crate::Result<()> {
    let boot = Bootstrap::load(paths)?;
    render(view, &boot, surface)
}
