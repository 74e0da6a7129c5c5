//! Churnboard: a terminal dashboard for telco customer churn
//!
//! Loads the cleaned customer table together with the exported model and
//! scaler artifacts, then renders either the exploratory view (churn rate and
//! three charts) or the offline evaluation scores of the churn model.

pub mod cli;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod model;
pub mod terminal;
pub mod view;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use dashboard::{render_once, Bootstrap, DashboardPaths};
pub use data::{load_customers, ChurnData};
pub use error::LoadError;
pub use model::{ArtifactKind, ModelArtifact};
pub use terminal::TerminalSurface;
pub use view::{render, Surface, View};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
