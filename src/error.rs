//! Loader errors surfaced to the user before any view renders.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::ArtifactKind;

/// Resource the bootstrap loader was reading when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Dataset,
    Artifact(ArtifactKind),
}

/// Errors that stop the dashboard before rendering.
#[derive(Error, Debug)]
pub enum LoadError {
    /// One of the three startup files is absent
    #[error("{}", missing_file_message(.resource, .path))]
    MissingFile { resource: Resource, path: PathBuf },

    /// Dataset lacks a column the views read
    #[error("Missing required column in dataset: {0}")]
    MissingColumn(String),
}

impl LoadError {
    pub fn missing(resource: Resource, path: impl Into<PathBuf>) -> Self {
        LoadError::MissingFile {
            resource,
            path: path.into(),
        }
    }
}

fn missing_file_message(resource: &Resource, path: &std::path::Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match resource {
        Resource::Dataset => format!("data file ('{}') not found.", name),
        Resource::Artifact(ArtifactKind::Model) => format!(
            "predictive model ('{}') not found. Make sure it was exported by the training notebook.",
            name
        ),
        Resource::Artifact(ArtifactKind::Scaler) => format!(
            "scaler ('{}') not found. It must sit in the same folder as the model.",
            name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_messages_name_the_file() {
        let err = LoadError::missing(Resource::Dataset, "/tmp/data/customers.csv");
        assert_eq!(err.to_string(), "data file ('customers.csv') not found.");

        let err = LoadError::missing(Resource::Artifact(ArtifactKind::Model), "modelo_final.pkl");
        assert!(err.to_string().starts_with("predictive model ('modelo_final.pkl') not found."));

        let err = LoadError::missing(Resource::Artifact(ArtifactKind::Scaler), "scaler_final.pkl");
        assert!(err.to_string().starts_with("scaler ('scaler_final.pkl') not found."));
    }

    #[test]
    fn test_missing_column_message() {
        let err = LoadError::MissingColumn("Churn".to_string());
        assert_eq!(err.to_string(), "Missing required column in dataset: Churn");
    }
}
