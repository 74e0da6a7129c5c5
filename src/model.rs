//! Serialized model artifacts produced by the offline training notebook

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, Resource};

/// Pickle streams written with protocol 2 or later start with this opcode
const PICKLE_PROTO: u8 = 0x80;

/// Which of the two exported artifacts a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Scaler,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Model => write!(f, "model"),
            ArtifactKind::Scaler => write!(f, "scaler"),
        }
    }
}

/// An artifact held as opaque bytes for the lifetime of a render.
///
/// The dashboard never runs inference; the bytes are only kept so that a
/// render proceeds exactly when every exported file is present.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    bytes: Vec<u8>,
}

impl ModelArtifact {
    /// Read the whole artifact file
    pub fn load(kind: ArtifactKind, path: &Path) -> crate::Result<Self> {
        if !path.is_file() {
            return Err(LoadError::missing(Resource::Artifact(kind), path).into());
        }

        let bytes = std::fs::read(path)?;
        let artifact = Self {
            kind,
            path: path.to_path_buf(),
            bytes,
        };

        tracing::debug!(
            kind = %kind,
            path = %path.display(),
            size = artifact.len(),
            pickle_protocol = ?artifact.pickle_protocol(),
            "artifact loaded"
        );

        Ok(artifact)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Protocol number from the pickle header, if the bytes carry one
    pub fn pickle_protocol(&self) -> Option<u8> {
        match self.bytes.as_slice() {
            [PICKLE_PROTO, proto, ..] => Some(*proto),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_keeps_bytes_opaque() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x80, 0x04, 0x95, 0x00, 0x2e]).unwrap();

        let artifact = ModelArtifact::load(ArtifactKind::Model, file.path()).unwrap();
        assert_eq!(artifact.kind, ArtifactKind::Model);
        assert_eq!(artifact.len(), 5);
        assert_eq!(artifact.pickle_protocol(), Some(4));
    }

    #[test]
    fn test_non_pickle_bytes_have_no_protocol() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"joblib?").unwrap();

        let artifact = ModelArtifact::load(ArtifactKind::Scaler, file.path()).unwrap();
        assert_eq!(artifact.pickle_protocol(), None);
        assert!(!artifact.is_empty());
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler_final.pkl");

        let err = ModelArtifact::load(ArtifactKind::Scaler, &path).unwrap_err();
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::MissingFile { resource, .. }) => {
                assert_eq!(*resource, Resource::Artifact(ArtifactKind::Scaler));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
