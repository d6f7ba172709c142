//! Artifact loading
//!
//! Reads a classifier artifact from disk, verifies its integrity, and
//! checks the declared feature count against the schema. All failures here
//! are startup failures - the caller must not serve traffic past them.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{ArtifactMetadata, Classifier, LogisticModel, OnnxClassifier, TreeModel};
use crate::error::LoadError;

/// A classifier plus the metadata recorded at load time
pub struct LoadedModel {
    pub classifier: Box<dyn Classifier>,
    pub metadata: ArtifactMetadata,
}

/// JSON artifact envelope, tagged by model kind
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum JsonArtifact {
    Logistic(LogisticModel),
    Tree(TreeModel),
}

/// Load a classifier artifact.
///
/// Dispatches on extension: `.onnx` goes to ONNX Runtime, anything else is
/// parsed as a tagged JSON artifact. When a `<path>.sha256` sidecar exists
/// its digest must match the artifact bytes.
pub fn load_artifact(path: &Path, schema_len: usize) -> Result<LoadedModel, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let sha256 = hex::encode(Sha256::digest(&bytes));
    verify_checksum(path, &sha256)?;

    let is_onnx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("onnx"))
        .unwrap_or(false);

    let (classifier, kind): (Box<dyn Classifier>, &str) = if is_onnx {
        let model =
            OnnxClassifier::from_bytes(&bytes, schema_len).map_err(|reason| {
                LoadError::InvalidArtifact {
                    path: path.display().to_string(),
                    reason,
                }
            })?;
        (Box::new(model), "onnx")
    } else {
        let artifact: JsonArtifact =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        match artifact {
            JsonArtifact::Logistic(model) => {
                model.validate().map_err(|reason| LoadError::InvalidArtifact {
                    path: path.display().to_string(),
                    reason,
                })?;
                (Box::new(model), "logistic")
            }
            JsonArtifact::Tree(model) => {
                model.validate().map_err(|reason| LoadError::InvalidArtifact {
                    path: path.display().to_string(),
                    reason,
                })?;
                (Box::new(model), "tree")
            }
        }
    };

    if let Some(declared) = classifier.n_features() {
        if declared != schema_len {
            return Err(LoadError::FeatureCountMismatch {
                path: path.display().to_string(),
                artifact: declared,
                schema: schema_len,
            });
        }
    }

    let metadata = ArtifactMetadata {
        path: path.display().to_string(),
        kind: kind.to_string(),
        n_features: schema_len,
        sha256,
        loaded_at: Utc::now(),
    };

    log::info!(
        "Loaded {} classifier from {} ({} features, sha256 {})",
        metadata.kind,
        metadata.path,
        metadata.n_features,
        &metadata.sha256[..12]
    );

    Ok(LoadedModel { classifier, metadata })
}

/// Compare against a `<path>.sha256` sidecar when one is present
fn verify_checksum(path: &Path, actual: &str) -> Result<(), LoadError> {
    let mut sidecar = path.as_os_str().to_owned();
    sidecar.push(".sha256");
    let sidecar = Path::new(&sidecar);

    if !sidecar.exists() {
        return Ok(());
    }

    let expected = fs::read_to_string(sidecar)
        .map_err(|source| LoadError::Io {
            path: sidecar.display().to_string(),
            source,
        })?
        .trim()
        .to_lowercase();

    if expected != actual {
        return Err(LoadError::ChecksumMismatch {
            path: path.display().to_string(),
            expected,
            actual: actual.to_string(),
        });
    }

    Ok(())
}
