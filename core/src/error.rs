//! Error taxonomy
//!
//! LoadError is fatal at startup - the process must not serve traffic with
//! a missing or corrupt schema/artifact. ScoringError is caught at the
//! boundary of the scoring call and reported as a server-side failure.

use thiserror::Error;

/// Schema or classifier artifact could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema {path} declares no features")]
    EmptySchema { path: String },

    #[error("artifact {path} expects {artifact} features but schema declares {schema}")]
    FeatureCountMismatch {
        path: String,
        artifact: usize,
        schema: usize,
    },

    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("invalid artifact {path}: {reason}")]
    InvalidArtifact { path: String, reason: String },
}

/// Unexpected fault during vectorization or prediction
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("feature vector has {actual} values, classifier expects {expected}")]
    VectorShape { expected: usize, actual: usize },

    #[error("inference failed: {0}")]
    Inference(String),
}
