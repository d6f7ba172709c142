//! Classifier artifacts
//!
//! The classifier is an opaque, externally trained model - the core never
//! reimplements its training algorithm, it only runs inference. The trait
//! boundary lets the concrete artifact (logistic regression, decision tree,
//! ONNX graph) be swapped without touching extraction, explanation, or
//! highlighting.

pub mod loader;
pub mod logistic;
pub mod onnx;
pub mod tree;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ScoringError;
use crate::types::Label;

pub use loader::{load_artifact, LoadedModel};
pub use logistic::LogisticModel;
pub use onnx::OnnxClassifier;
pub use tree::TreeModel;

/// Pre-trained binary classifier.
///
/// Contract: same input vector, same output - no hidden randomness at
/// inference time. `predict_proba` returns `(p_safe, p_malicious)` summing
/// to 1 within floating tolerance.
pub trait Classifier: Send + Sync {
    /// Class-probability pair `(p_safe, p_malicious)`
    fn predict_proba(&self, vector: &[f32]) -> Result<(f32, f32), ScoringError>;

    /// Class label, derived from the probability distribution
    fn predict(&self, vector: &[f32]) -> Result<Label, ScoringError> {
        let (p_safe, p_malicious) = self.predict_proba(vector)?;
        Ok(Label::from_proba(p_safe, p_malicious))
    }

    /// Expected vector length, when the artifact declares one
    fn n_features(&self) -> Option<usize>;
}

/// One classifier output with both label and distribution
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Prediction {
    pub label: Label,
    pub p_safe: f32,
    pub p_malicious: f32,
}

impl Prediction {
    /// Probability mass behind the predicted class - what the caller sees
    /// as `confidence`
    pub fn confidence(&self) -> f32 {
        match self.label {
            Label::Malicious => self.p_malicious,
            Label::Safe => self.p_safe,
        }
    }
}

/// Metadata recorded when an artifact is loaded
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactMetadata {
    pub path: String,
    pub kind: String,
    pub n_features: usize,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_follows_predicted_class() {
        let malicious = Prediction {
            label: Label::Malicious,
            p_safe: 0.2,
            p_malicious: 0.8,
        };
        assert_eq!(malicious.confidence(), 0.8);

        let safe = Prediction {
            label: Label::Safe,
            p_safe: 0.9,
            p_malicious: 0.1,
        };
        assert_eq!(safe.confidence(), 0.9);
    }
}
