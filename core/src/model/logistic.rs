//! Logistic regression artifact
//!
//! JSON format exported by the training side:
//!
//! ```json
//! {"kind": "logistic", "n_features": 15, "intercept": -1.2, "weights": [...]}
//! ```

use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::error::ScoringError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub n_features: usize,
    pub intercept: f32,
    pub weights: Vec<f32>,
}

impl LogisticModel {
    /// Consistency checks run at load time, not per request
    pub fn validate(&self) -> Result<(), String> {
        if self.weights.len() != self.n_features {
            return Err(format!(
                "declares {} features but has {} weights",
                self.n_features,
                self.weights.len()
            ));
        }
        if self.weights.iter().chain([&self.intercept]).any(|w| !w.is_finite()) {
            return Err("non-finite weight".to_string());
        }
        Ok(())
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, vector: &[f32]) -> Result<(f32, f32), ScoringError> {
        if vector.len() != self.n_features {
            return Err(ScoringError::VectorShape {
                expected: self.n_features,
                actual: vector.len(),
            });
        }

        let z: f32 = self.intercept
            + self
                .weights
                .iter()
                .zip(vector.iter())
                .map(|(w, x)| w * x)
                .sum::<f32>();

        let p_malicious = 1.0 / (1.0 + (-z).exp());
        Ok((1.0 - p_malicious, p_malicious))
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }
}
