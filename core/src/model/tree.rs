//! Decision tree artifact
//!
//! JSON format exported by the training side. Nodes are stored flat;
//! `feature < 0` marks a leaf and `value` holds the per-class sample
//! counts (or probabilities) which are normalized at inference time.
//!
//! ```json
//! {"kind": "tree", "n_features": 15, "nodes": [
//!   {"feature": 12, "threshold": 1.5, "left": 1, "right": 2,
//!    "value": [0.0, 0.0]},
//!   {"feature": -1, "threshold": 0.0, "left": 0, "right": 0,
//!    "value": [40.0, 2.0]},
//!   {"feature": -1, "threshold": 0.0, "left": 0, "right": 0,
//!    "value": [3.0, 55.0]}
//! ]}
//! ```

use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::error::ScoringError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Split feature index; negative for leaves
    pub feature: i32,
    pub threshold: f32,
    pub left: usize,
    pub right: usize,
    /// Per-class mass `[safe, malicious]`, meaningful on leaves
    pub value: [f32; 2],
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.feature < 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeModel {
    pub n_features: usize,
    pub nodes: Vec<TreeNode>,
}

impl TreeModel {
    /// Structural checks run at load time, not per request
    pub fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                continue;
            }
            if node.feature as usize >= self.n_features {
                return Err(format!(
                    "node {} splits on feature {} but artifact declares {}",
                    index, node.feature, self.n_features
                ));
            }
            if node.left >= self.nodes.len() || node.right >= self.nodes.len() {
                return Err(format!("node {} has out-of-range child", index));
            }
        }
        Ok(())
    }
}

impl Classifier for TreeModel {
    fn predict_proba(&self, vector: &[f32]) -> Result<(f32, f32), ScoringError> {
        if vector.len() != self.n_features {
            return Err(ScoringError::VectorShape {
                expected: self.n_features,
                actual: vector.len(),
            });
        }

        let mut index = 0;
        // Step cap catches cyclic node graphs that slipped past validation
        for _ in 0..=self.nodes.len() {
            let node = self
                .nodes
                .get(index)
                .ok_or_else(|| ScoringError::Inference("node index out of range".to_string()))?;

            if node.is_leaf() {
                let [safe, malicious] = node.value;
                let total = safe + malicious;
                if total <= 0.0 {
                    return Err(ScoringError::Inference(format!(
                        "leaf {} has no class mass",
                        index
                    )));
                }
                return Ok((safe / total, malicious / total));
            }

            index = if vector[node.feature as usize] <= node.threshold {
                node.left
            } else {
                node.right
            };
        }

        Err(ScoringError::Inference(
            "tree walk exceeded node count".to_string(),
        ))
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }
}
