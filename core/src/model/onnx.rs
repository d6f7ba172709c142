//! ONNX artifact backend
//!
//! Runs exported graphs (e.g. sklearn models converted with skl2onnx)
//! through ONNX Runtime. Input is a single `[1, n_features]` f32 tensor;
//! the first output tensor must carry the two class probabilities.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::Classifier;
use crate::error::ScoringError;

pub struct OnnxClassifier {
    // Session::run takes &mut self
    session: Mutex<Session>,
    output_name: String,
    n_features: usize,
}

impl OnnxClassifier {
    /// Build a session from artifact bytes already read (and checksummed)
    /// by the loader. The schema supplies the expected vector length since
    /// the graph is not introspected.
    pub fn from_bytes(bytes: &[u8], n_features: usize) -> Result<Self, String> {
        let session = Session::builder()
            .map_err(|e| format!("failed to create session builder: {}", e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| format!("failed to set optimization: {}", e))?
            .commit_from_memory(bytes)
            .map_err(|e| format!("failed to load model: {}", e))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| "graph defines no outputs".to_string())?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            n_features,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, vector: &[f32]) -> Result<(f32, f32), ScoringError> {
        if vector.len() != self.n_features {
            return Err(ScoringError::VectorShape {
                expected: self.n_features,
                actual: vector.len(),
            });
        }

        let input_array = Array2::<f32>::from_shape_vec((1, vector.len()), vector.to_vec())
            .map_err(|e| ScoringError::Inference(format!("array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ScoringError::Inference(format!("tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ScoringError::Inference(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| ScoringError::Inference("no output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ScoringError::Inference(format!("extract error: {}", e)))?;

        let data = output_tensor.1;
        if data.len() < 2 {
            return Err(ScoringError::Inference(format!(
                "expected 2 class probabilities, got {}",
                data.len()
            )));
        }

        let (p_safe, p_malicious) = (data[0], data[1]);
        let total = p_safe + p_malicious;
        if !total.is_finite() || total <= 0.0 {
            return Err(ScoringError::Inference(
                "degenerate probability output".to_string(),
            ));
        }

        // Renormalize: some exporters emit raw scores slightly off 1.0
        Ok((p_safe / total, p_malicious / total))
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }
}
