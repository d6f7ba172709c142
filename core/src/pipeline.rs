//! Scoring pipeline
//!
//! One generic pipeline covers both modalities - the URL and email paths
//! differ only in the ModalityProfile they carry, so the two cannot drift
//! apart. A DetectionEngine owns the two pipelines, is built once at
//! startup, and is shared read-only across requests.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{LoadError, ScoringError};
use crate::explain::explain;
use crate::highlight::highlight;
use crate::model::{load_artifact, ArtifactMetadata, Classifier, Prediction};
use crate::rules::{ModalityProfile, EMAIL_PROFILE, URL_PROFILE};
use crate::schema::FeatureSchema;
use crate::types::{Modality, Verdict};

/// One modality's extract -> vectorize -> predict -> explain chain
pub struct Pipeline {
    profile: &'static ModalityProfile,
    schema: FeatureSchema,
    classifier: Box<dyn Classifier>,
    metadata: ArtifactMetadata,
}

impl Pipeline {
    /// Load the (schema, artifact) pair for one modality. Any failure is a
    /// startup failure.
    pub fn load(
        profile: &'static ModalityProfile,
        schema_path: &Path,
        model_path: &Path,
    ) -> Result<Self, LoadError> {
        let schema = FeatureSchema::load(schema_path)?;
        let loaded = load_artifact(model_path, schema.len())?;

        Ok(Self {
            profile,
            schema,
            classifier: loaded.classifier,
            metadata: loaded.metadata,
        })
    }

    /// Assemble from already-built parts. Intended for tests and embedders
    /// that manage artifacts themselves.
    pub fn from_parts(
        profile: &'static ModalityProfile,
        schema: FeatureSchema,
        classifier: Box<dyn Classifier>,
        metadata: ArtifactMetadata,
    ) -> Self {
        Self {
            profile,
            schema,
            classifier,
            metadata,
        }
    }

    pub fn modality(&self) -> Modality {
        self.profile.modality
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Score one input. Extraction and highlighting are total; only the
    /// classifier stage can fail, and a failure yields an error - never a
    /// partial Verdict.
    pub fn score(&self, text: &str) -> Result<Verdict, ScoringError> {
        let features = (self.profile.extract)(text);
        let vector = self.schema.vectorize(&features);

        let label = self.classifier.predict(&vector)?;
        let (p_safe, p_malicious) = self.classifier.predict_proba(&vector)?;
        let prediction = Prediction {
            label,
            p_safe,
            p_malicious,
        };

        let explanation = explain(&features, label, self.profile);
        let highlighted_text = highlight(text, self.profile.highlight_keywords);

        Ok(Verdict {
            classification: label,
            confidence: prediction.confidence(),
            highlighted_text,
            explanation,
        })
    }
}

/// Paths to the two (schema, artifact) pairs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub url_schema: PathBuf,
    pub url_model: PathBuf,
    pub email_schema: PathBuf,
    pub email_model: PathBuf,
}

/// Status snapshot of one loaded model, for health reporting
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub kind: String,
    pub n_features: usize,
    pub schema_fingerprint: String,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// Status of both pipelines
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub url: ModelStatus,
    pub email: ModelStatus,
}

/// Both scoring pipelines, loaded once at process start
pub struct DetectionEngine {
    url: Pipeline,
    email: Pipeline,
}

impl DetectionEngine {
    /// Load both (schema, artifact) pairs. The caller must abort startup on
    /// an error from here - serving without a model is not an option.
    pub fn load(config: &EngineConfig) -> Result<Self, LoadError> {
        let url = Pipeline::load(&URL_PROFILE, &config.url_schema, &config.url_model)?;
        let email = Pipeline::load(&EMAIL_PROFILE, &config.email_schema, &config.email_model)?;

        Ok(Self { url, email })
    }

    pub fn from_pipelines(url: Pipeline, email: Pipeline) -> Self {
        Self { url, email }
    }

    pub fn score_url(&self, text: &str) -> Result<Verdict, ScoringError> {
        self.url.score(text)
    }

    pub fn score_email(&self, text: &str) -> Result<Verdict, ScoringError> {
        self.email.score(text)
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            url: model_status(&self.url),
            email: model_status(&self.email),
        }
    }
}

fn model_status(pipeline: &Pipeline) -> ModelStatus {
    let metadata = pipeline.metadata();
    ModelStatus {
        kind: metadata.kind.clone(),
        n_features: metadata.n_features,
        schema_fingerprint: format!("{:08x}", pipeline.schema().fingerprint()),
        sha256: metadata.sha256.clone(),
        loaded_at: metadata.loaded_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogisticModel;
    use crate::types::Label;

    fn metadata(kind: &str) -> ArtifactMetadata {
        ArtifactMetadata {
            path: "<memory>".to_string(),
            kind: kind.to_string(),
            n_features: 0,
            sha256: String::new(),
            loaded_at: Utc::now(),
        }
    }

    fn url_pipeline() -> Pipeline {
        // Single decisive signal: missing https pushes hard toward malicious
        let schema = FeatureSchema::new(vec!["has_https".to_string()]);
        let model = LogisticModel {
            n_features: 1,
            intercept: 2.0,
            weights: vec![-4.0],
        };
        Pipeline::from_parts(&URL_PROFILE, schema, Box::new(model), metadata("logistic"))
    }

    fn email_pipeline() -> Pipeline {
        let schema = FeatureSchema::new(vec![
            "has_urgency".to_string(),
            "has_reward".to_string(),
        ]);
        let model = LogisticModel {
            n_features: 2,
            intercept: -2.0,
            weights: vec![3.0, 3.0],
        };
        Pipeline::from_parts(&EMAIL_PROFILE, schema, Box::new(model), metadata("logistic"))
    }

    #[test]
    fn test_url_scenario_malicious() {
        let verdict = url_pipeline()
            .score("http://secure-login-verify.badsite.com/account?reset=1")
            .unwrap();

        assert_eq!(verdict.classification, Label::Malicious);
        assert!(verdict.confidence > 0.5 && verdict.confidence <= 1.0);
        assert!(verdict.explanation.contains("insecure connection"));
        assert!(verdict.explanation.contains("suspicious keywords"));
        assert!(verdict.highlighted_text.contains("**login**"));
        assert!(verdict.highlighted_text.contains("**account**"));
    }

    #[test]
    fn test_url_scenario_safe() {
        let verdict = url_pipeline().score("https://example.com/about").unwrap();

        assert_eq!(verdict.classification, Label::Safe);
        assert_eq!(
            verdict.explanation,
            "URL appears legitimate based on security analysis."
        );
        // Nothing to highlight in a clean URL
        assert_eq!(verdict.highlighted_text, "https://example.com/about");
    }

    #[test]
    fn test_email_scenario_malicious() {
        let verdict = email_pipeline()
            .score("URGENT!!! You are a WINNER! Verify your password now!")
            .unwrap();

        assert_eq!(verdict.classification, Label::Malicious);
        assert!(verdict.explanation.contains("urgency language"));
        assert!(verdict.explanation.contains("prize/reward mentions"));
    }

    #[test]
    fn test_email_scenario_safe() {
        let verdict = email_pipeline()
            .score("See you at the meeting tomorrow.")
            .unwrap();

        assert_eq!(verdict.classification, Label::Safe);
        assert_eq!(
            verdict.explanation,
            "Email content appears safe and legitimate."
        );
    }

    #[test]
    fn test_confidence_is_predicted_class_mass() {
        let pipeline = url_pipeline();
        let text = "http://example.com";

        let features = crate::features::extract_url_features(text);
        let vector = pipeline.schema().vectorize(&features);
        let model = LogisticModel {
            n_features: 1,
            intercept: 2.0,
            weights: vec![-4.0],
        };
        let (p_safe, p_malicious) = model.predict_proba(&vector).unwrap();

        let verdict = pipeline.score(text).unwrap();
        let expected = match verdict.classification {
            Label::Malicious => p_malicious,
            Label::Safe => p_safe,
        };
        assert!((verdict.confidence - expected).abs() < 1e-6);
    }

    #[test]
    fn test_shape_mismatch_is_scoring_error() {
        // Schema declares two features, artifact expects one
        let schema = FeatureSchema::new(vec!["a".to_string(), "b".to_string()]);
        let model = LogisticModel {
            n_features: 1,
            intercept: 0.0,
            weights: vec![1.0],
        };
        let pipeline =
            Pipeline::from_parts(&URL_PROFILE, schema, Box::new(model), metadata("logistic"));

        let result = pipeline.score("http://example.com");
        assert!(matches!(result, Err(ScoringError::VectorShape { .. })));
    }

    #[test]
    fn test_engine_routes_by_modality() {
        assert_eq!(url_pipeline().modality(), Modality::Url);
        assert_eq!(email_pipeline().modality(), Modality::Email);

        let engine = DetectionEngine::from_pipelines(url_pipeline(), email_pipeline());

        let url_verdict = engine.score_url("https://example.com/about").unwrap();
        assert_eq!(
            url_verdict.explanation,
            "URL appears legitimate based on security analysis."
        );

        let email_verdict = engine
            .score_email("See you at the meeting tomorrow.")
            .unwrap();
        assert_eq!(
            email_verdict.explanation,
            "Email content appears safe and legitimate."
        );
    }
}
