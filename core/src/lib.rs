//! PhishGuard Detection Core
//!
//! Feature extraction + scoring pipeline for URL and email phishing
//! detection.
//!
//! # Architecture
//!
//! ```text
//! raw text ──► extractor ──► FeatureMap ──► vectorize ──► FeatureVector
//!                  │                                            │
//!                  │                                       classifier
//!                  │                                            │
//!                  ├──────────► explanation ◄── {label, proba} ─┘
//!                  │
//! raw text ──────► highlighter
//! ```
//!
//! Schemas and classifier artifacts are loaded once at startup and are
//! immutable afterwards. Everything per-request is stateless.

pub mod error;
pub mod explain;
pub mod features;
pub mod highlight;
pub mod model;
pub mod pipeline;
pub mod rules;
pub mod schema;
pub mod types;

// Re-export common types
pub use error::{LoadError, ScoringError};
pub use features::FeatureMap;
pub use model::{Classifier, Prediction};
pub use pipeline::{DetectionEngine, EngineConfig, EngineStatus, Pipeline};
pub use schema::FeatureSchema;
pub use types::{Label, Modality, Verdict};
