//! Feature extraction
//!
//! Turns raw text into a named numeric signal set. Extractors are total
//! over arbitrary strings: malformed, empty, or adversarial input yields a
//! FeatureMap, never an error.

pub mod email;
pub mod url;

pub use email::extract_email_features;
pub use url::extract_url_features;

/// Ordered mapping from feature name to numeric value.
///
/// Keys come from a fixed per-modality vocabulary, so they are `&'static`.
/// Built fresh per request and never mutated after extraction.
#[derive(Debug, Clone, Default)]
pub struct FeatureMap {
    entries: Vec<(&'static str, f32)>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: &'static str, value: f32) {
        self.entries.push((name, value));
    }

    /// Lookup by name, `None` when the extractor did not produce the key
    pub fn get(&self, name: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Lookup with the vectorizer's default
    pub fn get_or_zero(&self, name: &str) -> f32 {
        self.get(name).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.entries.iter().copied()
    }
}
