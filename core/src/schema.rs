//! Feature Schema - the contract between training and inference
//!
//! An ordered list of feature names loaded from a JSON artifact file (a
//! plain string array, the format the training side exports). The order
//! defines the vector layout the classifier was trained with; a CRC32
//! fingerprint of the ordered names detects layout drift between
//! deployments.

use std::fs;
use std::path::Path;

use crc32fast::Hasher;

use crate::error::LoadError;
use crate::features::FeatureMap;

#[derive(Debug, Clone)]
pub struct FeatureSchema {
    names: Vec<String>,
    fingerprint: u32,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        let fingerprint = compute_fingerprint(&names);
        Self { names, fingerprint }
    }

    /// Load from a JSON file containing an array of feature names
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let data = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let names: Vec<String> =
            serde_json::from_str(&data).map_err(|source| LoadError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        if names.is_empty() {
            return Err(LoadError::EmptySchema {
                path: path.display().to_string(),
            });
        }

        let schema = Self::new(names);
        log::info!(
            "Loaded feature schema from {} ({} features, fingerprint {:08x})",
            path.display(),
            schema.len(),
            schema.fingerprint()
        );

        Ok(schema)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// CRC32 over the ordered name list
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    /// Project a named feature map into the schema-ordered numeric vector.
    ///
    /// `vector[i]` corresponds to `names[i]`; names absent from the map
    /// default to 0. Extra map keys are ignored - forward compatible in
    /// both directions.
    pub fn vectorize(&self, features: &FeatureMap) -> Vec<f32> {
        self.names
            .iter()
            .map(|name| features.get_or_zero(name))
            .collect()
    }
}

fn compute_fingerprint(names: &[String]) -> u32 {
    let mut hasher = Hasher::new();
    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}
