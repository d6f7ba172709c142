//! Core result types
//!
//! Verdict is a frozen contract with the presentation layer - field names
//! and value domains must not change.

use serde::{Deserialize, Serialize};

/// Which input kind is being scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Url,
    Email,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Email => "email",
        }
    }
}

/// Binary classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Safe,
    Malicious,
}

impl Label {
    /// Class index as trained: 0 = safe, 1 = malicious
    pub fn class_index(&self) -> usize {
        match self {
            Self::Safe => 0,
            Self::Malicious => 1,
        }
    }

    /// Derive the label from a (p_safe, p_malicious) distribution
    pub fn from_proba(p_safe: f32, p_malicious: f32) -> Self {
        if p_malicious >= p_safe {
            Self::Malicious
        } else {
            Self::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Malicious => "malicious",
        }
    }
}

/// Result of one scoring pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub classification: Label,
    /// Probability mass behind the predicted class
    pub confidence: f32,
    pub highlighted_text: String,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Label::Safe).unwrap(), "\"safe\"");
        assert_eq!(
            serde_json::to_string(&Label::Malicious).unwrap(),
            "\"malicious\""
        );
    }

    #[test]
    fn test_label_from_proba() {
        assert_eq!(Label::from_proba(0.8, 0.2), Label::Safe);
        assert_eq!(Label::from_proba(0.2, 0.8), Label::Malicious);
        // Ties go to malicious
        assert_eq!(Label::from_proba(0.5, 0.5), Label::Malicious);
    }

    #[test]
    fn test_verdict_field_names() {
        let verdict = Verdict {
            classification: Label::Safe,
            confidence: 0.9,
            highlighted_text: "text".to_string(),
            explanation: "why".to_string(),
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert!(json.get("classification").is_some());
        assert!(json.get("confidence").is_some());
        assert!(json.get("highlighted_text").is_some());
        assert!(json.get("explanation").is_some());
    }
}
