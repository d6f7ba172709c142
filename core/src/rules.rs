//! Detection Rules & Thresholds
//!
//! Keyword lists, threshold constants, and the per-modality explanation
//! rule tables. NO scoring logic here - only configuration data, so the
//! lists and cutoffs can be tuned and tested independently of control flow.

use crate::features::{extract_email_features, extract_url_features, FeatureMap};
use crate::types::Modality;

// ============================================================================
// KEYWORD LISTS
// ============================================================================

/// Keywords counted into the `suspicious_words` URL feature
pub const URL_SUSPICIOUS_KEYWORDS: &[&str] =
    &["login", "verify", "security", "account", "password"];

/// Urgency language flag (`has_urgency`)
pub const EMAIL_URGENCY_KEYWORDS: &[&str] =
    &["urgent", "immediately", "asap", "hurry", "quick", "now"];

/// Threatening language flag (`has_threat`)
pub const EMAIL_THREAT_KEYWORDS: &[&str] =
    &["suspend", "terminate", "close", "locked", "banned", "restricted"];

/// Prize/reward bait flag (`has_reward`)
pub const EMAIL_REWARD_KEYWORDS: &[&str] =
    &["winner", "prize", "reward", "congratulations", "won", "free"];

/// Security bait flag (`has_security`)
pub const EMAIL_SECURITY_KEYWORDS: &[&str] =
    &["password", "login", "verify", "security", "account", "confirm"];

/// Words wrapped in emphasis markers in URL output, applied in list order
pub const URL_HIGHLIGHT_KEYWORDS: &[&str] =
    &["login", "verify", "security", "account", "password"];

/// Words wrapped in emphasis markers in email output, applied in list order
pub const EMAIL_HIGHLIGHT_KEYWORDS: &[&str] =
    &["urgent", "immediately", "winner", "prize", "verify", "password"];

// ============================================================================
// EXPLANATION THRESHOLDS
// ============================================================================

/// More than this many suspicious keywords reads as keyword stuffing
pub const SUSPICIOUS_WORDS_THRESHOLD: f32 = 1.0;

/// More hyphens than this reads as an unusual domain structure
pub const HYPHEN_THRESHOLD: f32 = 2.0;

/// More dots than this reads as excessive subdomains
pub const SUBDOMAIN_DOT_THRESHOLD: f32 = 3.0;

/// More exclamation marks than this reads as excessive punctuation
pub const EXCLAMATION_THRESHOLD: f32 = 1.0;

/// Uppercase ratio above this reads as shouting
pub const UPPERCASE_RATIO_THRESHOLD: f32 = 0.3;

// ============================================================================
// EXPLANATION RULE TABLES
// ============================================================================

/// Threshold predicate over one named feature
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Fires when the feature value is strictly above the threshold
    Above(f32),
    /// Fires when the feature value is zero (signal absent)
    Zero,
}

/// One reason phrase and the predicate that earns it
#[derive(Debug, Clone, Copy)]
pub struct ReasonRule {
    pub feature: &'static str,
    pub trigger: Trigger,
    pub phrase: &'static str,
}

impl ReasonRule {
    pub fn matches(&self, features: &FeatureMap) -> bool {
        let value = features.get_or_zero(self.feature);
        match self.trigger {
            Trigger::Above(threshold) => value > threshold,
            Trigger::Zero => value == 0.0,
        }
    }
}

/// URL reasons, tested in priority order
pub const URL_REASON_RULES: &[ReasonRule] = &[
    ReasonRule {
        feature: "suspicious_words",
        trigger: Trigger::Above(SUSPICIOUS_WORDS_THRESHOLD),
        phrase: "suspicious keywords",
    },
    ReasonRule {
        feature: "num_hyphens",
        trigger: Trigger::Above(HYPHEN_THRESHOLD),
        phrase: "unusual domain structure",
    },
    ReasonRule {
        feature: "has_https",
        trigger: Trigger::Zero,
        phrase: "insecure connection",
    },
    ReasonRule {
        feature: "has_ip",
        trigger: Trigger::Above(0.0),
        phrase: "IP address in URL",
    },
    ReasonRule {
        feature: "num_dots",
        trigger: Trigger::Above(SUBDOMAIN_DOT_THRESHOLD),
        phrase: "excessive subdomains",
    },
];

/// Email reasons, tested in priority order
pub const EMAIL_REASON_RULES: &[ReasonRule] = &[
    ReasonRule {
        feature: "has_urgency",
        trigger: Trigger::Above(0.0),
        phrase: "urgency language",
    },
    ReasonRule {
        feature: "has_threat",
        trigger: Trigger::Above(0.0),
        phrase: "threatening language",
    },
    ReasonRule {
        feature: "has_reward",
        trigger: Trigger::Above(0.0),
        phrase: "prize/reward mentions",
    },
    ReasonRule {
        feature: "has_security",
        trigger: Trigger::Above(0.0),
        phrase: "security-related keywords",
    },
    ReasonRule {
        feature: "num_exclamation",
        trigger: Trigger::Above(EXCLAMATION_THRESHOLD),
        phrase: "excessive punctuation",
    },
    ReasonRule {
        feature: "uppercase_ratio",
        trigger: Trigger::Above(UPPERCASE_RATIO_THRESHOLD),
        phrase: "excessive uppercase text",
    },
];

// ============================================================================
// MODALITY PROFILES
// ============================================================================

/// Everything modality-specific the generic pipeline needs: feature
/// function, explanation rules and templates, highlight list.
pub struct ModalityProfile {
    pub modality: Modality,
    pub extract: fn(&str) -> FeatureMap,
    pub reason_rules: &'static [ReasonRule],
    pub malicious_prefix: &'static str,
    pub malicious_suffix: &'static str,
    /// Substituted when no reason rule fires
    pub fallback_phrase: &'static str,
    pub safe_sentence: &'static str,
    pub highlight_keywords: &'static [&'static str],
}

pub static URL_PROFILE: ModalityProfile = ModalityProfile {
    modality: Modality::Url,
    extract: extract_url_features,
    reason_rules: URL_REASON_RULES,
    malicious_prefix: "URL shows ",
    malicious_suffix: " commonly found in phishing attempts.",
    fallback_phrase: "characteristics",
    safe_sentence: "URL appears legitimate based on security analysis.",
    highlight_keywords: URL_HIGHLIGHT_KEYWORDS,
};

pub static EMAIL_PROFILE: ModalityProfile = ModalityProfile {
    modality: Modality::Email,
    extract: extract_email_features,
    reason_rules: EMAIL_REASON_RULES,
    malicious_prefix: "Email contains ",
    malicious_suffix: " typical of phishing campaigns.",
    fallback_phrase: "characteristics",
    safe_sentence: "Email content appears safe and legitimate.",
    highlight_keywords: EMAIL_HIGHLIGHT_KEYWORDS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_above() {
        let mut map = FeatureMap::new();
        map.insert("num_hyphens", 3.0);

        let rule = &URL_REASON_RULES[1];
        assert!(rule.matches(&map));

        let mut below = FeatureMap::new();
        below.insert("num_hyphens", 2.0);
        assert!(!rule.matches(&below));
    }

    #[test]
    fn test_trigger_zero_on_absent_feature() {
        // An absent feature reads as 0, so the insecure-connection rule fires
        let map = FeatureMap::new();
        let rule = &URL_REASON_RULES[2];
        assert!(rule.matches(&map));
    }

    #[test]
    fn test_profiles_reference_their_modality() {
        assert_eq!(URL_PROFILE.modality, Modality::Url);
        assert_eq!(EMAIL_PROFILE.modality, Modality::Email);
    }
}
