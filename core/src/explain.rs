//! Explanation generation
//!
//! Deterministic rule set over the NAMED features (not the raw vector).
//! For a malicious verdict the matched reason phrases are joined into a
//! templated sentence; a safe verdict gets a fixed per-modality sentence -
//! safety is evidenced only by the absence of risk signals.

use crate::features::FeatureMap;
use crate::rules::ModalityProfile;
use crate::types::Label;

/// Build the human-readable rationale for one verdict.
pub fn explain(features: &FeatureMap, label: Label, profile: &ModalityProfile) -> String {
    match label {
        Label::Safe => profile.safe_sentence.to_string(),
        Label::Malicious => {
            let reasons: Vec<&str> = profile
                .reason_rules
                .iter()
                .filter(|rule| rule.matches(features))
                .map(|rule| rule.phrase)
                .collect();

            let joined = if reasons.is_empty() {
                profile.fallback_phrase.to_string()
            } else {
                reasons.join(", ")
            };

            format!(
                "{}{}{}",
                profile.malicious_prefix, joined, profile.malicious_suffix
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{extract_email_features, extract_url_features};
    use crate::rules::{EMAIL_PROFILE, URL_PROFILE};

    #[test]
    fn test_url_malicious_scenario() {
        // No https, three suspicious keywords
        let features =
            extract_url_features("http://secure-login-verify.badsite.com/account?reset=1");
        let explanation = explain(&features, Label::Malicious, &URL_PROFILE);

        assert!(explanation.contains("suspicious keywords"));
        assert!(explanation.contains("insecure connection"));
        assert!(explanation.starts_with("URL shows "));
        assert!(explanation.ends_with(" commonly found in phishing attempts."));
    }

    #[test]
    fn test_url_reason_priority_order() {
        let features = extract_url_features("http://a-b-c-d.example.com/login/verify/account");
        let explanation = explain(&features, Label::Malicious, &URL_PROFILE);

        let keywords = explanation.find("suspicious keywords").unwrap();
        let hyphens = explanation.find("unusual domain structure").unwrap();
        let https = explanation.find("insecure connection").unwrap();
        assert!(keywords < hyphens && hyphens < https);
    }

    #[test]
    fn test_url_ip_and_subdomain_reasons() {
        let features = extract_url_features("http://10.0.0.1.evil.example.co.uk/x");
        let explanation = explain(&features, Label::Malicious, &URL_PROFILE);

        assert!(explanation.contains("IP address in URL"));
        assert!(explanation.contains("excessive subdomains"));
    }

    #[test]
    fn test_email_malicious_scenario() {
        let features =
            extract_email_features("URGENT!!! You are a WINNER! Verify your password now!");
        let explanation = explain(&features, Label::Malicious, &EMAIL_PROFILE);

        assert!(explanation.contains("urgency language"));
        assert!(explanation.contains("prize/reward mentions"));
        assert!(explanation.contains("security-related keywords"));
        assert!(explanation.contains("excessive punctuation"));
        assert!(explanation.starts_with("Email contains "));
    }

    #[test]
    fn test_fallback_phrase_when_no_rule_fires() {
        // A benign-looking URL the model still flagged
        let features = extract_url_features("https://example.com");
        let explanation = explain(&features, Label::Malicious, &URL_PROFILE);

        assert_eq!(
            explanation,
            "URL shows characteristics commonly found in phishing attempts."
        );
    }

    #[test]
    fn test_safe_sentences_are_fixed() {
        // Same sentence regardless of feature values
        for text in ["https://example.com/about", "http://login-verify-now.biz"] {
            let features = extract_url_features(text);
            assert_eq!(
                explain(&features, Label::Safe, &URL_PROFILE),
                "URL appears legitimate based on security analysis."
            );
        }

        for text in ["See you at the meeting tomorrow.", "URGENT! Free prize!"] {
            let features = extract_email_features(text);
            assert_eq!(
                explain(&features, Label::Safe, &EMAIL_PROFILE),
                "Email content appears safe and legitimate."
            );
        }
    }
}
