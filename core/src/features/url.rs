//! URL feature extraction

use once_cell::sync::Lazy;
use regex::Regex;

use super::FeatureMap;
use crate::rules::URL_SUSPICIOUS_KEYWORDS;

/// Dotted-quad shaped substring. Intentionally loose: octets like 999 still
/// match. Kept for compatibility with the trained models.
static IPV4_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3}\.){3}\d{1,3}").expect("valid IPv4 pattern"));

/// Number of features produced per URL
pub const URL_FEATURE_COUNT: usize = 15;

/// Extract the URL feature vocabulary from arbitrary text.
///
/// Total over any input - non-URL text and malformed URLs still produce a
/// full map.
pub fn extract_url_features(text: &str) -> FeatureMap {
    let lower = text.to_lowercase();
    let mut features = FeatureMap::with_capacity(URL_FEATURE_COUNT);

    features.insert("url_length", text.chars().count() as f32);
    features.insert("num_dots", count_char(text, '.'));
    features.insert("num_hyphens", count_char(text, '-'));
    features.insert("num_underscore", count_char(text, '_'));
    features.insert("num_slash", count_char(text, '/'));
    features.insert("num_question", count_char(text, '?'));
    features.insert("num_equal", count_char(text, '='));
    features.insert("num_amp", count_char(text, '&'));
    features.insert("num_at", count_char(text, '@'));
    features.insert(
        "num_digits",
        text.chars().filter(|c| c.is_ascii_digit()).count() as f32,
    );
    // Prefix checks are case-sensitive; "https" also sets has_http
    features.insert("has_https", flag(text.starts_with("https")));
    features.insert("has_http", flag(text.starts_with("http")));
    features.insert(
        "suspicious_words",
        URL_SUSPICIOUS_KEYWORDS
            .iter()
            .filter(|word| lower.contains(*word))
            .count() as f32,
    );
    features.insert("has_ip", flag(IPV4_PATTERN.is_match(text)));
    features.insert("domain_length", domain_length(text));

    features
}

fn count_char(text: &str, target: char) -> f32 {
    text.chars().filter(|c| *c == target).count() as f32
}

fn flag(condition: bool) -> f32 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Length of the host part: strip a leading `scheme://`, cut at the first `/`
fn domain_length(text: &str) -> f32 {
    let rest = match text.split_once("://") {
        Some((_, rest)) => rest,
        None => text,
    };
    let domain = match rest.find('/') {
        Some(index) => &rest[..index],
        None => rest,
    };
    domain.chars().count() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_counts() {
        let map = extract_url_features("http://secure-login-verify.badsite.com/account?reset=1");

        assert_eq!(map.get("num_dots"), Some(2.0));
        assert_eq!(map.get("num_hyphens"), Some(2.0));
        assert_eq!(map.get("num_slash"), Some(3.0));
        assert_eq!(map.get("num_question"), Some(1.0));
        assert_eq!(map.get("num_equal"), Some(1.0));
        assert_eq!(map.get("num_digits"), Some(1.0));
    }

    #[test]
    fn test_scheme_flags() {
        let https = extract_url_features("https://example.com");
        assert_eq!(https.get("has_https"), Some(1.0));
        assert_eq!(https.get("has_http"), Some(1.0));

        let http = extract_url_features("http://example.com");
        assert_eq!(http.get("has_https"), Some(0.0));
        assert_eq!(http.get("has_http"), Some(1.0));

        // Case-sensitive prefix check
        let upper = extract_url_features("HTTPS://example.com");
        assert_eq!(upper.get("has_https"), Some(0.0));
    }

    #[test]
    fn test_suspicious_words_counts_keywords_present() {
        // login, verify, account all match; each keyword counted once
        let map = extract_url_features("http://secure-login-verify.badsite.com/account?reset=1");
        assert_eq!(map.get("suspicious_words"), Some(3.0));

        let benign = extract_url_features("https://example.com/about");
        assert_eq!(benign.get("suspicious_words"), Some(0.0));
    }

    #[test]
    fn test_suspicious_words_case_insensitive() {
        let map = extract_url_features("http://LOGIN.example.com");
        assert_eq!(map.get("suspicious_words"), Some(1.0));
    }

    #[test]
    fn test_has_ip_accepts_loose_octets() {
        let real = extract_url_features("http://192.168.1.1/login");
        assert_eq!(real.get("has_ip"), Some(1.0));

        // Invalid octets still match the shape - preserved behavior
        let loose = extract_url_features("http://999.999.999.999/");
        assert_eq!(loose.get("has_ip"), Some(1.0));

        let none = extract_url_features("https://example.com");
        assert_eq!(none.get("has_ip"), Some(0.0));
    }

    #[test]
    fn test_domain_length() {
        let map = extract_url_features("https://example.com/some/path");
        assert_eq!(map.get("domain_length"), Some(11.0));

        // No scheme: domain is everything up to the first slash
        let bare = extract_url_features("example.com/about");
        assert_eq!(bare.get("domain_length"), Some(11.0));

        // No slash at all
        let host_only = extract_url_features("example.com");
        assert_eq!(host_only.get("domain_length"), Some(11.0));
    }

    #[test]
    fn test_total_on_arbitrary_input() {
        for input in ["", "not a url at all", "☃☃☃", "://", "////", "\u{0}\u{1}"] {
            let map = extract_url_features(input);
            assert_eq!(map.len(), URL_FEATURE_COUNT);
            for (name, value) in map.iter() {
                assert!(value >= 0.0, "{} is negative for {:?}", name, input);
            }
        }
    }

    #[test]
    fn test_empty_string() {
        let map = extract_url_features("");
        assert_eq!(map.get("url_length"), Some(0.0));
        assert_eq!(map.get("domain_length"), Some(0.0));
        assert_eq!(map.get("has_http"), Some(0.0));
    }
}
