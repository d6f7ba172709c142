//! Email text feature extraction

use super::FeatureMap;
use crate::rules::{
    EMAIL_REWARD_KEYWORDS, EMAIL_SECURITY_KEYWORDS, EMAIL_THREAT_KEYWORDS, EMAIL_URGENCY_KEYWORDS,
};

/// Number of features produced per email
pub const EMAIL_FEATURE_COUNT: usize = 13;

/// Extract the email feature vocabulary from arbitrary text.
pub fn extract_email_features(text: &str) -> FeatureMap {
    let lower = text.to_lowercase();
    let mut features = FeatureMap::with_capacity(EMAIL_FEATURE_COUNT);

    features.insert("text_length", text.chars().count() as f32);
    features.insert("num_words", text.split_whitespace().count() as f32);
    features.insert("num_sentences", sentence_count(text));
    features.insert(
        "num_special_chars",
        text.chars()
            .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
            .count() as f32,
    );
    features.insert("num_exclamation", count_char(text, '!'));
    features.insert("num_question", count_char(text, '?'));
    features.insert("num_dollar", count_char(text, '$'));

    let uppercase = text.chars().filter(|c| c.is_uppercase()).count() as f32;
    let letters = text.chars().filter(|c| c.is_alphabetic()).count() as f32;
    features.insert("num_uppercase", uppercase);
    // 0 when there are no letters at all
    features.insert(
        "uppercase_ratio",
        if letters > 0.0 { uppercase / letters } else { 0.0 },
    );

    features.insert("has_urgency", contains_any(&lower, EMAIL_URGENCY_KEYWORDS));
    features.insert("has_threat", contains_any(&lower, EMAIL_THREAT_KEYWORDS));
    features.insert("has_reward", contains_any(&lower, EMAIL_REWARD_KEYWORDS));
    features.insert("has_security", contains_any(&lower, EMAIL_SECURITY_KEYWORDS));

    features
}

fn count_char(text: &str, target: char) -> f32 {
    text.chars().filter(|c| *c == target).count() as f32
}

fn contains_any(lower: &str, keywords: &[&str]) -> f32 {
    if keywords.iter().any(|word| lower.contains(word)) {
        1.0
    } else {
        0.0
    }
}

/// Segments between runs of `.`/`!`/`?`, floored at 1 so the value is safe
/// to divide by.
fn sentence_count(text: &str) -> f32 {
    text.split(|c| matches!(c, '.' | '!' | '?'))
        .filter(|segment| !segment.trim().is_empty())
        .count()
        .max(1) as f32
}
