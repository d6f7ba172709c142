//! Suspicious-substring highlighting
//!
//! Marks known bait words in the raw input so the UI can emphasize them.
//! Independent of the classifier's decision. The containment test is
//! case-insensitive but the replacement is case-sensitive against the
//! original text, so a keyword appearing only in a different case passes
//! the test without being rewritten - preserved behavior, see DESIGN.md.

/// Wrap every literal occurrence of each present keyword in `**` markers.
///
/// Keywords are applied in list order, which keeps the output stable when
/// lists ever overlap.
pub fn highlight(text: &str, keywords: &[&str]) -> String {
    let lower = text.to_lowercase();
    let mut highlighted = text.to_string();

    for word in keywords {
        if lower.contains(word) {
            highlighted = highlighted.replace(word, &format!("**{}**", word));
        }
    }

    highlighted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{EMAIL_HIGHLIGHT_KEYWORDS, URL_HIGHLIGHT_KEYWORDS};

    #[test]
    fn test_marks_present_keywords() {
        let out = highlight(
            "http://badsite.com/login?next=verify",
            URL_HIGHLIGHT_KEYWORDS,
        );
        assert_eq!(out, "http://badsite.com/**login**?next=**verify**");
    }

    #[test]
    fn test_replaces_all_occurrences() {
        let out = highlight("login then login again", URL_HIGHLIGHT_KEYWORDS);
        assert_eq!(out, "**login** then **login** again");
    }

    #[test]
    fn test_idempotent_without_keywords() {
        let text = "https://example.com/about";
        assert_eq!(highlight(text, URL_HIGHLIGHT_KEYWORDS), text);

        let email = "See you at the meeting tomorrow.";
        assert_eq!(highlight(email, EMAIL_HIGHLIGHT_KEYWORDS), email);
    }

    #[test]
    fn test_uppercase_occurrence_passes_test_but_is_not_replaced() {
        // The case-insensitive test fires, the case-sensitive replace
        // finds nothing - preserved inconsistency
        let out = highlight("URGENT notice", EMAIL_HIGHLIGHT_KEYWORDS);
        assert_eq!(out, "URGENT notice");
    }

    #[test]
    fn test_mixed_case_only_lowercase_occurrences_rewritten() {
        let out = highlight("URGENT: act urgent-ly", EMAIL_HIGHLIGHT_KEYWORDS);
        assert_eq!(out, "URGENT: act **urgent**-ly");
    }

    #[test]
    fn test_email_keywords() {
        let out = highlight(
            "you are a winner, claim your prize",
            EMAIL_HIGHLIGHT_KEYWORDS,
        );
        assert_eq!(out, "you are a **winner**, claim your **prize**");
    }
}
