//! Provider text normalization

/// Apply the no-asterisk formatting policy to model output.
///
/// Every `"* "` becomes `"- "`; surrounding whitespace is trimmed.
pub fn normalize_provider_text(text: &str) -> String {
    text.replace("* ", "- ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_become_dashes() {
        assert_eq!(
            normalize_provider_text("* take rest\n* drink water"),
            "- take rest\n- drink water"
        );
    }

    #[test]
    fn test_inline_occurrences_are_replaced() {
        assert_eq!(normalize_provider_text("a * b"), "a - b");
    }

    #[test]
    fn test_asterisk_without_space_is_kept() {
        assert_eq!(normalize_provider_text("take **rest**."), "take **rest**.");
    }

    #[test]
    fn test_trailing_marker_is_replaced_before_trim() {
        assert_eq!(normalize_provider_text("Options:\n* "), "Options:\n-");
    }

    #[test]
    fn test_indented_marker_is_replaced() {
        assert_eq!(
            normalize_provider_text("Tips:\n  * rest\n  * fluids\n"),
            "Tips:\n  - rest\n  - fluids"
        );
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(normalize_provider_text("  \n "), "");
    }
}
