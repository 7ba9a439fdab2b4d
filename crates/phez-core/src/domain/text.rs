//! Storage-time text cleanup applied to every free-text post field.

use crate::ports::TextSanitizer;

/// Entity the markup stripper leaves behind around line breaks.
pub const CARRIAGE_RETURN_ARTIFACT: &str = "&#13;";

/// Strip markup from `text` and remove carriage-return artifacts.
///
/// Blank input, or input that is blank once stripped, becomes `""`.
pub fn scrub(sanitizer: &dyn TextSanitizer, text: &str) -> String {
    if is_blank(text) {
        return String::new();
    }

    let mut cleaned = sanitizer.sanitize(text);
    while cleaned.contains(CARRIAGE_RETURN_ARTIFACT) {
        cleaned = cleaned.replace(CARRIAGE_RETURN_ARTIFACT, "");
    }

    if is_blank(&cleaned) {
        String::new()
    } else {
        cleaned
    }
}

/// Scrub an optional field, collapsing blank results to `None`.
pub fn scrub_optional(sanitizer: &dyn TextSanitizer, text: Option<&str>) -> Option<String> {
    text.map(|t| scrub(sanitizer, t)).filter(|t| !t.is_empty())
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drops anything between angle brackets and turns CR into the entity.
    struct BracketStripper;

    impl TextSanitizer for BracketStripper {
        fn sanitize(&self, text: &str) -> String {
            let mut out = String::new();
            let mut in_tag = false;
            for c in text.chars() {
                match c {
                    '<' => in_tag = true,
                    '>' => in_tag = false,
                    '\r' if !in_tag => out.push_str("&#13;"),
                    _ if !in_tag => out.push(c),
                    _ => {}
                }
            }
            out
        }
    }

    #[test]
    fn test_scrub_strips_markup() {
        assert_eq!(scrub(&BracketStripper, "<b>bold</b> move"), "bold move");
    }

    #[test]
    fn test_scrub_removes_carriage_return_artifact() {
        let cleaned = scrub(&BracketStripper, "line one\r\nline two");
        assert_eq!(cleaned, "line one\nline two");
        assert!(!cleaned.contains(CARRIAGE_RETURN_ARTIFACT));
    }

    #[test]
    fn test_scrub_removes_nested_artifact() {
        assert_eq!(scrub(&BracketStripper, "a&#1&#13;3;b"), "ab");
    }

    #[test]
    fn test_scrub_blank_input() {
        assert_eq!(scrub(&BracketStripper, ""), "");
        assert_eq!(scrub(&BracketStripper, "  \n"), "");
        assert_eq!(scrub(&BracketStripper, "<br> <hr>"), "");
    }

    #[test]
    fn test_scrub_is_idempotent() {
        let once = scrub(&BracketStripper, "<p>Hi\r\nthere</p>");
        assert_eq!(scrub(&BracketStripper, &once), once);
    }

    #[test]
    fn test_scrub_optional_collapses_blank() {
        assert_eq!(scrub_optional(&BracketStripper, None), None);
        assert_eq!(scrub_optional(&BracketStripper, Some("<i></i>")), None);
        assert_eq!(
            scrub_optional(&BracketStripper, Some("kept")),
            Some("kept".to_string())
        );
    }
}
