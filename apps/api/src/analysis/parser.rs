//! Response Parser — pulls labeled sections out of free-form model output,
//! normalizes inline emphasis, and recovers suggestion lists.
//!
//! Heading-anchored extraction is fragile by construction (it depends on the
//! model emitting the requested heading text), so it lives behind these few
//! functions and nothing else in the crate touches the raw patterns.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("italic pattern is valid"));

/// Extracts the text following `"<heading>:"` up to (not including) the next
/// line that begins with a capitalized word sequence followed by a colon, or
/// end of input. Returns an empty string when the heading is absent.
///
/// Extractions are independent: a missing heading never affects the others.
pub fn extract_section(text: &str, heading: &str) -> String {
    let pattern = format!(
        r"(?s){}:(.*?)(?:\n[A-Z][A-Za-z]*(?: [A-Z][A-Za-z]*)*:|\z)",
        regex::escape(heading)
    );
    let re = Regex::new(&pattern).expect("heading pattern is valid");

    re.captures(text)
        .and_then(|captures| captures.get(1))
        .map(|section| section.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Strips `**bold**` and `*italic*` emphasis markers, keeping the enclosed
/// content, and trims surrounding whitespace. Idempotent on marker-free text.
pub fn clean_markdown(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    text.trim().to_string()
}

/// How a suggestion list was recovered from raw model output.
/// Both paths are explicit so callers and tests can tell them apart; the
/// heuristic path is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionParse {
    /// The output was a well-formed JSON array of strings.
    Structured(Vec<String>),
    /// The output was not a JSON array of strings; suggestions were recovered
    /// by line splitting and bullet stripping.
    Heuristic(Vec<String>),
}

impl SuggestionParse {
    pub fn into_suggestions(self) -> Vec<String> {
        match self {
            SuggestionParse::Structured(list) | SuggestionParse::Heuristic(list) => list,
        }
    }
}

/// Parses raw model output as a JSON array of strings, falling back to
/// newline splitting with leading/trailing bullet characters stripped.
pub fn parse_suggestions(raw: &str) -> SuggestionParse {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(list) => SuggestionParse::Structured(list),
        Err(_) => SuggestionParse::Heuristic(split_heuristic(raw)),
    }
}

fn split_heuristic(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.trim_matches(|c: char| matches!(c, '-' | '\u{2022}' | '*' | ' ' | '\n'))
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_SECTIONS: &str =
        "Analysis:\nFoo bar\nMatch Percentage:\n50%\nConfidence Score:\n80%";

    #[test]
    fn test_extract_all_three_sections() {
        assert_eq!(extract_section(THREE_SECTIONS, "Analysis"), "Foo bar");
        assert_eq!(extract_section(THREE_SECTIONS, "Match Percentage"), "50%");
        assert_eq!(extract_section(THREE_SECTIONS, "Confidence Score"), "80%");
    }

    #[test]
    fn test_missing_heading_yields_empty_without_affecting_others() {
        let text = "Analysis:\nFoo bar\nMatch Percentage:\n50%";
        assert_eq!(extract_section(text, "Analysis"), "Foo bar");
        assert_eq!(extract_section(text, "Match Percentage"), "50%");
        assert_eq!(extract_section(text, "Confidence Score"), "");
    }

    #[test]
    fn test_extract_multiline_section_body() {
        let text = "Analysis:\nStrong in Rust.\nWeak in SQL.\nMatch Percentage:\n70%";
        assert_eq!(
            extract_section(text, "Analysis"),
            "Strong in Rust.\nWeak in SQL."
        );
    }

    #[test]
    fn test_extract_section_runs_to_end_of_input() {
        let text = "Confidence Score:\n80%";
        assert_eq!(extract_section(text, "Confidence Score"), "80%");
    }

    #[test]
    fn test_clean_markdown_strips_bold_and_italic() {
        assert_eq!(
            clean_markdown("**Strong** match with *some* gaps"),
            "Strong match with some gaps"
        );
    }

    #[test]
    fn test_clean_markdown_idempotent_on_clean_text() {
        let clean = "Strong match with some gaps";
        assert_eq!(clean_markdown(clean), clean);
        assert_eq!(clean_markdown(&clean_markdown(clean)), clean);
    }

    #[test]
    fn test_clean_markdown_trims_whitespace() {
        assert_eq!(clean_markdown("  plain text \n"), "plain text");
    }

    #[test]
    fn test_parse_suggestions_valid_json_array() {
        let parsed = parse_suggestions(r#"["Add metrics", "Use action verbs"]"#);
        assert_eq!(
            parsed,
            SuggestionParse::Structured(vec![
                "Add metrics".to_string(),
                "Use action verbs".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_suggestions_falls_back_to_line_splitting() {
        let parsed = parse_suggestions("- Add metrics\n* Use action verbs\n");
        assert_eq!(
            parsed,
            SuggestionParse::Heuristic(vec![
                "Add metrics".to_string(),
                "Use action verbs".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_suggestions_json_object_is_not_an_array() {
        let parsed = parse_suggestions(r#"{"suggestions": ["x"]}"#);
        assert!(matches!(parsed, SuggestionParse::Heuristic(_)));
    }

    #[test]
    fn test_heuristic_discards_blank_lines_and_bullet_chars() {
        let parsed = parse_suggestions("\n\n\u{2022} First\n\n  - Second -\n");
        assert_eq!(
            parsed.into_suggestions(),
            vec!["First".to_string(), "Second".to_string()]
        );
    }
}
