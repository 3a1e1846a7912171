//! Text-level cleanup of raw model completions before JSON parsing.
//!
//! Models wrap JSON in markdown fences or emit almost-JSON with stray
//! qualifiers. Both repairs are conservative: structurally valid JSON
//! passes through unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// A quoted string immediately followed (possibly across a line break)
/// by a bare parenthetical qualifier: `"True Detective" (Season 1)`.
static DANGLING_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"\n]*)"\s*\(\s*([^()\n]+?)\s*\)"#).expect("dangling-qualifier regex")
});

/// Strip an outer fenced code block, with optional language tag, from a
/// completion. Text without fences is returned with only outer
/// whitespace trimmed.
pub fn strip_markdown_fences(text: &str) -> String {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        if let Some(inner) = rest.strip_suffix("```") {
            // The opening fence line may carry a language tag ("```json").
            let body = match inner.split_once('\n') {
                Some((tag, body)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
                _ => inner,
            };
            return body.trim().to_string();
        }
    }
    trimmed.to_string()
}

/// Merge a dangling parenthetical qualifier into the preceding quoted
/// string: `"True Detective" (Season 1)` becomes
/// `"True Detective (Season 1)"`.
///
/// Some models detach a season/edition qualifier from the title with a
/// line break or a stray quote, which breaks JSON parsing. Input that
/// already parses as JSON is returned byte-for-byte unchanged.
pub fn repair_title_qualifiers(text: &str) -> String {
    if serde_json::from_str::<serde_json::Value>(text).is_ok() {
        return text.to_string();
    }
    DANGLING_QUALIFIER
        .replace_all(text, "\"$1 ($2)\"")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tagged_fence() {
        assert_eq!(strip_markdown_fences("```json\n{}\n```"), "{}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_markdown_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn leaves_plain_json_alone() {
        assert_eq!(strip_markdown_fences(r#"{"k":"v"}"#), r#"{"k":"v"}"#);
    }

    #[test]
    fn unclosed_fence_is_only_trimmed() {
        assert_eq!(strip_markdown_fences("```json\n{}"), "```json\n{}");
    }

    #[test]
    fn merges_dangling_qualifier() {
        let broken = r#"{"title": "True Detective" (Season 1), "year": 2014}"#;
        let repaired = repair_title_qualifiers(broken);
        assert_eq!(
            repaired,
            r#"{"title": "True Detective (Season 1)", "year": 2014}"#
        );
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }

    #[test]
    fn merges_qualifier_across_line_break() {
        let broken = "{\"title\": \"True Detective\"\n(Season 1), \"year\": 2014}";
        let repaired = repair_title_qualifiers(broken);
        assert!(repaired.contains(r#""True Detective (Season 1)""#));
    }

    #[test]
    fn valid_json_is_untouched() {
        // Would match the regex if it ran, but valid JSON short-circuits.
        let valid = r#"{"note": "reads \"fine\" (really)"}"#;
        assert_eq!(repair_title_qualifiers(valid), valid);
    }
}
