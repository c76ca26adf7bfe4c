//! Speech output sanitization
//!
//! Model output is written for screens; speech synthesis chokes on
//! markdown markers and markup characters. This module strips them with
//! a fixed-order denylist of replacements. It is intentionally not a
//! markdown parser: nested or malformed markup, and link syntax not
//! matching `(http...)` exactly, passes through unmodified.

use regex::Regex;
use std::sync::OnceLock;

struct SpeechPatterns {
    emphasis: Regex,
    headings: Regex,
    square_brackets: Regex,
    link_targets: Regex,
    angle_brackets: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static SpeechPatterns {
    static PATTERNS: OnceLock<SpeechPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SpeechPatterns {
        emphasis: Regex::new(r"\*+").expect("Invalid regex pattern"),
        headings: Regex::new(r"#+").expect("Invalid regex pattern"),
        square_brackets: Regex::new(r"[\[\]]").expect("Invalid regex pattern"),
        link_targets: Regex::new(r"\(http[^)]*\)").expect("Invalid regex pattern"),
        angle_brackets: Regex::new(r"[<>]").expect("Invalid regex pattern"),
        whitespace: Regex::new(r"\s+").expect("Invalid regex pattern"),
    })
}

/// Transform raw model output into a string safe for speech synthesis
///
/// Applies, in order: strip asterisk runs, strip hash runs, strip
/// square brackets, strip parenthesized `http...` link targets, strip
/// angle brackets, replace `&` with "and", collapse whitespace runs to
/// single spaces, trim, and truncate to `max_chars` characters. The
/// order matters; later rules can interact with earlier output.
///
/// Total over all inputs: always returns a string, possibly empty,
/// containing none of `* # [ ] < > &` and at most `max_chars`
/// characters.
///
/// # Arguments
///
/// * `text` - Raw model output
/// * `max_chars` - Hard ceiling for the speech channel, in characters
///
/// # Examples
///
/// ```
/// use oravox::speech::sanitize_for_speech;
///
/// let clean = sanitize_for_speech(
///     "Hello *world* [link](http://example.com) & more",
///     6000,
/// );
/// assert_eq!(clean, "Hello world and more");
/// ```
pub fn sanitize_for_speech(text: &str, max_chars: usize) -> String {
    let p = patterns();

    let text = p.emphasis.replace_all(text, "");
    let text = p.headings.replace_all(&text, "");
    let text = p.square_brackets.replace_all(&text, "");
    let text = p.link_targets.replace_all(&text, "");
    let text = p.angle_brackets.replace_all(&text, "");
    let text = text.replace('&', "and");
    let text = p.whitespace.replace_all(&text, " ");

    truncate_chars(text.trim(), max_chars)
}

/// Truncate to at most `max` characters without splitting a code point
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 6000;

    #[test]
    fn test_strips_asterisk_runs() {
        assert_eq!(sanitize_for_speech("a *b* **c** ***d***", MAX), "a b c d");
    }

    #[test]
    fn test_strips_heading_markers() {
        assert_eq!(sanitize_for_speech("# Title\n## Sub\ntext", MAX), "Title Sub text");
    }

    #[test]
    fn test_strips_square_brackets() {
        assert_eq!(sanitize_for_speech("[note] keep [this]", MAX), "note keep this");
    }

    #[test]
    fn test_strips_link_targets() {
        assert_eq!(
            sanitize_for_speech("see [docs](http://example.com/a) here", MAX),
            "see docs here"
        );
        assert_eq!(
            sanitize_for_speech("secure (https://example.com) too", MAX),
            "secure too"
        );
    }

    #[test]
    fn test_link_target_matches_shortest_span() {
        // Only up to the first closing paren is removed.
        assert_eq!(
            sanitize_for_speech("(http://a.example) (not a url)", MAX),
            "(not a url)"
        );
    }

    #[test]
    fn test_unclosed_link_target_passes_through() {
        assert_eq!(sanitize_for_speech("broken (http://nope", MAX), "broken (http://nope");
    }

    #[test]
    fn test_non_http_parenthetical_kept() {
        assert_eq!(sanitize_for_speech("aside (like this)", MAX), "aside (like this)");
    }

    #[test]
    fn test_strips_angle_brackets() {
        assert_eq!(sanitize_for_speech("a <b>bold</b> tag", MAX), "a bbold/b tag");
    }

    #[test]
    fn test_ampersand_becomes_and() {
        assert_eq!(sanitize_for_speech("salt & pepper", MAX), "salt and pepper");
        assert_eq!(sanitize_for_speech("R&D", MAX), "RandD");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            sanitize_for_speech("one\t two\n\nthree   four", MAX),
            "one two three four"
        );
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(sanitize_for_speech("  padded  ", MAX), "padded");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_for_speech("", MAX), "");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "Gravity pulls objects together.";
        assert_eq!(sanitize_for_speech(text, MAX), text);
    }

    #[test]
    fn test_combined_example() {
        assert_eq!(
            sanitize_for_speech("Hello *world* [link](http://example.com) & more", MAX),
            "Hello world and more"
        );
    }

    #[test]
    fn test_output_contains_no_denylisted_characters() {
        let input = "*#[]<>&** ## [[x]] <tag> a&b (http://u) *";
        let clean = sanitize_for_speech(input, MAX);
        for c in ['*', '#', '[', ']', '<', '>', '&'] {
            assert!(!clean.contains(c), "output still contains {:?}: {}", c, clean);
        }
    }

    #[test]
    fn test_truncates_to_ceiling() {
        let long = "x".repeat(10_000);
        let clean = sanitize_for_speech(&long, MAX);
        assert_eq!(clean.chars().count(), MAX);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let long = "ß".repeat(10);
        let clean = sanitize_for_speech(&long, 5);
        assert_eq!(clean.chars().count(), 5);
        assert_eq!(clean, "ßßßßß");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let inputs = [
            "Hello *world* [link](http://example.com) & more",
            "# Head\n\n* bullet & <tag>",
            "plain text",
            "",
            "broken (http://nope",
        ];
        for input in inputs {
            let once = sanitize_for_speech(input, MAX);
            assert_eq!(sanitize_for_speech(&once, MAX), once);
        }
    }
}
