//! Post-processing for raw provider text.
//!
//! Vision models like to decorate their answers: a bold "Alt-Text:" label,
//! a trailing `*(48 words)*` note, quotes around the whole answer. All
//! providers run their output through [`sanitize`] before returning it.

use regex::Regex;
use std::sync::LazyLock;

/// Field labels models prefix their answer with, in English and German.
static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\*\*)?(?:Alternative Text|Alternativtext|Alt-Text|Alt text|Description|Beschreibung|Bildbeschreibung):(?:\*\*)?[ \t]*",
    )
    .expect("valid regex")
});

/// Asterisk-wrapped parenthetical remarks such as `*(49 words)*`.
static NOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\([^)]*\)\*").expect("valid regex"));

/// Quote pairs stripped when they wrap the entire answer.
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('“', '”'), ('„', '“'), ('«', '»')];

/// Clean raw provider text into a usable alt-text string.
///
/// Idempotent: every pass only ever shortens the text, and passes repeat
/// until the text stops changing.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn sanitize_pass(text: &str) -> String {
    let text = LABEL_REGEX.replace_all(text, "");
    let text = NOTE_REGEX.replace_all(&text, "");
    let trimmed = text.trim();
    strip_quotes(trimmed).trim().to_string()
}

fn strip_quotes(text: &str) -> &str {
    for &(open, close) in QUOTE_PAIRS {
        if let Some(inner) = text
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_plain_label() {
        assert_eq!(sanitize("Alt-Text: foo"), "foo");
        assert_eq!(sanitize("Description: A red bicycle."), "A red bicycle.");
    }

    #[test]
    fn test_strips_bold_labels() {
        assert_eq!(
            sanitize("**Beschreibung:** Ein Hund im Park."),
            "Ein Hund im Park."
        );
        assert_eq!(
            sanitize("**Alternative Text:** A lighthouse at dusk."),
            "A lighthouse at dusk."
        );
    }

    #[test]
    fn test_strips_word_count_note() {
        assert_eq!(sanitize("A cat. *(49 words)*"), "A cat.");
    }

    #[test]
    fn test_strips_multiple_notes() {
        assert_eq!(sanitize("*(Desc)* A dog. *(7 words)*"), "A dog.");
    }

    #[test]
    fn test_plain_parentheses_survive() {
        assert_eq!(
            sanitize("A tram (line 4) crossing a bridge."),
            "A tram (line 4) crossing a bridge."
        );
    }

    #[test]
    fn test_strips_surrounding_quotes() {
        assert_eq!(sanitize("\"A child flying a kite.\""), "A child flying a kite.");
        assert_eq!(sanitize("„Ein Kind mit Drachen.“"), "Ein Kind mit Drachen.");
    }

    #[test]
    fn test_inner_quotes_survive() {
        assert_eq!(
            sanitize("A sign reading \"Open\" above a door."),
            "A sign reading \"Open\" above a door."
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize("  \n A bridge at night.\n "), "A bridge at night.");
    }

    #[test]
    fn test_combined_artifacts() {
        assert_eq!(
            sanitize("  \"**Alt-Text:** Two hikers on a ridge. *(6 words)*\"  "),
            "Two hikers on a ridge."
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Alt-Text: foo",
            "A cat. *(49 words)*",
            "\"\"nested quotes\"\"",
            "Alt-Alt-Text: Text: odd",
            "*(*(a)*)*",
            "",
            "   ",
            "Plain text without artifacts.",
            "Description:Description: twice",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
    }

    proptest! {
        #[test]
        fn prop_idempotent(s in any::<String>()) {
            let once = sanitize(&s);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn prop_leading_label_is_dropped(s in "\\PC{0,60}") {
            prop_assume!(!LABEL_REGEX.is_match(&s));
            prop_assert_eq!(sanitize(&format!("Alt-Text: {s}")), sanitize(&s));
        }

        // No `*` or `(` in the text, so the appended note is the only one.
        #[test]
        fn prop_trailing_word_count_is_dropped(
            s in "[A-Za-z0-9 ,.:'\"„“«»-]{0,60}",
            n in 1u32..200,
        ) {
            prop_assert_eq!(sanitize(&format!("{s} *({n} words)*")), sanitize(&s));
        }
    }
}
