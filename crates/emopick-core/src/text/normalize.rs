//! Search normalization.
//!
//! Turns free text into a canonical token stream: lowercase, accents
//! stripped, punctuation removed, single-spaced. Both the catalog's search
//! index and incoming queries go through [`normalize_search`], so matching
//! is a plain substring test.

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Normalizes `value` into an accent-, case- and punctuation-insensitive
/// string of space-separated tokens.
///
/// ```
/// use emopick_core::normalize_search;
///
/// assert_eq!(normalize_search("Café"), "cafe");
/// assert_eq!(normalize_search("  Thumbs-Up! 👍 "), "thumbs up");
/// ```
#[must_use]
pub fn normalize_search(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let replaced: String = value
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized tokens of `value`, in order, duplicates kept.
#[must_use]
pub fn search_tokens(value: &str) -> Vec<String> {
    normalize_search(value)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(normalize_search(""), "");
    }

    #[test]
    fn case_and_accent_insensitive() {
        assert_eq!(normalize_search("Café"), "cafe");
        assert_eq!(normalize_search("CAFE"), "cafe");
        assert_eq!(normalize_search("Café"), normalize_search("CAFE"));
    }

    #[test]
    fn composed_and_decomposed_e_agree() {
        assert_eq!(normalize_search("É"), "e");
        assert_eq!(normalize_search("é"), "e");
        assert_eq!(normalize_search("e\u{0301}"), "e");
        assert_eq!(normalize_search("ê"), "e");
        assert_eq!(normalize_search("ë"), "e");
    }

    #[test]
    fn punctuation_becomes_separator() {
        assert_eq!(normalize_search("thumbs-up"), "thumbs up");
        assert_eq!(normalize_search("o'clock!!"), "o clock");
        assert_eq!(normalize_search("a,b;c"), "a b c");
    }

    #[test]
    fn emoji_symbols_vanish() {
        assert_eq!(normalize_search("😀"), "");
        assert_eq!(normalize_search("😀 smile"), "smile");
    }

    #[test]
    fn digits_are_kept() {
        assert_eq!(normalize_search("Top 10"), "top 10");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(normalize_search("  many \t\n spaces  "), "many spaces");
    }

    #[test]
    fn non_latin_letters_are_dropped() {
        assert_eq!(normalize_search("chat 猫"), "chat");
    }

    #[test]
    fn french_labels_fold() {
        assert_eq!(normalize_search("Drapeau : Côte d’Ivoire"), "drapeau cote d ivoire");
        assert_eq!(normalize_search("Émotions & Personnes"), "emotions personnes");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "Café",
            "  Thumbs-Up! 👍 ",
            "Ça va?",
            "ÀÉÎÕÜ ñ ç",
            "x\u{301}y",
        ];
        for sample in samples {
            let once = normalize_search(sample);
            assert_eq!(normalize_search(&once), once, "input {sample:?}");
        }
    }

    #[test]
    fn search_tokens_split_words() {
        assert_eq!(search_tokens("Grinning Face"), vec!["grinning", "face"]);
        assert!(search_tokens("👍").is_empty());
    }
}
