#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Free-text answer normalization and token-level equivalence.
//!
//! The target orthography treats apostrophes and the digraphs `sh`, `ch`,
//! and `ng` as letters in their own right, so plain string equality is too
//! strict (it fails on cosmetic punctuation and casing) while a bare case
//! fold is too loose (it would conflate a digraph with the same two letters
//! split across tokens). Tokenizing first keeps alignment honest: `bo'shang`
//! is five letters, not seven characters.
//!
//! This module is the single source of truth for comparing written answers;
//! every component that checks a two-part response goes through
//! [`equivalent`].

/// Canonical apostrophe that all apostrophe-like characters collapse to.
const APOSTROPHE: char = '\'';

/// Token emitted for a run of whitespace between content tokens.
const SEPARATOR: &str = " ";

/// Lowercases the text, collapses apostrophe-like characters (curly quotes,
/// modifier letters, backtick, acute accent) to [`APOSTROPHE`], and replaces
/// non-breaking spaces with ordinary ones.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{02BB}' | '\u{02BC}' | '\u{02B9}' | '`' | '\u{00B4}' => {
                APOSTROPHE
            }
            '\u{00A0}' => ' ',
            other => other,
        })
        .collect()
}

/// Splits normalized text into the ordered letter tokens it compares as.
///
/// Whitespace runs collapse to a single separator token with leading and
/// trailing separators stripped, digits become single-character tokens,
/// `sh`/`ch`/`ng` become single digraph tokens, `o`/`g` followed by the
/// canonical apostrophe become two-character tokens, every other lowercase
/// Latin letter stands alone, and anything else is dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = normalize(text).chars().collect();
    let mut tokens: Vec<String> = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c.is_whitespace() {
            if tokens.last().is_some_and(|t| t != SEPARATOR) {
                tokens.push(SEPARATOR.to_string());
            }
            i += 1;
        } else if c.is_ascii_digit() {
            tokens.push(c.to_string());
            i += 1;
        } else if matches!((c, next), ('s', Some('h')) | ('c', Some('h')) | ('n', Some('g'))) {
            // Digraphs are single letters in the target orthography.
            tokens.push(chars[i..i + 2].iter().collect());
            i += 2;
        } else if (c == 'o' || c == 'g') && next == Some(APOSTROPHE) {
            tokens.push(chars[i..i + 2].iter().collect());
            i += 2;
        } else if c.is_ascii_lowercase() {
            tokens.push(c.to_string());
            i += 1;
        } else {
            // Punctuation and symbols carry no content.
            i += 1;
        }
    }

    if tokens.last().is_some_and(|t| t == SEPARATOR) {
        tokens.pop();
    }
    tokens
}

/// Returns `true` when both texts tokenize to the same letter sequence.
///
/// The sequences must match in length and pairwise, in order; there is no
/// partial credit for partial overlap.
pub fn equivalent(a: &str, b: &str) -> bool {
    tokenize(a) == tokenize(b)
}

#[cfg(test)]
mod tests {
    use super::{equivalent, tokenize};

    #[test]
    fn digraphs_tokenize_as_single_letters() {
        assert_eq!(tokenize("shamol"), vec!["sh", "a", "m", "o", "l"]);
        assert_eq!(tokenize("uchong"), vec!["u", "ch", "o", "ng"]);
    }

    #[test]
    fn apostrophe_letters_tokenize_as_pairs() {
        assert_eq!(tokenize("bo'shang"), vec!["b", "o'", "sh", "a", "ng"]);
        assert_eq!(tokenize("g'oz"), vec!["g'", "o", "z"]);
    }

    #[test]
    fn apostrophe_variants_collapse() {
        assert!(equivalent("bo\u{2018}shang", "bo'shang"));
        assert!(equivalent("bo\u{2019}shang", "bo'shang"));
        assert!(equivalent("bo\u{02BB}shang", "bo`shang"));
    }

    #[test]
    fn whitespace_collapses_but_still_separates() {
        assert_eq!(tokenize("  ikki   suz "), tokenize("ikki suz"));
        assert!(!equivalent("ikki suz", "ikkisuz"));
    }

    #[test]
    fn punctuation_is_dropped() {
        assert!(equivalent("tamga!", "tamga"));
        assert!(equivalent("(tamga)", "tamga"));
    }

    #[test]
    fn digits_are_single_tokens() {
        assert_eq!(tokenize("a12"), vec!["a", "1", "2"]);
    }

    #[test]
    fn near_misses_do_not_match() {
        // Same token count, one differing token.
        assert!(!equivalent("shamol", "samol"));
        // Differing token counts.
        assert!(!equivalent("tamga", "tamg"));
    }
}
