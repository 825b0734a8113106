// Text Processing Service
// Input normalization, paragraph splitting and before/after statistics

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::humanizer::tokenizer::{sentence_split, word_tokenize};
use crate::models::TextStatistics;

fn odd_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}]").expect("odd space regex"))
}

fn horizontal_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B]+").expect("horizontal whitespace regex"))
}

fn paragraph_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph break regex"))
}

/// Normalize quotes, odd spaces and line endings before humanizing.
///
/// Blank lines between paragraphs survive; runs of spaces inside a line collapse to one.
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let s = text
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let s = odd_space_re().replace_all(&s, " ");
    let s = horizontal_ws_re().replace_all(&s, " ");

    s.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Paragraphs separated by one or more blank lines, trimmed, empties dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    paragraph_break_re()
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Tokens carrying at least one letter.
fn words_of(text: &str) -> Vec<String> {
    word_tokenize(text)
        .into_iter()
        .filter(|w| w.chars().any(char::is_alphabetic))
        .collect()
}

pub fn count_words(text: &str) -> usize {
    words_of(text).len()
}

pub fn get_text_statistics(text: &str) -> TextStatistics {
    if text.trim().is_empty() {
        return TextStatistics::default();
    }

    let words = words_of(text);
    let word_count = words.len();
    let sentence_count = sentence_split(text).len();
    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();

    TextStatistics {
        word_count,
        sentence_count,
        avg_sentence_length: word_count as f64 / sentence_count.max(1) as f64,
        avg_word_length: total_chars as f64 / word_count.max(1) as f64,
    }
}

fn vocabulary(text: &str) -> HashSet<String> {
    word_tokenize(&text.to_lowercase())
        .into_iter()
        .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
        .collect()
}

/// Jaccard overlap of the two vocabularies, as a percentage.
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let left = vocabulary(a);
    let right = vocabulary(b);
    let shared = left.intersection(&right).count();
    if shared == 0 {
        return 0.0;
    }
    let union = left.union(&right).count();
    shared as f64 / union as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_punctuation() {
        let input = "Hello\u{201c}World\u{201d}  it\u{2019}s\u{00A0}here\r\n\r\nNext  line ";
        let output = normalize_punctuation(input);
        assert_eq!(output, "Hello\"World\" it's here\n\nNext line");
    }

    #[test]
    fn test_split_paragraphs() {
        let paragraphs = split_paragraphs("First one.\n\n\nSecond one.\n  \nThird.");
        assert_eq!(paragraphs, vec!["First one.", "Second one.", "Third."]);
        assert!(split_paragraphs("  \n\n ").is_empty());
    }

    #[test]
    fn test_text_statistics() {
        let stats = get_text_statistics("The cat sat. The dog ran far away!");
        assert_eq!(stats.word_count, 8);
        assert_eq!(stats.sentence_count, 2);
        assert!((stats.avg_sentence_length - 4.0).abs() < 1e-9);
        assert!((stats.avg_word_length - 25.0 / 8.0).abs() < 1e-9);
        assert_eq!(get_text_statistics("   "), TextStatistics::default());
    }

    #[test]
    fn test_count_words_skips_punctuation_and_numbers() {
        assert_eq!(count_words("Well, 42 apples (roughly) - fine."), 4);
    }

    #[test]
    fn test_similarity_bounds() {
        let text = "The quick brown fox jumps over the lazy dog.";
        assert!((calculate_similarity(text, text) - 100.0).abs() < 1e-9);
        assert_eq!(calculate_similarity(text, "Completely unrelated words here."), 0.0);
        assert_eq!(calculate_similarity("", text), 0.0);
    }

    #[test]
    fn test_similarity_identical_and_disjoint_words() {
        let mat = "the cat sat on the mat";
        assert_eq!(calculate_similarity(mat, mat), 100.0);
        assert_eq!(calculate_similarity("abc", "xyz"), 0.0);
        assert_eq!(calculate_similarity("", ""), 0.0);
    }

    #[test]
    fn test_similarity_ignores_case() {
        let score = calculate_similarity("Alpha beta gamma", "alpha BETA delta");
        assert!((score - 50.0).abs() < 1e-9);
    }
}
