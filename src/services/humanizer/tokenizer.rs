// Sentence & Word Tokenizer
// Regex crate has no lookaround, so sentence boundaries are found with a char scan.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Stands in for `". "` after a known abbreviation while sentences are being split.
const ABBREVIATION_MASK: char = '\u{E000}';
/// Stand-ins for `.`, `,` and `:` between two letters or digits (`e.g`, `1,000.5`, `10:30`)
/// while words are being split.
const INNER_MASKS: &[(char, char)] = &[('.', '\u{E001}'), (',', '\u{E002}'), (':', '\u{E003}')];

const WORD_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')'];

fn abbreviation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(mrs|mr|ms|dr|prof|sr|jr|etc)\.\s+").expect("abbreviation regex")
    })
}

fn fallback_boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+\s+").expect("fallback boundary regex"))
}

fn inner_punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([\p{L}\p{N}])([.,:])([\p{L}\p{N}])").expect("inner punctuation regex")
    })
}

fn space_before_punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+([.,;:!?])").expect("space before punctuation regex"))
}

fn open_paren_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(\s+").expect("open paren regex"))
}

fn close_paren_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+\)").expect("close paren regex"))
}

/// Split text into sentences.
///
/// A boundary is a `.`, `!` or `?` followed by whitespace and an ASCII capital letter.
/// Titles such as `Dr.` never end a sentence.
pub fn sentence_split(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let masked = abbreviation_re().replace_all(text, |caps: &Captures| {
        format!("{}{}", &caps[1], ABBREVIATION_MASK)
    });

    let mut sentences: Vec<String> = split_on_terminators(&masked)
        .into_iter()
        .map(|s| restore_abbreviations(s.trim()))
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.is_empty() {
        sentences = fallback_boundary_re()
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    sentences
}

fn split_on_terminators(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        current.push(ch);

        if matches!(ch, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j > i + 1 && j < chars.len() && chars[j].is_ascii_uppercase() {
                pieces.push(std::mem::take(&mut current));
                i = j;
                continue;
            }
        }
        i += 1;
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

fn restore_abbreviations(sentence: &str) -> String {
    sentence.replace(ABBREVIATION_MASK, ". ")
}

fn mask_inner(caps: &Captures) -> String {
    let mark = caps[2].chars().next().unwrap_or('.');
    let mask = INNER_MASKS
        .iter()
        .find(|(plain, _)| *plain == mark)
        .map_or(mark, |(_, mask)| *mask);
    format!("{}{}{}", &caps[1], mask, &caps[3])
}

fn unmask_inner(token: &str) -> String {
    token
        .chars()
        .map(|c| {
            INNER_MASKS
                .iter()
                .find(|(_, mask)| *mask == c)
                .map_or(c, |(plain, _)| *plain)
        })
        .collect()
}

/// Split a sentence into word and punctuation tokens.
pub fn word_tokenize(text: &str) -> Vec<String> {
    let masked = inner_punctuation_re().replace_all(text, mask_inner);
    // Overlapping matches like `U.S.A` need a second pass.
    let masked = inner_punctuation_re().replace_all(&masked, mask_inner);

    let mut spaced = String::with_capacity(masked.len() + 16);
    for ch in masked.chars() {
        if WORD_PUNCTUATION.contains(&ch) {
            spaced.push(' ');
            spaced.push(ch);
            spaced.push(' ');
        } else {
            spaced.push(ch);
        }
    }

    spaced
        .split_whitespace()
        .map(unmask_inner)
        .collect()
}

/// Drop whitespace before `. , ; : ! ?` and just inside parentheses.
pub fn tidy_spacing(text: &str) -> String {
    let text = space_before_punctuation_re().replace_all(text, "${1}");
    let text = open_paren_space_re().replace_all(&text, "(");
    close_paren_space_re().replace_all(&text, ")").into_owned()
}

pub fn is_word_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

pub fn word_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

/// Lower-case the first character, leaving the pronoun `I` alone.
pub fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str();
            let standalone_i = first == 'I' && !rest.starts_with(|c: char| c.is_alphabetic());
            if standalone_i {
                text.to_string()
            } else {
                first.to_lowercase().chain(rest.chars()).collect()
            }
        }
        None => String::new(),
    }
}

pub fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Give `replacement` a leading capital when `original` has one.
pub fn match_leading_case(original: &str, replacement: &str) -> String {
    let original_upper = original.chars().next().is_some_and(char::is_uppercase);
    if original_upper {
        upper_first(replacement)
    } else {
        replacement.to_string()
    }
}
