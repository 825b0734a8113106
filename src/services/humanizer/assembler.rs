// Document Assembler
// Stitches transformed sentences back into one text and adds document-level touches.

use regex::Regex;
use std::sync::OnceLock;

use super::phrases::{FILLERS, INTRO_PHRASES, SCHOLARLY_MARKERS, SELF_CORRECTIONS};
use super::profile::TransformProfile;
use super::random::RandomSource;
use super::rules::formal_vocabulary;
use super::tokenizer::{lower_first, tidy_spacing, upper_first};

const SELF_CORRECTION_CHANCE: f64 = 0.3;
const SCHOLARLY_MARKER_CHANCE: f64 = 0.5;
const DASH_SHARE: f64 = 0.15;
const EM_DASH: char = '\u{2014}';

fn comma_join_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s+").expect("comma join regex"))
}

pub struct DocumentAssembler<'a, R: RandomSource> {
    profile: &'a TransformProfile,
    rng: &'a mut R,
}

impl<'a, R: RandomSource> DocumentAssembler<'a, R> {
    pub fn new(profile: &'a TransformProfile, rng: &'a mut R) -> Self {
        Self { profile, rng }
    }

    pub fn assemble(&mut self, mut sentences: Vec<String>) -> String {
        sentences.retain(|s| !s.trim().is_empty());
        if sentences.is_empty() {
            return String::new();
        }

        self.add_intro(&mut sentences);
        self.add_fillers(&mut sentences);
        self.add_self_correction(&mut sentences);
        if self.profile.is_scholarly() {
            self.add_scholarly_markers(&mut sentences);
        }

        let joined = sentences.join(" ");
        let mut text = space_after_punctuation(&tidy_spacing(&joined));
        if self.profile.at_least(4) {
            text = self.dash_breaks(text);
        }
        upper_first(&text)
    }

    fn add_intro(&mut self, sentences: &mut [String]) {
        if !self.profile.at_least(4)
            || !self.rng.chance(self.profile.intro_chance)
            || sentences.len() <= 3
        {
            return;
        }
        if let Some(intro) = self.rng.choose(INTRO_PHRASES) {
            sentences[0] = format!("{intro}{}", lower_first(&sentences[0]));
        }
    }

    fn pick_filler(&mut self) -> Option<&'static str> {
        if self.profile.allows_contractions() {
            return self.rng.choose(FILLERS).copied();
        }
        let plain: Vec<&'static str> = FILLERS.iter().copied().filter(|f| !f.contains('\'')).collect();
        self.rng.choose(&plain).copied()
    }

    fn add_fillers(&mut self, sentences: &mut [String]) {
        if !self.profile.at_least(2) {
            return;
        }
        let count = sentences.len();
        if count <= 2 {
            return;
        }
        let attempts = (self.profile.level.get() as usize).min(count / 3);

        for _ in 0..attempts {
            let pos = self.rng.below(count);
            let Some(filler) = self.pick_filler() else {
                continue;
            };
            let sentence = &sentences[pos];
            let words: Vec<&str> = sentence.split_whitespace().collect();

            let updated = match self.rng.below(3) {
                0 => Some(format!("{}, {}", upper_first(filler), lower_first(sentence))),
                1 if words.len() > 5 => {
                    let at = self.rng.between(2, words.len() - 2);
                    Some(insert_word(&words, at, filler))
                }
                2 if sentence.chars().count() > 10 && words.len() >= 4 => {
                    let at = self.rng.between(2, words.len() - 2);
                    let aside = if self.rng.chance(0.5) {
                        format!("{EM_DASH} {filler} {EM_DASH}")
                    } else {
                        format!("({filler})")
                    };
                    Some(insert_word(&words, at, &aside))
                }
                _ => None,
            };

            if let Some(updated) = updated {
                sentences[pos] = updated;
            }
        }
    }

    /// Repeat one sentence after a visible change of mind.
    fn add_self_correction(&mut self, sentences: &mut [String]) {
        let count = sentences.len();
        if !self.profile.at_least(4) || count <= 5 || !self.rng.chance(SELF_CORRECTION_CHANCE) {
            return;
        }
        let pos = self.rng.between(2, count - 2);
        let Some(correction) = self.rng.choose(SELF_CORRECTIONS) else {
            return;
        };
        let sentence = &sentences[pos];
        let first_take = sentence.trim_end_matches(|c: char| matches!(c, '.' | '!' | '?'));
        sentences[pos] = format!("{first_take} {EM_DASH} {correction}, {}", lower_first(sentence));
    }

    fn add_scholarly_markers(&mut self, sentences: &mut [String]) {
        let count = sentences.len();

        if count > 3 && self.rng.chance(SCHOLARLY_MARKER_CHANCE) {
            let pos = self.rng.between(0, 3.min(count - 1));
            if let Some(marker) = self.rng.choose(SCHOLARLY_MARKERS) {
                sentences[pos] = format!("{marker}, {}", lower_first(&sentences[pos]));
            }
        }

        if count > 5 {
            let pos = self.rng.between(2, count - 2);
            let formal = formal_vocabulary().apply_all(&sentences[pos], self.rng);
            sentences[pos] = upper_first(&formal);
        }
    }

    /// Swap roughly 15% of comma joins for em dashes.
    fn dash_breaks(&mut self, text: String) -> String {
        let joins: Vec<(usize, usize)> = comma_join_re()
            .find_iter(&text)
            .map(|m| (m.start(), m.end()))
            .collect();
        if joins.len() <= 3 {
            return text;
        }

        let take = ((joins.len() as f64 * DASH_SHARE) as usize).max(1);
        let mut picks = self.rng.sample_indices(joins.len(), take);
        // back to front so earlier offsets stay valid
        picks.sort_unstable_by(|a, b| b.cmp(a));

        let mut out = text;
        let dash = format!(" {EM_DASH} ");
        for index in picks {
            let (start, end) = joins[index];
            out.replace_range(start..end, &dash);
        }
        out
    }
}

fn insert_word(words: &[&str], at: usize, item: &str) -> String {
    let mut out: Vec<&str> = words.to_vec();
    out.insert(at.min(out.len()), item);
    out.join(" ")
}

fn is_sentence_mark(ch: char) -> bool {
    matches!(ch, '.' | ',' | ';' | ':' | '!' | '?')
}

fn is_closer(ch: char) -> bool {
    matches!(ch, ')' | ']' | '}' | '"' | '\'' | '\u{201D}' | '\u{2019}' | '\u{00BB}' | '\u{2014}' | '-')
}

/// Put a space after punctuation that runs straight into the next word.
///
/// Numbers (`3.5`, `1,000`, `10:30`), abbreviations (`e.g`, `U.S`) and domains
/// (`example.com`) are left alone, as is punctuation followed by more punctuation
/// or a closing bracket or quote.
pub fn space_after_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);

    for (i, &ch) in chars.iter().enumerate() {
        out.push(ch);
        if !is_sentence_mark(ch) {
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            continue;
        };
        if next.is_whitespace() || is_sentence_mark(next) || is_closer(next) {
            continue;
        }
        let prev = i.checked_sub(1).and_then(|p| chars.get(p).copied());
        let inside_token = match (ch, prev) {
            ('.', Some(p)) => {
                p.is_alphanumeric() && next.is_alphanumeric() && !(p.is_lowercase() && next.is_uppercase())
            }
            (',' | ':', Some(p)) => p.is_ascii_digit() && next.is_ascii_digit(),
            _ => false,
        };
        if !inside_token {
            out.push(' ');
        }
    }
    out
}
