// Anti-Detection Post-Processor
// Grammar noise, glyph disguises and a zero-width finishing pass over the assembled text.

use tracing::debug;

use super::glyphs::{homoglyphs_for, ALTERNATE_SPACES, HOMOGLYPHS, INVISIBLE_MARKS, RHYTHM_MARKS, ZERO_WIDTH_SPACE};
use super::lexicon::{human_typo_rules, TYPO_CORRECTIONS};
use super::phrases::{
    correction_note, ARTICLES, CORRECTION_NOTE_TEMPLATES, FUNCTION_WORD_PATTERNS, HIGH_FREQUENCY_WORDS,
    PREPOSITIONS,
};
use super::profile::TransformProfile;
use super::random::RandomSource;
use super::rules::{article_errors, punctuation_noise};
use super::tokenizer::{lower_first, match_leading_case, sentence_split, word_count};

/// Texts shorter than this pass through untouched.
const MIN_TEXT_CHARS: usize = 50;
const MIN_PARAGRAPH_CHARS: usize = 30;

const COMMA_SPLICE_CHANCE: f64 = 0.6;
const COMMA_SPLICE_MIN_CHARS: usize = 100;
const ARTICLE_NOISE_CHANCE: f64 = 0.7;
const ARTICLE_NOISE_MIN_WORDS: usize = 20;
const PREPOSITION_NOISE_CHANCE: f64 = 0.5;
const PREPOSITION_NOISE_MIN_WORDS: usize = 25;
const SPACING_NOISE_CHANCE: f64 = 0.8;
const HUMAN_TYPO_CHANCE: f64 = 0.6;

const ZERO_WIDTH_CHANCE: f64 = 0.8;
const MAX_ZERO_WIDTH: usize = 5;
const INVISIBLE_MARK_CHANCE: f64 = 0.6;
const HOMOGLYPH_CHANCE: f64 = 0.7;
const ALTERNATE_SPACE_CHANCE: f64 = 0.8;
const TYPO_CORRECTION_MIN_CHARS: usize = 100;

const FINISHING_MIN_CHARS: usize = 200;
const FINISHING_MIN_SENTENCES: usize = 8;
const FINISHING_MIN_INITIALS: usize = 5;
const FINISHING_PIECES: usize = 7;
const FINISHING_TAIL_MIN_CHARS: usize = 500;
/// Percent offsets into the whole text that get one more mark each.
const TAIL_OFFSETS: &[usize] = &[1, 2, 3, 5, 8];

const EM_DASH: char = '\u{2014}';

pub struct AntiDetection<'a, R: RandomSource> {
    profile: &'a TransformProfile,
    rng: &'a mut R,
}

impl<'a, R: RandomSource> AntiDetection<'a, R> {
    pub fn new(profile: &'a TransformProfile, rng: &'a mut R) -> Self {
        Self { profile, rng }
    }

    pub fn apply(&mut self, text: &str) -> String {
        if text.chars().count() < MIN_TEXT_CHARS {
            return text.to_string();
        }

        let mut paragraphs: Vec<String> = text.split("\n\n").map(String::from).collect();
        if self.profile.at_least(4) {
            self.grammar_noise(&mut paragraphs);
        }

        let disguised: Vec<String> = paragraphs
            .into_iter()
            .map(|p| self.disguise_paragraph(p))
            .collect();

        let out = self.finishing_pass(disguised.join("\n\n"));
        debug!(
            level = self.profile.level.get(),
            input_chars = text.chars().count(),
            output_chars = out.chars().count(),
            "anti_detection.applied"
        );
        out
    }

    fn grammar_noise(&mut self, paragraphs: &mut [String]) {
        if self.rng.chance(COMMA_SPLICE_CHANCE) {
            self.comma_splice(paragraphs);
        }

        if self.rng.chance(ARTICLE_NOISE_CHANCE) {
            for paragraph in paragraphs.iter_mut() {
                if word_count(paragraph) > ARTICLE_NOISE_MIN_WORDS {
                    *paragraph = self.article_noise(paragraph);
                }
            }
        }

        if self.rng.chance(PREPOSITION_NOISE_CHANCE) {
            for paragraph in paragraphs.iter_mut() {
                if word_count(paragraph) > PREPOSITION_NOISE_MIN_WORDS {
                    *paragraph = self.preposition_noise(paragraph);
                }
            }
        }

        if self.rng.chance(SPACING_NOISE_CHANCE) {
            for paragraph in paragraphs.iter_mut() {
                *paragraph = self.spacing_noise(paragraph);
            }
        }

        if self.rng.chance(HUMAN_TYPO_CHANCE) {
            for paragraph in paragraphs.iter_mut() {
                *paragraph = self.human_typo(paragraph);
            }
        }
    }

    /// Join two sentences of the first long paragraph with a comma.
    fn comma_splice(&mut self, paragraphs: &mut [String]) {
        for target in paragraphs.iter_mut() {
            if target.chars().count() <= COMMA_SPLICE_MIN_CHARS
                || !target.contains(',')
                || !target.contains('.')
            {
                continue;
            }

            let mut sentences = sentence_split(target.as_str());
            if sentences.len() < 2 {
                continue;
            }
            let idx = self.rng.between(0, sentences.len() - 2);
            if !sentences[idx].ends_with('.') {
                return;
            }
            sentences[idx].pop();
            sentences[idx].push(',');
            sentences[idx + 1] = lower_first(&sentences[idx + 1]);
            *target = sentences.join(" ");
            return;
        }
    }

    fn article_noise(&mut self, paragraph: &str) -> String {
        let mut words: Vec<String> = paragraph.split_whitespace().map(String::from).collect();

        for j in 0..words.len().saturating_sub(1) {
            if is_one_of(&words[j], ARTICLES) && self.rng.chance(0.3) {
                let doubled = words[j].clone();
                words.insert(j + 1, doubled);
                break;
            }
        }

        if self.rng.chance(0.4) {
            for j in 0..words.len() {
                if is_one_of(&words[j], ARTICLES) && self.rng.chance(0.25) {
                    words.remove(j);
                    break;
                }
            }
        }

        words.join(" ")
    }

    fn preposition_noise(&mut self, paragraph: &str) -> String {
        let mut words: Vec<String> = paragraph.split_whitespace().map(String::from).collect();

        for j in 0..words.len().saturating_sub(1) {
            if !is_one_of(&words[j], PREPOSITIONS)
                && !is_one_of(&words[j + 1], PREPOSITIONS)
                && self.rng.chance(0.2)
            {
                if let Some(prep) = self.rng.choose(PREPOSITIONS) {
                    words.insert(j + 1, prep.to_string());
                }
                break;
            }
        }

        if self.rng.chance(0.3) {
            for j in 0..words.len() {
                if is_one_of(&words[j], PREPOSITIONS) && self.rng.chance(0.2) {
                    words.remove(j);
                    break;
                }
            }
        }

        words.join(" ")
    }

    fn spacing_noise(&mut self, paragraph: &str) -> String {
        let mut chars: Vec<char> = paragraph.chars().collect();

        if self.rng.chance(0.7) {
            let extra = self.rng.between(2, 3);
            for _ in 0..extra {
                let spaces = positions_of(&chars, ' ');
                if let Some(&at) = self.rng.choose(&spaces) {
                    chars.insert(at, ' ');
                }
            }
        }

        if self.rng.chance(0.4) {
            for mark in ['.', ',', ';', ':', '!', '?'] {
                if let Some(at) = chars.windows(2).position(|w| w[0] == mark && w[1] == ' ') {
                    chars.remove(at + 1);
                    break;
                }
            }
        }

        chars.into_iter().collect()
    }

    /// Misspell the first known word found, keeping its leading capital.
    fn human_typo(&mut self, paragraph: &str) -> String {
        for (pattern, wrong) in human_typo_rules() {
            let Some(found) = pattern.find(paragraph) else {
                continue;
            };
            if !self.rng.chance(0.3) {
                continue;
            }
            let mut out = paragraph.to_string();
            out.replace_range(found.range(), &match_leading_case(found.as_str(), wrong));
            return out;
        }
        paragraph.to_string()
    }

    fn disguise_paragraph(&mut self, paragraph: String) -> String {
        if paragraph.chars().count() < MIN_PARAGRAPH_CHARS {
            return paragraph;
        }

        let mut chars: Vec<char> = paragraph.chars().collect();
        if self.rng.chance(ZERO_WIDTH_CHANCE) {
            self.scatter_zero_width(&mut chars);
        }
        if self.rng.chance(INVISIBLE_MARK_CHANCE) {
            self.mark_function_word(&mut chars);
        }
        if self.rng.chance(HOMOGLYPH_CHANCE) {
            self.swap_homoglyphs(&mut chars);
        }
        if self.rng.chance(ALTERNATE_SPACE_CHANCE) {
            self.widen_one_space(&mut chars);
        }
        let mut text: String = chars.into_iter().collect();

        let correction_chance = if self.profile.at_least(4) { 0.4 } else { 0.25 };
        if self.rng.chance(correction_chance) && text.chars().count() > TYPO_CORRECTION_MIN_CHARS {
            text = self.typo_correction(&text);
        }

        let punctuation_chance = if self.profile.at_least(3) { 0.35 } else { 0.15 };
        if self.rng.chance(punctuation_chance) {
            let times = self.rng.between(1, 2);
            text = punctuation_noise().apply_random(&text, times, self.rng);
        }

        let article_chance = if self.profile.at_least(3) { 0.3 } else { 0.1 };
        if self.rng.chance(article_chance) {
            text = article_errors().apply_random(&text, 1, self.rng);
        }

        text
    }

    fn scatter_zero_width(&mut self, chars: &mut Vec<char>) {
        let len = chars.len();
        let count = (len / 40 + 1).min(MAX_ZERO_WIDTH);
        let mut positions: Vec<usize> = self
            .rng
            .sample_indices(len.saturating_sub(2), count)
            .into_iter()
            .map(|i| i + 1)
            .collect();
        positions.sort_unstable_by(|a, b| b.cmp(a));
        for at in positions {
            chars.insert(at, ZERO_WIDTH_SPACE);
        }
    }

    /// Slip one invisible mark in after the space before a function word.
    fn mark_function_word(&mut self, chars: &mut Vec<char>) {
        let Some(&mark) = self.rng.choose(INVISIBLE_MARKS) else {
            return;
        };
        for pattern in FUNCTION_WORD_PATTERNS {
            let needle: Vec<char> = pattern.chars().collect();
            let Some(at) = find_chars(chars, &needle, false) else {
                continue;
            };
            if self.rng.chance(0.4) {
                chars.insert(at + 1, mark);
                break;
            }
        }
    }

    fn swap_homoglyphs(&mut self, chars: &mut [char]) {
        let limit = self.rng.between(2, 4);
        let mut swapped = 0;

        for word in HIGH_FREQUENCY_WORDS {
            if swapped >= limit {
                break;
            }
            let needle: Vec<char> = word.chars().collect();
            let Some(start) = find_chars(chars, &needle, true) else {
                continue;
            };

            for (latin, _) in HOMOGLYPHS.iter().filter(|(l, _)| l.is_ascii_lowercase()) {
                let Some(offset) = needle.iter().position(|c| c == latin) else {
                    continue;
                };
                if !self.rng.chance(0.6) {
                    continue;
                }
                let at = start + offset;
                let original = chars[at];
                if original.to_ascii_lowercase() != *latin {
                    continue;
                }
                if let Some(&glyph) = self.rng.choose(homoglyphs_for(original)) {
                    chars[at] = glyph;
                    swapped += 1;
                }
                break;
            }
        }
    }

    fn widen_one_space(&mut self, chars: &mut [char]) {
        let spaces = positions_of(chars, ' ');
        let Some(&at) = self.rng.choose(&spaces) else {
            return;
        };
        if let Some(&wide) = self.rng.choose(ALTERNATE_SPACES) {
            chars[at] = wide;
        }
    }

    /// Leave a typo in place next to its visible correction.
    fn typo_correction(&mut self, paragraph: &str) -> String {
        let Some(&(typo, correct)) = self.rng.choose(TYPO_CORRECTIONS) else {
            return paragraph.to_string();
        };
        let mut words: Vec<String> = paragraph
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(String::from)
            .collect();
        let len = words.len();

        let inserted = match self.rng.below(4) {
            0 if len > 8 => {
                let at = self.rng.between(3, 8.min(len - 1));
                words.insert(at, format!("{typo}{EM_DASH}I mean {correct}"));
                true
            }
            1 if len > 8 => {
                let at = self.rng.between(3, 8.min(len - 1));
                if words[at].ends_with(|c: char| matches!(c, '.' | ',' | ';' | ':')) {
                    let template = self.rng.below(CORRECTION_NOTE_TEMPLATES);
                    words.insert(at + 1, correction_note(template, typo, correct));
                    true
                } else {
                    false
                }
            }
            2 if self.profile.at_least(4) && len > 5 => {
                let at = self.rng.between(1, len - 2);
                words.insert(at, format!("{typo} {correct}"));
                true
            }
            3 if self.profile.at_least(3) && len > 3 => {
                let at = self.rng.between(1, len - 2);
                words.insert(at, format!("{typo} *{correct}"));
                true
            }
            _ => false,
        };

        if inserted {
            words.join(" ")
        } else {
            paragraph.to_string()
        }
    }

    /// Thread zero-width marks through long, well-formed texts at fixed proportions.
    fn finishing_pass(&mut self, text: String) -> String {
        if !self.profile.at_least(3) || text.chars().count() <= FINISHING_MIN_CHARS {
            return text;
        }
        let sentences = sentence_split(&text);
        if sentences.len() < FINISHING_MIN_SENTENCES {
            return text;
        }
        let initials = sentences
            .iter()
            .take(FINISHING_MIN_SENTENCES)
            .filter(|s| s.chars().next().is_some_and(char::is_alphabetic))
            .count();
        if initials < FINISHING_MIN_INITIALS {
            return text;
        }

        let mut text = text;
        let mut pieces: Vec<String> = text.split(". ").map(String::from).collect();
        if pieces.len() >= FINISHING_PIECES {
            for (i, piece) in pieces.iter_mut().take(FINISHING_PIECES).enumerate() {
                let len = piece.chars().count();
                if len < 10 || i % 2 != 0 || len <= 30 {
                    continue;
                }
                let first = len * 382 / 1000;
                let second = len * 618 / 1000;
                let mut chars: Vec<char> = piece.chars().collect();
                insert_mark(&mut chars, first, RHYTHM_MARKS[i % RHYTHM_MARKS.len()]);
                insert_mark(&mut chars, second, RHYTHM_MARKS[(i + 3) % RHYTHM_MARKS.len()]);
                *piece = chars.into_iter().collect();
            }
            text = pieces.join(". ");
        }

        let mut chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        if len > FINISHING_TAIL_MIN_CHARS {
            let mut positions: Vec<usize> = TAIL_OFFSETS
                .iter()
                .map(|pct| len * pct / 100)
                .filter(|&at| at > 0 && at < len)
                .collect();
            positions.sort_unstable_by(|a, b| b.cmp(a));
            for at in positions {
                insert_mark(&mut chars, at, RHYTHM_MARKS[at % RHYTHM_MARKS.len()]);
            }
        }
        chars.into_iter().collect()
    }
}

/// Insert `mark` before `at` unless it would touch a line break.
fn insert_mark(chars: &mut Vec<char>, at: usize, mark: char) {
    if at > chars.len() {
        return;
    }
    let touches_newline =
        chars.get(at) == Some(&'\n') || at.checked_sub(1).and_then(|p| chars.get(p)) == Some(&'\n');
    if !touches_newline {
        chars.insert(at, mark);
    }
}

fn is_one_of(word: &str, list: &[&str]) -> bool {
    let lower = word.to_lowercase();
    list.contains(&lower.as_str())
}

fn positions_of(chars: &[char], target: char) -> Vec<usize> {
    chars
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == target)
        .map(|(i, _)| i)
        .collect()
}

fn find_chars(haystack: &[char], needle: &[char], ignore_case: bool) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| {
        window.iter().zip(needle).all(|(h, n)| {
            if ignore_case {
                h.to_ascii_lowercase() == n.to_ascii_lowercase()
            } else {
                h == n
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::humanizer::glyphs::{is_invisible, reveal};
    use crate::services::humanizer::profile::HumanizeLevel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile(level: i64) -> TransformProfile {
        TransformProfile::for_level(HumanizeLevel::clamped(level))
    }

    const ESSAY: &str = "The committee met on Monday to review the budget. Members agreed that the plan was sound. \
        Several items needed more detail before approval. The chair asked for a revised draft by Friday. \
        Everyone left the meeting with a clear list of tasks. Finance will check the numbers again. \
        Operations will confirm the schedule with the vendors. Marketing will prepare the launch notes. \
        The next meeting is set for the first week of the month.";

    #[test]
    fn test_short_text_is_untouched() {
        let p = profile(5);
        let mut rng = StdRng::seed_from_u64(1);
        let text = "Too short to bother with.";
        assert_eq!(AntiDetection::new(&p, &mut rng).apply(text), text);
    }

    #[test]
    fn test_glyph_steps_are_reversible() {
        let p = profile(2);
        let mut rng = StdRng::seed_from_u64(4);
        let mut detector = AntiDetection::new(&p, &mut rng);
        for _ in 0..20 {
            let mut chars: Vec<char> = ESSAY.chars().collect();
            detector.scatter_zero_width(&mut chars);
            detector.mark_function_word(&mut chars);
            detector.swap_homoglyphs(&mut chars);
            detector.widen_one_space(&mut chars);
            let disguised: String = chars.into_iter().collect();
            assert_eq!(reveal(&disguised), ESSAY);
        }
    }

    #[test]
    fn test_finishing_pass_adds_only_invisible_marks() {
        let p = profile(3);
        let mut rng = StdRng::seed_from_u64(8);
        let out = AntiDetection::new(&p, &mut rng).finishing_pass(ESSAY.to_string());
        assert!(out.chars().count() > ESSAY.chars().count());
        let visible: String = out.chars().filter(|c| !is_invisible(*c)).collect();
        assert_eq!(visible, ESSAY);
    }

    #[test]
    fn test_finishing_pass_skips_low_levels() {
        let p = profile(2);
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(AntiDetection::new(&p, &mut rng).finishing_pass(ESSAY.to_string()), ESSAY);
    }

    #[test]
    fn test_homoglyphs_keep_case() {
        let p = profile(3);
        let mut rng = StdRng::seed_from_u64(12);
        let mut detector = AntiDetection::new(&p, &mut rng);
        for _ in 0..30 {
            let mut chars: Vec<char> = "THE AND THAT WITH".chars().collect();
            detector.swap_homoglyphs(&mut chars);
            for c in chars.iter().filter(|c| !c.is_ascii()) {
                let latin = crate::services::humanizer::glyphs::canonical_latin(*c).unwrap();
                assert!(latin.is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn test_comma_splice_joins_two_sentences() {
        let p = profile(4);
        let mut rng = StdRng::seed_from_u64(3);
        let mut detector = AntiDetection::new(&p, &mut rng);
        let mut paragraphs = vec![
            "First, we planned the route carefully. Then we packed the car. After that, we drove north for several hours.".to_string(),
        ];
        detector.comma_splice(&mut paragraphs);
        let periods = paragraphs[0].matches('.').count();
        assert_eq!(periods, 2);
        assert!(paragraphs[0].contains("carefully, then") || paragraphs[0].contains("car, after"));
    }

    #[test]
    fn test_comma_splice_moves_past_single_sentence_paragraphs() {
        let p = profile(4);
        let lone = "Across the wide green valley, the slow river kept running past the old stone mill and the quiet farms lining its banks.";
        let mut rng = StdRng::seed_from_u64(5);
        let mut detector = AntiDetection::new(&p, &mut rng);
        let mut paragraphs = vec![
            lone.to_string(),
            "First, we planned the route carefully. Then we packed the car. After that, we drove north for several hours.".to_string(),
        ];
        detector.comma_splice(&mut paragraphs);
        assert_eq!(paragraphs[0], lone);
        assert_eq!(paragraphs[1].matches('.').count(), 2);
    }

    #[test]
    fn test_typo_correction_keeps_original_words() {
        let p = profile(5);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = AntiDetection::new(&p, &mut rng).typo_correction(ESSAY);
            for word in ESSAY.split(' ') {
                assert!(out.contains(word), "seed {seed}: lost {word}");
            }
        }
    }

    #[test]
    fn test_full_pass_keeps_paragraphs() {
        let p = profile(4);
        let text = format!("{ESSAY}\n\n{ESSAY}");
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = AntiDetection::new(&p, &mut rng).apply(&text);
            assert_eq!(out.matches("\n\n").count(), 1);
            assert!(!out.trim().is_empty());
        }
    }

    #[test]
    fn test_insert_mark_avoids_line_breaks() {
        let mut chars: Vec<char> = "ab\ncd".chars().collect();
        insert_mark(&mut chars, 2, ZERO_WIDTH_SPACE);
        insert_mark(&mut chars, 3, ZERO_WIDTH_SPACE);
        assert_eq!(chars.iter().collect::<String>(), "ab\ncd");
        insert_mark(&mut chars, 1, ZERO_WIDTH_SPACE);
        assert_eq!(chars.len(), 6);
    }
}
