// Sentence Transformer
// Walks the sentence queue with a cursor; a combine marks the following sentence consumed.

use regex::Captures;
use tracing::debug;

use super::lexicon::{contraction_rules, keyboard_neighbors, synonyms_for, MISSPELLINGS};
use super::phrases::{
    BREAK_CONJUNCTIONS, CASUAL_CONNECTORS, CASUAL_OPENERS, DIGRESSIONS, FORMAL_CONNECTORS, HEDGE_BLOCKING_STARTS,
    HEDGE_PHRASES, METADISCOURSE, QUALIFIERS, SCHOLARLY_OPENERS,
};
use super::profile::{TransformProfile, WritingStyle};
use super::random::RandomSource;
use super::rules::{active_to_passive, passive_to_active, scholarly_vocabulary};
use super::tokenizer::{
    is_word_token, lower_first, match_leading_case, tidy_spacing, word_count, word_tokenize,
};

/// Sentences longer than this (in words) may be broken in two.
const SPLIT_MIN_WORDS: usize = 15;
/// How far from the midpoint a natural break point is searched for.
const SPLIT_WINDOW: usize = 3;
const MISSPELLING_CHANCE: f64 = 0.7;
const GENERIC_TYPO_CHANCE: f64 = 0.7;

const HEDGE_CHANCE: f64 = 0.35;
const METADISCOURSE_CHANCE: f64 = 0.25;
const METADISCOURSE_MIN_CHARS: usize = 30;
const DIGRESSION_CHANCE: f64 = 0.2;
const DIGRESSION_MIN_CHARS: usize = 60;
const QUALIFIER_CHANCE: f64 = 0.3;
const QUALIFIER_MIN_CHARS: usize = 40;
const VOCABULARY_CHANCE: f64 = 0.3;

#[derive(Debug, Clone)]
struct Sentence {
    text: String,
    consumed: bool,
}

impl Sentence {
    fn new(text: String) -> Self {
        Self { text, consumed: false }
    }

    fn take(&mut self) -> String {
        self.consumed = true;
        std::mem::take(&mut self.text)
    }
}

/// What the sentence pass did to one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub restructured: usize,
    pub hedged: usize,
    pub combined: usize,
    pub split: usize,
    pub typos: usize,
    pub synonyms: usize,
    pub contracted: usize,
}

pub struct SentenceTransformer<'a, R: RandomSource> {
    profile: &'a TransformProfile,
    rng: &'a mut R,
    stats: TransformStats,
}

impl<'a, R: RandomSource> SentenceTransformer<'a, R> {
    pub fn new(profile: &'a TransformProfile, rng: &'a mut R) -> Self {
        Self {
            profile,
            rng,
            stats: TransformStats::default(),
        }
    }

    pub fn stats(&self) -> TransformStats {
        self.stats
    }

    /// Rewrite every sentence. The output may hold fewer (combine) or more (split) entries.
    pub fn transform_all(&mut self, sentences: Vec<String>) -> Vec<String> {
        let mut queue: Vec<Sentence> = sentences.into_iter().map(Sentence::new).collect();
        let mut output = Vec::with_capacity(queue.len());

        for cursor in 0..queue.len() {
            if queue[cursor].consumed {
                continue;
            }
            let mut sentence = queue[cursor].take();
            sentence = self.restructure(sentence);

            let has_next = cursor + 1 < queue.len();
            if has_next && self.rng.chance(self.profile.combine_chance) && can_take_connector(&sentence) {
                let next = queue[cursor + 1].take();
                sentence = self.combine(&sentence, &next);
            } else if word_count(&sentence) > SPLIT_MIN_WORDS && self.rng.chance(self.profile.break_chance) {
                if let Some((head, tail)) = split_near_middle(&sentence) {
                    self.stats.split += 1;
                    output.push(head);
                    sentence = tail;
                }
            }

            output.push(self.finish(&sentence));
        }

        debug!(
            level = self.profile.level.get(),
            sentences_out = output.len(),
            restructured = self.stats.restructured,
            hedged = self.stats.hedged,
            combined = self.stats.combined,
            split = self.stats.split,
            typos = self.stats.typos,
            synonyms = self.stats.synonyms,
            "sentence pass complete"
        );
        output
    }

    fn restructure(&mut self, sentence: String) -> String {
        if !self.profile.at_least(3) || !self.rng.chance(self.profile.restructure_chance) {
            return sentence;
        }
        self.stats.restructured += 1;
        match self.profile.style {
            WritingStyle::Scholarly => self.restructure_scholarly(sentence),
            WritingStyle::Casual => self.restructure_casual(sentence),
        }
    }

    fn restructure_casual(&mut self, mut sentence: String) -> String {
        if let Some(active) = passive_to_active().try_apply(&sentence, self.rng) {
            sentence = active;
        }
        self.swap_opener(sentence, CASUAL_OPENERS)
    }

    fn restructure_scholarly(&mut self, mut sentence: String) -> String {
        if let Some(passive) = active_to_passive().try_apply(&sentence, self.rng) {
            sentence = passive;
        }

        if self.rng.chance(HEDGE_CHANCE)
            && !HEDGE_BLOCKING_STARTS.iter().any(|s| sentence.starts_with(s))
            && !already_hedged(&sentence)
        {
            if let Some(hedge) = self.rng.choose(HEDGE_PHRASES) {
                sentence = format!("{hedge}{}", lower_first(&sentence));
                self.stats.hedged += 1;
            }
        }

        if self.rng.chance(METADISCOURSE_CHANCE) && sentence.chars().count() > METADISCOURSE_MIN_CHARS {
            if let Some(marker) = self.rng.choose(METADISCOURSE) {
                sentence = format!("{marker}{}", lower_first(&sentence));
            }
        }

        if self.rng.chance(DIGRESSION_CHANCE)
            && sentence.contains(',')
            && sentence.chars().count() > DIGRESSION_MIN_CHARS
        {
            sentence = self.insert_digression(sentence);
        }

        if self.rng.chance(QUALIFIER_CHANCE)
            && sentence.chars().count() > QUALIFIER_MIN_CHARS
        {
            if let Some(at) = sentence.find(" that ") {
                if let Some(qualifier) = self.rng.choose(QUALIFIERS) {
                    // right after "that", before its trailing space
                    let at = at + " that".len();
                    sentence = format!("{}{}{}", &sentence[..at], qualifier, &sentence[at..]);
                }
            }
        }

        sentence = self.swap_opener(sentence, SCHOLARLY_OPENERS);

        if self.rng.chance(VOCABULARY_CHANCE) {
            let times = self.rng.between(1, 2);
            sentence = scholarly_vocabulary().apply_random(&sentence, times, self.rng);
        }
        sentence
    }

    /// Replace one comma in the middle third of the sentence with a digression.
    fn insert_digression(&mut self, sentence: String) -> String {
        let chars: Vec<char> = sentence.chars().collect();
        let len = chars.len();
        let middle: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|(i, c)| **c == ',' && *i >= len / 3 && *i <= 2 * len / 3)
            .map(|(i, _)| i)
            .collect();

        let Some(&pos) = self.rng.choose(&middle) else {
            return sentence;
        };
        let Some(digression) = self.rng.choose(DIGRESSIONS) else {
            return sentence;
        };

        let mut out: String = chars[..pos].iter().collect();
        out.push_str(digression);
        out.extend(&chars[pos + 1..]);
        out
    }

    fn swap_opener(&mut self, sentence: String, openers: &[(&str, &[&str])]) -> String {
        for (prefix, replacements) in openers {
            let Some(rest) = sentence.strip_prefix(prefix) else {
                continue;
            };
            // "It is" must not match "It isn't" or "This issue".
            if rest.starts_with(|c: char| c.is_alphanumeric() || c == '\'') {
                continue;
            }
            if let Some(opener) = self.rng.choose(*replacements) {
                return format!("{opener}{rest}");
            }
        }
        sentence
    }

    fn combine(&mut self, sentence: &str, next: &str) -> String {
        let connectors = if self.profile.is_scholarly() {
            FORMAL_CONNECTORS
        } else {
            CASUAL_CONNECTORS
        };
        let connector = self.rng.choose(connectors).copied().unwrap_or(", and ");
        self.stats.combined += 1;
        // only the first letter drops case; later names and acronyms keep theirs
        format!(
            "{}{}{}",
            sentence.trim_end_matches('.'),
            connector,
            lower_first(next.trim_start())
        )
    }

    /// Word pass, spacing cleanup and contractions.
    fn finish(&mut self, sentence: &str) -> String {
        let rewritten = self.rewrite_words(sentence);
        let tidy = tidy_spacing(&rewritten);
        self.contract(tidy)
    }

    fn rewrite_words(&mut self, sentence: &str) -> String {
        let tokens = word_tokenize(sentence);
        let mut words = Vec::with_capacity(tokens.len());

        for token in tokens {
            if token.chars().count() <= 3 || !is_word_token(&token) {
                words.push(token);
                continue;
            }

            if self.rng.chance(self.profile.word_typo_rate()) {
                let typo = self.inject_typo(&token);
                if typo != token {
                    self.stats.typos += 1;
                }
                words.push(typo);
                continue;
            }

            if self.rng.chance(self.profile.synonym_chance) {
                if let Some(synonym) = self.rng.choose(synonyms_for(&token)) {
                    self.stats.synonyms += 1;
                    words.push(match_leading_case(&token, synonym));
                    continue;
                }
            }
            words.push(token);
        }

        words.join(" ")
    }

    fn inject_typo(&mut self, word: &str) -> String {
        if let Some(misspelled) = self.misspell(word) {
            return misspelled;
        }
        if !self.rng.chance(GENERIC_TYPO_CHANCE) {
            return word.to_string();
        }

        let chars: Vec<char> = word.chars().collect();
        match self.rng.below(4) {
            0 => transpose(&chars, self.rng),
            1 => drop_letter(&chars, self.rng),
            2 => double_letter(&chars, self.rng),
            _ => slip_key(&chars, self.rng),
        }
    }

    /// Swap in a well-known misspelled root.
    fn misspell(&mut self, word: &str) -> Option<String> {
        if !word.is_ascii() {
            return None;
        }
        let lower = word.to_ascii_lowercase();
        for (root, wrong) in MISSPELLINGS {
            let Some(pos) = lower.find(root) else {
                continue;
            };
            if self.rng.chance(MISSPELLING_CHANCE) {
                let replaced = format!("{}{}{}", &word[..pos], wrong, &word[pos + root.len()..]);
                return Some(match_leading_case(word, &replaced));
            }
        }
        None
    }

    fn contract(&mut self, sentence: String) -> String {
        if !self.rng.chance(self.profile.contraction_chance) {
            return sentence;
        }
        let mut out = sentence;
        for (pattern, contraction) in contraction_rules() {
            if !pattern.is_match(&out) {
                continue;
            }
            out = pattern
                .replace_all(&out, |caps: &Captures| match_leading_case(&caps[0], contraction))
                .into_owned();
            self.stats.contracted += 1;
        }
        out
    }
}

fn already_hedged(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    HEDGE_PHRASES.iter().any(|h| lower.starts_with(&h.to_lowercase()))
}

/// A question or exclamation would lose its mark when joined.
fn can_take_connector(sentence: &str) -> bool {
    !sentence.trim_end().ends_with(|c: char| c == '?' || c == '!')
}

/// Break near the midpoint, preferring a word that ends in `,`/`;` or a conjunction.
fn split_near_middle(sentence: &str) -> Option<(String, String)> {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    let mut mid = words.len() / 2;

    let lo = mid.saturating_sub(SPLIT_WINDOW);
    let hi = (mid + SPLIT_WINDOW).min(words.len());
    for (j, word) in words.iter().enumerate().take(hi).skip(lo) {
        let lower = word.to_lowercase();
        if word.ends_with(|c: char| c == ',' || c == ';') || BREAK_CONJUNCTIONS.contains(&lower.as_str()) {
            mid = j + 1;
            break;
        }
    }

    if mid == 0 || mid >= words.len() {
        return None;
    }
    let head = words[..mid].join(" ");
    let tail = lower_first(&words[mid..].join(" "));
    Some((head, tail))
}

fn transpose<R: RandomSource + ?Sized>(chars: &[char], rng: &mut R) -> String {
    let mut out = chars.to_vec();
    if out.len() > 3 {
        let pos = rng.between(1, out.len() - 2);
        out.swap(pos, pos + 1);
    }
    out.into_iter().collect()
}

fn drop_letter<R: RandomSource + ?Sized>(chars: &[char], rng: &mut R) -> String {
    let mut out = chars.to_vec();
    if out.len() > 4 {
        let pos = rng.between(1, out.len() - 2);
        out.remove(pos);
    }
    out.into_iter().collect()
}

fn double_letter<R: RandomSource + ?Sized>(chars: &[char], rng: &mut R) -> String {
    let mut out = chars.to_vec();
    if out.len() > 2 {
        let pos = rng.between(0, out.len() - 1);
        out.insert(pos, out[pos]);
    }
    out.into_iter().collect()
}

/// Hit a neighbouring QWERTY key instead of the intended one.
fn slip_key<R: RandomSource + ?Sized>(chars: &[char], rng: &mut R) -> String {
    let mut out = chars.to_vec();
    if out.len() > 3 {
        let pos = rng.between(0, out.len() - 1);
        let original = out[pos];
        if let Some(neighbors) = keyboard_neighbors(original) {
            let options: Vec<char> = neighbors.chars().collect();
            if let Some(&key) = rng.choose(&options) {
                out[pos] = if original.is_uppercase() {
                    key.to_ascii_uppercase()
                } else {
                    key
                };
            }
        }
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::humanizer::profile::HumanizeLevel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_profile(level: i64) -> TransformProfile {
        let mut profile = TransformProfile::for_level(HumanizeLevel::clamped(level));
        profile.synonym_chance = 0.0;
        profile.contraction_chance = 0.0;
        profile.combine_chance = 0.0;
        profile.break_chance = 0.0;
        profile.restructure_chance = 0.0;
        profile.typo_chance = 0.0;
        profile
    }

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_combine_consumes_following_sentence() {
        let mut profile = quiet_profile(2);
        profile.combine_chance = 1.0;
        let mut rng = StdRng::seed_from_u64(4);
        let mut transformer = SentenceTransformer::new(&profile, &mut rng);

        let out = transformer.transform_all(sentences(&["One cat.", "Two dogs.", "Three birds."]));
        assert_eq!(out.len(), 2);
        assert!(out[0].starts_with("One cat"));
        assert!(out[0].ends_with("two dogs."));
        assert_eq!(out[1], "Three birds.");
        assert_eq!(transformer.stats().combined, 1);
    }

    #[test]
    fn test_combine_keeps_acronyms_in_following_sentence() {
        let mut profile = quiet_profile(2);
        profile.combine_chance = 1.0;
        let mut rng = StdRng::seed_from_u64(4);
        let mut transformer = SentenceTransformer::new(&profile, &mut rng);

        let out = transformer.transform_all(sentences(&["We waited.", "Then NASA called."]));
        assert_eq!(out.len(), 1);
        assert!(out[0].ends_with("then NASA called."), "{}", out[0]);
    }

    #[test]
    fn test_questions_are_not_combined() {
        let mut profile = quiet_profile(2);
        profile.combine_chance = 1.0;
        let mut rng = StdRng::seed_from_u64(4);
        let mut transformer = SentenceTransformer::new(&profile, &mut rng);

        let out = transformer.transform_all(sentences(&["Why not?", "Fine."]));
        assert_eq!(out, vec!["Why not?", "Fine."]);
    }

    #[test]
    fn test_long_sentence_splits_at_conjunction() {
        let mut profile = quiet_profile(3);
        profile.break_chance = 1.0;
        let mut rng = StdRng::seed_from_u64(8);
        let mut transformer = SentenceTransformer::new(&profile, &mut rng);

        let long = "We walked along the quiet river for hours and Then we stopped at the old mill to rest our tired legs.";
        let out = transformer.transform_all(sentences(&[long]));
        assert_eq!(out.len(), 2);
        assert!(out[0].ends_with("and"));
        assert!(out[1].starts_with("then"));
        assert_eq!(transformer.stats().split, 1);
    }

    #[test]
    fn test_contractions_keep_leading_capital() {
        let mut profile = quiet_profile(1);
        profile.contraction_chance = 1.0;
        let mut rng = StdRng::seed_from_u64(1);
        let mut transformer = SentenceTransformer::new(&profile, &mut rng);

        let out = transformer.transform_all(sentences(&["It is true that we do not know."]));
        assert_eq!(out, vec!["It's true that we don't know."]);
    }

    #[test]
    fn test_scholarly_pass_never_contracts() {
        let profile = TransformProfile::for_level(HumanizeLevel::clamped(5));
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut transformer = SentenceTransformer::new(&profile, &mut rng);
            let out = transformer.transform_all(sentences(&[
                "It is clear that we do not know what they are doing.",
                "This is a big problem, and people need to think about it carefully.",
                "There are many ways to make progress.",
            ]));
            assert!(!out.is_empty());
            for sentence in out {
                assert!(!sentence.contains('\''), "seed {seed}: {sentence}");
            }
        }
    }

    #[test]
    fn test_opener_swap_respects_word_boundary() {
        let profile = quiet_profile(3);
        let mut rng = StdRng::seed_from_u64(3);
        let mut transformer = SentenceTransformer::new(&profile, &mut rng);

        let unchanged = transformer.swap_opener("It isn't here.".to_string(), CASUAL_OPENERS);
        assert_eq!(unchanged, "It isn't here.");

        let swapped = transformer.swap_opener("This is fine.".to_string(), CASUAL_OPENERS);
        assert!(swapped.ends_with(" fine."));
        assert!(!swapped.starts_with("This is fine"));
    }

    #[test]
    fn test_misspelling_keeps_capital() {
        let profile = quiet_profile(4);
        let mut hits = 0;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut transformer = SentenceTransformer::new(&profile, &mut rng);
            if let Some(word) = transformer.misspell("Business") {
                assert_eq!(word, "Buisness");
                hits += 1;
            }
        }
        assert!(hits > 0);
    }

    #[test]
    fn test_typo_mutations() {
        let mut rng = StdRng::seed_from_u64(21);
        let word: Vec<char> = "keyboard".chars().collect();

        let swapped = transpose(&word, &mut rng);
        assert_eq!(swapped.chars().count(), 8);
        let mut a: Vec<char> = swapped.chars().collect();
        let mut b = word.clone();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);

        assert_eq!(drop_letter(&word, &mut rng).chars().count(), 7);
        assert_eq!(double_letter(&word, &mut rng).chars().count(), 9);
        assert_eq!(slip_key(&word, &mut rng).chars().count(), 8);

        let short: Vec<char> = "abc".chars().collect();
        assert_eq!(transpose(&short, &mut rng), "abc");
        assert_eq!(drop_letter(&short, &mut rng), "abc");
    }

    #[test]
    fn test_split_near_middle_without_break_word() {
        let text = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen";
        let (head, tail) = split_near_middle(text).unwrap();
        assert_eq!(head.split_whitespace().count(), 8);
        assert!(tail.starts_with("nine"));
    }
}
