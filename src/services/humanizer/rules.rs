// Rewrite Rules
// Regex rewrite tables and the small interpreter that applies them.

use regex::Regex;
use std::sync::OnceLock;

use super::random::RandomSource;

/// One pattern → replacement rewrite with an optional applicability guard.
#[derive(Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
    probability: f64,
    guard: Option<fn(&str) -> bool>,
}

impl RewriteRule {
    /// Rules are built from constant tables; an invalid pattern is a programming error.
    pub fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("rewrite rule regex"),
            replacement,
            probability: 1.0,
            guard: None,
        }
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn when(mut self, guard: fn(&str) -> bool) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn applies_to(&self, text: &str) -> bool {
        self.guard.map_or(true, |guard| guard(text)) && self.pattern.is_match(text)
    }

    /// Rewrite every match, unconditionally.
    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }

    /// Rewrite when the rule applies and its probability fires.
    pub fn try_apply<R: RandomSource + ?Sized>(&self, text: &str, rng: &mut R) -> Option<String> {
        if !self.applies_to(text) {
            return None;
        }
        if self.probability < 1.0 && !rng.chance(self.probability) {
            return None;
        }
        Some(self.apply(text))
    }
}

#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// Build a set of always-on rules from `(pattern, replacement)` pairs.
    pub fn from_pairs(pairs: &[(&str, &'static str)]) -> Self {
        Self::new(pairs.iter().map(|(p, r)| RewriteRule::new(p, *r)).collect())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Run every rule in order.
    pub fn apply_all<R: RandomSource + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            if let Some(rewritten) = rule.try_apply(&out, rng) {
                out = rewritten;
            }
        }
        out
    }

    /// Pick `times` rules uniformly (with replacement) and run each.
    pub fn apply_random<R: RandomSource + ?Sized>(&self, text: &str, times: usize, rng: &mut R) -> String {
        let mut out = text.to_string();
        for _ in 0..times {
            let Some(rule) = rng.choose(&self.rules) else {
                break;
            };
            if let Some(rewritten) = rule.try_apply(&out, rng) {
                out = rewritten;
            }
        }
        out
    }
}

/// Casual restructuring: swaps the subject and agent around a `was ... by` passive.
pub fn passive_to_active() -> &'static RewriteRule {
    static RULE: OnceLock<RewriteRule> = OnceLock::new();
    RULE.get_or_init(|| {
        RewriteRule::new(
            r"(?i)(\w+) (is|are|was|were) ([a-z]+ed|[a-z]+en) by (\w+)",
            "${4} ${2} ${3} ${1}",
        )
    })
}

/// Scholarly restructuring into a passive frame.
pub fn active_to_passive() -> &'static RewriteRule {
    static RULE: OnceLock<RewriteRule> = OnceLock::new();
    RULE.get_or_init(|| {
        RewriteRule::new(r"(?i)(\w+) ([\w\s]+) (\w+)", "${3} is ${2} by ${1}").with_probability(0.4)
    })
}

/// Plain → elevated vocabulary, one or two drawn per restructured sentence at level 5.
pub fn scholarly_vocabulary() -> &'static RuleSet {
    static SET: OnceLock<RuleSet> = OnceLock::new();
    SET.get_or_init(|| {
        RuleSet::from_pairs(&[
            (r"\b(crosses|crossing)\b", "serves as a bridge across"),
            (r"\b(power|powerful)\b", "extraordinary power"),
            (r"\b(used for|used to)\b", "called upon to"),
            (r"\b(start|begin|initiate)\b", "initiate"),
            (r"\b(show|express|demonstrate)\b", "express"),
            (r"\b(makes|creates|builds)\b", "creates"),
            (r"\b(relationships|connections)\b", "human connections"),
            (r"\b(represents|stands for|means)\b", "sums up"),
            (r"\b(brief|quick|short)\b", "fleeting"),
            (r"\b(informal|casual)\b", "casual"),
            (r"\b(meeting|encounter|interaction)\b", "encounter"),
            (r"\b(significant|important|meaningful)\b", "momentous"),
            (r"\b(can|could)\b", "possesses the capacity to"),
            (r"\b(shows|demonstrates)\b", "serves as an indication of"),
            (r"\b(proves|confirms)\b", "provides substantiation for"),
            (r"\bgood\b", "efficacious"),
            (r"\bbad\b", "deleterious"),
            (r"\bbig\b", "substantial"),
            (r"\bhelp\b", "facilitate"),
            (r"\bmake\b", "engender"),
            (r"\bfind\b", "ascertain"),
            (r"\bwant\b", "desire"),
            (r"\bneed\b", "necessitate"),
            (r"\buse\b", "employ"),
            (r"\btell\b", "communicate"),
            (r"\bget\b", "acquire"),
            (r"\bsee\b", "observe"),
            (r"\bknow\b", "recognize"),
            (r"\bthink\b", "contemplate"),
            (r"\bask\b", "inquire"),
            (r"\banswer\b", "respond"),
        ])
    })
}

/// Applied in full to one interior sentence of a level-5 document.
pub fn formal_vocabulary() -> &'static RuleSet {
    static SET: OnceLock<RuleSet> = OnceLock::new();
    SET.get_or_init(|| {
        RuleSet::from_pairs(&[
            (r"\b(can|could)\b", "is capable of"),
            (r"\b(show|shows|showing)\b", "demonstrate"),
            (r"\bbig\b", "substantial"),
            (r"\bgood\b", "exceptional"),
            (r"\bhelps\b", "facilitates"),
            (r"\buse\b", "utilize"),
            (r"\bfind out\b", "ascertain"),
            (r"\bfixed\b", "rectified"),
        ])
    })
}

pub fn punctuation_noise() -> &'static RuleSet {
    static SET: OnceLock<RuleSet> = OnceLock::new();
    SET.get_or_init(|| {
        RuleSet::from_pairs(&[
            // double space after a full stop
            (r"\. ([A-Z])", ".  ${1}"),
            (r",([a-zA-Z])", ", ${1}"),
            (r" ([.,;:!?])", "${1}"),
            (r"([.,;:!?])([A-Za-z])", "${1} ${2}"),
            (r", (however|nevertheless|therefore|thus)", "; ${1}"),
            // comma splice
            (r"(\w+)\. ([a-z])", "${1}, ${2}"),
        ])
    })
}

pub fn article_errors() -> &'static RuleSet {
    static SET: OnceLock<RuleSet> = OnceLock::new();
    SET.get_or_init(|| {
        RuleSet::from_pairs(&[
            (r"\b(to|in|at|from|by) (same|most|best|highest|lowest|majority)\b", "${1} the ${2}"),
            (r"\b(to|in|at|from|by) the (school|college|university|work|home)\b", "${1} ${2}"),
            (r"\ban ([bcdfghjklmnpqrstvwxz]\w+)\b", "a ${1}"),
            (r"\ba ([aeiou]\w+)\b", "an ${1}"),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_passive_to_active() {
        let rule = passive_to_active();
        assert!(rule.applies_to("The report was written by Alice"));
        assert_eq!(
            rule.apply("The report was written by Alice"),
            "The Alice was written report"
        );
    }

    #[test]
    fn test_guard_blocks_rule() {
        let rule = RewriteRule::new(r"\bbig\b", "large").when(|s| s.len() > 20);
        assert!(!rule.applies_to("a big dog"));
        assert!(rule.applies_to("a big dog in a very long sentence"));
    }

    #[test]
    fn test_probability_zero_never_applies() {
        let mut rng = StdRng::seed_from_u64(5);
        let rule = RewriteRule::new("cat", "dog").with_probability(0.0);
        for _ in 0..50 {
            assert!(rule.try_apply("cat", &mut rng).is_none());
        }
    }

    #[test]
    fn test_apply_all_runs_in_order() {
        let mut rng = StdRng::seed_from_u64(9);
        let out = formal_vocabulary().apply_all("You can use a big tool and find out.", &mut rng);
        assert_eq!(out, "You is capable of utilize a substantial tool and ascertain.");
    }

    #[test]
    fn test_apply_random_on_empty_set() {
        let mut rng = StdRng::seed_from_u64(2);
        let empty = RuleSet::default();
        assert!(empty.is_empty());
        assert_eq!(empty.apply_random("unchanged", 3, &mut rng), "unchanged");
    }

    #[test]
    fn test_article_error_rules() {
        let rules = article_errors().rules();
        assert_eq!(rules[0].apply("she went to same place"), "she went to the same place");
        assert_eq!(rules[1].apply("back to the school"), "back to school");
        assert_eq!(rules[2].apply("an book"), "a book");
        assert_eq!(rules[3].apply("a apple"), "an apple");
    }

    #[test]
    fn test_punctuation_noise_rules() {
        let rules = punctuation_noise().rules();
        assert_eq!(rules[0].apply("Done. Next"), "Done.  Next");
        assert_eq!(rules[2].apply("wait !"), "wait!");
        assert_eq!(rules[4].apply("fine, however it"), "fine; however it");
        assert_eq!(rules[5].apply("ends. and"), "ends, and");
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(scholarly_vocabulary().len(), 31);
        assert_eq!(formal_vocabulary().len(), 8);
        assert_eq!(punctuation_noise().len(), 6);
        assert_eq!(article_errors().len(), 4);
    }
}
