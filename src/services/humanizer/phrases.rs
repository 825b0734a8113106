// Phrase Banks
// Fixed word lists drawn on by the transformer, assembler and post-processor.

/// Casual openers prepended to the first sentence at levels 4 and 5.
pub const INTRO_PHRASES: &[&str] = &[
    "So here's the thing - ",
    "Look, ",
    "I've been thinking about this, and ",
    "You know what? ",
    "Here's my take on it: ",
    "Let me put it this way: ",
    "I was just reflecting on this and ",
    "Consider this for a moment: ",
];

pub const HEDGE_PHRASES: &[&str] = &[
    "It would appear that ",
    "The evidence suggests that ",
    "One might posit that ",
    "The data indicate that ",
    "It seems reasonable to suggest that ",
    "Preliminary findings suggest that ",
    "Current scholarship indicates that ",
    "The literature broadly affirms that ",
];

/// Sentence starts that already carry a hedge of their own.
pub const HEDGE_BLOCKING_STARTS: &[&str] = &["It is ", "There is", "This ", "These ", "Those "];

pub const METADISCOURSE: &[&str] = &[
    "As noted herein, ",
    "As previously articulated, ",
    "As this analysis demonstrates, ",
    "In this context, it is worth noting that ",
    "It is important to emphasize that ",
    "To reiterate the central thesis, ",
];

/// Each replaces a single comma, so each starts and ends with one.
pub const DIGRESSIONS: &[&str] = &[
    ", albeit with certain limitations,",
    ", though not without qualification,",
    ", notwithstanding alternative interpretations,",
    ", with the caveat that further research is warranted,",
];

pub const QUALIFIERS: &[&str] = &[
    ", provided that certain conditions are met,",
    ", assuming the validity of the underlying assumptions,",
    ", contingent upon methodological rigor,",
    ", insofar as the data permits such an interpretation,",
];

pub const SCHOLARLY_OPENERS: &[(&str, &[&str])] = &[
    ("It is", &["It is evident that", "It has been demonstrated that", "It becomes apparent that", "It is noteworthy that", "Research indicates that", "Evidence suggests that"]),
    ("There is", &["There exists", "One observes", "It is observable that", "Analysis reveals", "The data indicate", "Examination reveals"]),
    ("There are", &["There exist", "Multiple instances demonstrate", "Various examples illustrate", "Several cases indicate", "Numerous accounts confirm"]),
    ("This is", &["This phenomenon represents", "This observation illustrates", "This example demonstrates", "This instance exemplifies", "This case substantiates"]),
];

pub const CASUAL_OPENERS: &[(&str, &[&str])] = &[
    ("It is", &["I think", "I believe", "In my opinion", "I'd say", "From what I can tell"]),
    ("There is", &["I've found", "I see", "You'll notice", "We have", "We can see"]),
    ("There are", &["I've noticed", "I can see", "You can find", "We've got", "Let's look at"]),
    ("This is", &["I find this", "This seems", "It looks like", "To me, this is", "This appears to be"]),
];

pub const FORMAL_CONNECTORS: &[&str] = &[
    "; moreover, ", "; furthermore, ", "; consequently, ",
    "; nonetheless, ", "; accordingly, ", "; conversely, ",
    "; wherein ", ", whereby ", ", thus ", ", notwithstanding ",
    ", heretofore ", "; henceforth, ", ", wherein ",
];

pub const CASUAL_CONNECTORS: &[&str] = &[
    ", and ", "; ", ", while ", ", which ", ", though ", ", yet ",
    " - ", ", but ", ", even though ", ", since ", ", because ",
];

/// Words after which a long sentence may be broken in two.
pub const BREAK_CONJUNCTIONS: &[&str] = &["and", "but", "or", "so", "because", "although"];

pub const FILLERS: &[&str] = &[
    "actually", "basically", "like", "you know", "I mean", "sort of", "kind of",
    "honestly", "frankly", "seriously", "literally", "practically", "pretty much",
    "more or less", "in fact", "obviously", "clearly", "of course", "needless to say",
    "in my opinion", "from my perspective", "as I see it", "for what it's worth",
    "as far as I can tell", "if you ask me", "personally speaking", "truth be told",
];

pub const SELF_CORRECTIONS: &[&str] = &[
    "I mean", "wait", "or rather", "actually", "no, scratch that",
    "let me rephrase", "to be more precise", "correction", "sorry, I meant",
];

pub const SCHOLARLY_MARKERS: &[&str] = &[
    "It is evident that", "One may observe that", "It is worth noting that",
    "Upon examination", "Analysis reveals that", "It becomes apparent that",
    "Research indicates that", "Evidence suggests that", "It is noteworthy that",
    "It stands to reason that", "We may deduce that", "The literature demonstrates that",
    "Historical precedent shows that", "Contemporary scholarship suggests that",
    "As demonstrated in prior studies", "In accordance with established principles",
];

pub const ARTICLES: &[&str] = &["the", "a", "an"];

pub const PREPOSITIONS: &[&str] = &["for", "to", "in", "of", "with", "on", "at", "from", "by"];

/// Short function-word patterns; an invisible mark goes after the leading space.
pub const FUNCTION_WORD_PATTERNS: &[&str] = &[" the ", " and ", " to ", " of ", " in ", " is ", " that "];

/// Frequent short words whose letters are candidates for homoglyph swaps.
pub const HIGH_FREQUENCY_WORDS: &[&str] = &[
    "the", "and", "that", "have", "for", "not", "with", "you", "this", "but",
];

/// Note a writer leaves after catching their own typo.
pub fn correction_note(template: usize, typo: &str, correct: &str) -> String {
    match template % 5 {
        0 => format!("(sorry, not '{typo}' but '{correct}')"),
        1 => format!("(I meant '{correct}', not '{typo}')"),
        2 => format!("('{correct}' is the correct spelling, not '{typo}')"),
        3 => format!("(oops, '{correct}')"),
        _ => format!("(correction: '{correct}')"),
    }
}

pub const CORRECTION_NOTE_TEMPLATES: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digressions_replace_a_single_comma() {
        for phrase in DIGRESSIONS.iter().chain(QUALIFIERS) {
            assert!(phrase.starts_with(','));
            assert!(phrase.ends_with(','));
        }
    }

    #[test]
    fn test_formal_connectors_avoid_contractions() {
        assert!(FORMAL_CONNECTORS.iter().all(|c| !c.contains('\'')));
        assert!(SCHOLARLY_MARKERS.iter().all(|c| !c.contains('\'')));
    }

    #[test]
    fn test_correction_notes() {
        assert_eq!(correction_note(3, "teh", "the"), "(oops, 'the')");
        assert_eq!(
            correction_note(1, "wierd", "weird"),
            "(I meant 'weird', not 'wierd')"
        );
        assert_eq!(correction_note(CORRECTION_NOTE_TEMPLATES, "a", "b"), correction_note(0, "a", "b"));
    }
}
