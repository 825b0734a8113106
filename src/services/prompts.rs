// Remote Rewrite Prompts
// Level-specific instructions sent ahead of the text to the remote backend.

use super::humanizer::HumanizeLevel;

const LEVEL_1: &str = r#"Slightly reword this AI-generated text so it reads as human-written, keeping the meaning and most of the original wording.

Guidelines:
- Replace a few overly formal phrases with more casual equivalents
- Use some contractions (it's, don't, I'm)
- Keep the same paragraph structure and flow
- Keep about 90% of the original vocabulary
- Preserve every fact exactly as presented"#;

const LEVEL_2: &str = r#"Reword this AI-generated text so it reads as human-written, preserving the meaning.

Guidelines:
- Simplify overly complex sentence structures
- Use more contractions and everyday language
- Vary sentence beginnings
- Replace about 20% of the vocabulary with synonyms
- Add some casual transitions between thoughts
- Keep the same basic paragraph organization"#;

const LEVEL_3: &str = r#"Transform this AI-generated text so it sounds natural and human-written. Make it less formal and more conversational.

Guidelines:
- Vary sentence structures
- Use contractions liberally (aren't, don't, it'll)
- Add some filler phrases (you know, actually, basically)
- Use occasional sentence fragments for effect
- Include parenthetical thoughts or asides
- Add perspective phrases (I think, in my view)
- Replace formal vocabulary with everyday alternatives
- Mix short sentences with longer ones"#;

const LEVEL_4: &str = r#"Thoroughly rewrite this AI-generated text so it reads as if a real person wrote it, with natural language patterns, occasional errors and varied sentence structures.

Guidelines:
- Include mild imperfections such as incomplete revisions and self-corrections
- Add personal perspective and intuitive reasoning
- Insert occasional tangents or asides in parentheses
- Use em dashes for emphasis or interruptions
- Include some casual, informal vocabulary
- Add filler words (like, sort of, kind of, you know)
- Make some sentences long and loose while others are very short
- Include 1-2 typos or missing words that keep the text readable
- Start some sentences with conjunctions (And, But, So)
- Address the reader directly now and then"#;

const LEVEL_5: &str = r#"Rewrite this text as scholarly human prose with elevated diction, formal constructions and sophisticated vocabulary, keeping the natural rhythm and subtle imperfections of authentic academic writing.

Guidelines:
- Replace simple words with more precise, sophisticated alternatives
- Convert common verbs to more specific, formal equivalents
- Replace phrasal verbs with single-word equivalents ("look into" becomes "investigate")
- Use parallelism and balanced sentence structures
- Employ periodic sentences occasionally
- Prefer terms of Latin or Greek origin
- Use formal connectives (moreover, consequently, notwithstanding)
- Avoid contractions entirely
- Include occasional parenthetical clarifications
- Add subtle metadiscourse markers ("as previously articulated")
- Use scholarly hedging ("it would appear that")
- Include an occasional sophisticated typo in a longer word
- Insert one or two subtle punctuation or spacing slips
- Vary sentence lengths, mixing short declaratives with longer, complex sentences"#;

pub fn level_instruction(level: HumanizeLevel) -> &'static str {
    match level.get() {
        1 => LEVEL_1,
        2 => LEVEL_2,
        4 => LEVEL_4,
        5 => LEVEL_5,
        _ => LEVEL_3,
    }
}

/// Instruction, a blank line, then the text.
pub fn build_prompt(text: &str, level: HumanizeLevel) -> String {
    format!("{}\n\n{}", level_instruction(level), text)
}

/// Sampling temperature grows with the level and is capped at `cap`.
pub fn temperature_for(level: HumanizeLevel, cap: f64) -> f64 {
    (0.7 + 0.15 * level.get() as f64).min(cap)
}
