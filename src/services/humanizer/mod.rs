// Humanizer Module
// Level-driven rewriting pipeline organized into stages:
// - tokenizer: sentence and word splitting
// - sentence_transformer: per-sentence rewrites (synonyms, hedges, combines, typos)
// - assembler: joins sentences and adds document-level touches
// - anti_detection: grammar noise, glyph disguises and invisible marks
// - pipeline: wires the stages together and fronts the remote backend

pub mod anti_detection;
pub mod assembler;
pub mod error;
pub mod glyphs;
pub mod lexicon;
pub mod phrases;
pub mod pipeline;
pub mod profile;
pub mod random;
pub mod rules;
pub mod sentence_transformer;
pub mod tokenizer;

pub use error::HumanizeError;
pub use pipeline::{humanize, humanize_local, humanize_with_rng, Humanizer};
pub use profile::{HumanizeLevel, TransformProfile, WritingStyle};
pub use random::RandomSource;
pub use sentence_transformer::TransformStats;
