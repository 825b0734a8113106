// Humanizer Core Services
// Rewriting pipeline plus the collaborators it feeds: stats, config, remote backend, tracking and saved texts

pub mod achievements;
pub mod config_store;
pub mod humanizer;
pub mod prompts;
pub mod providers;
pub mod storage;
pub mod text_processor;
pub mod text_store;

pub use achievements::{AchievementTracker, FileAchievements, InMemoryAchievements};
pub use config_store::*;
pub use providers::*;
pub use text_processor::*;
pub use storage::StoreError;
pub use text_store::{InMemoryTextStore, JsonTextStore, TextStore};

// Re-export the pipeline entry points
pub use humanizer::{
    humanize,
    humanize_local,
    humanize_with_rng,
    HumanizeError,
    HumanizeLevel,
    Humanizer,
    RandomSource,
    TransformProfile,
    WritingStyle,
};
