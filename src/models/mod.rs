// Humanizer Data Models
// Serializable request, response and record types shared by the services and the CLI

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::services::humanizer::HumanizeLevel;

// ============ Humanize Request / Response ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeRequest {
    pub text: String,
    #[serde(default)]
    pub level: HumanizeLevel,
    #[serde(default)]
    pub use_remote: bool,
}

/// Which path produced the rewritten text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Local,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeResponse {
    pub original: String,
    pub humanized: String,
    pub level: HumanizeLevel,
    pub backend: Backend,
    pub statistics_before: TextStatistics,
    pub statistics_after: TextStatistics,
    /// Jaccard word overlap between input and output, 0–100.
    pub similarity: f64,
    pub elapsed_ms: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unlocked_achievements: Vec<Achievement>,
}

// ============ Text Statistics ============

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
}

// ============ Saved Texts ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedText {
    pub id: String,
    pub original_text: String,
    pub humanized_text: String,
    pub level: HumanizeLevel,
    /// RFC 3339
    pub created_at: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStoreStats {
    pub total_entries: usize,
    pub avg_level: f64,
    pub most_recent: Option<String>,
    pub total_words_processed: usize,
}

// ============ Achievements ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Secret,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    pub points: u32,
    pub unlocked: bool,
    pub date_unlocked: Option<String>,
    pub progress: u64,
    pub progress_max: u64,
}

impl Achievement {
    pub fn percent(&self) -> f64 {
        if self.progress_max == 0 {
            return 0.0;
        }
        self.progress as f64 / self.progress_max as f64 * 100.0
    }
}

/// User actions other than humanizing that count toward achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityEvent {
    FileUploaded,
    TextSaved,
    TextSearched,
    EasterEggFound,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStats {
    pub total_points: u32,
    pub unlocked: usize,
    pub total: usize,
    pub rank: String,
    pub next_rank_points: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankProgress {
    pub current_rank: String,
    pub progress_percent: f64,
    pub next_rank: Option<String>,
    pub points_needed: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: HumanizeRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(req.level.get(), 3);
        assert!(!req.use_remote);

        let req: HumanizeRequest =
            serde_json::from_str(r#"{"text": "hi", "level": 5, "useRemote": true}"#).unwrap();
        assert_eq!(req.level.get(), 5);
        assert!(req.use_remote);
    }

    #[test]
    fn test_request_rejects_bad_level() {
        assert!(serde_json::from_str::<HumanizeRequest>(r#"{"text": "hi", "level": 0}"#).is_err());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Backend::Remote).unwrap(), "\"remote\"");
        assert_eq!(serde_json::to_string(&ActivityEvent::TextSaved).unwrap(), "\"textSaved\"");
        let stats = TextStatistics::default();
        let value = serde_json::to_value(&stats).unwrap();
        assert!(value.get("avgSentenceLength").is_some());
    }
}
