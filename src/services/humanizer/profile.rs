// Humanize Level & Transform Profile
// The profile is derived once per call and threaded through every stage.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::HumanizeError;

/// Per-word typo rate used at level 4 and above, regardless of the profile's nominal rate.
pub const BOOSTED_TYPO_RATE: f64 = 0.05;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct HumanizeLevel(u8);

impl HumanizeLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: i64) -> Result<Self, HumanizeError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(HumanizeError::InvalidLevel(level))
        }
    }

    /// Clamp into `1..=5` instead of rejecting.
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = HumanizeLevel> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for HumanizeLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for HumanizeLevel {
    type Error = HumanizeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HumanizeLevel> for i64 {
    fn from(level: HumanizeLevel) -> Self {
        level.0 as i64
    }
}

impl fmt::Display for HumanizeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritingStyle {
    Casual,
    Scholarly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformProfile {
    pub level: HumanizeLevel,
    pub style: WritingStyle,
    pub synonym_chance: f64,
    pub contraction_chance: f64,
    pub combine_chance: f64,
    pub break_chance: f64,
    pub restructure_chance: f64,
    pub intro_chance: f64,
    pub typo_chance: f64,
}

impl TransformProfile {
    pub fn for_level(level: HumanizeLevel) -> Self {
        let l = level.get() as f64;
        match level.get() {
            5 => Self {
                level,
                style: WritingStyle::Scholarly,
                synonym_chance: 0.45,
                contraction_chance: 0.0,
                combine_chance: 0.15,
                break_chance: 0.0,
                restructure_chance: 0.35,
                intro_chance: 0.0,
                typo_chance: 0.02,
            },
            n => Self {
                level,
                style: WritingStyle::Casual,
                synonym_chance: (0.05 * l).min(0.25),
                contraction_chance: (0.1 * l).min(0.5),
                combine_chance: (0.02 * l).min(0.1),
                break_chance: (0.01 * l).min(0.05),
                restructure_chance: (0.03 * l).min(0.15),
                intro_chance: (0.01 * l).min(0.05),
                typo_chance: if n >= 4 { (0.005 * l).min(0.025) } else { 0.0 },
            },
        }
    }

    pub fn is_scholarly(&self) -> bool {
        self.style == WritingStyle::Scholarly
    }

    pub fn allows_contractions(&self) -> bool {
        self.contraction_chance > 0.0
    }

    /// Rate at which a long word enters the typo branch.
    pub fn word_typo_rate(&self) -> f64 {
        if self.level.get() >= 4 {
            BOOSTED_TYPO_RATE
        } else {
            self.typo_chance
        }
    }

    pub fn at_least(&self, level: u8) -> bool {
        self.level.get() >= level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_level_validation() {
        assert!(HumanizeLevel::new(0).is_err());
        assert!(HumanizeLevel::new(6).is_err());
        assert_eq!(HumanizeLevel::new(4).unwrap().get(), 4);
        assert_eq!(HumanizeLevel::clamped(-3).get(), 1);
        assert_eq!(HumanizeLevel::clamped(42).get(), 5);
        assert_eq!(HumanizeLevel::default().get(), 3);
        assert_eq!(HumanizeLevel::all().count(), 5);
    }

    #[test]
    fn test_level_serde_rejects_out_of_range() {
        let ok: HumanizeLevel = serde_json::from_str("2").unwrap();
        assert_eq!(ok.get(), 2);
        assert!(serde_json::from_str::<HumanizeLevel>("7").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "2");
    }

    #[test]
    fn test_casual_profile_scales_with_level() {
        let p1 = TransformProfile::for_level(HumanizeLevel::clamped(1));
        assert!(approx(p1.synonym_chance, 0.05));
        assert!(approx(p1.contraction_chance, 0.1));
        assert!(approx(p1.typo_chance, 0.0));
        assert!(approx(p1.word_typo_rate(), 0.0));
        assert!(!p1.is_scholarly());

        let p4 = TransformProfile::for_level(HumanizeLevel::clamped(4));
        assert!(approx(p4.synonym_chance, 0.2));
        assert!(approx(p4.contraction_chance, 0.4));
        assert!(approx(p4.combine_chance, 0.08));
        assert!(approx(p4.break_chance, 0.04));
        assert!(approx(p4.restructure_chance, 0.12));
        assert!(approx(p4.intro_chance, 0.04));
        assert!(approx(p4.typo_chance, 0.02));
        assert!(approx(p4.word_typo_rate(), BOOSTED_TYPO_RATE));
    }

    #[test]
    fn test_scholarly_profile() {
        let p5 = TransformProfile::for_level(HumanizeLevel::clamped(5));
        assert!(p5.is_scholarly());
        assert!(!p5.allows_contractions());
        assert!(approx(p5.synonym_chance, 0.45));
        assert!(approx(p5.break_chance, 0.0));
        assert!(approx(p5.intro_chance, 0.0));
        assert!(approx(p5.word_typo_rate(), BOOSTED_TYPO_RATE));
    }
}
