//! Named difficulty profiles
//!
//! Each profile bundles the tuning constants that decide how hard the button
//! is to catch. Exactly one profile is active at a time; switching profiles
//! affects subsequent evasion decisions only.

use serde::{Deserialize, Serialize};

/// Difficulty selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Tuning constants for this difficulty
    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Normal => &NORMAL,
            Difficulty::Hard => &HARD,
        }
    }
}

/// Tuning bundle for one difficulty level
#[derive(Debug, Clone, Serialize)]
pub struct DifficultyProfile {
    /// The button flees when the pointer gets closer than this (px)
    pub escape_distance: f32,
    /// Minimum time between flee responses (ms)
    pub escape_delay_ms: f64,
    /// Base launch speed of a flee (px/s); randomized upward per flee
    pub move_impulse: f32,
    /// Points awarded per capture
    pub score_value: u32,
    /// Confetti pieces a renderer should spawn on capture
    pub confetti_count: u32,
    /// Display name
    pub label: &'static str,
}

static EASY: DifficultyProfile = DifficultyProfile {
    escape_distance: 30.0,
    escape_delay_ms: 1400.0,
    move_impulse: 360.0,
    score_value: 1,
    confetti_count: 300,
    label: "Easy",
};

static NORMAL: DifficultyProfile = DifficultyProfile {
    escape_distance: 40.0,
    escape_delay_ms: 900.0,
    move_impulse: 505.0,
    score_value: 3,
    confetti_count: 500,
    label: "Normal",
};

static HARD: DifficultyProfile = DifficultyProfile {
    escape_distance: 55.0,
    escape_delay_ms: 450.0,
    move_impulse: 795.0,
    score_value: 5,
    confetti_count: 800,
    label: "Hard",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_scale_with_difficulty() {
        let easy = Difficulty::Easy.profile();
        let normal = Difficulty::Normal.profile();
        let hard = Difficulty::Hard.profile();

        assert!(easy.escape_distance < normal.escape_distance);
        assert!(normal.escape_distance < hard.escape_distance);
        // Harder profiles react faster and hit harder
        assert!(easy.escape_delay_ms > hard.escape_delay_ms);
        assert!(easy.move_impulse < hard.move_impulse);
        assert!(easy.score_value < hard.score_value);
    }

    #[test]
    fn test_from_str_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }
}
