//! Classified hits and per-round outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SegmentCategory;

/// A dart after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct NormalizedHit {
    pub points: u32,
    pub qualifies_as_out: bool,
    pub category: SegmentCategory,
    pub display_name: String,
}

/// Outcome of one closed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum RoundOutcome {
    /// Points taken off the score during the round
    Scored(u32),
    Bust,
}

impl RoundOutcome {
    /// Points this round removed from the score, zero for a bust.
    pub fn points(self) -> u32 {
        match self {
            RoundOutcome::Scored(points) => points,
            RoundOutcome::Bust => 0,
        }
    }

    pub fn is_bust(self) -> bool {
        matches!(self, RoundOutcome::Bust)
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::Scored(points) => write!(f, "{points}"),
            RoundOutcome::Bust => f.write_str("BUST"),
        }
    }
}

/// Where the game is in its round cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum GameStatus {
    #[default]
    Playing,
    /// A round just closed; its throws stay visible until the next dart
    AwaitingNextRound,
    /// Checked out. Only a game reset leaves this state
    Finished,
}
