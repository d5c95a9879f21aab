//! Read-only view of a game handed to display layers

use serde::{Deserialize, Serialize};

use super::{GameStatus, NormalizedHit, RoundOutcome};

/// Point-in-time copy of everything a scoreboard needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct GameSnapshot {
    pub score: u32,
    pub round_number: u32,
    pub total_rounds: u32,
    pub status: GameStatus,
    pub round_starting_score: u32,
    /// Throws of the open round, or of the round that just closed
    pub display_throws: Vec<NormalizedHit>,
    /// The most recent closed rounds, oldest first
    pub recent_history: Vec<RoundOutcome>,
    /// Count of every closed round, unaffected by the display window
    pub rounds_played: u32,
}

impl GameSnapshot {
    /// Points thrown in the darts currently on display.
    pub fn display_total(&self) -> u32 {
        self.display_throws.iter().map(|hit| hit.points).sum()
    }
}
