//! Mutable game state owned by the round engine

use crate::types::{GameStatus, NormalizedHit, RoundOutcome};

/// Root state of one game.
///
/// Only [`RoundEngine`](super::RoundEngine) mutates it; everything here is
/// read-only from the outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(super) score: u32,
    pub(super) round_starting_score: u32,
    pub(super) current_round_throws: Vec<NormalizedHit>,
    /// Throws of the round that last closed, kept for display
    pub(super) display_throws: Vec<NormalizedHit>,
    pub(super) round_number: u32,
    pub(super) history: Vec<RoundOutcome>,
    pub(super) status: GameStatus,
}

impl GameState {
    pub(super) fn new(start_score: u32) -> Self {
        Self {
            score: start_score,
            round_starting_score: start_score,
            current_round_throws: Vec::with_capacity(3),
            display_throws: Vec::new(),
            round_number: 1,
            history: Vec::new(),
            status: GameStatus::Playing,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score at the first dart of the open round; a bust restores it.
    pub fn round_starting_score(&self) -> u32 {
        self.round_starting_score
    }

    /// Darts committed in the open round.
    pub fn current_round_throws(&self) -> &[NormalizedHit] {
        &self.current_round_throws
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Every closed round, oldest first.
    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The open round's darts while playing, otherwise the darts of the
    /// round that just closed.
    pub fn display_throws(&self) -> &[NormalizedHit] {
        match self.status {
            GameStatus::Playing => &self.current_round_throws,
            GameStatus::AwaitingNextRound | GameStatus::Finished => &self.display_throws,
        }
    }

    /// Points committed in the open round.
    pub fn current_round_points(&self) -> u32 {
        self.current_round_throws.iter().map(|hit| hit.points).sum()
    }
}
