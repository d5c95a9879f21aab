//! Round engine: the scoring state machine for one game of 501.
//!
//! The engine owns a [`GameState`] and applies darts to it one at a time.
//! Every dart either commits (score goes down), busts (the round's score
//! change is voided) or is ignored because the game is already won.
//!
//! ```text
//! Playing --(bust)--------------------> AwaitingNextRound
//! Playing --(3rd dart)----------------> AwaitingNextRound
//! Playing --(manual end, darts > 0)---> AwaitingNextRound
//! Playing --(qualifying zero)---------> Finished
//! AwaitingNextRound --(next dart)-----> Playing, dart evaluated at once
//! AwaitingNextRound --(reset button)--> Playing, same round
//! any --(reset_game)------------------> Playing, fresh state
//! ```
//!
//! Bust rules, checked against the score the dart would leave:
//! below zero, exactly one, or zero on anything but a double, treble or bull.
//!
//! The engine does no I/O and never blocks. Callers sharing it across
//! threads must serialize access; [`GameSession`](crate::GameSession) does
//! this with a single mutex.

mod events;
mod state;

pub use events::{BustReason, EngineEvent, EventSink, RecentEvents, TracingSink};
pub use state::GameState;

use std::fmt;
use tracing::{debug, trace};

use crate::classifier;
use crate::config::GameConfig;
use crate::types::{GameSnapshot, GameStatus, NormalizedHit, RoundOutcome, Segment};
use crate::{Result, ScoringError};

/// Darts in a full round
pub const DARTS_PER_ROUND: usize = 3;

/// The authoritative state machine over one [`GameState`].
pub struct RoundEngine {
    config: GameConfig,
    state: GameState,
    sink: Box<dyn EventSink>,
}

impl fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl RoundEngine {
    /// Create an engine that logs events through `tracing`.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_sink(config, TracingSink)
    }

    /// Create an engine that reports events to `sink`.
    pub fn with_sink(config: GameConfig, sink: impl EventSink + 'static) -> Result<Self> {
        config.validate()?;
        let state = GameState::new(config.start_score);
        Ok(Self { config, state, sink: Box::new(sink) })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn round_number(&self) -> u32 {
        self.state.round_number
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn round_starting_score(&self) -> u32 {
        self.state.round_starting_score
    }

    /// Every closed round, oldest first. Never truncated.
    pub fn history(&self) -> &[RoundOutcome] {
        &self.state.history
    }

    /// The last `history_window` closed rounds, oldest first.
    pub fn recent_history(&self) -> &[RoundOutcome] {
        let history = &self.state.history;
        &history[history.len().saturating_sub(self.config.history_window)..]
    }

    /// Darts committed in the open round.
    pub fn current_round_throws(&self) -> &[NormalizedHit] {
        self.state.current_round_throws()
    }

    /// Darts a scoreboard should show right now.
    ///
    /// While a round is open these are its darts. After a round closes they
    /// are the closed round's darts until the next dart or a reset arrives.
    pub fn current_display_throws(&self) -> &[NormalizedHit] {
        self.state.display_throws()
    }

    /// Whether every configured round has been played.
    pub fn rounds_exhausted(&self) -> bool {
        self.state.history.len() >= self.config.total_rounds as usize
    }

    /// Copy of the state for display layers.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            score: self.state.score,
            round_number: self.state.round_number,
            total_rounds: self.config.total_rounds,
            status: self.state.status,
            round_starting_score: self.state.round_starting_score,
            display_throws: self.current_display_throws().to_vec(),
            recent_history: self.recent_history().to_vec(),
            rounds_played: self.state.history.len() as u32,
        }
    }

    /// Apply one board event: a dart or the reset button.
    pub fn process_hit(&mut self, segment: &Segment) {
        if self.state.status == GameStatus::Finished {
            debug!(segment = %segment.display_name, "Game finished, ignoring hit");
            return;
        }

        if segment.is_reset() {
            self.reset_round();
            return;
        }

        let hit = classifier::normalize(segment);

        if self.state.status == GameStatus::AwaitingNextRound {
            // First dart of a new round replaces the closed round's display
            self.state.display_throws.clear();
            self.state.current_round_throws.clear();
            self.state.status = GameStatus::Playing;
        }

        if self.state.current_round_throws.is_empty() {
            self.state.round_starting_score = self.state.score;
        }

        let tentative = match self.state.score.checked_sub(hit.points) {
            None => return self.bust(hit, BustReason::Overshoot),
            Some(1) => return self.bust(hit, BustReason::LeftOnOne),
            Some(0) if !hit.qualifies_as_out => return self.bust(hit, BustReason::NoQualifyingOut),
            Some(remaining) => remaining,
        };

        self.state.score = tentative;
        self.state.current_round_throws.push(hit.clone());
        trace!(
            points = hit.points,
            score = tentative,
            darts = self.state.current_round_throws.len(),
            round = self.state.round_number,
            "Dart committed"
        );
        self.emit(EngineEvent::Hit { hit, remaining: tentative });

        if self.state.score == 0 {
            self.close_round(true);
        } else if self.state.current_round_throws.len() == DARTS_PER_ROUND {
            self.close_round(false);
        }
    }

    /// Close the open round before its third dart.
    ///
    /// Only acts while a round is being played; with no darts thrown it
    /// just logs the request.
    pub fn end_round_manually(&mut self) {
        if self.state.status != GameStatus::Playing {
            debug!(status = ?self.state.status, "No open round to end");
            return;
        }

        let round = self.state.round_number;
        if self.state.current_round_throws.is_empty() {
            self.emit(EngineEvent::NothingToEnd { round });
            return;
        }

        let points = self.state.current_round_points();
        self.state.history.push(RoundOutcome::Scored(points));
        self.state.display_throws = std::mem::take(&mut self.state.current_round_throws);
        self.state.round_starting_score = self.state.score;
        self.advance_round();
        self.state.status = GameStatus::AwaitingNextRound;
        self.emit(EngineEvent::RoundEndedManually { round, points });
    }

    /// Start a fresh game from `start_score`.
    pub fn reset_game(&mut self, start_score: u32) -> Result<()> {
        if start_score <= 1 {
            return Err(ScoringError::InvalidStartScore { start_score });
        }
        self.state = GameState::new(start_score);
        self.emit(EngineEvent::GameReset { start_score });
        Ok(())
    }

    /// Start a fresh game from the configured start score.
    pub fn new_game(&mut self) {
        self.state = GameState::new(self.config.start_score);
        self.emit(EngineEvent::GameReset { start_score: self.config.start_score });
    }

    /// Undo the open round's darts. Closed rounds are untouched.
    fn reset_round(&mut self) {
        self.state.score = self.state.round_starting_score;
        self.state.current_round_throws.clear();
        self.state.display_throws.clear();
        self.state.status = GameStatus::Playing;
        self.emit(EngineEvent::RoundReset { score: self.state.score });
    }

    fn bust(&mut self, hit: NormalizedHit, reason: BustReason) {
        let restored_score = self.state.round_starting_score;

        let mut shown = std::mem::take(&mut self.state.current_round_throws);
        shown.push(hit.clone());
        self.state.display_throws = shown;

        self.state.score = restored_score;
        self.state.history.push(RoundOutcome::Bust);
        self.advance_round();
        self.state.status = GameStatus::AwaitingNextRound;
        self.emit(EngineEvent::Bust { hit, reason, restored_score });
    }

    fn close_round(&mut self, won: bool) {
        let round = self.state.round_number;
        let points = self.state.current_round_points();

        self.state.history.push(RoundOutcome::Scored(points));
        self.state.display_throws = std::mem::take(&mut self.state.current_round_throws);
        self.state.round_starting_score = self.state.score;

        if won {
            // The winning round keeps its number: history.len() == round_number
            self.state.status = GameStatus::Finished;
            self.emit(EngineEvent::GameWon { round });
        } else {
            self.advance_round();
            self.state.status = GameStatus::AwaitingNextRound;
            self.emit(EngineEvent::RoundComplete { round, points });
        }
    }

    fn advance_round(&mut self) {
        self.state.round_number = (self.state.round_number + 1).min(self.config.total_rounds);
    }

    fn emit(&mut self, event: EngineEvent) {
        self.sink.record(event);
    }
}
