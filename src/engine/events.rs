//! Engine events and the sinks that receive them

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::types::NormalizedHit;

/// Why a dart voided its round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum BustReason {
    /// The dart took the score below zero
    Overshoot,
    /// The dart left 1, which cannot be checked out
    LeftOnOne,
    /// The dart reached zero without a double, treble or bull
    NoQualifyingOut,
}

/// Something the round engine did, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum EngineEvent {
    /// A dart was scored
    Hit { hit: NormalizedHit, remaining: u32 },
    /// A dart voided the round
    Bust { hit: NormalizedHit, reason: BustReason, restored_score: u32 },
    /// Third dart closed the round
    RoundComplete { round: u32, points: u32 },
    /// The score reached zero on a qualifying out
    GameWon { round: u32 },
    /// The operator closed the round before three darts
    RoundEndedManually { round: u32, points: u32 },
    /// Manual end with no darts thrown
    NothingToEnd { round: u32 },
    /// The board's reset button undid the open round
    RoundReset { score: u32 },
    /// A fresh game started
    GameReset { start_score: u32 },
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineEvent::Hit { hit, remaining } => {
                write!(f, "Hit {} ({} points), {} remaining", hit.display_name, hit.points, remaining)
            }
            EngineEvent::Bust { hit, reason, restored_score } => match reason {
                BustReason::Overshoot | BustReason::LeftOnOne => write!(
                    f,
                    "Bust on {}: score would drop below 2, back to {}",
                    hit.display_name, restored_score
                ),
                BustReason::NoQualifyingOut => write!(
                    f,
                    "Bust on {}: must finish on a double, treble or bull, back to {}",
                    hit.display_name, restored_score
                ),
            },
            EngineEvent::RoundComplete { round, points } => {
                write!(f, "Round {round} complete (3 darts, {points} points)")
            }
            EngineEvent::GameWon { round } => write!(f, "Game won in round {round}"),
            EngineEvent::RoundEndedManually { round, points } => {
                write!(f, "Round {round} ended manually ({points} points)")
            }
            EngineEvent::NothingToEnd { round } => {
                write!(f, "End of round {round} requested, no darts thrown")
            }
            EngineEvent::RoundReset { score } => write!(f, "Round reset, score back to {score}"),
            EngineEvent::GameReset { start_score } => write!(f, "New game from {start_score}"),
        }
    }
}

/// Receives every event the engine emits.
///
/// Closures taking an [`EngineEvent`] are sinks too:
///
/// ```rust
/// use oche::{EngineEvent, GameConfig, RoundEngine};
///
/// let engine =
///     RoundEngine::with_sink(GameConfig::default(), |event: EngineEvent| println!("{event}"))
///         .unwrap();
/// assert_eq!(engine.score(), 501);
/// ```
pub trait EventSink: Send {
    fn record(&mut self, event: EngineEvent);
}

impl<F> EventSink for F
where
    F: FnMut(EngineEvent) + Send,
{
    fn record(&mut self, event: EngineEvent) {
        self(event)
    }
}

/// Default sink: one `info` line per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: EngineEvent) {
        info!(target: "oche::engine", "{}", event);
    }
}

/// Bounded, cloneable buffer of the newest events.
///
/// Clones share the buffer, so a display can keep one handle while the
/// engine owns another.
#[derive(Debug, Clone)]
pub struct RecentEvents {
    inner: Arc<Mutex<VecDeque<EngineEvent>>>,
    capacity: usize,
}

impl Default for RecentEvents {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl RecentEvents {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))), capacity }
    }

    /// Buffered events, newest first.
    pub fn events(&self) -> Vec<EngineEvent> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).iter().cloned().collect()
    }

    /// Buffered events rendered as log lines, newest first.
    pub fn lines(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl EventSink for RecentEvents {
    fn record(&mut self, event: EngineEvent) {
        let mut events = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        events.push_front(event);
        events.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentCategory;

    fn hit(points: u32) -> NormalizedHit {
        NormalizedHit {
            points,
            qualifies_as_out: false,
            category: SegmentCategory::Outer,
            display_name: format!("Outer {points}"),
        }
    }

    #[test]
    fn recent_events_keep_newest_first_and_bounded() {
        let mut recent = RecentEvents::new(2);
        let handle = recent.clone();

        recent.record(EngineEvent::GameReset { start_score: 501 });
        recent.record(EngineEvent::Hit { hit: hit(20), remaining: 481 });
        recent.record(EngineEvent::Hit { hit: hit(5), remaining: 476 });

        assert_eq!(handle.len(), 2);
        let events = handle.events();
        assert!(matches!(events[0], EngineEvent::Hit { remaining: 476, .. }));
        assert!(matches!(events[1], EngineEvent::Hit { remaining: 481, .. }));
    }

    #[test]
    fn bust_messages_distinguish_the_non_qualifying_finish() {
        let overshoot =
            EngineEvent::Bust { hit: hit(20), reason: BustReason::Overshoot, restored_score: 10 };
        let on_one =
            EngineEvent::Bust { hit: hit(9), reason: BustReason::LeftOnOne, restored_score: 10 };
        let no_out = EngineEvent::Bust {
            hit: hit(10),
            reason: BustReason::NoQualifyingOut,
            restored_score: 10,
        };

        assert_eq!(
            overshoot.to_string().replace("Outer 20", "X"),
            on_one.to_string().replace("Outer 9", "X")
        );
        assert_ne!(overshoot.to_string(), no_out.to_string());
        assert!(no_out.to_string().contains("double"));
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |event: EngineEvent| seen.push(event);
            sink.record(EngineEvent::NothingToEnd { round: 1 });
        }
        assert_eq!(seen, vec![EngineEvent::NothingToEnd { round: 1 }]);
    }
}
