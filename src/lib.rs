//! Scoring engine for single-player 501 darts on a connected board.
//!
//! Oche turns the hits a smart dartboard reports into a game of 501: each
//! dart is classified, applied against the rules for busts and checkouts,
//! and the resulting state is published to whatever is displaying it.
//!
//! # Features
//!
//! - **Round engine**: three-dart rounds, bust rollback, double/treble/bull outs
//! - **Board decoding**: the board's payload table and a recording format
//! - **Sessions**: a hit source driving the engine on a background task
//! - **Streams**: snapshot and event streams with optional throttling
//!
//! # Quick Start
//!
//! The engine works on its own, without a runtime:
//!
//! ```rust
//! use oche::{GameConfig, GameStatus, RoundEngine, SegmentId};
//!
//! let mut engine = RoundEngine::new(GameConfig::default().with_start_score(40)).unwrap();
//! engine.process_hit(&SegmentId::Double(20).segment().unwrap());
//! assert_eq!(engine.status(), GameStatus::Finished);
//! ```
//!
//! ## Example (session replay)
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use oche::{GameConfig, Oche, UpdateRate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Oche::replay("practice.txt", GameConfig::default())?;
//!     let mut updates = session.updates(UpdateRate::Max(10));
//!
//!     while let Some(snapshot) = updates.next().await {
//!         println!("{} left, round {}", snapshot.score, snapshot.round_number);
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod classifier;
pub mod config;
pub mod decode;
pub mod engine;
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Stream-based session architecture
pub mod connection;
pub mod driver;
pub mod provider;
pub mod providers;
pub mod stream;

// Core exports
pub use config::GameConfig;
pub use engine::{
    BustReason, DARTS_PER_ROUND, EngineEvent, EventSink, GameState, RecentEvents, RoundEngine,
    TracingSink,
};
pub use error::*;
pub use types::*;

// Main API exports
pub use connection::GameSession;
pub use driver::SourceState;
pub use provider::HitProvider;
pub use providers::{ChannelProvider, HitSender, ReplayProvider};

/// Unified entry point for game sessions.
///
/// # Examples
///
/// ## Channel-fed session
/// ```rust,no_run
/// use oche::{GameConfig, Oche, SegmentId};
///
/// #[tokio::main]
/// async fn main() -> oche::Result<()> {
///     let (session, hits) = Oche::channel(GameConfig::default())?;
///     hits.send(SegmentId::Triple(20).segment()?).await?;
///     session.end_round();
///     Ok(())
/// }
/// ```
///
/// ## Recorded session
/// ```rust,no_run
/// use oche::{GameConfig, Oche};
///
/// #[tokio::main]
/// async fn main() -> oche::Result<()> {
///     let session = Oche::replay("practice.txt", GameConfig::default())?;
///     let state = session.source_closed().await;
///     println!("{:?}: {} left", state, session.snapshot().score);
///     Ok(())
/// }
/// ```
pub struct Oche;

impl Oche {
    /// Start a game fed by any hit source.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn attach<P: HitProvider>(provider: P, config: GameConfig) -> Result<GameSession> {
        GameSession::attach(provider, config)
    }

    /// Start a game fed through a channel, returning the sender for hits.
    pub fn channel(config: GameConfig) -> Result<(GameSession, HitSender)> {
        let (provider, sender) = ChannelProvider::new(ChannelProvider::DEFAULT_CAPACITY);
        let session = GameSession::attach(provider, config)?;
        Ok((session, sender))
    }

    /// Start a game that replays a recorded session file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or is not readable
    /// - A line is not a dash-separated payload
    /// - `config` is invalid
    pub fn replay<P: AsRef<std::path::Path>>(path: P, config: GameConfig) -> Result<GameSession> {
        GameSession::replay(path, config)
    }
}
