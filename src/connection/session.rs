//! Game session: one engine driven by one hit source

use futures::{Stream, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, WatchStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::driver::{Driver, SharedEngine, SourceState};
use crate::engine::{EngineEvent, EventSink, RoundEngine, TracingSink};
use crate::provider::HitProvider;
use crate::providers::replay::ReplayProvider;
use crate::stream::ThrottleExt;
use crate::types::{GameSnapshot, Segment, UpdateRate};
use crate::Result;

/// A running game fed by a hit source.
///
/// Hits from the source and the operator commands on this type are applied
/// to one engine behind one lock, so they never interleave mid-update.
/// Dropping the session detaches the source.
pub struct GameSession {
    /// Engine shared with the driver task
    engine: SharedEngine,

    /// Snapshot watch receiver
    snapshots: watch::Receiver<Arc<GameSnapshot>>,

    /// Event fan-out, subscribed per [`GameSession::events`] call
    events: broadcast::Sender<EngineEvent>,

    /// Source lifecycle receiver
    source: watch::Receiver<SourceState>,

    /// Cancellation token for stopping the driver
    cancel: CancellationToken,
}

impl GameSession {
    /// Events buffered per subscriber before it starts lagging
    pub const EVENT_CAPACITY: usize = 64;

    /// Start a game and feed it from `provider`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach<P: HitProvider>(provider: P, config: GameConfig) -> Result<Self> {
        let (events, _) = broadcast::channel(Self::EVENT_CAPACITY);
        let fan_out = events.clone();
        let mut log = TracingSink;
        let engine = RoundEngine::with_sink(config, move |event: EngineEvent| {
            log.record(event.clone());
            // No subscribers is fine
            let _ = fan_out.send(event);
        })?;

        info!(
            source = provider.name(),
            start_score = engine.config().start_score,
            total_rounds = engine.config().total_rounds,
            "Attaching hit source"
        );

        let (engine, snapshots) = SharedEngine::new(engine);
        let channels = Driver::spawn(provider, engine.clone());

        Ok(Self { engine, snapshots, events, source: channels.source, cancel: channels.cancel })
    }

    /// Start a game fed by a recorded session file.
    pub fn replay<P: AsRef<Path>>(path: P, config: GameConfig) -> Result<Self> {
        let provider = ReplayProvider::open(path)?;
        Self::attach(provider, config)
    }

    /// The latest published state.
    pub fn snapshot(&self) -> Arc<GameSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Snapshot updates, starting with the current one.
    ///
    /// With [`UpdateRate::Max`] bursts collapse to the latest snapshot.
    pub fn updates(&self, rate: UpdateRate) -> impl Stream<Item = Arc<GameSnapshot>> + 'static {
        let snapshots = WatchStream::new(self.snapshots.clone());

        match rate.throttle_interval() {
            None => snapshots.boxed(),
            Some(interval) => snapshots.throttle(interval).boxed(),
        }
    }

    /// Engine events from now on, oldest first.
    ///
    /// A subscriber that falls more than [`GameSession::EVENT_CAPACITY`]
    /// events behind skips the ones it missed.
    pub fn events(&self) -> impl Stream<Item = EngineEvent> + 'static {
        BroadcastStream::new(self.events.subscribe()).filter_map(|result| async move {
            match result {
                Ok(event) => Some(event),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!("Event subscriber lagged, {} events skipped", skipped);
                    None
                }
            }
        })
    }

    /// Apply a hit that did not come from the source, such as manual entry.
    pub fn process_hit(&self, segment: &Segment) {
        self.engine.apply(|engine| engine.process_hit(segment));
    }

    /// Close the open round before its third dart.
    pub fn end_round(&self) {
        self.engine.apply(|engine| engine.end_round_manually());
    }

    /// Start over from `start_score`.
    pub fn reset_game(&self, start_score: u32) -> Result<()> {
        self.engine.apply(|engine| engine.reset_game(start_score))
    }

    /// Start over from the configured start score.
    pub fn new_game(&self) {
        self.engine.apply(|engine| engine.new_game());
    }

    /// Read the engine directly, for data the snapshot leaves out.
    pub fn with_engine<R>(&self, f: impl FnOnce(&RoundEngine) -> R) -> R {
        self.engine.read(f)
    }

    pub fn source_state(&self) -> SourceState {
        *self.source.borrow()
    }

    /// Wait until the source ends or fails.
    pub async fn source_closed(&self) -> SourceState {
        let mut source = self.source.clone();
        let closed = source.wait_for(|state| !state.is_attached()).await.map(|state| *state);
        closed.unwrap_or_else(|_| *source.borrow())
    }

    /// Stop reading from the source. The game state stays readable.
    pub fn detach(&self) {
        if !self.cancel.is_cancelled() {
            info!("Detaching hit source");
            self.cancel.cancel();
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        debug!("Dropping game session");
        self.cancel.cancel();
    }
}
