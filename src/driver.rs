//! Driver spawns and manages the hit reader task

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::engine::RoundEngine;
use crate::provider::HitProvider;
use crate::types::GameSnapshot;

/// Consecutive provider errors tolerated before the source is abandoned
pub const MAX_ERRORS: u32 = 10;

/// Lifecycle of the hit source behind a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SourceState {
    /// Hits are flowing into the engine
    Attached,
    /// The source ran out of hits or was detached
    Ended,
    /// The source kept failing and was abandoned
    Failed,
}

impl SourceState {
    pub fn is_attached(self) -> bool {
        self == SourceState::Attached
    }
}

/// The engine plus the channel its snapshots are published on.
///
/// All mutation goes through [`SharedEngine::apply`], which holds the lock
/// while publishing, so snapshots arrive in the order mutations happened.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    engine: Arc<Mutex<RoundEngine>>,
    snapshots: Arc<watch::Sender<Arc<GameSnapshot>>>,
}

impl SharedEngine {
    pub fn new(engine: RoundEngine) -> (Self, watch::Receiver<Arc<GameSnapshot>>) {
        let (tx, rx) = watch::channel(Arc::new(engine.snapshot()));
        let shared = Self { engine: Arc::new(Mutex::new(engine)), snapshots: Arc::new(tx) };
        (shared, rx)
    }

    /// Mutate the engine and publish the resulting snapshot.
    pub fn apply<R>(&self, f: impl FnOnce(&mut RoundEngine) -> R) -> R {
        let mut engine = self.engine.lock().unwrap_or_else(|e| e.into_inner());
        let result = f(&mut engine);
        self.snapshots.send_replace(Arc::new(engine.snapshot()));
        result
    }

    /// Read the engine without publishing.
    pub fn read<R>(&self, f: impl FnOnce(&RoundEngine) -> R) -> R {
        let engine = self.engine.lock().unwrap_or_else(|e| e.into_inner());
        f(&engine)
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<GameSnapshot>> {
        self.snapshots.subscribe()
    }
}

/// Result of spawning the driver task
pub struct DriverChannels {
    /// Receiver for the source lifecycle
    pub source: watch::Receiver<SourceState>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the hit reader task
///
/// The task owns the provider and feeds every hit through the shared
/// engine, so hits are applied strictly in arrival order.
pub struct Driver;

impl Driver {
    /// Spawn the hit reader for `provider`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<P>(provider: P, engine: SharedEngine) -> DriverChannels
    where
        P: HitProvider,
    {
        let (source_tx, source_rx) = watch::channel(SourceState::Attached);
        let cancel = CancellationToken::new();
        let cancel_reader = cancel.clone();

        tokio::spawn(async move {
            Self::hit_reader_task(provider, engine, source_tx, cancel_reader).await;
        });

        DriverChannels { source: source_rx, cancel }
    }

    async fn hit_reader_task<P>(
        mut provider: P,
        engine: SharedEngine,
        source_tx: watch::Sender<SourceState>,
        cancel: CancellationToken,
    ) where
        P: HitProvider,
    {
        info!(source = provider.name(), "Hit reader task started");
        let mut hit_count = 0u64;
        let mut error_count = 0u32;

        let final_state = loop {
            if cancel.is_cancelled() {
                info!("Hit reader cancelled");
                break SourceState::Ended;
            }

            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Hit reader cancelled while waiting for a hit");
                    break SourceState::Ended;
                }
                result = provider.next_hit() => result,
            };

            match result {
                Ok(Some(segment)) => {
                    hit_count += 1;
                    error_count = 0;
                    trace!("Hit {}: {}", hit_count, segment.display_name);
                    engine.apply(|engine| engine.process_hit(&segment));
                }
                Ok(None) => {
                    info!("Hit source ended after {} hits", hit_count);
                    break SourceState::Ended;
                }
                Err(e) if !e.is_retryable() => {
                    error!("Hit source failed: {}", e);
                    break SourceState::Failed;
                }
                Err(e) => {
                    error_count += 1;
                    warn!("Hit source error ({}/{}): {}", error_count, MAX_ERRORS, e);

                    if error_count >= MAX_ERRORS {
                        error!("Too many hit source errors, giving up");
                        break SourceState::Failed;
                    }

                    // 100ms, 200ms, 400ms, ... capped at 1.6s
                    let backoff = Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            debug!("Hit reader cancelled during backoff");
                            break SourceState::Ended;
                        }
                        _ = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        };

        source_tx.send_replace(final_state);
        info!("Hit reader task ended ({} hits, {:?})", hit_count, final_state);
    }
}
