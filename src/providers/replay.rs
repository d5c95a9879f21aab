//! Replay provider for recorded board sessions

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info, trace};

use crate::decode::{decode_payload, format_payload, parse_payload};
use crate::provider::HitProvider;
use crate::types::Segment;
use crate::{Result, ScoringError};

/// Replay provider that plays back a recorded session
///
/// A recording holds one payload per line in dash-separated decimal form.
/// Blank lines and lines starting with `#` are ignored:
///
/// ```text
/// # round 1
/// 51-46-52-64
/// 66-84-78-64
/// ```
pub struct ReplayProvider {
    /// Payloads not yet played
    payloads: VecDeque<Vec<u8>>,

    /// Delay between hits, None replays as fast as the engine consumes
    pacing: Option<Duration>,

    /// Created on first use so construction needs no runtime
    interval: Option<Interval>,

    delivered: usize,
    skipped: usize,
    name: String,
}

impl ReplayProvider {
    /// Open a recording file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::file_error(path.to_path_buf(), e))?;
        let payloads = Self::parse_recording(&text)?;

        info!("Opened recording {}: {} payloads", path.display(), payloads.len());

        let mut provider = Self::from_payloads(payloads);
        provider.name = path.display().to_string();
        Ok(provider)
    }

    /// Build a provider from payloads already in memory.
    pub fn from_payloads<I>(payloads: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            payloads: payloads.into_iter().collect(),
            pacing: None,
            interval: None,
            delivered: 0,
            skipped: 0,
            name: "replay".to_string(),
        }
    }

    /// Parse recording text into payloads.
    pub fn parse_recording(text: &str) -> Result<Vec<Vec<u8>>> {
        text.lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(line_number, line)| {
                parse_payload(line).map_err(|e| match e {
                    ScoringError::Parse { details, .. } => ScoringError::Parse {
                        context: format!("recording line {}", line_number),
                        details,
                    },
                    other => other,
                })
            })
            .collect()
    }

    /// Space hits `pacing` apart. A zero duration disables pacing.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = (!pacing.is_zero()).then_some(pacing);
        self.interval = None;
        debug!("Replay pacing set to {:?}", self.pacing);
        self
    }

    /// Payloads still queued, including ones that will be skipped
    pub fn remaining(&self) -> usize {
        self.payloads.len()
    }

    /// Hits handed to the engine so far
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Payloads dropped because the board table does not know them
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    async fn wait_for_pacing(&mut self) {
        let Some(pacing) = self.pacing else {
            return;
        };
        let ticker = self.interval.get_or_insert_with(|| {
            let mut ticker = interval(pacing);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        ticker.tick().await;
    }
}

#[async_trait::async_trait]
impl HitProvider for ReplayProvider {
    async fn next_hit(&mut self) -> Result<Option<Segment>> {
        loop {
            let Some(payload) = self.payloads.pop_front() else {
                debug!(
                    "Reached end of replay ({} delivered, {} skipped)",
                    self.delivered, self.skipped
                );
                return Ok(None);
            };

            let Some(id) = decode_payload(&payload) else {
                self.skipped += 1;
                debug!(payload = %format_payload(&payload), "Skipping unmapped payload");
                continue;
            };

            self.wait_for_pacing().await;
            self.delivered += 1;
            trace!("Replay hit {}: {}", self.delivered, id);
            return id.segment().map(Some);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
