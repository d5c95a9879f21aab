//! Test utilities for fixture access and segment construction
//!
//! Shared by unit tests, integration tests and the benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use std::path::{Path, PathBuf};

use crate::config::GameConfig;
use crate::engine::{RecentEvents, RoundEngine};
use crate::types::{Segment, SegmentCategory, SegmentId};

/// Guidance shown when a fixture is missing from the checkout.
pub const FIXTURE_GUIDANCE: &str =
    "Fixtures are stored under test-data/ at the crate root; make sure the directory was checked out.";

/// Error returned when a required fixture cannot be located.
#[derive(Debug, Clone)]
pub struct FixtureError {
    message: String,
}

impl FixtureError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FixtureError {}

/// The crate's `test-data/` directory.
pub fn test_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data")
}

/// Require a fixture under `test-data/` and return its absolute path.
pub fn require_fixture<P: AsRef<Path>>(relative: P) -> Result<PathBuf, FixtureError> {
    let path = test_data_dir().join(relative.as_ref());
    if path.exists() {
        Ok(path)
    } else {
        Err(FixtureError::new(format!("Missing fixture: {}. {}", path.display(), FIXTURE_GUIDANCE)))
    }
}

/// Every recorded session under `test-data/sessions`, sorted by name.
pub fn session_recordings() -> Vec<PathBuf> {
    let dir = test_data_dir().join("sessions");
    let mut recordings: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("txt"))
                .collect()
        })
        .unwrap_or_default();
    recordings.sort();
    recordings
}

/// Segment for a board position.
pub fn seg(id: SegmentId) -> Segment {
    id.segment().expect("test segment ids are in range")
}

/// Segment outside the board's categories worth `points`.
pub fn other(points: u32) -> Segment {
    Segment::new(SegmentId::Miss, SegmentCategory::Other, points, format!("Other {points}"))
}

/// The nine darts of a perfect 501 leg.
pub fn nine_darter() -> Vec<Segment> {
    let mut darts = vec![seg(SegmentId::Triple(20)); 7];
    darts.push(seg(SegmentId::Triple(19)));
    darts.push(seg(SegmentId::Double(12)));
    darts
}

/// Engine whose events are captured in the returned buffer, newest first.
pub fn recording_engine(config: GameConfig) -> (RoundEngine, RecentEvents) {
    let log = RecentEvents::new(256);
    let engine = RoundEngine::with_sink(config, log.clone()).expect("valid test config");
    (engine, log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fixture_reports_guidance() {
        let message = require_fixture("__missing_fixture").unwrap_err().to_string();
        assert!(message.contains("Missing fixture"));
        assert!(message.contains("test-data/"));
    }

    #[test]
    fn recordings_are_found() {
        let recordings = session_recordings();
        assert!(!recordings.is_empty());
        assert!(recordings.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn nine_darter_sums_to_501() {
        let total: u32 = nine_darter().iter().map(|s| s.raw_value).sum();
        assert_eq!(total, 501);
    }
}
