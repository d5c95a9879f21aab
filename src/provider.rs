//! Provider trait for hit sources

use crate::Result;
use crate::types::Segment;

/// Trait for sources of board hits
///
/// Providers abstract over where hits come from (a paired board, a
/// recording, a test harness) and handle their own pacing and decoding.
/// Payloads they cannot map to a segment are dropped before they get here.
#[async_trait::async_trait]
pub trait HitProvider: Send + 'static {
    /// Get the next hit
    ///
    /// Returns:
    /// - `Ok(Some(segment))` - A dart landed or the reset button was pressed
    /// - `Ok(None)` - Source detached (normal termination)
    /// - `Err(e)` - Error occurred
    async fn next_hit(&mut self) -> Result<Option<Segment>>;

    /// Short name used in logs
    fn name(&self) -> &str;
}
