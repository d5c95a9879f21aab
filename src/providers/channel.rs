//! In-process hit source fed through a channel

use tokio::sync::mpsc;
use tracing::debug;

use crate::decode::{decode_payload, format_payload};
use crate::provider::HitProvider;
use crate::types::Segment;
use crate::{Result, ScoringError};

/// Provider backed by an mpsc channel.
///
/// Device bridges and test harnesses push hits through the paired
/// [`HitSender`]. The source ends once every sender is dropped.
pub struct ChannelProvider {
    rx: mpsc::Receiver<Segment>,
    name: String,
}

impl ChannelProvider {
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a provider and the sender that feeds it.
    pub fn new(capacity: usize) -> (Self, HitSender) {
        Self::named("channel", capacity)
    }

    /// Same as [`ChannelProvider::new`] with a name for logs.
    pub fn named(name: impl Into<String>, capacity: usize) -> (Self, HitSender) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { rx, name: name.into() }, HitSender { tx })
    }
}

#[async_trait::async_trait]
impl HitProvider for ChannelProvider {
    async fn next_hit(&mut self) -> Result<Option<Segment>> {
        Ok(self.rx.recv().await)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Cloneable handle pushing hits into a [`ChannelProvider`].
#[derive(Debug, Clone)]
pub struct HitSender {
    tx: mpsc::Sender<Segment>,
}

impl HitSender {
    /// Queue a hit, waiting for room if the channel is full.
    pub async fn send(&self, segment: Segment) -> Result<()> {
        self.tx
            .send(segment)
            .await
            .map_err(|_| ScoringError::source_failed("hit source is no longer attached"))
    }

    /// Queue a hit without waiting.
    pub fn try_send(&self, segment: Segment) -> Result<()> {
        self.tx.try_send(segment).map_err(|e| ScoringError::source_failed(e.to_string()))
    }

    /// Decode a raw board payload and queue it.
    ///
    /// Returns `Ok(false)` without sending when the payload is not in the
    /// board's table.
    pub async fn send_payload(&self, payload: &[u8]) -> Result<bool> {
        let Some(id) = decode_payload(payload) else {
            debug!(payload = %format_payload(payload), "Dropping unmapped payload");
            return Ok(false);
        };
        self.send(id.segment()?).await?;
        Ok(true)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Wait until the provider side has been dropped.
    pub async fn closed(&self) {
        self.tx.closed().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentId;

    #[tokio::test]
    async fn delivers_in_order_then_ends() {
        let (mut provider, sender) = ChannelProvider::new(4);
        sender.send(SegmentId::Triple(20).segment().unwrap()).await.unwrap();
        assert!(sender.send_payload(b"BTN@").await.unwrap());
        drop(sender);

        let first = provider.next_hit().await.unwrap().unwrap();
        assert_eq!(first.id, SegmentId::Triple(20));
        let second = provider.next_hit().await.unwrap().unwrap();
        assert!(second.is_reset());
        assert!(provider.next_hit().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unmapped_payloads_are_not_sent() {
        let (mut provider, sender) = ChannelProvider::new(4);
        assert!(!sender.send_payload(b"??").await.unwrap());
        drop(sender);
        assert!(provider.next_hit().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sending_after_detach_fails() {
        let (provider, sender) = ChannelProvider::new(1);
        drop(provider);
        assert!(sender.is_closed());
        let err = sender.send(SegmentId::Bull.segment().unwrap()).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
