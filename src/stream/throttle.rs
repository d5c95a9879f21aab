//! Stream throttling utilities

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Extension trait to add throttling to any Stream
pub trait ThrottleExt: Stream {
    /// Throttle the stream to emit at most once per interval
    ///
    /// Uses "latest-wins" semantics - if multiple items arrive
    /// during an interval, only the latest is emitted.
    fn throttle(self, duration: Duration) -> Throttle<Self>
    where
        Self: Sized,
    {
        Throttle::new(self, duration)
    }
}

impl<T: Stream> ThrottleExt for T {}

pin_project! {
    /// A stream combinator that throttles emission rate
    pub struct Throttle<S: Stream> {
        #[pin]
        stream: S,
        interval: Interval,
        pending: Option<S::Item>,
        done: bool,
    }
}

impl<S: Stream> Throttle<S> {
    /// Create a new throttled stream. Must be called inside a tokio runtime.
    pub fn new(stream: S, duration: Duration) -> Self {
        let mut interval = interval(duration);
        // Delay rather than burst after an idle stretch
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { stream, interval, pending: None, done: false }
    }
}

impl<S: Stream> Stream for Throttle<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // Drain everything available, keeping only the latest
        while !*this.done {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => *this.pending = Some(item),
                Poll::Ready(None) => *this.done = true,
                Poll::Pending => break,
            }
        }

        if this.pending.is_none() {
            return if *this.done { Poll::Ready(None) } else { Poll::Pending };
        }

        ready!(this.interval.poll_tick(cx));
        Poll::Ready(this.pending.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use futures::channel::mpsc;

    #[tokio::test]
    async fn burst_collapses_to_latest() {
        let items: Vec<_> =
            futures::stream::iter(1..=5).throttle(Duration::from_millis(10)).collect().await;
        assert_eq!(items, vec![5]);
    }

    #[tokio::test]
    async fn idle_stream_stays_open() {
        let (tx, rx) = mpsc::unbounded();
        let mut throttled = Box::pin(rx.throttle(Duration::from_millis(5)));

        tx.unbounded_send(1).unwrap();
        assert_eq!(throttled.next().await, Some(1));

        let waited =
            tokio::time::timeout(Duration::from_millis(30), throttled.next()).await;
        assert!(waited.is_err(), "stream ended or yielded while idle");

        tx.unbounded_send(2).unwrap();
        tx.unbounded_send(3).unwrap();
        assert_eq!(throttled.next().await, Some(3));

        drop(tx);
        assert_eq!(throttled.next().await, None);
    }

    #[tokio::test]
    async fn emissions_are_spaced_by_the_interval() {
        let (tx, rx) = mpsc::unbounded();
        let mut throttled = Box::pin(rx.throttle(Duration::from_millis(25)));

        tx.unbounded_send(1).unwrap();
        let start = tokio::time::Instant::now();
        assert_eq!(throttled.next().await, Some(1));

        tx.unbounded_send(2).unwrap();
        assert_eq!(throttled.next().await, Some(2));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
