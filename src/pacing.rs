//! Cancellable delivery of deferred UI events.
//!
//! Assistant replies are appended after a short pacing delay. Every delay
//! runs as a tokio task bound to a [`CancellationToken`]; cancelling the
//! token (on reset, or when the scheduler is dropped with its session)
//! guarantees no stale event reaches the UI loop.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

pub struct Scheduler<E> {
    handle: Handle,
    token: CancellationToken,
    tx: mpsc::UnboundedSender<E>,
}

impl<E: Send + 'static> Scheduler<E> {
    /// Scheduler spawning onto `handle`, plus the receiving end polled by the UI loop
    pub fn new(handle: Handle) -> (Self, mpsc::UnboundedReceiver<E>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                handle,
                token: CancellationToken::new(),
                tx,
            },
            rx,
        )
    }

    /// Deliver `event` after `delay` unless cancelled first
    pub fn schedule(&self, event: E, delay: Duration) {
        if delay.is_zero() {
            let _ = self.tx.send(event);
            return;
        }
        let token = self.token.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!("scheduled event cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(event);
                }
            }
        });
    }

    /// Run blocking `work` off the UI loop and deliver its result
    pub fn run_blocking<F>(&self, work: F)
    where
        F: FnOnce() -> E + Send + 'static,
    {
        let token = self.token.clone();
        let tx = self.tx.clone();
        self.handle.spawn_blocking(move || {
            let event = work();
            if !token.is_cancelled() {
                let _ = tx.send(event);
            }
        });
    }

    /// Cancel everything in flight; later calls schedule against a fresh token
    pub fn cancel_pending(&mut self) {
        debug!("cancelling pending scheduled events");
        self.token.cancel();
        self.token = CancellationToken::new();
    }
}

impl<E> Drop for Scheduler<E> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_event_delivered_after_delay() {
        let (scheduler, mut rx) = Scheduler::new(Handle::current());
        scheduler.schedule(7u32, Duration::from_millis(10));

        let got = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert_eq!(got, Some(7));
    }

    #[tokio::test]
    async fn test_zero_delay_is_immediate() {
        let (scheduler, mut rx) = Scheduler::new(Handle::current());
        scheduler.schedule("now", Duration::ZERO);
        assert_eq!(rx.try_recv().unwrap(), "now");
    }

    #[tokio::test]
    async fn test_cancel_pending_drops_events() {
        let (mut scheduler, mut rx) = Scheduler::new(Handle::current());
        scheduler.schedule(1u32, Duration::from_millis(30));
        scheduler.cancel_pending();
        scheduler.schedule(2u32, Duration::from_millis(10));

        let got = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert_eq!(got, Some(2));
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_drop_cancels_in_flight() {
        let (scheduler, mut rx) = Scheduler::new(Handle::current());
        scheduler.schedule(1u32, Duration::from_millis(20));
        drop(scheduler);

        // All senders are gone once the cancelled task exits
        let got = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn test_run_blocking_delivers_result() {
        let (scheduler, mut rx) = Scheduler::new(Handle::current());
        scheduler.run_blocking(|| 40 + 2);
        let got = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert_eq!(got, Some(42));
    }
}
