//! The per-connection heartbeat loop, started on `HELLO` and cancelled
//! before every reconnect.

use crate::{error::Error, json, latency::Latency};
use embergate_model::gateway::OpCode;
use futures_util::{Sink, SinkExt};
use rand::Rng;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::{sync::watch, time::sleep};
use tokio_tungstenite::tungstenite::{Error as TungsteniteError, Message as TungsteniteMessage};

use super::session::SessionState;

/// Whether the most recently sent heartbeat has been acknowledged.
///
/// Starts `true` so a freshly spawned heartbeater doesn't immediately
/// declare the connection dead before its first beat.
#[derive(Debug)]
pub(crate) struct AckTracker(AtomicBool);

impl AckTracker {
    fn new() -> Self {
        Self(AtomicBool::new(true))
    }

    fn acked(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn ack(&self) {
        self.0.store(true, Ordering::Release);
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives the heartbeat cadence for one connection.
///
/// Cancelled by dropping the paired [`watch::Sender`] (or sending `true`
/// down it); any still-running heartbeater must be cancelled before a
/// reconnect starts a new one, per §4.1.
pub(crate) struct Heartbeater {
    interval: Duration,
    shard_id: u64,
    session: Arc<SessionState>,
    latency: Arc<Mutex<Latency>>,
    ack: Arc<AckTracker>,
    shutdown: watch::Receiver<bool>,
}

impl Heartbeater {
    pub(crate) fn new(
        interval: Duration,
        shard_id: u64,
        session: Arc<SessionState>,
        latency: Arc<Mutex<Latency>>,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, Arc<AckTracker>) {
        let ack = Arc::new(AckTracker::new());

        (
            Self {
                interval,
                shard_id,
                session,
                latency,
                ack: Arc::clone(&ack),
                shutdown,
            },
            ack,
        )
    }

    /// Run the loop until cancelled or until two consecutive heartbeats go
    /// unacknowledged, in which case `Ok(())` is returned so the caller
    /// tears the connection down and reconnects.
    pub(crate) async fn run<S>(mut self, sink: Arc<tokio::sync::Mutex<S>>) -> Result<(), Error>
    where
        S: Sink<TungsteniteMessage, Error = TungsteniteError> + Unpin + Send,
    {
        let jitter = rand::thread_rng().gen_range(0..=self.interval.as_millis().max(1) as u64);
        if self.wait(Duration::from_millis(jitter)).await {
            return Ok(());
        }

        loop {
            if !self.ack.acked() {
                tracing::warn!(shard_id = self.shard_id, "heartbeat not acked, reconnecting");
                return Ok(());
            }

            self.ack.clear();
            self.send(&sink).await?;
            self.latency.lock().expect("latency mutex poisoned").track_sent();

            if self.wait(self.interval).await {
                return Ok(());
            }
        }
    }

    /// Sleep for `duration`, returning `true` if shutdown fired first.
    async fn wait(&mut self, duration: Duration) -> bool {
        tokio::select! {
            () = sleep(duration) => false,
            result = self.shutdown.changed() => result.is_err() || *self.shutdown.borrow(),
        }
    }

    async fn send<S>(&self, sink: &Arc<tokio::sync::Mutex<S>>) -> Result<(), Error>
    where
        S: Sink<TungsteniteMessage, Error = TungsteniteError> + Unpin + Send,
    {
        let seq = self.session.last_seq();
        let body = if seq == 0 { None } else { Some(seq) };
        let bytes = json::wrap_outbound(OpCode::Heartbeat, body)?;

        sink.lock()
            .await
            .send(TungsteniteMessage::Binary(bytes))
            .await
            .map_err(|source| Error::new(crate::error::ErrorType::Sending, Some(Box::new(source))))
    }
}

#[cfg(test)]
mod tests {
    use super::AckTracker;

    #[test]
    fn starts_acked() {
        assert!(AckTracker::new().acked());
    }

    #[test]
    fn clear_then_ack_round_trips() {
        let tracker = AckTracker::new();
        tracker.clear();
        assert!(!tracker.acked());
        tracker.ack();
        assert!(tracker.acked());
    }
}
