//! The per-connection protocol state machine: connect, authenticate, drive
//! the heartbeat cadence, decode dispatch frames, and reconnect on failure.

use super::{
    heartbeat::Heartbeater,
    information::Information,
    session::SessionState,
    stage::{AtomicShardStage, ShardStage},
};
use crate::{
    compression::Inflater,
    config::Config,
    dispatch::Dispatcher,
    error::{Error, ErrorType},
    json,
    latency::Latency,
};
use embergate_model::gateway::{
    payload_in::{Hello, Ready},
    payload_out::{Identify, Resume},
    EventType, EventTypeFlags, OpCode,
};
use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    net::TcpStream,
    sync::{watch, Mutex as AsyncMutex},
    time::{sleep, timeout},
};
use tokio_tungstenite::{
    connect_async, tungstenite::Message as TungsteniteMessage, MaybeTlsStream, WebSocketStream,
};
use url::Url;

/// Default gateway host used when a shard has never resumed a session.
pub const DEFAULT_GATEWAY_URL: &str = "wss://gateway.discord.gg";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

type ConnectionSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, TungsteniteMessage>;
type ConnectionStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// What ended a connection attempt, decided by [`Shard::drive`].
enum DriveOutcome {
    /// The shard's [`Shard::shutdown`] was called; stop reconnecting.
    Shutdown,
    /// The connection ended for any other reason; reconnect. `reached_live`
    /// is whether this connection ever got as far as [`ShardStage::Live`],
    /// which decides whether the backoff delay resets.
    Reconnect { reached_live: bool },
}

/// What to do after processing one decoded dispatch/control frame.
enum FrameOutcome {
    Continue,
    Reconnect,
}

/// A single gateway connection and the session state that survives across
/// its reconnects.
///
/// Cheap to clone behind an `Arc`: every field a background task needs is
/// already `Arc`- or channel-backed, so callers typically hold `Arc<Shard>`
/// and run [`Shard::run`] in a spawned task while keeping a handle for
/// [`Shard::info`] and [`Shard::shutdown`].
pub struct Shard {
    id: u64,
    total_shards: u64,
    config: Config,
    dispatcher: Arc<Dispatcher>,
    gateway_url: String,
    session: Arc<SessionState>,
    stage: AtomicShardStage,
    latency: Arc<Mutex<Latency>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Shard {
    pub fn new(
        id: u64,
        total_shards: u64,
        config: Config,
        dispatcher: Arc<Dispatcher>,
        gateway_url: impl Into<String>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            id,
            total_shards,
            config,
            dispatcher,
            gateway_url: gateway_url.into(),
            session: Arc::new(SessionState::default()),
            stage: AtomicShardStage::default(),
            latency: Arc::new(Mutex::new(Latency::new())),
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub const fn id(&self) -> u64 {
        self.id
    }

    /// A point-in-time snapshot of this shard's state.
    pub fn info(&self) -> Information {
        Information::new(
            self.id,
            self.total_shards,
            self.latency.lock().expect("latency mutex poisoned").clone(),
            self.session.session_id(),
            self.session.last_seq(),
            self.stage.get(),
        )
    }

    /// Request a graceful shutdown. Idempotent; safe to call from any task
    /// holding a clone of this shard's `Arc`.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Connect and drive the protocol state machine until [`Shard::shutdown`]
    /// is called, reconnecting with exponential backoff on every other kind
    /// of disconnect (§7).
    pub async fn run(&self) -> Result<(), Error> {
        let mut shutdown_rx = self.shutdown_rx.clone();
        let mut backoff = INITIAL_BACKOFF;

        loop {
            if *shutdown_rx.borrow() {
                return Ok(());
            }

            match self.drive(&mut shutdown_rx).await {
                Ok(DriveOutcome::Shutdown) => return Ok(()),
                Ok(DriveOutcome::Reconnect { reached_live }) => {
                    if reached_live {
                        backoff = INITIAL_BACKOFF;
                    }
                }
                Err(error) => {
                    tracing::warn!(shard_id = self.id, %error, "shard connection attempt failed");
                }
            }

            self.stage.set(ShardStage::Reconnecting);

            tokio::select! {
                () = sleep(backoff) => {}
                result = shutdown_rx.changed() => {
                    if result.is_err() || *shutdown_rx.borrow() {
                        return Ok(());
                    }
                }
            }

            backoff = (backoff * 2).min(MAX_BACKOFF);
        }
    }

    /// One connect-authenticate-drive cycle.
    async fn drive(&self, shutdown_rx: &mut watch::Receiver<bool>) -> Result<DriveOutcome, Error> {
        let target = self
            .session
            .resume_gateway_url()
            .unwrap_or_else(|| self.gateway_url.clone());
        let url = build_connect_url(&target, self.config.use_compression())?;

        self.stage.set(ShardStage::Disconnected);
        let (connection, _response) = timeout(CONNECT_TIMEOUT, connect_async(url.as_str()))
            .await
            .map_err(|_| {
                Error::new(
                    ErrorType::Connecting {
                        url: url.to_string(),
                    },
                    None,
                )
            })?
            .map_err(|source| {
                Error::new(
                    ErrorType::Connecting {
                        url: url.to_string(),
                    },
                    Some(Box::new(source)),
                )
            })?;

        self.stage.set(ShardStage::AwaitingHello);
        let (sink, mut stream) = connection.split();
        let sink = Arc::new(AsyncMutex::new(sink));
        let mut inflater = self.config.use_compression().then(Inflater::new);

        let hello = match self
            .await_hello(&mut stream, &mut inflater, &sink, shutdown_rx)
            .await?
        {
            Some(hello) => hello,
            None => return Ok(DriveOutcome::Shutdown),
        };

        self.stage.set(ShardStage::Authenticating);
        let (conn_shutdown_tx, conn_shutdown_rx) = watch::channel(false);
        let (heartbeater, ack) = Heartbeater::new(
            Duration::from_millis(hello.heartbeat_interval),
            self.id,
            Arc::clone(&self.session),
            Arc::clone(&self.latency),
            conn_shutdown_rx,
        );
        let mut heartbeat_handle = tokio::spawn(heartbeater.run(Arc::clone(&sink)));

        if let Some(resume_info) = self.session.resume_info() {
            self.stage.set(ShardStage::AwaitingResumed);
            let resume = Resume {
                token: self.config.token().to_owned(),
                session_id: resume_info.session_id,
                seq: resume_info.last_seq,
            };
            self.send(&sink, OpCode::Resume, resume).await?;
        } else {
            self.config.identify_limiter().wait().await;
            self.stage.set(ShardStage::AwaitingReady);
            let identify = Identify::new(
                self.config.token().to_owned(),
                self.id,
                self.total_shards,
                self.config.intents(),
                self.config.identify_properties().clone(),
                self.config.use_compression(),
            );
            self.send(&sink, OpCode::Identify, identify).await?;
        }

        let outcome = loop {
            tokio::select! {
                result = shutdown_rx.changed() => {
                    if result.is_err() || *shutdown_rx.borrow() {
                        break DriveOutcome::Shutdown;
                    }
                }
                result = &mut heartbeat_handle => {
                    if let Err(error) = result {
                        tracing::error!(shard_id = self.id, %error, "heartbeater task panicked");
                    } else {
                        tracing::warn!(shard_id = self.id, "heartbeat went unacknowledged, reconnecting");
                    }
                    break DriveOutcome::Reconnect { reached_live: self.stage.get() == ShardStage::Live };
                }
                frame = stream.next() => {
                    let message = match frame {
                        Some(Ok(message)) => message,
                        Some(Err(source)) => {
                            tracing::warn!(shard_id = self.id, error = %source, "websocket transport error, reconnecting");
                            break DriveOutcome::Reconnect { reached_live: self.stage.get() == ShardStage::Live };
                        }
                        None => break DriveOutcome::Reconnect { reached_live: self.stage.get() == ShardStage::Live },
                    };

                    match self.decode_frame(message, &mut inflater, &sink).await {
                        Ok(Some(raw)) => match self.handle_frame(&raw, &sink, &ack).await {
                            Ok(FrameOutcome::Continue) => {}
                            Ok(FrameOutcome::Reconnect) => {
                                break DriveOutcome::Reconnect { reached_live: self.stage.get() == ShardStage::Live };
                            }
                            Err(error) => {
                                tracing::warn!(shard_id = self.id, %error, "dropping malformed control frame");
                            }
                        },
                        Ok(None) => {}
                        Err(error) if matches!(error.kind(), ErrorType::Compression) => {
                            tracing::error!(shard_id = self.id, %error, "zlib stream desynced, reconnecting");
                            break DriveOutcome::Reconnect { reached_live: self.stage.get() == ShardStage::Live };
                        }
                        Err(error) => {
                            tracing::warn!(shard_id = self.id, %error, "dropping malformed frame");
                        }
                    }
                }
            }
        };

        let _ = conn_shutdown_tx.send(true);
        heartbeat_handle.abort();
        let _ = sink.lock().await.close().await;

        Ok(outcome)
    }

    /// Read frames until `HELLO` arrives, ignoring (but logging) anything
    /// else Discord might send first. Returns `None` on shutdown.
    async fn await_hello(
        &self,
        stream: &mut ConnectionStream,
        inflater: &mut Option<Inflater>,
        sink: &Arc<AsyncMutex<ConnectionSink>>,
        shutdown_rx: &mut watch::Receiver<bool>,
    ) -> Result<Option<Hello>, Error> {
        loop {
            tokio::select! {
                result = shutdown_rx.changed() => {
                    if result.is_err() || *shutdown_rx.borrow() {
                        return Ok(None);
                    }
                }
                frame = stream.next() => {
                    let message = match frame {
                        Some(Ok(message)) => message,
                        Some(Err(source)) => {
                            return Err(Error::new(ErrorType::Connecting { url: self.gateway_url.clone() }, Some(Box::new(source))));
                        }
                        None => {
                            return Err(Error::new(ErrorType::Connecting { url: self.gateway_url.clone() }, None));
                        }
                    };

                    let Some(raw) = self.decode_frame(message, inflater, sink).await? else {
                        continue;
                    };

                    let header = json::peek(&raw)?;
                    if header.op == OpCode::Hello {
                        return Ok(Some(json::deserialize_body(&raw)?));
                    }

                    tracing::debug!(shard_id = self.id, op = ?header.op, "ignoring frame received before hello");
                }
            }
        }
    }

    async fn decode_frame(
        &self,
        message: TungsteniteMessage,
        inflater: &mut Option<Inflater>,
        sink: &Arc<AsyncMutex<ConnectionSink>>,
    ) -> Result<Option<Vec<u8>>, Error> {
        if let TungsteniteMessage::Ping(data) = message {
            sink.lock()
                .await
                .send(TungsteniteMessage::Pong(data))
                .await
                .map_err(|source| Error::new(ErrorType::Sending, Some(Box::new(source))))?;
            return Ok(None);
        }

        Self::inflate(message, inflater)
    }

    /// Turn a raw websocket message into a complete JSON frame, if one is
    /// ready. Text frames (uncompressed connections) are ready immediately;
    /// binary frames are fed through the continuous zlib stream and only
    /// yield a value once Discord's completion marker has arrived.
    fn inflate(
        message: TungsteniteMessage,
        inflater: &mut Option<Inflater>,
    ) -> Result<Option<Vec<u8>>, Error> {
        match message {
            TungsteniteMessage::Text(text) => Ok(Some(text.into_bytes())),
            TungsteniteMessage::Binary(bytes) => {
                let inflater = inflater
                    .as_mut()
                    .expect("binary frame received on an uncompressed connection");
                inflater.extend(&bytes);

                match inflater.msg() {
                    Ok(Some(complete)) => {
                        let owned = complete.to_vec();
                        inflater.clear();
                        Ok(Some(owned))
                    }
                    Ok(None) => Ok(None),
                    Err(source) => Err(Error::new(ErrorType::Compression, Some(Box::new(source)))),
                }
            }
            TungsteniteMessage::Ping(_)
            | TungsteniteMessage::Pong(_)
            | TungsteniteMessage::Close(_)
            | TungsteniteMessage::Frame(_) => Ok(None),
        }
    }

    async fn handle_frame(
        &self,
        raw: &[u8],
        sink: &Arc<AsyncMutex<ConnectionSink>>,
        ack: &Arc<super::heartbeat::AckTracker>,
    ) -> Result<FrameOutcome, Error> {
        let header = json::peek(raw)?;

        if let Some(seq) = header.s {
            self.session.set_last_seq(seq);
        }

        match header.op {
            OpCode::Dispatch => {
                let kind = json::event_type(&header);

                if matches!(kind, Some(EventType::Ready)) {
                    let ready: Ready = json::deserialize_body(raw)?;
                    self.session
                        .set_session(ready.session_id, ready.resume_gateway_url);
                    self.stage.set(ShardStage::Live);
                } else if matches!(kind, Some(EventType::Resumed)) {
                    self.stage.set(ShardStage::Live);
                }

                let enabled = kind
                    .map(|kind| self.config.event_types().contains(EventTypeFlags::from(kind)))
                    .unwrap_or(true);

                if enabled {
                    self.dispatcher.dispatch(self.id, kind, raw);
                }

                Ok(FrameOutcome::Continue)
            }
            OpCode::Heartbeat => {
                self.send_heartbeat(sink).await?;
                Ok(FrameOutcome::Continue)
            }
            OpCode::Reconnect => {
                tracing::info!(shard_id = self.id, "gateway requested a reconnect");
                Ok(FrameOutcome::Reconnect)
            }
            OpCode::InvalidSession => {
                let resumable: bool = json::deserialize_body(raw)?;

                // 100ms base plus a jitter derived from the shard id, so a
                // cluster's shards don't all retry in lockstep; the same
                // delay applies whether or not the session is resumable.
                let delay = Duration::from_millis(100 + (self.id % 500));

                if resumable {
                    sleep(delay).await;
                } else {
                    self.session.clear();
                    sleep(delay).await;
                }

                Ok(FrameOutcome::Reconnect)
            }
            OpCode::HeartbeatAck => {
                ack.ack();
                self.latency
                    .lock()
                    .expect("latency mutex poisoned")
                    .track_received();
                Ok(FrameOutcome::Continue)
            }
            OpCode::PresenceUpdate
            | OpCode::VoiceStateUpdate
            | OpCode::RequestGuildMembers
            | OpCode::Identify
            | OpCode::Resume => Ok(FrameOutcome::Continue),
        }
    }

    async fn send_heartbeat(&self, sink: &Arc<AsyncMutex<ConnectionSink>>) -> Result<(), Error> {
        let seq = self.session.last_seq();
        let body = if seq == 0 { None } else { Some(seq) };
        self.send(sink, OpCode::Heartbeat, body).await
    }

    async fn send<T: serde::Serialize>(
        &self,
        sink: &Arc<AsyncMutex<ConnectionSink>>,
        op: OpCode,
        body: T,
    ) -> Result<(), Error> {
        let bytes = json::wrap_outbound(op, body)?;
        sink.lock()
            .await
            .send(TungsteniteMessage::Binary(bytes))
            .await
            .map_err(|source| Error::new(ErrorType::Sending, Some(Box::new(source))))
    }
}

/// Build the connect URL for `base`: Discord requires `v` and `encoding`
/// query parameters on every connection, and `compress` when the caller
/// wants transport compression. Existing query parameters are preserved;
/// only parameters missing from `base` are filled in, so retargeting to a
/// `resume_gateway_url` (which carries none of its own) behaves the same as
/// the first connect.
fn build_connect_url(base: &str, compress: bool) -> Result<Url, Error> {
    let mut url = Url::parse(base).map_err(|_| {
        Error::new(
            ErrorType::ParsingUrl {
                url: base.to_owned(),
            },
            None,
        )
    })?;

    let existing: std::collections::HashMap<String, String> =
        url.query_pairs().into_owned().collect();

    let v = existing.get("v").cloned().unwrap_or_else(|| "10".to_owned());
    let encoding = existing
        .get("encoding")
        .cloned()
        .unwrap_or_else(|| "json".to_owned());
    let compress_value = existing
        .get("compress")
        .cloned()
        .unwrap_or_else(|| "zlib-stream".to_owned());

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.append_pair("v", &v);
        pairs.append_pair("encoding", &encoding);
        if compress {
            pairs.append_pair("compress", &compress_value);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::{build_connect_url, DEFAULT_GATEWAY_URL};

    #[test]
    fn default_url_gets_version_and_encoding() {
        let url = build_connect_url(DEFAULT_GATEWAY_URL, false).unwrap();
        assert_eq!(url.query(), Some("v=10&encoding=json"));
    }

    #[test]
    fn compression_adds_compress_param() {
        let url = build_connect_url(DEFAULT_GATEWAY_URL, true).unwrap();
        assert_eq!(url.query(), Some("v=10&encoding=json&compress=zlib-stream"));
    }

    #[test]
    fn resume_url_without_query_gets_the_same_params_added() {
        let url = build_connect_url("wss://gateway-resume.discord.gg", true).unwrap();
        assert_eq!(url.query(), Some("v=10&encoding=json&compress=zlib-stream"));
    }
}
