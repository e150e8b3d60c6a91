//! A point-in-time snapshot of a running shard's state, for introspection.

use super::stage::ShardStage;
use crate::latency::Latency;

/// Snapshot returned by [`Shard::info`](super::Shard::info).
#[derive(Clone, Debug)]
pub struct Information {
    id: u64,
    total_shards: u64,
    latency: Latency,
    session_id: Option<String>,
    last_seq: u64,
    stage: ShardStage,
}

impl Information {
    pub(super) fn new(
        id: u64,
        total_shards: u64,
        latency: Latency,
        session_id: Option<String>,
        last_seq: u64,
        stage: ShardStage,
    ) -> Self {
        Self {
            id,
            total_shards,
            latency,
            session_id,
            last_seq,
            stage,
        }
    }

    /// This shard's id.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Total number of shards this one is a part of.
    pub const fn total_shards(&self) -> u64 {
        self.total_shards
    }

    /// Heartbeat round-trip statistics for the current connection.
    pub const fn latency(&self) -> &Latency {
        &self.latency
    }

    /// The active session id, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The last sequence number applied.
    pub const fn last_seq(&self) -> u64 {
        self.last_seq
    }

    /// The current connection stage.
    pub const fn stage(&self) -> ShardStage {
        self.stage
    }
}
