//! The connection stage a [`Shard`](super::Shard) is currently in.

use std::{
    convert::TryFrom,
    fmt::{self, Display, Formatter},
    sync::atomic::{AtomicU8, Ordering},
};

/// Where a shard is in the protocol state machine.
///
/// `AwaitingReady` and `AwaitingResumed` are distinct stages rather than one
/// "authenticating" catch-all: a shard that sent Identify is waiting on a
/// `READY`, one that sent Resume is waiting on a `RESUMED`, and the two
/// outcomes capture different session state.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum ShardStage {
    Disconnected,
    AwaitingHello,
    Authenticating,
    AwaitingReady,
    AwaitingResumed,
    Live,
    Reconnecting,
}

impl Default for ShardStage {
    fn default() -> Self {
        Self::Disconnected
    }
}

impl Display for ShardStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disconnected => "disconnected",
            Self::AwaitingHello => "awaiting hello",
            Self::Authenticating => "authenticating",
            Self::AwaitingReady => "awaiting ready",
            Self::AwaitingResumed => "awaiting resumed",
            Self::Live => "live",
            Self::Reconnecting => "reconnecting",
        })
    }
}

impl TryFrom<u8> for ShardStage {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Disconnected,
            1 => Self::AwaitingHello,
            2 => Self::Authenticating,
            3 => Self::AwaitingReady,
            4 => Self::AwaitingResumed,
            5 => Self::Live,
            6 => Self::Reconnecting,
            other => return Err(other),
        })
    }
}

/// Atomic storage for [`ShardStage`], mirroring the teacher's `Session::stage`
/// but generalized to the seven stages above.
#[derive(Debug)]
pub(crate) struct AtomicShardStage(AtomicU8);

impl AtomicShardStage {
    pub(crate) fn new(stage: ShardStage) -> Self {
        Self(AtomicU8::new(stage as u8))
    }

    pub(crate) fn get(&self) -> ShardStage {
        ShardStage::try_from(self.0.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub(crate) fn set(&self, stage: ShardStage) {
        self.0.store(stage as u8, Ordering::Release);
    }
}

impl Default for AtomicShardStage {
    fn default() -> Self {
        Self::new(ShardStage::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{AtomicShardStage, ShardStage};
    use std::convert::TryFrom;

    #[test]
    fn round_trips_through_u8() {
        for stage in [
            ShardStage::Disconnected,
            ShardStage::AwaitingHello,
            ShardStage::Authenticating,
            ShardStage::AwaitingReady,
            ShardStage::AwaitingResumed,
            ShardStage::Live,
            ShardStage::Reconnecting,
        ] {
            assert_eq!(stage, ShardStage::try_from(stage as u8).unwrap());
        }
    }

    #[test]
    fn default_is_disconnected() {
        assert_eq!(ShardStage::default(), ShardStage::Disconnected);
    }

    #[test]
    fn atomic_round_trips() {
        let atomic = AtomicShardStage::new(ShardStage::Live);
        assert_eq!(atomic.get(), ShardStage::Live);
        atomic.set(ShardStage::Reconnecting);
        assert_eq!(atomic.get(), ShardStage::Reconnecting);
    }
}
