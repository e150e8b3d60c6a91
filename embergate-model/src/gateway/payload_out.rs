//! Outbound payload bodies (`d` field of frames this client sends).

use super::intents::Intents;
use serde::{Deserialize, Serialize};

/// The `os`/`browser`/`device` triple Discord uses to classify a
/// connection. Constructed once at `ShardManager` setup and shared by every
/// shard's Identify.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct IdentifyProperties {
    pub os: String,
    pub browser: String,
    pub device: String,
}

impl IdentifyProperties {
    pub fn new(browser: impl Into<String>) -> Self {
        Self {
            os: std::env::consts::OS.to_owned(),
            browser: browser.into(),
            device: "embergate".to_owned(),
        }
    }
}

/// `d` of an Identify frame (op 2).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Identify {
    pub token: String,
    pub properties: IdentifyProperties,
    pub intents: Intents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard: Option<[u64; 2]>,
    #[serde(default)]
    pub large_threshold: Option<u64>,
    #[serde(default)]
    pub compress: bool,
}

impl Identify {
    pub fn new(
        token: String,
        shard_id: u64,
        total_shards: u64,
        intents: Intents,
        properties: IdentifyProperties,
        compress: bool,
    ) -> Self {
        Self {
            token,
            properties,
            intents,
            shard: Some([shard_id, total_shards]),
            large_threshold: None,
            compress,
        }
    }
}

/// `d` of a Resume frame (op 6).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Resume {
    pub token: String,
    pub session_id: String,
    pub seq: u64,
}

/// `d` of a Heartbeat frame (op 1): the last sequence number seen, or
/// `null` if none has arrived yet.
pub type Heartbeat = Option<u64>;

#[cfg(test)]
mod tests {
    use super::{Identify, IdentifyProperties};
    use crate::gateway::intents::Intents;

    #[test]
    fn identify_carries_shard_pair() {
        let identify = Identify::new(
            "token".into(),
            3,
            16,
            Intents::GUILDS,
            IdentifyProperties::new("embergate"),
            false,
        );

        assert_eq!(identify.shard, Some([3, 16]));
        assert_eq!(identify.intents, Intents::GUILDS);
    }
}
