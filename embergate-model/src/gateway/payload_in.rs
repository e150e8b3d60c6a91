//! Inbound payload bodies (`d` field of frames the Gateway sends).

use crate::{guild::UnavailableGuild, id::{ApplicationId, GuildId}, user::User};
use serde::{Deserialize, Serialize};

/// `d` of a `HELLO` frame (op 10).
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Hello {
    pub heartbeat_interval: u64,
}

/// Partial application info carried by `READY`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ReadyApplication {
    pub id: ApplicationId,
    #[serde(default)]
    pub flags: u64,
}

/// `d` of a `READY` frame (op 0, `t = "READY"`).
///
/// `guilds` is the client's initial, all-unavailable view of its guilds;
/// per §4.4 the dispatcher puts each one into the cache before forwarding
/// the event. `resume_gateway_url` is the host subsequent reconnects for
/// this session must target instead of the default gateway URL.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Ready {
    pub v: u8,
    pub user: User,
    #[serde(default)]
    pub guilds: Vec<UnavailableGuild>,
    pub session_id: String,
    pub resume_gateway_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard: Option<[u64; 2]>,
    pub application: ReadyApplication,
}

/// `d` of an `INVALID_SESSION` frame (op 9): whether the session is
/// resumable. `true` → sleep then Resume; `false` → clear session state
/// then Identify.
pub type InvalidSessionResumable = bool;

/// `d` of a `GUILD_MEMBER_REMOVE` frame: unlike `GUILD_MEMBER_ADD`/`_UPDATE`,
/// Discord sends only the user that left, not a full member record.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GuildMemberRemove {
    pub guild_id: GuildId,
    pub user: User,
}

/// Convenience type carrying what a shard needs to remember to attempt a
/// Resume after a reconnect: the session id and resume URL from `READY`,
/// the last applied sequence number, and the intents/token it authenticated
/// with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub resume_gateway_url: String,
    pub last_seq: u64,
}

#[cfg(test)]
mod tests {
    use super::Hello;

    #[test]
    fn decodes_hello() {
        let hello: Hello = serde_json::from_str(r#"{"heartbeat_interval":41250}"#).unwrap();
        assert_eq!(hello.heartbeat_interval, 41250);
    }
}
