//! Voice state entity.

use crate::{
    id::{ChannelId, GuildId, UserId},
    member::Member,
};
use serde::{Deserialize, Serialize};

/// A user's voice connection state within a guild. Keyed by
/// `(guild_id, user_id)`.
///
/// `channel_id` uses the zero-Snowflake sentinel for "not in a channel"
/// rather than `Option`, matching the wire representation; see
/// [`VoiceState::is_connected`] for the boundary predicate the design notes
/// call for instead of comparing against zero at call sites.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct VoiceState {
    pub guild_id: GuildId,
    pub user_id: UserId,
    #[serde(default)]
    pub channel_id: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub self_deaf: bool,
    #[serde(default)]
    pub self_mute: bool,
}

impl VoiceState {
    /// Whether this state places the user in an actual voice channel, as
    /// opposed to the sentinel "unset" channel id.
    pub fn is_connected(&self) -> bool {
        !self.channel_id.is_unset()
    }

    /// Build the `old` side of a `VOICE_STATE_UPDATE` event when nothing was
    /// cached for `(guild_id, user_id)`: a copy of the new state with
    /// `channel_id` cleared to the unset sentinel. `old.member` mirrors
    /// `new.member` per §4.4.
    pub fn synthesize_old(new: &VoiceState) -> Self {
        Self {
            channel_id: ChannelId::UNSET,
            ..new.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VoiceState;

    fn sample() -> VoiceState {
        serde_json::from_str(
            r#"{"guild_id":"1","user_id":"2","channel_id":"99","session_id":"s"}"#,
        )
        .unwrap()
    }

    #[test]
    fn synthesize_old_clears_channel_but_mirrors_member() {
        let new = sample();
        let old = VoiceState::synthesize_old(&new);

        assert_eq!(old.channel_id.get(), 0);
        assert!(!old.is_connected());
        assert!(new.is_connected());
        assert_eq!(old.member, new.member);
    }
}
