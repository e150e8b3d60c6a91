//! DM and group-DM channels: channels that exist outside any guild.

use crate::id::{ChannelId, UserId};
use serde::Serialize;

/// Fields carried by a DM or group-DM channel (no `guild_id`: these exist
/// outside any guild). Built only by [`super::Channel`]'s visitor-based
/// decoder, never deserialized directly.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PrivateChannel {
    pub id: ChannelId,
    #[serde(default)]
    pub recipients: Vec<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<ChannelId>,
}
