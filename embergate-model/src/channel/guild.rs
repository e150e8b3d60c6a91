//! Fields shared by every channel variant that lives inside a guild
//! (category, text, voice, announcement, stage, forum, media).

use crate::id::{ChannelId, GuildId};
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    #[derive(Default)]
    pub struct ChannelFlags: u64 {
        const PINNED = 1 << 1;
        const REQUIRE_TAG = 1 << 4;
        const HIDE_MEDIA_DOWNLOAD_OPTIONS = 1 << 15;
    }
}

impl<'de> Deserialize<'de> for ChannelFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u64::deserialize(deserializer)?))
    }
}

impl Serialize for ChannelFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionOverwriteType {
    Role,
    Member,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PermissionOverwrite {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: PermissionOverwriteType,
    pub allow: String,
    pub deny: String,
}

/// Fields common to every channel variant that belongs to a guild.
///
/// One struct backs the `Category`, `Text`, `Voice`, `Announcement`,
/// `StageVoice`, `Forum`, and `Media` cases of [`super::Channel`]: they are
/// structurally identical on the wire and differ only by `kind`, so giving
/// each its own type would just be the same fields seven times over.
/// Built only by [`super::Channel`]'s visitor-based decoder, never
/// deserialized directly.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct GuildChannel {
    pub id: ChannelId,
    pub guild_id: GuildId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub permission_overwrites: Vec<PermissionOverwrite>,
    #[serde(default)]
    pub flags: ChannelFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<ChannelId>,
}

/// The overwrite's target role or member id; left as a bare snowflake since
/// which of [`RoleId`]/[`UserId`] applies is disambiguated only by `kind`,
/// not by the field itself.
pub type OverwriteTargetId = u64;
