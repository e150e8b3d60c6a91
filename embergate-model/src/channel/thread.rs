//! Thread channel variants.

use crate::id::{ChannelId, GuildId, UserId};
use serde::{Deserialize, Serialize};

/// Which flavor of thread this is; the guild/thread distinction in the
/// overall [`super::Channel`] tag is structural (a `ThreadChannel` is its
/// own case), but among threads the flavor is carried as data rather than
/// three near-identical enum cases.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum ThreadKind {
    Announcement,
    Public,
    Private,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ThreadMetadata {
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub auto_archive_duration: u32,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub invitable: bool,
}

/// A thread: `Announcement`, `Public`, or `Private` per [`ThreadKind`].
/// Carries `{guild_id, parent_id, owner_id, thread_metadata}` in addition to
/// the base `{id, type}` every channel has, per §3's data model.
/// Built only by [`super::Channel`]'s visitor-based decoder, never
/// deserialized directly: `kind` isn't a key on the wire, it's this
/// channel's containing [`super::Channel::Thread`] tag.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ThreadChannel {
    pub id: ChannelId,
    #[serde(skip_serializing)]
    pub kind: ThreadKind,
    pub guild_id: GuildId,
    pub parent_id: ChannelId,
    pub owner_id: UserId,
    #[serde(default)]
    pub name: String,
    pub thread_metadata: ThreadMetadata,
    #[serde(default)]
    pub message_count: u32,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<ChannelId>,
}

/// A user's membership in a thread, as sent by `THREAD_MEMBERS_UPDATE` and
/// `THREAD_MEMBER_UPDATE`. Keyed by `(channel_id, user_id)` in the cache.
/// `user_id` and `member` are absent on the member's own `THREAD_MEMBER_UPDATE`
/// (Discord omits the redundant field); the dispatcher fills `user_id` in
/// from the event envelope before caching.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ThreadMember {
    pub id: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub join_timestamp: String,
    #[serde(default)]
    pub flags: u64,
}
