//! A concurrent in-memory cache of Discord entities, updated as a side
//! effect of Gateway event dispatch.
//!
//! Primary stores are keyed by their natural key (a Snowflake, or
//! `(guild_id, user_id)` for members/voice states/thread members). Four
//! secondary indexes map `guild_id -> set<child_id>` for members, channels,
//! voice states, and roles, created lazily on first insert for a guild and
//! removed when emptied by deletion (§3 invariant 2).
//!
//! No entry has a TTL or eviction policy: memory is bounded only by what
//! the Gateway reports and by explicit `Del*` calls (§3 Lifecycles).

mod channels;
mod flags;
mod guilds;
mod members;
mod messages;
mod reference;
mod resource;
mod roles;
mod stats;
mod thread_members;
mod users;
mod voice_states;

pub use flags::CacheFlags;
pub use reference::Reference;
pub use resource::GuildResource;
pub use stats::InMemoryCacheStats;

use dashmap::DashMap;
use embergate_model::{
    Channel, ChannelId, Guild, GuildId, Message, MessageId, Role, RoleId, User, UserId,
    VoiceState,
};
use flags::AtomicCacheFlags;
use std::collections::HashSet;

/// The concurrent, process-wide cache. One instance per client; shared by
/// every shard's dispatcher.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    flags: AtomicCacheFlags,

    pub(crate) users: DashMap<UserId, User>,
    pub(crate) guilds: DashMap<GuildId, Guild>,
    pub(crate) members: DashMap<(GuildId, UserId), embergate_model::Member>,
    pub(crate) channels: DashMap<ChannelId, Channel>,
    pub(crate) roles: DashMap<RoleId, GuildResource<Role>>,
    pub(crate) messages: DashMap<MessageId, Message>,
    pub(crate) voice_states: DashMap<(GuildId, UserId), VoiceState>,
    pub(crate) thread_members: DashMap<(ChannelId, UserId), embergate_model::ThreadMember>,

    pub(crate) guild_members: DashMap<GuildId, HashSet<UserId>>,
    pub(crate) guild_channels: DashMap<GuildId, HashSet<ChannelId>>,
    pub(crate) guild_voice_states: DashMap<GuildId, HashSet<UserId>>,
    pub(crate) guild_roles: DashMap<GuildId, HashSet<RoleId>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(flags: CacheFlags) -> Self {
        Self {
            flags: AtomicCacheFlags::new(flags),
            ..Self::default()
        }
    }

    pub fn flags(&self) -> CacheFlags {
        self.flags.get()
    }

    /// Replace the active feature flags. Not synchronized against
    /// concurrent `Put*`/`Has*` calls; see [`flags::AtomicCacheFlags`]'s
    /// docs for why that's acceptable (§9 design note).
    pub fn set_flags(&self, flags: CacheFlags) {
        self.flags.set(flags);
    }

    pub fn stats(&self) -> InMemoryCacheStats<'_> {
        InMemoryCacheStats::new(self)
    }

    fn enabled(&self, flag: CacheFlags) -> bool {
        self.flags().contains(flag)
    }

    /// Remove every entry from every store. Used by tests and by a client
    /// that wants to drop everything on a non-resumable reconnect.
    pub fn clear(&self) {
        self.users.clear();
        self.guilds.clear();
        self.members.clear();
        self.channels.clear();
        self.roles.clear();
        self.messages.clear();
        self.voice_states.clear();
        self.thread_members.clear();
        self.guild_members.clear();
        self.guild_channels.clear();
        self.guild_voice_states.clear();
        self.guild_roles.clear();
    }
}

/// Insert `child` into the guild index for `guild_id`, creating the bucket
/// if this is the first child seen for that guild (§3 invariant 2).
fn index_insert<C: Eq + std::hash::Hash>(
    index: &DashMap<GuildId, HashSet<C>>,
    guild_id: GuildId,
    child: C,
) {
    index.entry(guild_id).or_default().insert(child);
}

/// Remove `child` from the guild index for `guild_id`, dropping the bucket
/// entirely if it becomes empty (§3 invariant 2).
fn index_remove<C: Eq + std::hash::Hash>(
    index: &DashMap<GuildId, HashSet<C>>,
    guild_id: GuildId,
    child: &C,
) {
    let Some(mut entry) = index.get_mut(&guild_id) else {
        return;
    };
    entry.remove(child);
    if entry.is_empty() {
        drop(entry);
        index.remove(&guild_id);
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryCache;
    use static_assertions::assert_impl_all;

    assert_impl_all!(InMemoryCache: Send, Sync);
}
