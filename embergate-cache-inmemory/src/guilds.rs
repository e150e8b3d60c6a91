//! Guild store operations.

use crate::{CacheFlags, InMemoryCache, Reference};
use embergate_model::{Guild, GuildId};

impl InMemoryCache {
    pub fn put_guild(&self, guild: Guild) {
        if !self.enabled(CacheFlags::GUILDS) {
            return;
        }
        self.guilds.insert(guild.id, guild);
    }

    pub fn guild(&self, guild_id: GuildId) -> Option<Reference<'_, GuildId, Guild>> {
        self.guilds.get(&guild_id).map(Reference::new)
    }

    pub fn has_guild(&self, guild_id: GuildId) -> bool {
        self.enabled(CacheFlags::GUILDS) && self.guilds.contains_key(&guild_id)
    }

    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }

    /// Remove a guild and every member/channel/role/voice-state indexed
    /// under it. Gateway guild deletion cascades; this mirrors that.
    pub fn delete_guild(&self, guild_id: GuildId) -> bool {
        let removed = self.guilds.remove(&guild_id).is_some();
        self.delete_guild_members(guild_id);
        self.delete_guild_channels(guild_id);
        self.delete_guild_roles(guild_id);
        self.delete_guild_voice_states(guild_id);
        removed
    }
}

#[cfg(test)]
mod tests {
    use crate::{CacheFlags, InMemoryCache};
    use embergate_model::{Guild, UnavailableGuild};

    fn guild(id: u64) -> Guild {
        UnavailableGuild {
            id: id.into(),
            unavailable: true,
        }
        .into()
    }

    #[test]
    fn ready_style_unavailable_guild_caches() {
        let cache = InMemoryCache::new();
        cache.put_guild(guild(111));
        assert!(cache.guild(111.into()).unwrap().unavailable);
    }

    #[test]
    fn put_is_noop_when_disabled() {
        let cache = InMemoryCache::with_flags(CacheFlags::empty());
        cache.put_guild(guild(1));
        assert_eq!(cache.guild_count(), 0);
    }
}
