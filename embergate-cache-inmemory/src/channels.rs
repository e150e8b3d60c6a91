//! Channel store operations, including the guild→channels secondary index.

use crate::{index_insert, index_remove, CacheFlags, InMemoryCache, Reference};
use embergate_model::{Channel, ChannelId, GuildId};
use std::collections::HashMap;

impl InMemoryCache {
    /// Upsert a channel. Private channels (`Dm`/`GroupDm`) are stored in
    /// the primary map only; guild channels and threads are additionally
    /// indexed under their guild (primary store first, then index, per
    /// §4.5's multi-store write ordering).
    pub fn put_channel(&self, channel: Channel) {
        if !self.enabled(CacheFlags::CHANNELS) {
            return;
        }

        let id = channel.id();
        let guild_id = channel.guild_id();
        self.channels.insert(id, channel);

        if let Some(guild_id) = guild_id {
            index_insert(&self.guild_channels, guild_id, id);
        }
    }

    pub fn channel(&self, channel_id: ChannelId) -> Option<Reference<'_, ChannelId, Channel>> {
        self.channels.get(&channel_id).map(Reference::new)
    }

    pub fn has_channel(&self, channel_id: ChannelId) -> bool {
        self.enabled(CacheFlags::CHANNELS) && self.channels.contains_key(&channel_id)
    }

    /// Remove a channel, returning whether one was present. Cascades to
    /// the guild index: primary first, then index (§4.5).
    pub fn delete_channel(&self, channel_id: ChannelId) -> bool {
        let Some((_, channel)) = self.channels.remove(&channel_id) else {
            return false;
        };

        if let Some(guild_id) = channel.guild_id() {
            index_remove(&self.guild_channels, guild_id, &channel_id);
        }

        true
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// All channels still present in the primary store for `guild_id`. A
    /// channel listed in the index but concurrently deleted is silently
    /// omitted rather than causing this to fail (§3 invariant 3, §9
    /// tolerated skew): the index is snapshotted and released before the
    /// primary store is consulted, so no lock is ever held across both.
    pub fn guild_channels(&self, guild_id: GuildId) -> Option<HashMap<ChannelId, Channel>> {
        let ids: Vec<ChannelId> = self.guild_channels.get(&guild_id)?.iter().copied().collect();

        Some(
            ids.into_iter()
                .filter_map(|id| self.channels.get(&id).map(|c| (id, c.clone())))
                .collect(),
        )
    }

    pub fn count_guild_channels(&self, guild_id: GuildId) -> usize {
        self.guild_channels
            .get(&guild_id)
            .map_or(0, |ids| ids.len())
    }

    /// Remove the guild's channel index and every channel it names from
    /// the primary store.
    pub fn delete_guild_channels(&self, guild_id: GuildId) {
        if let Some((_, ids)) = self.guild_channels.remove(&guild_id) {
            for id in ids {
                self.channels.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::InMemoryCache;
    use embergate_model::Channel;

    fn text_channel(json: &str) -> Channel {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn guild_channels_returns_only_present_entries() {
        let cache = InMemoryCache::new();
        cache.put_channel(text_channel(
            r#"{"id":"1","type":0,"guild_id":"9","name":"a"}"#,
        ));
        cache.put_channel(text_channel(
            r#"{"id":"2","type":0,"guild_id":"9","name":"b"}"#,
        ));

        assert_eq!(cache.count_guild_channels(9.into()), 2);

        cache.delete_channel(1.into());
        let channels = cache.guild_channels(9.into()).unwrap();
        assert_eq!(channels.len(), 1);
        assert!(channels.contains_key(&2.into()));
    }

    #[test]
    fn delete_guild_channels_drops_index_and_children() {
        let cache = InMemoryCache::new();
        cache.put_channel(text_channel(
            r#"{"id":"1","type":0,"guild_id":"9","name":"a"}"#,
        ));

        cache.delete_guild_channels(9.into());
        assert!(cache.guild_channels(9.into()).is_none());
        assert!(cache.channel(1.into()).is_none());
    }

    #[test]
    fn private_channels_are_not_indexed_by_guild() {
        let cache = InMemoryCache::new();
        cache.put_channel(text_channel(r#"{"id":"5","type":1,"recipients":["1"]}"#));
        assert!(cache.channel(5.into()).is_some());
    }
}
