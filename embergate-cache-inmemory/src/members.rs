//! Member store operations, including the guild→members secondary index.

use crate::{index_insert, index_remove, CacheFlags, InMemoryCache, Reference};
use embergate_model::{Member, GuildId, UserId};
use std::collections::HashMap;

impl InMemoryCache {
    /// Upsert a member. `member.guild_id` must already be fixed up by the
    /// caller (the dispatcher, from the enclosing event); this never
    /// infers it. Primary store first, then index (§4.5).
    pub fn put_member(&self, guild_id: GuildId, member: Member) {
        if !self.enabled(CacheFlags::MEMBERS) {
            return;
        }

        let user_id = member.user_id();
        self.members.insert((guild_id, user_id), member);
        index_insert(&self.guild_members, guild_id, user_id);
    }

    pub fn member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Option<Reference<'_, (GuildId, UserId), Member>> {
        self.members.get(&(guild_id, user_id)).map(Reference::new)
    }

    pub fn has_member(&self, guild_id: GuildId, user_id: UserId) -> bool {
        self.enabled(CacheFlags::MEMBERS) && self.members.contains_key(&(guild_id, user_id))
    }

    pub fn delete_member(&self, guild_id: GuildId, user_id: UserId) -> bool {
        let removed = self.members.remove(&(guild_id, user_id)).is_some();
        if removed {
            index_remove(&self.guild_members, guild_id, &user_id);
        }
        removed
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// All members still present in the primary store for `guild_id`; a
    /// member listed in the index but concurrently removed is silently
    /// omitted (§3 invariant 3, tolerated skew).
    pub fn guild_members(&self, guild_id: GuildId) -> Option<HashMap<UserId, Member>> {
        let ids: Vec<UserId> = self.guild_members.get(&guild_id)?.iter().copied().collect();

        Some(
            ids.into_iter()
                .filter_map(|id| {
                    self.members
                        .get(&(guild_id, id))
                        .map(|m| (id, m.clone()))
                })
                .collect(),
        )
    }

    pub fn count_guild_members(&self, guild_id: GuildId) -> usize {
        self.guild_members.get(&guild_id).map_or(0, |ids| ids.len())
    }

    pub fn delete_guild_members(&self, guild_id: GuildId) {
        if let Some((_, ids)) = self.guild_members.remove(&guild_id) {
            for id in ids {
                self.members.remove(&(guild_id, id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::InMemoryCache;
    use embergate_model::Member;

    fn member(user_id: u64) -> Member {
        serde_json::from_str(&format!(
            r#"{{"user":{{"id":"{user_id}","username":"ferris","discriminator":"0"}},"roles":[],"joined_at":"2021-01-01T00:00:00Z"}}"#
        ))
        .unwrap()
    }

    #[test]
    fn guild_members_returns_only_present_entries() {
        let cache = InMemoryCache::new();
        cache.put_member(9.into(), member(1));
        cache.put_member(9.into(), member(2));

        assert_eq!(cache.count_guild_members(9.into()), 2);

        cache.delete_member(9.into(), 1.into());
        let members = cache.guild_members(9.into()).unwrap();
        assert_eq!(members.len(), 1);
        assert!(members.contains_key(&2.into()));
    }

    #[test]
    fn delete_guild_members_drops_index_and_children() {
        let cache = InMemoryCache::new();
        cache.put_member(9.into(), member(1));

        cache.delete_guild_members(9.into());
        assert!(cache.guild_members(9.into()).is_none());
        assert!(!cache.has_member(9.into(), 1.into()));
    }
}
