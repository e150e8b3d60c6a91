//! Voice state store operations, including the guild→voice-states index.

use crate::{index_insert, index_remove, CacheFlags, InMemoryCache, Reference};
use embergate_model::{GuildId, UserId, VoiceState};
use std::collections::HashMap;

impl InMemoryCache {
    pub fn put_voice_state(&self, voice_state: VoiceState) {
        if !self.enabled(CacheFlags::VOICE_STATES) {
            return;
        }

        let guild_id = voice_state.guild_id;
        let user_id = voice_state.user_id;

        if voice_state.is_connected() {
            self.voice_states.insert((guild_id, user_id), voice_state);
            index_insert(&self.guild_voice_states, guild_id, user_id);
        } else {
            // A disconnect: nothing to store, just drop any prior entry.
            self.voice_states.remove(&(guild_id, user_id));
            index_remove(&self.guild_voice_states, guild_id, &user_id);
        }
    }

    pub fn voice_state(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Option<Reference<'_, (GuildId, UserId), VoiceState>> {
        self.voice_states.get(&(guild_id, user_id)).map(Reference::new)
    }

    pub fn has_voice_state(&self, guild_id: GuildId, user_id: UserId) -> bool {
        self.enabled(CacheFlags::VOICE_STATES)
            && self.voice_states.contains_key(&(guild_id, user_id))
    }

    pub fn delete_voice_state(&self, guild_id: GuildId, user_id: UserId) -> bool {
        let removed = self.voice_states.remove(&(guild_id, user_id)).is_some();
        if removed {
            index_remove(&self.guild_voice_states, guild_id, &user_id);
        }
        removed
    }

    pub fn voice_state_count(&self) -> usize {
        self.voice_states.len()
    }

    pub fn guild_voice_states(&self, guild_id: GuildId) -> Option<HashMap<UserId, VoiceState>> {
        let ids: Vec<UserId> = self
            .guild_voice_states
            .get(&guild_id)?
            .iter()
            .copied()
            .collect();

        Some(
            ids.into_iter()
                .filter_map(|id| {
                    self.voice_states
                        .get(&(guild_id, id))
                        .map(|v| (id, v.clone()))
                })
                .collect(),
        )
    }

    pub fn count_guild_voice_states(&self, guild_id: GuildId) -> usize {
        self.guild_voice_states
            .get(&guild_id)
            .map_or(0, |ids| ids.len())
    }

    pub fn delete_guild_voice_states(&self, guild_id: GuildId) {
        if let Some((_, ids)) = self.guild_voice_states.remove(&guild_id) {
            for id in ids {
                self.voice_states.remove(&(guild_id, id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::InMemoryCache;
    use embergate_model::VoiceState;

    fn connected(user_id: u64) -> VoiceState {
        serde_json::from_str(&format!(
            r#"{{"guild_id":"9","user_id":"{user_id}","channel_id":"5","session_id":"s"}}"#
        ))
        .unwrap()
    }

    #[test]
    fn disconnect_removes_rather_than_stores_sentinel() {
        let cache = InMemoryCache::new();
        cache.put_voice_state(connected(1));
        assert!(cache.has_voice_state(9.into(), 1.into()));

        let disconnect: VoiceState = serde_json::from_str(
            r#"{"guild_id":"9","user_id":"1","channel_id":"0","session_id":"s"}"#,
        )
        .unwrap();
        cache.put_voice_state(disconnect);

        assert!(!cache.has_voice_state(9.into(), 1.into()));
        assert!(cache.guild_voice_states(9.into()).is_none());
    }

    #[test]
    fn guild_voice_states_returns_only_present_entries() {
        let cache = InMemoryCache::new();
        cache.put_voice_state(connected(1));
        cache.put_voice_state(connected(2));

        assert_eq!(cache.count_guild_voice_states(9.into()), 2);
        cache.delete_voice_state(9.into(), 1.into());
        assert_eq!(cache.guild_voice_states(9.into()).unwrap().len(), 1);
    }
}
