//! A read-only facade over [`InMemoryCache`]'s entry counts.

use crate::InMemoryCache;

/// Snapshot-style counters over a cache's primary stores. Each method
/// re-reads its store's length on call; there is no single consistent
/// snapshot across methods, matching the cache's general tolerated-skew
/// posture (§9).
#[derive(Debug)]
pub struct InMemoryCacheStats<'a> {
    cache: &'a InMemoryCache,
}

impl<'a> InMemoryCacheStats<'a> {
    pub(crate) fn new(cache: &'a InMemoryCache) -> Self {
        Self { cache }
    }

    pub fn users(&self) -> usize {
        self.cache.user_count()
    }

    pub fn guilds(&self) -> usize {
        self.cache.guild_count()
    }

    pub fn members(&self) -> usize {
        self.cache.member_count()
    }

    pub fn channels(&self) -> usize {
        self.cache.channel_count()
    }

    pub fn roles(&self) -> usize {
        self.cache.role_count()
    }

    pub fn messages(&self) -> usize {
        self.cache.message_count()
    }

    pub fn voice_states(&self) -> usize {
        self.cache.voice_state_count()
    }
}

#[cfg(test)]
mod tests {
    use crate::InMemoryCache;
    use embergate_model::User;

    #[test]
    fn stats_reflect_live_store_state() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.stats().users(), 0);

        cache.put_user(User {
            id: 1.into(),
            username: "ferris".into(),
            discriminator: "0".into(),
            ..Default::default()
        });

        assert_eq!(cache.stats().users(), 1);
    }
}
