//! Thread member store operations.
//!
//! Keyed by `(channel_id, user_id)`, gated by [`CacheFlags::THREAD_MEMBERS`]
//! rather than [`CacheFlags::MEMBERS`]: a client can cache guild members
//! without caring which of them sit in which threads, or vice versa.

use crate::{CacheFlags, InMemoryCache, Reference};
use embergate_model::{ChannelId, ThreadMember, UserId};

impl InMemoryCache {
    /// Upsert a thread member. `user_id` is supplied by the caller rather
    /// than read off `member.user_id`, since Discord omits that field on a
    /// member's own `THREAD_MEMBER_UPDATE` and the dispatcher is expected
    /// to fill it in from the event envelope before this is called.
    pub fn put_thread_member(&self, channel_id: ChannelId, user_id: UserId, member: ThreadMember) {
        if !self.enabled(CacheFlags::THREAD_MEMBERS) {
            return;
        }
        self.thread_members.insert((channel_id, user_id), member);
    }

    pub fn thread_member(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Option<Reference<'_, (ChannelId, UserId), ThreadMember>> {
        self.thread_members.get(&(channel_id, user_id)).map(Reference::new)
    }

    pub fn has_thread_member(&self, channel_id: ChannelId, user_id: UserId) -> bool {
        self.enabled(CacheFlags::THREAD_MEMBERS)
            && self.thread_members.contains_key(&(channel_id, user_id))
    }

    pub fn delete_thread_member(&self, channel_id: ChannelId, user_id: UserId) -> bool {
        self.thread_members.remove(&(channel_id, user_id)).is_some()
    }

    pub fn thread_member_count(&self) -> usize {
        self.thread_members.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::{CacheFlags, InMemoryCache};
    use embergate_model::ThreadMember;

    fn member() -> ThreadMember {
        ThreadMember {
            id: 5.into(),
            user_id: None,
            join_timestamp: "2021-01-01T00:00:00Z".into(),
            flags: 0,
        }
    }

    #[test]
    fn put_is_noop_when_disabled() {
        let cache = InMemoryCache::with_flags(CacheFlags::empty());
        cache.put_thread_member(5.into(), 1.into(), member());
        assert_eq!(cache.thread_member_count(), 0);
    }

    #[test]
    fn self_update_user_id_is_filled_in_by_caller() {
        let cache = InMemoryCache::new();
        cache.put_thread_member(5.into(), 1.into(), member());
        assert!(cache.has_thread_member(5.into(), 1.into()));
    }
}
