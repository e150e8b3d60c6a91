//! User store operations.

use crate::{CacheFlags, InMemoryCache, Reference};
use embergate_model::{User, UserId};

impl InMemoryCache {
    /// Upsert a user. No-op if [`CacheFlags::USERS`] is disabled.
    pub fn put_user(&self, user: User) {
        if !self.enabled(CacheFlags::USERS) {
            return;
        }
        self.users.insert(user.id, user);
    }

    pub fn user(&self, user_id: UserId) -> Option<Reference<'_, UserId, User>> {
        self.users.get(&user_id).map(Reference::new)
    }

    pub fn has_user(&self, user_id: UserId) -> bool {
        self.enabled(CacheFlags::USERS) && self.users.contains_key(&user_id)
    }

    /// Remove a user, returning whether one was present.
    pub fn delete_user(&self, user_id: UserId) -> bool {
        self.users.remove(&user_id).is_some()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::{CacheFlags, InMemoryCache};
    use embergate_model::User;

    fn user(id: u64) -> User {
        User {
            id: id.into(),
            username: "ferris".into(),
            discriminator: "0".into(),
            ..Default::default()
        }
    }

    #[test]
    fn put_is_noop_when_disabled() {
        let cache = InMemoryCache::with_flags(CacheFlags::empty());
        cache.put_user(user(1));
        assert_eq!(cache.user_count(), 0);
    }

    #[test]
    fn has_user_respects_flag_even_if_present() {
        let cache = InMemoryCache::new();
        cache.put_user(user(1));
        assert!(cache.has_user(1.into()));

        cache.set_flags(CacheFlags::empty());
        assert!(!cache.has_user(1.into()));
        // Get never consults flags.
        assert!(cache.user(1.into()).is_some());
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let cache = InMemoryCache::new();
        assert!(!cache.delete_user(1.into()));

        cache.put_user(user(1));
        assert!(cache.delete_user(1.into()));
        assert!(!cache.delete_user(1.into()));
    }
}
