//! A borrowed handle into the cache, returned from single-key reads.

use dashmap::mapref::one::Ref;
use std::ops::Deref;

/// Wraps a `dashmap` entry guard so cache getters don't leak `dashmap` as
/// part of the public API. Holding one blocks writers to that key's shard
/// for as long as it's alive; callers should clone out what they need and
/// drop it rather than holding it across an `.await` or a subsequent cache
/// call.
pub struct Reference<'a, K, V> {
    inner: Ref<'a, K, V>,
}

impl<'a, K: Eq + std::hash::Hash, V> Reference<'a, K, V> {
    pub(crate) fn new(inner: Ref<'a, K, V>) -> Self {
        Self { inner }
    }

    pub fn key(&self) -> &K {
        self.inner.key()
    }

    pub fn value(&self) -> &V {
        self.inner.value()
    }
}

impl<K: Eq + std::hash::Hash, V> Deref for Reference<'_, K, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.inner.value()
    }
}
