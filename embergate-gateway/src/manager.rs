//! Runs a set of shards together: spawns one task per shard id, shares a
//! single [`Dispatcher`] (and the `IdentifyLimiter` carried by their
//! [`Config`]) across all of them, and exposes aggregate introspection.

use crate::{
    config::{Config, ShardManagerConfig},
    dispatch::Dispatcher,
    error::Error,
    shard::{Information, Shard, DEFAULT_GATEWAY_URL},
};
use embergate_cache_inmemory::InMemoryCache;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::task::JoinHandle;

/// Owns and runs every shard for one bot process.
///
/// Per §4.2: an empty `shard_ids` in the configuration means "manage every
/// shard from `0` to `total_shards - 1`". Every shard is built from a clone
/// of the same `Config`, so they all share one `IdentifyLimiter` instance
/// (cloning `Config` only clones the `Arc` pointing at it) and serialize
/// Identify attempts at the process (or cluster, if the limiter is remote)
/// level rather than per shard.
pub struct ShardManager {
    shards: HashMap<u64, Arc<Shard>>,
    handles: Mutex<HashMap<u64, JoinHandle<Result<(), Error>>>>,
    dispatcher: Arc<Dispatcher>,
}

impl ShardManager {
    /// Build a manager for every shard id named by `manager_config`, each
    /// running with its own clone of `shard_config` against the default
    /// gateway host.
    pub fn new(
        manager_config: ShardManagerConfig,
        shard_config: Config,
        cache: Arc<InMemoryCache>,
    ) -> Self {
        Self::with_gateway_url(manager_config, shard_config, cache, DEFAULT_GATEWAY_URL)
    }

    /// As [`ShardManager::new`], but against a non-default gateway host.
    /// Exists for tests and self-hosted gateway-compatible endpoints.
    pub fn with_gateway_url(
        manager_config: ShardManagerConfig,
        shard_config: Config,
        cache: Arc<InMemoryCache>,
        gateway_url: impl Into<String>,
    ) -> Self {
        let gateway_url = gateway_url.into();
        let dispatcher = Arc::new(Dispatcher::new(cache, shard_config.async_dispatch()));
        let total_shards = manager_config.total_shards();

        let shards = manager_config
            .shard_ids_or_all()
            .into_iter()
            .map(|id| {
                let shard = Arc::new(Shard::new(
                    id,
                    total_shards,
                    shard_config.clone(),
                    Arc::clone(&dispatcher),
                    gateway_url.clone(),
                ));
                (id, shard)
            })
            .collect();

        Self {
            shards,
            handles: Mutex::new(HashMap::new()),
            dispatcher,
        }
    }

    /// Register a callback invoked for every event any managed shard
    /// decodes.
    pub fn register(&self, handler: impl Fn(u64, crate::dispatch::Event) + Send + Sync + 'static) {
        self.dispatcher.register(handler);
    }

    /// Spawn every managed shard's connection loop. Idempotent: a shard
    /// already running is left alone.
    pub fn start(&self) {
        let mut handles = self
            .handles
            .lock()
            .expect("shard manager handles mutex poisoned");

        for (&id, shard) in &self.shards {
            if handles.contains_key(&id) {
                continue;
            }

            let shard = Arc::clone(shard);
            handles.insert(id, tokio::spawn(async move { shard.run().await }));
        }
    }

    /// Request every managed shard shut down. Idempotent; safe to call
    /// without a preceding [`ShardManager::start`].
    pub fn shutdown(&self) {
        for shard in self.shards.values() {
            shard.shutdown();
        }
    }

    /// Number of shards this manager owns.
    pub fn shard_count(&self) -> u64 {
        self.shards.len() as u64
    }

    /// Snapshots of every managed shard, keyed by id.
    pub fn shards(&self) -> HashMap<u64, Information> {
        self.shards
            .iter()
            .map(|(&id, shard)| (id, shard.info()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ShardManager;
    use crate::config::{Config, ShardManagerConfig};
    use embergate_cache_inmemory::InMemoryCache;
    use embergate_model::gateway::Intents;
    use std::sync::Arc;

    fn config() -> Config {
        Config::builder("token", Intents::default()).build()
    }

    #[test]
    fn manages_every_shard_in_the_configured_range() {
        let manager_config = ShardManagerConfig::builder("token", 3, Intents::default()).build();
        let manager = ShardManager::new(manager_config, config(), Arc::new(InMemoryCache::new()));

        assert_eq!(manager.shard_count(), 3);
        let ids: std::collections::HashSet<u64> = manager.shards().into_keys().collect();
        assert_eq!(ids, [0, 1, 2].into_iter().collect());
    }

    #[test]
    fn explicit_shard_ids_are_the_only_ones_managed() {
        let manager_config = ShardManagerConfig::builder("token", 8, Intents::default())
            .shard_ids(vec![2, 5])
            .build();
        let manager = ShardManager::new(manager_config, config(), Arc::new(InMemoryCache::new()));

        assert_eq!(manager.shard_count(), 2);
        let ids: std::collections::HashSet<u64> = manager.shards().into_keys().collect();
        assert_eq!(ids, [2, 5].into_iter().collect());
    }
}
