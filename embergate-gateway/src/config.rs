//! Builder-configured settings for a [`Shard`](crate::shard::Shard) and a
//! [`ShardManager`](crate::manager::ShardManager).

use embergate_gateway_queue::{IdentifyLimiter, LocalIdentifyLimiter};
use embergate_model::gateway::{payload_out::IdentifyProperties, EventTypeFlags, Intents};
use std::sync::Arc;

/// Configuration a [`Shard`](crate::shard::Shard) identifies and operates
/// with. Built via [`ConfigBuilder`].
#[derive(Clone)]
pub struct Config {
    pub(crate) token: Box<str>,
    pub(crate) intents: Intents,
    pub(crate) event_types: EventTypeFlags,
    pub(crate) identify_properties: IdentifyProperties,
    pub(crate) use_compression: bool,
    pub(crate) large_threshold: u64,
    pub(crate) async_dispatch: bool,
    pub(crate) identify_limiter: Arc<dyn IdentifyLimiter>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("intents", &self.intents)
            .field("event_types", &self.event_types)
            .field("use_compression", &self.use_compression)
            .field("large_threshold", &self.large_threshold)
            .field("async_dispatch", &self.async_dispatch)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Start building a configuration with `token` and `intents`; everything
    /// else defaults the way the teacher crate's `ShardBuilder` does.
    pub fn builder(token: impl Into<String>, intents: Intents) -> ConfigBuilder {
        ConfigBuilder::new(token, intents)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub const fn intents(&self) -> Intents {
        self.intents
    }

    pub const fn event_types(&self) -> EventTypeFlags {
        self.event_types
    }

    pub const fn identify_properties(&self) -> &IdentifyProperties {
        &self.identify_properties
    }

    pub const fn use_compression(&self) -> bool {
        self.use_compression
    }

    pub const fn large_threshold(&self) -> u64 {
        self.large_threshold
    }

    pub const fn async_dispatch(&self) -> bool {
        self.async_dispatch
    }

    pub fn identify_limiter(&self) -> Arc<dyn IdentifyLimiter> {
        Arc::clone(&self.identify_limiter)
    }
}

/// Builder for [`Config`].
#[derive(Clone)]
pub struct ConfigBuilder(Config);

impl ConfigBuilder {
    pub fn new(token: impl Into<String>, intents: Intents) -> Self {
        Self(Config {
            token: token.into().into_boxed_str(),
            intents,
            event_types: EventTypeFlags::default(),
            identify_properties: IdentifyProperties::new("embergate"),
            use_compression: true,
            large_threshold: 50,
            async_dispatch: false,
            identify_limiter: Arc::new(LocalIdentifyLimiter::default()),
        })
    }

    pub fn build(self) -> Config {
        self.0
    }

    pub const fn event_types(mut self, event_types: EventTypeFlags) -> Self {
        self.0.event_types = event_types;
        self
    }

    pub fn identify_properties(mut self, identify_properties: IdentifyProperties) -> Self {
        self.0.identify_properties = identify_properties;
        self
    }

    pub const fn use_compression(mut self, use_compression: bool) -> Self {
        self.0.use_compression = use_compression;
        self
    }

    pub const fn large_threshold(mut self, large_threshold: u64) -> Self {
        self.0.large_threshold = large_threshold;
        self
    }

    pub const fn async_dispatch(mut self, async_dispatch: bool) -> Self {
        self.0.async_dispatch = async_dispatch;
        self
    }

    pub fn identify_limiter(mut self, identify_limiter: Arc<dyn IdentifyLimiter>) -> Self {
        self.0.identify_limiter = identify_limiter;
        self
    }
}

/// Configuration for a [`ShardManager`](crate::manager::ShardManager): which
/// shards to run out of how many total, and the identify properties they
/// should all share.
#[derive(Clone, Debug)]
pub struct ShardManagerConfig {
    pub(crate) total_shards: u64,
    pub(crate) shard_ids: Vec<u64>,
    pub(crate) token: Box<str>,
    pub(crate) intents: Intents,
}

impl ShardManagerConfig {
    pub fn builder(token: impl Into<String>, total_shards: u64, intents: Intents) -> ShardManagerConfigBuilder {
        ShardManagerConfigBuilder::new(token, total_shards, intents)
    }

    pub const fn total_shards(&self) -> u64 {
        self.total_shards
    }

    /// The ids this manager is responsible for. Empty means "every shard
    /// `0..total_shards`" (see [`ShardManagerConfig::shard_ids_or_all`]).
    pub fn shard_ids(&self) -> &[u64] {
        &self.shard_ids
    }

    /// The effective set of ids to run, expanding an empty `shard_ids` to
    /// the full `0..total_shards` range (spec §4.2).
    pub fn shard_ids_or_all(&self) -> Vec<u64> {
        if self.shard_ids.is_empty() {
            (0..self.total_shards).collect()
        } else {
            self.shard_ids.clone()
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub const fn intents(&self) -> Intents {
        self.intents
    }
}

#[derive(Clone, Debug)]
pub struct ShardManagerConfigBuilder(ShardManagerConfig);

impl ShardManagerConfigBuilder {
    pub fn new(token: impl Into<String>, total_shards: u64, intents: Intents) -> Self {
        Self(ShardManagerConfig {
            total_shards,
            shard_ids: Vec::new(),
            token: token.into().into_boxed_str(),
            intents,
        })
    }

    pub fn build(self) -> ShardManagerConfig {
        self.0
    }

    pub fn shard_ids(mut self, shard_ids: Vec<u64>) -> Self {
        self.0.shard_ids = shard_ids;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ShardManagerConfig};
    use embergate_model::gateway::Intents;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Config: Clone, Send, Sync);
    assert_impl_all!(ShardManagerConfig: Clone, Send, Sync);

    #[test]
    fn builder_defaults_compression_on_and_async_dispatch_off() {
        let config = Config::builder("token", Intents::default()).build();
        assert!(config.use_compression());
        assert!(!config.async_dispatch());
    }

    #[test]
    fn empty_shard_ids_expands_to_full_range() {
        let config = ShardManagerConfig::builder("token", 3, Intents::default()).build();
        assert_eq!(config.shard_ids_or_all(), vec![0, 1, 2]);
    }

    #[test]
    fn explicit_shard_ids_are_used_as_given() {
        let config = ShardManagerConfig::builder("token", 8, Intents::default())
            .shard_ids(vec![2, 5])
            .build();
        assert_eq!(config.shard_ids_or_all(), vec![2, 5]);
    }
}
