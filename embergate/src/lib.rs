//! # embergate
//!
//! `embergate` is an asynchronous Discord gateway client core: a sharded
//! WebSocket connection state machine, a dispatcher that turns decoded
//! events into cache updates and callbacks, and a concurrent in-memory
//! cache of the entities those events describe.
//!
//! This crate is a skeleton crate: it re-exports the individual
//! `embergate-*` crates so applications can depend on one crate instead of
//! four. Each can also be depended on directly if you only need, say, the
//! wire model without the gateway connection machinery.
//!
//! ## Crates
//!
//! ### `embergate-model`
//!
//! Wire types for the Discord API: guilds, channels, messages, gateway
//! payloads, `Intents`, and the `Id<Marker>` snowflake family. No networking
//! of its own, so it is useful on its own for writing a custom gateway
//! client or a REST layer.
//!
//! ### `embergate-gateway`
//!
//! The `Shard` protocol state machine (connect, identify or resume,
//! heartbeat, reconnect) and the `ShardManager` that runs a whole cluster of
//! them, plus the `Dispatcher` that applies cache side effects and fans
//! decoded events out to registered callbacks.
//!
//! ### `embergate-gateway-queue`
//!
//! The `IdentifyLimiter` trait `ShardManager` calls to serialize Identify
//! attempts across the process (or, via a custom implementation, a whole
//! cluster of processes) at Discord's required rate.
//!
//! ### `embergate-cache-inmemory`
//!
//! `InMemoryCache`, a `dashmap`-backed cache of guilds, channels, members,
//! roles, messages, and voice states, kept current by the gateway's
//! `Dispatcher`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embergate::{
//!     gateway::{Config, ShardManager, ShardManagerConfig},
//!     cache_inmemory::InMemoryCache,
//!     model::gateway::Intents,
//! };
//! use std::{env, sync::Arc};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let token = env::var("DISCORD_TOKEN")?;
//! let intents = Intents::GUILDS | Intents::GUILD_MESSAGES;
//!
//! let manager_config = ShardManagerConfig::builder(&token, 1, intents).build();
//! let shard_config = Config::builder(&token, intents).build();
//! let cache = Arc::new(InMemoryCache::new());
//!
//! let manager = ShardManager::new(manager_config, shard_config, cache);
//! manager.register(|shard_id, event| {
//!     tracing::debug!(shard_id, ?event, "received event");
//! });
//! manager.start();
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under [ISC][LICENSE.md].
//!
//! [LICENSE.md]: https://github.com/embergate-rs/embergate/blob/main/LICENSE.md

#[cfg(feature = "cache-inmemory")]
pub extern crate embergate_cache_inmemory as cache_inmemory;

#[cfg(feature = "gateway")]
pub extern crate embergate_gateway as gateway;

#[cfg(feature = "gateway-queue")]
pub extern crate embergate_gateway_queue as gateway_queue;

#[cfg(feature = "model")]
pub extern crate embergate_model as model;
