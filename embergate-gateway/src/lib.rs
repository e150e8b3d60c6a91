//! Gateway protocol core for Embergate: the per-shard connection state
//! machine, a manager that runs a whole cluster of shards, and the dispatch
//! layer that turns decoded events into cache updates and user callbacks.
//!
//! [`ShardManager`] is the entry point most applications want; [`Shard`] is
//! exposed directly for single-shard use and for embedding in a custom
//! manager.

mod compression;
mod config;
mod dispatch;
mod error;
mod json;
mod latency;
mod manager;
mod message;
mod shard;

pub use config::{Config, ConfigBuilder, ShardManagerConfig, ShardManagerConfigBuilder};
pub use dispatch::{Dispatcher, Event, GuildCreate, Handler, Update};
pub use error::{Error, ErrorType, Result};
pub use latency::{Latency, RecentLatencyIter};
pub use manager::ShardManager;
pub use message::{CloseFrame, Message};
pub use shard::{Information, Shard, ShardStage, DEFAULT_GATEWAY_URL};

pub use embergate_gateway_queue::{IdentifyLimiter, LocalIdentifyLimiter};
