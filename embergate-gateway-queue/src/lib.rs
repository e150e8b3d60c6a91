//! `IdentifyLimiter`: a globally shared gate on Gateway Identify operations.
//!
//! Discord rate-limits how often any one application may open a new Gateway
//! session, independent of shard count. Every [`embergate_gateway::Shard`]
//! in a [`embergate_gateway::ShardManager`] shares one
//! [`IdentifyLimiter`], so this lives in its own leaf crate ahead of the
//! gateway crate in the dependency order, following `twilight-gateway-queue`.

mod limiter;
mod local;

pub use limiter::IdentifyLimiter;
pub use local::LocalIdentifyLimiter;
