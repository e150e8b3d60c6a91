//! The `IdentifyLimiter` contract.

use async_trait::async_trait;

/// Gates Identify operations so they don't exceed Discord's global rate for
/// opening new sessions, independent of how many shards are asking.
///
/// `wait` blocks the caller until a token is available; callers accept
/// unbounded blocking here as the cost of rate-limit correctness — there is
/// no timeout variant. The interface is pluggable (not just the one
/// in-process [`crate::LocalIdentifyLimiter`]) so a multi-process cluster
/// can hand every shard manager a limiter backed by a centralized
/// coordinator instead.
#[async_trait]
pub trait IdentifyLimiter: Send + Sync {
    /// Block until an Identify token is available, then consume it.
    async fn wait(&self);
}
