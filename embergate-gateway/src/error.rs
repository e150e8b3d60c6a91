//! The crate-wide error type returned by fallible [`Shard`] and
//! [`ShardManager`] operations.
//!
//! [`Shard`]: crate::shard::Shard
//! [`ShardManager`]: crate::manager::ShardManager

use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// An operation on a shard or shard manager failed.
#[derive(Debug)]
pub struct Error {
    kind: ErrorType,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub(crate) fn new(kind: ErrorType, source: Option<Box<dyn StdError + Send + Sync>>) -> Self {
        Self { kind, source }
    }

    /// Immutable reference to the type of error that occurred.
    #[must_use = "retrieving the type has no effect if left unused"]
    pub const fn kind(&self) -> &ErrorType {
        &self.kind
    }

    /// Consume the error, returning the owned error type and the source
    /// error, if any.
    #[must_use = "consuming the error into its parts has no effect if left unused"]
    pub fn into_parts(self) -> (ErrorType, Option<Box<dyn StdError + Send + Sync>>) {
        (self.kind, self.source)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.kind {
            ErrorType::Connecting { url } => {
                write!(f, "connecting to the gateway at {url} failed")
            }
            ErrorType::ParsingUrl { url } => write!(f, "the gateway url {url:?} is invalid"),
            ErrorType::Sending => f.write_str("sending a message over the websocket failed"),
            ErrorType::Compression => {
                f.write_str("a compressed frame could not be decompressed")
            }
            ErrorType::Deserializing => f.write_str("a gateway payload could not be deserialized"),
            ErrorType::Serializing => f.write_str("a gateway payload could not be serialized"),
            ErrorType::IdTooLarge { id, total } => {
                write!(f, "shard id {id} is not less than total shard count {total}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn StdError + 'static))
    }
}

/// The type of [`Error`] that occurred.
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorType {
    /// Establishing the websocket connection failed.
    Connecting {
        /// URL that was being connected to.
        url: String,
    },
    /// The gateway URL could not be parsed.
    ParsingUrl {
        /// URL that failed to parse.
        url: String,
    },
    /// A message could not be written to the websocket.
    Sending,
    /// A compressed frame could not be decompressed.
    Compression,
    /// A payload could not be deserialized.
    Deserializing,
    /// A payload could not be serialized.
    Serializing,
    /// `shard_id` was not less than `total_shards`.
    IdTooLarge {
        /// The out-of-range shard id.
        id: u64,
        /// The configured total shard count.
        total: u64,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
