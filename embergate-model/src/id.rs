//! Typed Snowflake identifiers.
//!
//! A [`Snowflake`] is a 64-bit integer whose high bits encode a creation
//! timestamp relative to the Discord epoch; comparing two snowflakes orders
//! them by creation time. [`Id`] wraps one with a zero-sized marker type so
//! that, say, a [`GuildId`] can't be passed where a [`ChannelId`] is
//! expected, without paying for it at runtime: `Id<T>` is a `u64` in memory.
//!
//! The all-zero value is the sentinel "unset" snowflake (see
//! [`Id::is_unset`]); it is preserved on the wire rather than mapped to
//! `None`; domain code should prefer [`Id::is_unset`] or an `Option<Id<T>>`
//! at API boundaries.

use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    hash::Hash,
    marker::PhantomData,
};

/// Raw 64-bit snowflake value, before it is tagged with a marker.
pub type Snowflake = u64;

/// Marker trait for the kind of resource an [`Id`] identifies.
///
/// Implemented only by the zero-sized marker types in this module; not
/// meant to be implemented outside this crate.
pub trait Marker: Debug + Send + Sync + 'static {}

macro_rules! markers {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Eq, PartialEq)]
            pub enum $name {}

            impl Marker for $name {}
        )*
    };
}

markers! {
    /// Marker for [`Id`]s that identify a user.
    UserMarker,
    /// Marker for [`Id`]s that identify a guild.
    GuildMarker,
    /// Marker for [`Id`]s that identify a channel (of any variant).
    ChannelMarker,
    /// Marker for [`Id`]s that identify a role.
    RoleMarker,
    /// Marker for [`Id`]s that identify a message.
    MessageMarker,
    /// Marker for [`Id`]s that identify an application.
    ApplicationMarker,
}

/// A Snowflake tagged with the kind of resource it identifies.
#[derive(Eq, PartialEq, Hash)]
pub struct Id<T: Marker> {
    value: Snowflake,
    phantom: PhantomData<fn() -> T>,
}

impl<T: Marker> Id<T> {
    /// The sentinel "unset" id: all bits zero.
    pub const UNSET: Self = Self::new(0);

    /// Create an id from a raw snowflake value.
    pub const fn new(value: Snowflake) -> Self {
        Self {
            value,
            phantom: PhantomData,
        }
    }

    /// The raw snowflake value.
    pub const fn get(self) -> Snowflake {
        self.value
    }

    /// Whether this is the sentinel "unset" id.
    pub const fn is_unset(self) -> bool {
        self.value == 0
    }
}

impl<T: Marker> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Marker> Copy for Id<T> {}

impl<T: Marker> Default for Id<T> {
    /// The [`Id::UNSET`] sentinel, not a meaningful real id.
    fn default() -> Self {
        Self::UNSET
    }
}

impl<T: Marker> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T: Marker> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl<T: Marker> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Marker> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Marker> From<Snowflake> for Id<T> {
    fn from(value: Snowflake) -> Self {
        Self::new(value)
    }
}

/// Discord sends most snowflakes as JSON strings to avoid precision loss in
/// clients with 53-bit floats; accept either representation on the way in,
/// always emit a string on the way out.
impl<T: Marker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

impl<'de, T: Marker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor<T: Marker>(PhantomData<fn() -> T>);

        impl<'de, T: Marker> Visitor<'de> for IdVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a snowflake as a string or integer")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Id::new(v))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map(Id::new).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor(PhantomData))
    }
}

/// Id of a user.
pub type UserId = Id<UserMarker>;
/// Id of a guild.
pub type GuildId = Id<GuildMarker>;
/// Id of a channel.
pub type ChannelId = Id<ChannelMarker>;
/// Id of a role.
pub type RoleId = Id<RoleMarker>;
/// Id of a message.
pub type MessageId = Id<MessageMarker>;
/// Id of an application.
pub type ApplicationId = Id<ApplicationMarker>;

#[cfg(test)]
mod tests {
    use super::{GuildId, Id};
    use static_assertions::assert_impl_all;
    use std::fmt::Debug;

    assert_impl_all!(GuildId: Clone, Copy, Debug, Eq, Ord, Send, Sync);

    #[test]
    fn unset_is_zero() {
        assert!(GuildId::UNSET.is_unset());
        assert!(GuildId::new(0).is_unset());
        assert!(!GuildId::new(1).is_unset());
    }

    #[test]
    fn deserializes_from_string_or_integer() {
        let from_string: GuildId = serde_json::from_str(r#""123""#).unwrap();
        let from_int: GuildId = serde_json::from_str("123").unwrap();
        assert_eq!(from_string, from_int);
        assert_eq!(from_string.get(), 123);
    }

    #[test]
    fn serializes_as_string() {
        let id: GuildId = Id::new(123);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""123""#);
    }

    #[test]
    fn orders_by_value() {
        assert!(GuildId::new(1) < GuildId::new(2));
    }
}
