//! User entity.

use crate::id::UserId;
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Public flags on a [`User`], as reported by Discord.
    #[derive(Default)]
    pub struct UserFlags: u64 {
        const STAFF = 1 << 0;
        const PARTNER = 1 << 1;
        const HYPESQUAD = 1 << 2;
        const BUG_HUNTER_LEVEL_1 = 1 << 3;
        const HYPESQUAD_ONLINE_HOUSE_1 = 1 << 6;
        const HYPESQUAD_ONLINE_HOUSE_2 = 1 << 7;
        const HYPESQUAD_ONLINE_HOUSE_3 = 1 << 8;
        const PREMIUM_EARLY_SUPPORTER = 1 << 9;
        const TEAM_PSEUDO_USER = 1 << 10;
        const BUG_HUNTER_LEVEL_2 = 1 << 14;
        const VERIFIED_BOT = 1 << 16;
        const VERIFIED_DEVELOPER = 1 << 17;
        const CERTIFIED_MODERATOR = 1 << 18;
        const BOT_HTTP_INTERACTIONS = 1 << 19;
        const ACTIVE_DEVELOPER = 1 << 22;
    }
}

/// A Discord user: the identity behind a [`crate::member::Member`] or a
/// message author. Shared across every guild the user is visible in.
///
/// `Default` exists so a synthesized `old` [`crate::message::Message`] can
/// carry a recovered author without requiring the whole struct to become
/// `Option`-wrapped; it is never the right value for a real user.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub discriminator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub system: bool,
    #[serde(default, rename = "public_flags")]
    pub flags: UserFlags,
}

impl UserFlags {
    pub const fn bits_value(self) -> u64 {
        self.bits()
    }
}

impl<'de> Deserialize<'de> for UserFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u64::deserialize(deserializer)?))
    }
}

impl Serialize for UserFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::{User, UserFlags};

    #[test]
    fn decodes_minimal_user() {
        let user: User = serde_json::from_str(
            r#"{"id":"1","username":"ferris","discriminator":"0"}"#,
        )
        .unwrap();

        assert_eq!(user.id.get(), 1);
        assert_eq!(user.global_name, None);
        assert_eq!(user.flags, UserFlags::empty());
    }

    #[test]
    fn decodes_flags() {
        let user: User = serde_json::from_str(
            r#"{"id":"1","username":"ferris","discriminator":"0","public_flags":1}"#,
        )
        .unwrap();

        assert!(user.flags.contains(UserFlags::STAFF));
    }
}
