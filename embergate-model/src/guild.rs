//! Guild entity.

use crate::id::{GuildId, UserId};
use serde::{Deserialize, Serialize};

/// A Discord server.
///
/// `GUILD_CREATE` payloads carry far more than this (channels, roles,
/// members, voice states, presences); those are decoded separately by the
/// dispatcher and cached under their own keys per §4.4. This type holds
/// only the guild-level fields.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Guild {
    pub id: GuildId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash: Option<String>,
    #[serde(default)]
    pub owner_id: UserId,
    #[serde(default)]
    pub unavailable: bool,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Guild {
    /// The URL-path fragment for this guild's banner image, or `None` if it
    /// has none set.
    ///
    /// The original implementation this crate is descended from tested
    /// `icon.is_some()` here, which meant a guild with an icon but no banner
    /// reported a banner URL anyway; that was a bug. This tests `banner`.
    pub fn banner_url(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// The URL-path fragment for this guild's splash image, or `None` if it
    /// has none set. See [`Guild::banner_url`] for why this tests `splash`
    /// and not `icon`.
    pub fn splash_url(&self) -> Option<&str> {
        self.splash.as_deref()
    }
}

/// An unavailable-guild stub as sent in the `READY` payload's `guilds` array;
/// every guild a bot is in arrives this way first, then is replaced by a
/// full [`Guild`] via `GUILD_CREATE` once Discord has it ready to send.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct UnavailableGuild {
    pub id: GuildId,
    #[serde(default)]
    pub unavailable: bool,
}

impl From<UnavailableGuild> for Guild {
    fn from(unavailable: UnavailableGuild) -> Self {
        Self {
            id: unavailable.id,
            name: String::new(),
            icon: None,
            banner: None,
            splash: None,
            owner_id: UserId::UNSET,
            unavailable: unavailable.unavailable,
            features: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Guild, UnavailableGuild};

    #[test]
    fn banner_and_splash_url_test_their_own_field() {
        let guild = Guild {
            id: 1.into(),
            name: "test".into(),
            icon: Some("icon-hash".into()),
            banner: None,
            splash: None,
            owner_id: 2.into(),
            unavailable: false,
            features: Vec::new(),
        };

        assert_eq!(guild.banner_url(), None);
        assert_eq!(guild.splash_url(), None);
    }

    #[test]
    fn unavailable_guild_promotes_to_guild() {
        let unavailable: UnavailableGuild =
            serde_json::from_str(r#"{"id":"111","unavailable":true}"#).unwrap();
        let guild: Guild = unavailable.into();

        assert_eq!(guild.id.get(), 111);
        assert!(guild.unavailable);
    }
}
