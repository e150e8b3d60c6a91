//! Guild role entity.

use crate::id::{GuildId, RoleId};
use serde::{Deserialize, Serialize};

/// RGB role color triple, introduced alongside role gradients; `secondary`
/// and `tertiary` are `None` for a solid-color role.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RoleColors {
    pub primary_color: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary_color: Option<u32>,
}

bitflags::bitflags! {
    #[derive(Default)]
    pub struct RoleFlags: u64 {
        const IN_PROMPT = 1 << 0;
    }
}

impl<'de> Deserialize<'de> for RoleFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u64::deserialize(deserializer)?))
    }
}

impl Serialize for RoleFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RoleTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<crate::id::UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<crate::id::Id<crate::id::ApplicationMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "premium_subscriber")]
    pub premium_subscriber: Option<()>,
}

/// Discord represents "this flag is present" as a JSON `null` value rather
/// than by the key's absence; a bare `Option<()>` with `skip_serializing_if`
/// would instead omit the key entirely, so this module hand-rolls the
/// null-means-true encoding.
mod premium_subscriber {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(_: &Option<()>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_none()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<()>, D::Error> {
        Option::<()>::deserialize(deserializer).map(|_| Some(()))
    }
}

/// A guild role. `guild_id` is not present on the wire inside `GUILD_CREATE`
/// (it's implied by the enclosing guild); the dispatcher fixes it up from
/// the enclosing guild's id immediately after decode, per the role
/// `guild_id` fix-up design note — never as a hidden side effect of field
/// access, and never left unset once the role is cached.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    pub name: String,
    #[serde(default)]
    pub position: i64,
    pub colors: RoleColors,
    pub permissions: String,
    #[serde(default)]
    pub flags: RoleFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<RoleTags>,
}

impl Role {
    /// Attach the enclosing guild's id. Idempotent; called once by the
    /// `GUILD_CREATE`/`GUILD_ROLE_*` decoders, never by callers reading the
    /// role back out of the cache.
    pub fn with_guild_id(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn role_omits_guild_id_until_fixed_up() {
        let role: Role = serde_json::from_str(
            r#"{"id":"1","name":"admin","colors":{"primary_color":0},"permissions":"0"}"#,
        )
        .unwrap();

        assert_eq!(role.guild_id, None);

        let fixed = role.with_guild_id(42.into());
        assert_eq!(fixed.guild_id.unwrap().get(), 42);
    }
}
