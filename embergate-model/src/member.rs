//! Guild member entity.

use crate::{
    id::{GuildId, RoleId, UserId},
    user::User,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

bitflags::bitflags! {
    /// Per-member flags (distinct from [`crate::user::UserFlags`]).
    #[derive(Default)]
    pub struct MemberFlags: u64 {
        const DID_REJOIN = 1 << 0;
        const COMPLETED_ONBOARDING = 1 << 1;
        const BYPASSES_VERIFICATION = 1 << 2;
        const STARTED_ONBOARDING = 1 << 3;
    }
}

impl<'de> Deserialize<'de> for MemberFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u64::deserialize(deserializer)?))
    }
}

impl Serialize for MemberFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

/// A user's membership in a particular guild. Keyed by `(guild_id, user_id)`;
/// the `user` field is the shared [`User`] record, not cache-deduplicated
/// here — deduplication happens in the cache, not the wire model.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Member {
    /// Absent from most gateway payloads (it's the map key in context);
    /// populated by the decoder for guild-scoped events that carry it
    /// structurally (e.g. `GUILD_MEMBER_ADD`'s enclosing `guild_id`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default, rename = "roles")]
    pub role_ids: Vec<RoleId>,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub flags: MemberFlags,
}

impl Member {
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

#[cfg(test)]
mod tests {
    use super::Member;

    #[test]
    fn decodes_member() {
        let member: Member = serde_json::from_str(
            r#"{"user":{"id":"1","username":"ferris","discriminator":"0"},"roles":["9"],"joined_at":"2021-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(member.user_id().get(), 1);
        assert_eq!(member.role_ids[0].get(), 9);
        assert_eq!(member.guild_id, None);
    }
}
