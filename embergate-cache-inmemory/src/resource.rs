//! A cached value paired with the guild it belongs to.

use embergate_model::GuildId;
use std::ops::Deref;

/// A value known to belong to exactly one guild, alongside that guild's id.
/// Roles are stored this way so a reader holding only a `RoleId` can still
/// learn which guild to target for a guild-scoped delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuildResource<T> {
    pub(crate) guild_id: GuildId,
    pub(crate) value: T,
}

impl<T> GuildResource<T> {
    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T> Deref for GuildResource<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}
