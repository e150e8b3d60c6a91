//! `Intents`: the bitfield chosen at Identify time that narrows which event
//! categories the Gateway sends.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    pub struct Intents: u64 {
        const GUILDS = 1 << 0;
        const GUILD_MEMBERS = 1 << 1;
        const GUILD_MODERATION = 1 << 2;
        const GUILD_EMOJIS_AND_STICKERS = 1 << 3;
        const GUILD_INTEGRATIONS = 1 << 4;
        const GUILD_WEBHOOKS = 1 << 5;
        const GUILD_INVITES = 1 << 6;
        const GUILD_VOICE_STATES = 1 << 7;
        const GUILD_PRESENCES = 1 << 8;
        const GUILD_MESSAGES = 1 << 9;
        const GUILD_MESSAGE_REACTIONS = 1 << 10;
        const GUILD_MESSAGE_TYPING = 1 << 11;
        const DIRECT_MESSAGES = 1 << 12;
        const DIRECT_MESSAGE_REACTIONS = 1 << 13;
        const DIRECT_MESSAGE_TYPING = 1 << 14;
        const MESSAGE_CONTENT = 1 << 15;
        const GUILD_SCHEDULED_EVENTS = 1 << 16;
        const AUTO_MODERATION_CONFIGURATION = 1 << 20;
        const AUTO_MODERATION_EXECUTION = 1 << 21;
        const GUILD_MESSAGE_POLLS = 1 << 24;
        const DIRECT_MESSAGE_POLLS = 1 << 25;
    }
}

impl Default for Intents {
    /// The non-privileged intents every bot can request without being
    /// whitelisted: every bit except `GUILD_MEMBERS`, `GUILD_PRESENCES`,
    /// and `MESSAGE_CONTENT`.
    fn default() -> Self {
        Self::all() - Self::GUILD_MEMBERS - Self::GUILD_PRESENCES - Self::MESSAGE_CONTENT
    }
}

impl<'de> Deserialize<'de> for Intents {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u64::deserialize(deserializer)?))
    }
}

impl Serialize for Intents {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::Intents;

    #[test]
    fn default_excludes_privileged_intents() {
        let default = Intents::default();
        assert!(!default.contains(Intents::GUILD_MEMBERS));
        assert!(!default.contains(Intents::GUILD_PRESENCES));
        assert!(!default.contains(Intents::MESSAGE_CONTENT));
        assert!(default.contains(Intents::GUILDS));
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(
            serde_json::to_string(&Intents::GUILDS).unwrap(),
            (Intents::GUILDS.bits()).to_string()
        );
    }
}
