//! The full dispatch event taxonomy, and a bitflags type for restricting
//! which of them a shard bothers decoding.
//!
//! Every event type in §4.4's taxonomy gets exactly one [`EventType`]
//! variant and one [`EventTypeFlags`] bit; a `Shard` is free to ignore a
//! type entirely (decode skipped, not even attempted) rather than decoding
//! it and dropping the result, which is what `EventTypeFlags` buys over
//! just not registering a handler.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

macro_rules! event_types {
    ($(($variant:ident, $wire:literal, $bit:expr)),* $(,)?) => {
        /// The wire `t` field of a dispatch frame, typed.
        #[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
        pub enum EventType {
            $(#[serde(rename = $wire)] $variant,)*
        }

        impl EventType {
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)*
                }
            }
        }

        impl Display for EventType {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        bitflags::bitflags! {
            /// One bit per [`EventType`]; a `Shard` configured with a
            /// non-default set skips decoding event types whose bit is
            /// clear. Defaults to every bit set (decode everything).
            pub struct EventTypeFlags: u128 {
                $(const $variant = 1 << $bit;)*
            }
        }

        impl From<EventType> for EventTypeFlags {
            fn from(kind: EventType) -> Self {
                match kind {
                    $(EventType::$variant => Self::$variant,)*
                }
            }
        }

        impl Default for EventTypeFlags {
            fn default() -> Self {
                Self::all()
            }
        }
    };
}

event_types! {
    (Ready, "READY", 0),
    (Resumed, "RESUMED", 1),
    (GuildCreate, "GUILD_CREATE", 2),
    (GuildUpdate, "GUILD_UPDATE", 3),
    (GuildDelete, "GUILD_DELETE", 4),
    (GuildBanAdd, "GUILD_BAN_ADD", 5),
    (GuildBanRemove, "GUILD_BAN_REMOVE", 6),
    (GuildEmojisUpdate, "GUILD_EMOJIS_UPDATE", 7),
    (GuildStickersUpdate, "GUILD_STICKERS_UPDATE", 8),
    (GuildIntegrationsUpdate, "GUILD_INTEGRATIONS_UPDATE", 9),
    (GuildMemberAdd, "GUILD_MEMBER_ADD", 10),
    (GuildMemberRemove, "GUILD_MEMBER_REMOVE", 11),
    (GuildMemberUpdate, "GUILD_MEMBER_UPDATE", 12),
    (GuildMembersChunk, "GUILD_MEMBERS_CHUNK", 13),
    (GuildRoleCreate, "GUILD_ROLE_CREATE", 14),
    (GuildRoleUpdate, "GUILD_ROLE_UPDATE", 15),
    (GuildRoleDelete, "GUILD_ROLE_DELETE", 16),
    (GuildScheduledEventCreate, "GUILD_SCHEDULED_EVENT_CREATE", 17),
    (GuildScheduledEventUpdate, "GUILD_SCHEDULED_EVENT_UPDATE", 18),
    (GuildScheduledEventDelete, "GUILD_SCHEDULED_EVENT_DELETE", 19),
    (GuildScheduledEventUserAdd, "GUILD_SCHEDULED_EVENT_USER_ADD", 20),
    (GuildScheduledEventUserRemove, "GUILD_SCHEDULED_EVENT_USER_REMOVE", 21),
    (GuildSoundboardSoundCreate, "GUILD_SOUNDBOARD_SOUND_CREATE", 22),
    (GuildSoundboardSoundUpdate, "GUILD_SOUNDBOARD_SOUND_UPDATE", 23),
    (GuildSoundboardSoundDelete, "GUILD_SOUNDBOARD_SOUND_DELETE", 24),
    (GuildSoundboardSoundsUpdate, "GUILD_SOUNDBOARD_SOUNDS_UPDATE", 25),
    (SoundboardSounds, "SOUNDBOARD_SOUNDS", 26),
    (GuildAuditLogEntryCreate, "GUILD_AUDIT_LOG_ENTRY_CREATE", 27),
    (ChannelCreate, "CHANNEL_CREATE", 28),
    (ChannelUpdate, "CHANNEL_UPDATE", 29),
    (ChannelDelete, "CHANNEL_DELETE", 30),
    (ChannelPinsUpdate, "CHANNEL_PINS_UPDATE", 31),
    (ThreadCreate, "THREAD_CREATE", 32),
    (ThreadUpdate, "THREAD_UPDATE", 33),
    (ThreadDelete, "THREAD_DELETE", 34),
    (ThreadListSync, "THREAD_LIST_SYNC", 35),
    (ThreadMemberUpdate, "THREAD_MEMBER_UPDATE", 36),
    (ThreadMembersUpdate, "THREAD_MEMBERS_UPDATE", 37),
    (MessageCreate, "MESSAGE_CREATE", 38),
    (MessageUpdate, "MESSAGE_UPDATE", 39),
    (MessageDelete, "MESSAGE_DELETE", 40),
    (MessageDeleteBulk, "MESSAGE_DELETE_BULK", 41),
    (MessageReactionAdd, "MESSAGE_REACTION_ADD", 42),
    (MessageReactionRemove, "MESSAGE_REACTION_REMOVE", 43),
    (MessageReactionRemoveAll, "MESSAGE_REACTION_REMOVE_ALL", 44),
    (MessageReactionRemoveEmoji, "MESSAGE_REACTION_REMOVE_EMOJI", 45),
    (MessagePollVoteAdd, "MESSAGE_POLL_VOTE_ADD", 46),
    (MessagePollVoteRemove, "MESSAGE_POLL_VOTE_REMOVE", 47),
    (InteractionCreate, "INTERACTION_CREATE", 48),
    (TypingStart, "TYPING_START", 49),
    (UserUpdate, "USER_UPDATE", 50),
    (PresenceUpdate, "PRESENCE_UPDATE", 51),
    (VoiceStateUpdate, "VOICE_STATE_UPDATE", 52),
    (VoiceChannelEffectSend, "VOICE_CHANNEL_EFFECT_SEND", 53),
    (VoiceServerUpdate, "VOICE_SERVER_UPDATE", 54),
    (StageInstanceCreate, "STAGE_INSTANCE_CREATE", 55),
    (StageInstanceUpdate, "STAGE_INSTANCE_UPDATE", 56),
    (StageInstanceDelete, "STAGE_INSTANCE_DELETE", 57),
    (IntegrationCreate, "INTEGRATION_CREATE", 58),
    (IntegrationUpdate, "INTEGRATION_UPDATE", 59),
    (IntegrationDelete, "INTEGRATION_DELETE", 60),
    (InviteCreate, "INVITE_CREATE", 61),
    (InviteDelete, "INVITE_DELETE", 62),
    (WebhooksUpdate, "WEBHOOKS_UPDATE", 63),
    (EntitlementCreate, "ENTITLEMENT_CREATE", 64),
    (EntitlementUpdate, "ENTITLEMENT_UPDATE", 65),
    (EntitlementDelete, "ENTITLEMENT_DELETE", 66),
    (SubscriptionCreate, "SUBSCRIPTION_CREATE", 67),
    (SubscriptionUpdate, "SUBSCRIPTION_UPDATE", 68),
    (SubscriptionDelete, "SUBSCRIPTION_DELETE", 69),
    (AutoModerationRuleCreate, "AUTO_MODERATION_RULE_CREATE", 70),
    (AutoModerationRuleUpdate, "AUTO_MODERATION_RULE_UPDATE", 71),
    (AutoModerationRuleDelete, "AUTO_MODERATION_RULE_DELETE", 72),
    (AutoModerationActionExecution, "AUTO_MODERATION_ACTION_EXECUTION", 73),
    (ApplicationCommandPermissionsUpdate, "APPLICATION_COMMAND_PERMISSIONS_UPDATE", 74),
}

#[cfg(test)]
mod tests {
    use super::{EventType, EventTypeFlags};

    #[test]
    fn wire_name_round_trips() {
        assert_eq!(EventType::MessageCreate.name(), "MESSAGE_CREATE");
        assert_eq!(EventType::MessageCreate.to_string(), "MESSAGE_CREATE");
    }

    #[test]
    fn flags_default_to_everything() {
        let all = EventTypeFlags::all();
        assert!(all.contains(EventTypeFlags::from(EventType::Ready)));
        assert!(all.contains(EventTypeFlags::from(
            EventType::ApplicationCommandPermissionsUpdate
        )));
    }

    #[test]
    fn flags_are_distinct_bits() {
        assert_ne!(
            EventTypeFlags::from(EventType::Ready),
            EventTypeFlags::from(EventType::Resumed)
        );
    }
}
