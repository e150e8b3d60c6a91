//! Polymorphic channel decoding.
//!
//! Discord sends one wire shape — an object carrying a numeric `type` field
//! plus whichever other fields that type implies — for ten structurally
//! different kinds of channel. This module replaces the interface-plus-
//! type-assertion pattern used elsewhere with a tagged sum: [`Channel`] is a
//! single enum whose tag is the numeric `type`, decoded in two passes (peek
//! `type`, then specialize) rather than nominally per variant.

mod guild;
mod private;
mod thread;

pub use guild::{ChannelFlags, GuildChannel, OverwriteTargetId, PermissionOverwrite, PermissionOverwriteType};
pub use private::PrivateChannel;
pub use thread::{ThreadChannel, ThreadKind, ThreadMember, ThreadMetadata};

use crate::id::{ChannelId, GuildId};
use serde::{
    de::{Error as DeError, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt::{self, Formatter};

/// The wire `type` discriminant. Kept as its own type (rather than inlined
/// into the visitor) so unknown values can be reported with the raw integer
/// that didn't match anything.
#[derive(Clone, Copy, Debug, Deserialize_repr, Serialize_repr, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelType {
    GuildText = 0,
    Dm = 1,
    GuildVoice = 2,
    GroupDm = 3,
    GuildCategory = 4,
    GuildAnnouncement = 5,
    AnnouncementThread = 10,
    PublicThread = 11,
    PrivateThread = 12,
    GuildStageVoice = 13,
    GuildForum = 15,
    GuildMedia = 16,
}

/// A channel of any variant: `Category`, `Text`, `Voice`, `Announcement`,
/// `StageVoice`, `Forum`, `Media`, `Thread`, `Dm`, or `GroupDm`. Every
/// variant carries `{id, type}` (the type is implicit in which case it is);
/// guild variants additionally carry `{guild_id, name, position,
/// permission_overwrites, flags}`; thread variants carry `{guild_id,
/// parent_id, owner_id, thread_metadata}`. The guild/thread distinction is
/// structural, not nominal: a thread is its own case, not a `GuildChannel`
/// with a thread flag bolted on.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Channel {
    Category(GuildChannel),
    Text(GuildChannel),
    Voice(GuildChannel),
    Announcement(GuildChannel),
    StageVoice(GuildChannel),
    Forum(GuildChannel),
    Media(GuildChannel),
    Thread(ThreadChannel),
    Dm(PrivateChannel),
    GroupDm(PrivateChannel),
}

impl Channel {
    pub fn id(&self) -> ChannelId {
        match self {
            Self::Category(c)
            | Self::Text(c)
            | Self::Voice(c)
            | Self::Announcement(c)
            | Self::StageVoice(c)
            | Self::Forum(c)
            | Self::Media(c) => c.id,
            Self::Thread(t) => t.id,
            Self::Dm(p) | Self::GroupDm(p) => p.id,
        }
    }

    pub fn kind(&self) -> ChannelType {
        match self {
            Self::Category(_) => ChannelType::GuildCategory,
            Self::Text(_) => ChannelType::GuildText,
            Self::Voice(_) => ChannelType::GuildVoice,
            Self::Announcement(_) => ChannelType::GuildAnnouncement,
            Self::StageVoice(_) => ChannelType::GuildStageVoice,
            Self::Forum(_) => ChannelType::GuildForum,
            Self::Media(_) => ChannelType::GuildMedia,
            Self::Thread(t) => match t.kind {
                ThreadKind::Announcement => ChannelType::AnnouncementThread,
                ThreadKind::Public => ChannelType::PublicThread,
                ThreadKind::Private => ChannelType::PrivateThread,
            },
            Self::Dm(_) => ChannelType::Dm,
            Self::GroupDm(_) => ChannelType::GroupDm,
        }
    }

    /// The owning guild, for every variant that has one. `None` for `Dm`
    /// and `GroupDm`.
    pub fn guild_id(&self) -> Option<GuildId> {
        match self {
            Self::Category(c)
            | Self::Text(c)
            | Self::Voice(c)
            | Self::Announcement(c)
            | Self::StageVoice(c)
            | Self::Forum(c)
            | Self::Media(c) => Some(c.guild_id),
            Self::Thread(t) => Some(t.guild_id),
            Self::Dm(_) | Self::GroupDm(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Category(c)
            | Self::Text(c)
            | Self::Voice(c)
            | Self::Announcement(c)
            | Self::StageVoice(c)
            | Self::Forum(c)
            | Self::Media(c) => Some(c.name.as_str()),
            Self::Thread(t) => Some(t.name.as_str()),
            Self::Dm(p) | Self::GroupDm(p) => p.name.as_deref(),
        }
    }
}

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "snake_case")]
enum Field {
    Id,
    Type,
    GuildId,
    Name,
    Position,
    PermissionOverwrites,
    Flags,
    ParentId,
    Topic,
    Nsfw,
    Bitrate,
    UserLimit,
    LastMessageId,
    OwnerId,
    ThreadMetadata,
    Recipients,
    #[serde(other)]
    Ignored,
}

struct ChannelVisitor;

impl<'de> Visitor<'de> for ChannelVisitor {
    type Value = Channel;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a Discord channel object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut id = None;
        let mut kind = None;
        let mut guild_id = None;
        let mut name = None;
        let mut position = None;
        let mut permission_overwrites = None;
        let mut flags = None;
        let mut parent_id = None;
        let mut topic = None;
        let mut nsfw = None;
        let mut bitrate = None;
        let mut user_limit = None;
        let mut last_message_id = None;
        let mut owner_id = None;
        let mut thread_metadata = None;
        let mut recipients = None;

        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Id => id = Some(map.next_value()?),
                Field::Type => kind = Some(map.next_value::<ChannelType>()?),
                Field::GuildId => guild_id = Some(map.next_value()?),
                Field::Name => name = Some(map.next_value()?),
                Field::Position => position = Some(map.next_value()?),
                Field::PermissionOverwrites => permission_overwrites = Some(map.next_value()?),
                Field::Flags => flags = Some(map.next_value()?),
                Field::ParentId => parent_id = map.next_value()?,
                Field::Topic => topic = map.next_value()?,
                Field::Nsfw => nsfw = Some(map.next_value()?),
                Field::Bitrate => bitrate = map.next_value()?,
                Field::UserLimit => user_limit = map.next_value()?,
                Field::LastMessageId => last_message_id = map.next_value()?,
                Field::OwnerId => owner_id = Some(map.next_value()?),
                Field::ThreadMetadata => thread_metadata = Some(map.next_value()?),
                Field::Recipients => recipients = Some(map.next_value()?),
                Field::Ignored => {
                    map.next_value::<serde::de::IgnoredAny>()?;
                }
            }
        }

        let id: ChannelId = id.ok_or_else(|| DeError::missing_field("id"))?;
        let kind = kind.ok_or_else(|| DeError::missing_field("type"))?;

        let guild_channel = || -> Result<GuildChannel, A::Error> {
            Ok(GuildChannel {
                id,
                guild_id: guild_id.ok_or_else(|| DeError::missing_field("guild_id"))?,
                name: name.clone().unwrap_or_default(),
                position: position.unwrap_or_default(),
                permission_overwrites: permission_overwrites.clone().unwrap_or_default(),
                flags: flags.unwrap_or_default(),
                parent_id,
                topic: topic.clone(),
                nsfw: nsfw.unwrap_or_default(),
                bitrate,
                user_limit,
                last_message_id,
            })
        };

        match kind {
            ChannelType::GuildCategory => Ok(Channel::Category(guild_channel()?)),
            ChannelType::GuildText => Ok(Channel::Text(guild_channel()?)),
            ChannelType::GuildVoice => Ok(Channel::Voice(guild_channel()?)),
            ChannelType::GuildAnnouncement => {
                Ok(Channel::Announcement(guild_channel()?))
            }
            ChannelType::GuildStageVoice => Ok(Channel::StageVoice(guild_channel()?)),
            ChannelType::GuildForum => Ok(Channel::Forum(guild_channel()?)),
            ChannelType::GuildMedia => Ok(Channel::Media(guild_channel()?)),
            ChannelType::AnnouncementThread
            | ChannelType::PublicThread
            | ChannelType::PrivateThread => {
                let thread_kind = match kind {
                    ChannelType::AnnouncementThread => ThreadKind::Announcement,
                    ChannelType::PublicThread => ThreadKind::Public,
                    _ => ThreadKind::Private,
                };

                Ok(Channel::Thread(ThreadChannel {
                    id,
                    kind: thread_kind,
                    guild_id: guild_id.ok_or_else(|| DeError::missing_field("guild_id"))?,
                    parent_id: parent_id.ok_or_else(|| DeError::missing_field("parent_id"))?,
                    owner_id: owner_id.ok_or_else(|| DeError::missing_field("owner_id"))?,
                    name: name.unwrap_or_default(),
                    thread_metadata: thread_metadata
                        .ok_or_else(|| DeError::missing_field("thread_metadata"))?,
                    message_count: 0,
                    member_count: 0,
                    last_message_id,
                }))
            }
            ChannelType::Dm => Ok(Channel::Dm(PrivateChannel {
                id,
                recipients: recipients.unwrap_or_default(),
                name,
                owner_id,
                last_message_id,
            })),
            ChannelType::GroupDm => Ok(Channel::GroupDm(PrivateChannel {
                id,
                recipients: recipients.unwrap_or_default(),
                name,
                owner_id,
                last_message_id,
            })),
        }
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ChannelVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{Channel, ChannelType};

    #[test]
    fn decodes_text_channel() {
        let channel: Channel = serde_json::from_str(
            r#"{"id":"1","type":0,"guild_id":"2","name":"general","position":0,"guild_hashes":{},"unknown_field":"x"}"#,
        )
        .unwrap();

        assert_eq!(channel.id().get(), 1);
        assert_eq!(channel.kind(), ChannelType::GuildText);
        assert_eq!(channel.guild_id().unwrap().get(), 2);
        assert_eq!(channel.name(), Some("general"));
    }

    #[test]
    fn decodes_public_thread() {
        let channel: Channel = serde_json::from_str(
            r#"{"id":"10","type":11,"guild_id":"2","parent_id":"1","owner_id":"9","name":"thread","thread_metadata":{"archived":false,"auto_archive_duration":1440,"locked":false,"invitable":true}}"#,
        )
        .unwrap();

        assert_eq!(channel.kind(), ChannelType::PublicThread);
        assert!(matches!(channel, Channel::Thread(_)));
    }

    #[test]
    fn decodes_dm() {
        let channel: Channel =
            serde_json::from_str(r#"{"id":"5","type":1,"recipients":["1","2"]}"#).unwrap();

        assert_eq!(channel.guild_id(), None);
        assert!(matches!(channel, Channel::Dm(_)));
    }

    #[test]
    fn unknown_type_is_a_decode_error() {
        let result: Result<Channel, _> = serde_json::from_str(r#"{"id":"1","type":999}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_required_field_for_variant_is_a_decode_error() {
        // A guild text channel missing `guild_id`.
        let result: Result<Channel, _> =
            serde_json::from_str(r#"{"id":"1","type":0,"name":"no-guild"}"#);
        assert!(result.is_err());
    }
}
