//! Message entity.

use crate::{
    id::{ApplicationId, ChannelId, GuildId, MessageId},
    user::User,
};
use serde::{Deserialize, Serialize};

/// A channel message. Keyed by `id`.
///
/// `MESSAGE_UPDATE` payloads are partial: Discord only sends the fields
/// that changed. The dispatcher synthesizes a full `Message` for the `old`
/// side of the event (see [`Message::synthesize`]) rather than requiring
/// every field to be `Option`, so application code sees one concrete type.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub channel_id: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub author: User,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub tts: bool,
}

impl Message {
    /// Build the `old` side of a `MESSAGE_UPDATE` event when nothing was
    /// cached for this message id: carries only the keys recoverable from
    /// the new payload (id, channel_id, guild_id, author, timestamp,
    /// application_id), with `content` and every other field left at its
    /// default.
    pub fn synthesize_old(new: &Message) -> Self {
        Self {
            id: new.id,
            channel_id: new.channel_id,
            guild_id: new.guild_id,
            author: new.author.clone(),
            timestamp: new.timestamp.clone(),
            application_id: new.application_id,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Message;

    #[test]
    fn synthesize_old_recovers_only_known_keys() {
        let new: Message = serde_json::from_str(
            r#"{"id":"42","channel_id":"7","author":{"id":"9","username":"u","discriminator":"0"},"content":"new"}"#,
        )
        .unwrap();

        let old = Message::synthesize_old(&new);
        assert_eq!(old.id, new.id);
        assert_eq!(old.channel_id, new.channel_id);
        assert_eq!(old.content, "");
        assert_eq!(new.content, "new");
    }
}
