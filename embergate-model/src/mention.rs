//! Mention-string formatting.
//!
//! Discord renders a custom emoji mention as `<:name:id>`, or `<a:name:id>`
//! when the emoji is animated. The source this crate is descended from had
//! two `Mention()` implementations that disagreed: one emitted the
//! misplaced-colon `<:name:id:>`, the other emitted `<[a]:name:id>`; only
//! the second matches Discord's real syntax. This module is the single,
//! correct implementation.

use crate::id::{ChannelId, Id, Marker, RoleId, UserId};
use std::fmt::{self, Display, Formatter};

/// A custom guild emoji, enough of it to format a mention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmojiMention<'a> {
    pub id: Id<EmojiMarker>,
    pub name: &'a str,
    pub animated: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmojiMarker {}
impl Marker for EmojiMarker {}

impl Display for EmojiMention<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.animated {
            write!(f, "<a:{}:{}>", self.name, self.id)
        } else {
            write!(f, "<:{}:{}>", self.name, self.id)
        }
    }
}

/// Formats as `<@id>`.
pub struct UserMention(pub UserId);

impl Display for UserMention {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<@{}>", self.0)
    }
}

/// Formats as `<#id>`.
pub struct ChannelMention(pub ChannelId);

impl Display for ChannelMention {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<#{}>", self.0)
    }
}

/// Formats as `<@&id>`.
pub struct RoleMention(pub RoleId);

impl Display for RoleMention {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<@&{}>", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelMention, EmojiMention, RoleMention, UserMention};

    #[test]
    fn animated_emoji_mention_has_leading_a() {
        let mention = EmojiMention {
            id: 123.into(),
            name: "blob",
            animated: true,
        };
        assert_eq!(mention.to_string(), "<a:blob:123>");
    }

    #[test]
    fn static_emoji_mention_has_no_trailing_colon() {
        let mention = EmojiMention {
            id: 123.into(),
            name: "blob",
            animated: false,
        };
        assert_eq!(mention.to_string(), "<:blob:123>");
    }

    #[test]
    fn user_channel_role_mentions() {
        assert_eq!(UserMention(1.into()).to_string(), "<@1>");
        assert_eq!(ChannelMention(2.into()).to_string(), "<#2>");
        assert_eq!(RoleMention(3.into()).to_string(), "<@&3>");
    }
}
