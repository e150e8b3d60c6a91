//! Messages exchanged with the underlying websocket, abstracted away from
//! `tokio-tungstenite`'s own message type so it never leaks into the
//! public API.

use std::borrow::Cow;
use tokio_tungstenite::tungstenite::{
    protocol::{frame::coding::CloseCode, CloseFrame as TungsteniteCloseFrame},
    Message as TungsteniteMessage,
};

/// A close code and human-readable reason for closing a shard's connection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CloseFrame<'a> {
    code: u16,
    reason: Cow<'a, str>,
}

impl<'a> CloseFrame<'a> {
    /// Normal close: Discord invalidates the session. Use this when you do
    /// not intend to resume soon.
    pub const NORMAL: Self = Self {
        code: 1000,
        reason: Cow::Borrowed("closing connection"),
    };

    /// Close code that keeps the session resumable.
    pub const RESUME: Self = Self {
        code: 4000,
        reason: Cow::Borrowed("resuming connection"),
    };

    pub(crate) fn from_tungstenite(frame: TungsteniteCloseFrame<'a>) -> Self {
        Self {
            code: u16::from(frame.code),
            reason: frame.reason,
        }
    }

    pub(crate) fn into_tungstenite(self) -> TungsteniteCloseFrame<'a> {
        TungsteniteCloseFrame {
            code: CloseCode::from(self.code),
            reason: self.reason,
        }
    }

    pub const fn code(&self) -> u16 {
        self.code
    }

    pub fn reason(&self) -> &str {
        self.reason.as_ref()
    }
}

impl<'a, T: Into<Cow<'a, str>>> From<(u16, T)> for CloseFrame<'a> {
    fn from((code, reason): (u16, T)) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

/// A message to send over, or received from, a shard's connection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    Binary(Vec<u8>),
    Close(Option<CloseFrame<'static>>),
    Text(String),
}

impl Message {
    pub(crate) fn from_tungstenite(message: TungsteniteMessage) -> Option<Self> {
        match message {
            TungsteniteMessage::Binary(bytes) => Some(Self::Binary(bytes)),
            TungsteniteMessage::Close(frame) => {
                Some(Self::Close(frame.map(CloseFrame::from_tungstenite)))
            }
            TungsteniteMessage::Text(text) => Some(Self::Text(text)),
            TungsteniteMessage::Frame(_)
            | TungsteniteMessage::Ping(_)
            | TungsteniteMessage::Pong(_) => None,
        }
    }

    pub(crate) fn into_tungstenite(self) -> TungsteniteMessage {
        match self {
            Self::Binary(bytes) => TungsteniteMessage::Binary(bytes),
            Self::Close(frame) => TungsteniteMessage::Close(frame.map(CloseFrame::into_tungstenite)),
            Self::Text(text) => TungsteniteMessage::Text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CloseFrame, Message};
    use static_assertions::assert_impl_all;

    assert_impl_all!(CloseFrame<'_>: Clone, Eq, PartialEq, From<(u16, &'static str)>);
    assert_impl_all!(Message: Clone, Eq, PartialEq);

    #[test]
    fn normal_and_resume_have_the_documented_codes() {
        assert_eq!(CloseFrame::NORMAL.code(), 1000);
        assert_eq!(CloseFrame::RESUME.code(), 4000);
    }

    #[test]
    fn from_tuple_builds_an_arbitrary_frame() {
        let frame = CloseFrame::from((4004, "bad auth"));
        assert_eq!(frame.code(), 4004);
        assert_eq!(frame.reason(), "bad auth");
    }
}
