//! Gateway protocol opcodes (`op` field of every frame).

use serde_repr::{Deserialize_repr, Serialize_repr};

/// Opcodes consumed: `Dispatch`, `Heartbeat`, `Reconnect`, `InvalidSession`,
/// `Hello`, `HeartbeatAck`. Opcodes produced: `Heartbeat`, `Identify`,
/// `Resume`. `RequestGuildMembers` and `VoiceStateUpdate` are defined for
/// completeness of the numeric space but are not emitted by this core (see
/// spec's REST/voice Non-goals).
#[derive(Clone, Copy, Debug, Deserialize_repr, Serialize_repr, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    Dispatch = 0,
    Heartbeat = 1,
    Identify = 2,
    PresenceUpdate = 3,
    VoiceStateUpdate = 4,
    Resume = 6,
    Reconnect = 7,
    RequestGuildMembers = 8,
    InvalidSession = 9,
    Hello = 10,
    HeartbeatAck = 11,
}

#[cfg(test)]
mod tests {
    use super::OpCode;

    #[test]
    fn hello_is_ten() {
        assert_eq!(serde_json::to_string(&OpCode::Hello).unwrap(), "10");
    }

    #[test]
    fn decodes_from_integer() {
        let op: OpCode = serde_json::from_str("11").unwrap();
        assert_eq!(op, OpCode::HeartbeatAck);
    }
}
