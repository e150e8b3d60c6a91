//! Frame parsing: peek a raw inbound frame's `op`/`s`/`t` fields before
//! deciding how, or whether, to decode its `d` body.

use crate::error::{Error, ErrorType};
use embergate_model::gateway::{EventType, OpCode};
use serde::{Deserialize, Serialize};

/// The routing fields every inbound frame carries.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct FrameHeader {
    pub op: OpCode,
    #[serde(default)]
    pub s: Option<u64>,
    #[serde(default)]
    pub t: Option<String>,
}

/// Peek a frame's `op`/`s`/`t` fields without decoding `d`.
///
/// # Errors
///
/// Returns [`ErrorType::Deserializing`] if the frame isn't valid JSON or is
/// missing the `op` field every frame carries.
pub(crate) fn peek(json: &[u8]) -> Result<FrameHeader, Error> {
    serde_json::from_slice(json).map_err(|source| {
        tracing::debug!(
            payload = %String::from_utf8_lossy(json),
            "invalid gateway frame",
        );
        Error::new(ErrorType::Deserializing, Some(Box::new(source)))
    })
}

/// The frame's event type, if it names one this core's taxonomy has a
/// variant for.
///
/// An unrecognized `t` decodes as `None` rather than failing the frame,
/// matching the dispatcher's decode-failure-tolerant contract: a new event
/// type Discord ships before this core's taxonomy is updated for it should
/// be dropped, not crash the shard.
pub(crate) fn event_type(header: &FrameHeader) -> Option<EventType> {
    let t = header.t.as_deref()?;
    serde_json::from_value(serde_json::Value::String(t.to_owned())).ok()
}

/// Deserialize a frame's `d` body into `T`.
///
/// # Errors
///
/// Returns [`ErrorType::Deserializing`] if `d` is missing or doesn't match
/// `T`'s shape.
pub(crate) fn deserialize_body<T: serde::de::DeserializeOwned>(json: &[u8]) -> Result<T, Error> {
    #[derive(Deserialize)]
    struct Envelope<T> {
        d: T,
    }

    serde_json::from_slice::<Envelope<T>>(json)
        .map(|envelope| envelope.d)
        .map_err(|source| Error::new(ErrorType::Deserializing, Some(Box::new(source))))
}

/// Serialize an outbound payload to its wire form.
///
/// # Errors
///
/// Returns [`ErrorType::Serializing`] if `T`'s `Serialize` impl fails.
pub(crate) fn to_vec<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(value)
        .map_err(|source| Error::new(ErrorType::Serializing, Some(Box::new(source))))
}

/// Wrap an outbound payload body in the `{op, d}` envelope every frame this
/// core sends takes, and serialize it.
pub(crate) fn wrap_outbound<T: Serialize>(op: OpCode, d: T) -> Result<Vec<u8>, Error> {
    #[derive(Serialize)]
    struct OutboundFrame<T> {
        op: OpCode,
        d: T,
    }

    to_vec(&OutboundFrame { op, d })
}

#[cfg(test)]
mod tests {
    use super::{deserialize_body, event_type, peek, to_vec, wrap_outbound};
    use embergate_model::gateway::{EventType, OpCode};

    #[test]
    fn peek_extracts_op_sequence_and_type() {
        let header = peek(br#"{"op":0,"s":42,"t":"READY","d":{}}"#).unwrap();
        assert_eq!(header.op, OpCode::Dispatch);
        assert_eq!(header.s, Some(42));
        assert_eq!(header.t.as_deref(), Some("READY"));
    }

    #[test]
    fn peek_tolerates_missing_sequence_and_type() {
        let header = peek(br#"{"op":11}"#).unwrap();
        assert_eq!(header.op, OpCode::HeartbeatAck);
        assert_eq!(header.s, None);
        assert_eq!(header.t, None);
    }

    #[test]
    fn unrecognized_event_type_decodes_as_none() {
        let header = peek(br#"{"op":0,"t":"SOME_FUTURE_EVENT","d":{}}"#).unwrap();
        assert_eq!(event_type(&header), None);
    }

    #[test]
    fn known_event_type_decodes() {
        let header = peek(br#"{"op":0,"t":"READY","d":{}}"#).unwrap();
        assert_eq!(event_type(&header), Some(EventType::Ready));
    }

    #[test]
    fn deserialize_body_extracts_d() {
        #[derive(serde::Deserialize)]
        struct Hello {
            heartbeat_interval: u64,
        }

        let hello: Hello =
            deserialize_body(br#"{"op":10,"d":{"heartbeat_interval":41250}}"#).unwrap();
        assert_eq!(hello.heartbeat_interval, 41250);
    }

    #[test]
    fn to_vec_round_trips_through_deserialize_body() {
        #[derive(serde::Serialize)]
        struct Envelope {
            op: u8,
            d: u64,
        }

        let bytes = to_vec(&Envelope { op: 1, d: 7 }).unwrap();
        let value: u64 = deserialize_body(&bytes).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn wrap_outbound_nests_body_under_d() {
        let bytes = wrap_outbound(OpCode::Heartbeat, Some(9_u64)).unwrap();
        let value: Option<u64> = deserialize_body(&bytes).unwrap();
        assert_eq!(value, Some(9));
    }
}
