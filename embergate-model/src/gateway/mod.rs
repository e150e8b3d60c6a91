//! Gateway wire protocol types: opcodes, intents, the event taxonomy, and
//! the in/out payload bodies carried in a frame's `d` field.

pub mod event;
pub mod intents;
pub mod opcode;
pub mod payload_in;
pub mod payload_out;

pub use event::{EventType, EventTypeFlags};
pub use intents::Intents;
pub use opcode::OpCode;
