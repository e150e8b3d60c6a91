//! Dispatch frame decoding, cache side-effects, and event fan-out.

mod dispatcher;
mod event;

pub use dispatcher::{Dispatcher, Handler};
pub use event::{Event, GuildCreate, Update};
