//! Discord API models for the Embergate gateway client: the data Discord
//! actually sends over the realtime gateway, typed. This crate has no
//! networking or caching of its own — see `embergate-gateway` and
//! `embergate-cache-inmemory` for those.

pub mod channel;
pub mod gateway;
pub mod guild;
pub mod id;
pub mod member;
pub mod mention;
pub mod message;
pub mod role;
pub mod user;
pub mod voice_state;

pub use channel::{Channel, ChannelType, ThreadMember};
pub use guild::{Guild, UnavailableGuild};
pub use id::{
    ApplicationId, ChannelId, GuildId, Id, Marker, MessageId, RoleId, Snowflake, UserId,
};
pub use member::Member;
pub use message::Message;
pub use role::Role;
pub use user::User;
pub use voice_state::VoiceState;
