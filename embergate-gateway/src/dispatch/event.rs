//! The decoded event taxonomy a [`Dispatcher`](super::Dispatcher) hands to
//! registered callbacks, after applying cache side-effects.

use embergate_model::{
    gateway::payload_in::GuildMemberRemove,
    Channel, Guild, Member, Message, Role, ThreadMember, UnavailableGuild, User, VoiceState,
};
use embergate_model::id::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serde::Deserialize;

/// Both sides of a value that changed, as attached to `*_UPDATE` events per
/// §4.4's synthesis rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update<T> {
    pub old: T,
    pub new: T,
}

/// A decoded Gateway event, tagged with the shard it arrived on.
///
/// Every event type in the wire taxonomy (§4.4) gets its own typed variant
/// and decode step here: the ones with cache side-effects apply them before
/// this is built, the rest simply carry a decoded payload straight through
/// to callbacks. A handful of niche payloads Discord documents but this
/// cache never indexes anything of (scheduled events, soundboard sounds,
/// entitlements, subscriptions, auto moderation rules, stage instances,
/// integrations, invites) share [`GuildScoped`], a small envelope that
/// still decodes the `guild_id` out to a real [`GuildId`] rather than
/// leaving the whole payload opaque.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Event {
    Ready {
        session_id: String,
        resume_gateway_url: String,
        guilds: Vec<UnavailableGuild>,
    },
    Resumed,
    GuildCreate(Box<GuildCreate>),
    GuildUpdate(Guild),
    GuildDelete(UnavailableGuild),
    GuildBanAdd(GuildBan),
    GuildBanRemove(GuildBan),
    GuildEmojisUpdate(GuildScoped),
    GuildStickersUpdate(GuildScoped),
    GuildIntegrationsUpdate(GuildScoped),
    GuildMemberAdd(Member),
    GuildMemberRemove(GuildMemberRemove),
    GuildMemberUpdate(Member),
    GuildMembersChunk(GuildMembersChunk),
    GuildRoleCreate {
        guild_id: GuildId,
        role: Role,
    },
    GuildRoleUpdate {
        guild_id: GuildId,
        role: Role,
    },
    GuildRoleDelete {
        guild_id: GuildId,
        role_id: RoleId,
    },
    GuildScheduledEventCreate(GuildScoped),
    GuildScheduledEventUpdate(GuildScoped),
    GuildScheduledEventDelete(GuildScoped),
    GuildScheduledEventUserAdd(GuildScoped),
    GuildScheduledEventUserRemove(GuildScoped),
    GuildSoundboardSoundCreate(GuildScoped),
    GuildSoundboardSoundUpdate(GuildScoped),
    GuildSoundboardSoundDelete(GuildScoped),
    GuildSoundboardSoundsUpdate(GuildScoped),
    SoundboardSounds(GuildScoped),
    GuildAuditLogEntryCreate(GuildScoped),
    ChannelCreate(Channel),
    ChannelUpdate(Channel),
    ChannelDelete(Channel),
    ChannelPinsUpdate(ChannelPinsUpdate),
    ThreadCreate(Channel),
    ThreadUpdate(Channel),
    ThreadDelete(Channel),
    ThreadListSync(ThreadListSync),
    ThreadMemberUpdate {
        channel_id: ChannelId,
        user_id: UserId,
        member: ThreadMember,
    },
    ThreadMembersUpdate(ThreadMembersUpdate),
    MessageCreate(Message),
    MessageUpdate(Update<Message>),
    MessageDelete(Message),
    MessageDeleteBulk(MessageDeleteBulk),
    MessageReactionAdd(MessageReaction),
    MessageReactionRemove(MessageReaction),
    MessageReactionRemoveAll(MessageReactionRemoveAll),
    MessageReactionRemoveEmoji(MessageReaction),
    MessagePollVoteAdd(MessagePollVote),
    MessagePollVoteRemove(MessagePollVote),
    InteractionCreate(InteractionCreate),
    TypingStart(TypingStart),
    UserUpdate(User),
    PresenceUpdate(GuildScoped),
    VoiceStateUpdate(Update<VoiceState>),
    VoiceChannelEffectSend(GuildScoped),
    VoiceServerUpdate(VoiceServerUpdate),
    StageInstanceCreate(GuildScoped),
    StageInstanceUpdate(GuildScoped),
    StageInstanceDelete(GuildScoped),
    IntegrationCreate(GuildScoped),
    IntegrationUpdate(GuildScoped),
    IntegrationDelete(GuildScoped),
    InviteCreate(GuildScoped),
    InviteDelete(GuildScoped),
    WebhooksUpdate(WebhooksUpdate),
    EntitlementCreate(GuildScoped),
    EntitlementUpdate(GuildScoped),
    EntitlementDelete(GuildScoped),
    SubscriptionCreate(GuildScoped),
    SubscriptionUpdate(GuildScoped),
    SubscriptionDelete(GuildScoped),
    AutoModerationRuleCreate(GuildScoped),
    AutoModerationRuleUpdate(GuildScoped),
    AutoModerationRuleDelete(GuildScoped),
    AutoModerationActionExecution(GuildScoped),
    ApplicationCommandPermissionsUpdate(GuildScoped),
    /// An event whose frame carried no recognized `t` at all (`kind` is
    /// `None`), or one this taxonomy doesn't cover yet — passed through as
    /// the raw `d` value so application code isn't blocked on this crate
    /// adding every event Discord ships.
    Unknown {
        kind: Option<embergate_model::gateway::EventType>,
        raw: serde_json::Value,
    },
}

/// `GUILD_CREATE`'s payload: the guild plus every entity it inlines, which
/// the dispatcher fans out into the cache under their own keys before
/// forwarding this event (§4.4).
#[derive(Clone, Debug)]
pub struct GuildCreate {
    pub guild: Guild,
    pub channels: Vec<Channel>,
    pub roles: Vec<Role>,
    pub members: Vec<Member>,
    pub voice_states: Vec<VoiceState>,
}

/// `GUILD_BAN_ADD`/`GUILD_BAN_REMOVE`. The cache tracks no `Ban` entity
/// (§3), so this carries no cache side-effect; it is still decoded in full.
#[derive(Clone, Debug, Deserialize)]
pub struct GuildBan {
    pub guild_id: GuildId,
    pub user: User,
}

/// Shared envelope for guild-scoped events whose entity isn't part of this
/// cache's data model (§3): the `guild_id` is decoded out to a real
/// [`GuildId`], the rest of the payload is kept as the raw JSON object it
/// arrived as rather than given a bespoke struct this cache has no use for.
#[derive(Clone, Debug, Deserialize)]
pub struct GuildScoped {
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    #[serde(flatten)]
    pub raw: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GuildMembersChunk {
    pub guild_id: GuildId,
    pub members: Vec<Member>,
    pub chunk_index: u32,
    pub chunk_count: u32,
    #[serde(default)]
    pub not_found: Vec<UserId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChannelPinsUpdate {
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub last_pin_timestamp: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ThreadListSync {
    pub guild_id: GuildId,
    #[serde(default)]
    pub channel_ids: Vec<ChannelId>,
    pub threads: Vec<Channel>,
    #[serde(default)]
    pub members: Vec<ThreadMember>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ThreadMembersUpdate {
    pub id: ChannelId,
    pub guild_id: GuildId,
    pub member_count: u32,
    #[serde(default)]
    pub added_members: Vec<ThreadMember>,
    #[serde(default)]
    pub removed_member_ids: Vec<UserId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessageDeleteBulk {
    pub ids: Vec<MessageId>,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessageReaction {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub emoji: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessageReactionRemoveAll {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessagePollVote {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    pub answer_id: u32,
}

/// Interactions carry a deeply polymorphic `data` shape keyed by `type`
/// (slash command, message component, modal submit); this decodes the
/// envelope fields every kind shares and keeps `data` as raw JSON rather
/// than this crate speculating about a command-framework layered on top.
#[derive(Clone, Debug, Deserialize)]
pub struct InteractionCreate {
    pub id: embergate_model::id::Snowflake,
    pub application_id: embergate_model::id::Snowflake,
    pub kind: u8,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypingStart {
    pub channel_id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    pub user_id: UserId,
    pub timestamp: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VoiceServerUpdate {
    pub token: String,
    pub guild_id: GuildId,
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WebhooksUpdate {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
}
