//! Decodes dispatch frames, applies their cache side-effects, and fans the
//! decoded event out to registered callbacks.

use super::event::{
    ChannelPinsUpdate, Event, GuildBan, GuildCreate, GuildMembersChunk, GuildScoped,
    InteractionCreate, MessageDeleteBulk, MessagePollVote, MessageReaction,
    MessageReactionRemoveAll, ThreadListSync, ThreadMembersUpdate, TypingStart, Update,
    VoiceServerUpdate, WebhooksUpdate,
};
use crate::{error::Error, json};
use embergate_cache_inmemory::InMemoryCache;
use embergate_model::{
    gateway::{payload_in::GuildMemberRemove, EventType},
    Channel, Guild, Member, Message, Role, ThreadMember, UnavailableGuild, User, VoiceState,
};
use embergate_model::id::{ChannelId, GuildId, RoleId, UserId};
use serde::Deserialize;
use std::sync::{Arc, Mutex};

/// A user-registered callback. Receives the originating shard id and the
/// decoded event, post cache side-effects.
pub type Handler = Arc<dyn Fn(u64, Event) + Send + Sync>;

/// Routes decoded dispatch frames to the cache and to registered callbacks.
///
/// Callback registration is a single broadcast list rather than one
/// registry per event type (§4.4 describes independent typed registries);
/// since [`Event`] is already a typed enum, a callback matches the variant
/// it cares about instead of registering once per wire type. This is a
/// deliberate simplification recorded in the grounding ledger, not a
/// missing feature: every event type in the taxonomy still gets its own
/// `Event` variant and decode step, whether or not it ends up mutating the
/// cache.
pub struct Dispatcher {
    cache: Arc<InMemoryCache>,
    handlers: Mutex<Vec<Handler>>,
    async_dispatch: bool,
}

impl Dispatcher {
    pub fn new(cache: Arc<InMemoryCache>, async_dispatch: bool) -> Self {
        Self {
            cache,
            handlers: Mutex::new(Vec::new()),
            async_dispatch,
        }
    }

    pub fn cache(&self) -> &InMemoryCache {
        &self.cache
    }

    /// Register a callback invoked for every successfully decoded event.
    /// Append-only: there is no way to unregister once the dispatcher is
    /// running, matching the design note that the registration API is not
    /// thread-safe past startup.
    pub fn register(&self, handler: impl Fn(u64, Event) + Send + Sync + 'static) {
        self.handlers
            .lock()
            .expect("dispatcher handler list mutex poisoned")
            .push(Arc::new(handler));
    }

    /// Decode one `DISPATCH` frame's body, apply its cache side-effects, and
    /// fan the result out to every registered callback.
    ///
    /// A malformed payload is logged and dropped per §7's decode failure
    /// policy; it never tears down the shard.
    pub(crate) fn dispatch(&self, shard_id: u64, kind: Option<EventType>, frame: &[u8]) {
        let event = match self.decode_and_apply(kind, frame) {
            Ok(event) => event,
            Err(error) => {
                tracing::warn!(
                    shard_id,
                    kind = ?kind,
                    %error,
                    "dropping malformed dispatch payload",
                );
                return;
            }
        };

        self.fan_out(shard_id, event);
    }

    fn fan_out(&self, shard_id: u64, event: Event) {
        let handlers = self
            .handlers
            .lock()
            .expect("dispatcher handler list mutex poisoned")
            .clone();

        for handler in handlers {
            if self.async_dispatch {
                let event = event.clone();
                tokio::spawn(async move { handler(shard_id, event) });
            } else {
                handler(shard_id, event.clone());
            }
        }
    }

    fn decode_and_apply(&self, kind: Option<EventType>, frame: &[u8]) -> Result<Event, Error> {
        let Some(kind) = kind else {
            return Ok(Event::Unknown {
                kind: None,
                raw: json::deserialize_body(frame).unwrap_or(serde_json::Value::Null),
            });
        };

        Ok(match kind {
            EventType::Ready => {
                let ready: embergate_model::gateway::payload_in::Ready =
                    json::deserialize_body(frame)?;

                for unavailable in &ready.guilds {
                    self.cache.put_guild((*unavailable).into());
                }

                Event::Ready {
                    session_id: ready.session_id,
                    resume_gateway_url: ready.resume_gateway_url,
                    guilds: ready.guilds,
                }
            }
            EventType::Resumed => Event::Resumed,
            EventType::GuildCreate => {
                let wire: GuildCreateWire = json::deserialize_body(frame)?;
                let guild_id = wire.guild.id;

                self.cache.put_guild(wire.guild.clone());

                for channel in &wire.channels {
                    self.cache.put_channel(channel.clone());
                }

                let roles: Vec<Role> = wire
                    .roles
                    .into_iter()
                    .map(|role| role.with_guild_id(guild_id))
                    .collect();
                self.cache.put_roles(guild_id, roles.clone());

                let members: Vec<Member> = wire
                    .members
                    .into_iter()
                    .map(|member| Member {
                        guild_id: Some(guild_id),
                        ..member
                    })
                    .collect();
                for member in &members {
                    self.cache.put_member(guild_id, member.clone());
                }

                for voice_state in &wire.voice_states {
                    self.cache.put_voice_state(voice_state.clone());
                }

                Event::GuildCreate(Box::new(GuildCreate {
                    guild: wire.guild,
                    channels: wire.channels,
                    roles,
                    members,
                    voice_states: wire.voice_states,
                }))
            }
            EventType::GuildUpdate => {
                let guild: Guild = json::deserialize_body(frame)?;
                self.cache.put_guild(guild.clone());
                Event::GuildUpdate(guild)
            }
            EventType::GuildDelete => {
                let guild: UnavailableGuild = json::deserialize_body(frame)?;
                self.cache.delete_guild(guild.id);
                Event::GuildDelete(guild)
            }
            EventType::GuildMemberAdd => {
                let member: Member = json::deserialize_body(frame)?;
                if let Some(guild_id) = member.guild_id {
                    self.cache.put_member(guild_id, member.clone());
                }
                Event::GuildMemberAdd(member)
            }
            EventType::GuildMemberRemove => {
                let removed: GuildMemberRemove = json::deserialize_body(frame)?;
                self.cache.delete_member(removed.guild_id, removed.user.id);
                Event::GuildMemberRemove(removed)
            }
            EventType::GuildMemberUpdate => {
                let member: Member = json::deserialize_body(frame)?;
                if let Some(guild_id) = member.guild_id {
                    self.cache.put_member(guild_id, member.clone());
                }
                Event::GuildMemberUpdate(member)
            }
            EventType::GuildRoleCreate => {
                let wire: RoleEnvelope = json::deserialize_body(frame)?;
                let role = wire.role.with_guild_id(wire.guild_id);
                self.cache.put_role(role.clone());
                Event::GuildRoleCreate {
                    guild_id: wire.guild_id,
                    role,
                }
            }
            EventType::GuildRoleUpdate => {
                let wire: RoleEnvelope = json::deserialize_body(frame)?;
                let role = wire.role.with_guild_id(wire.guild_id);
                self.cache.put_role(role.clone());
                Event::GuildRoleUpdate {
                    guild_id: wire.guild_id,
                    role,
                }
            }
            EventType::GuildRoleDelete => {
                let wire: RoleDeleteEnvelope = json::deserialize_body(frame)?;
                self.cache.del_roles(&[wire.role_id]);
                Event::GuildRoleDelete {
                    guild_id: wire.guild_id,
                    role_id: wire.role_id,
                }
            }
            EventType::ChannelCreate => {
                let channel: Channel = json::deserialize_body(frame)?;
                self.cache.put_channel(channel.clone());
                Event::ChannelCreate(channel)
            }
            EventType::ChannelUpdate => {
                let channel: Channel = json::deserialize_body(frame)?;
                self.cache.put_channel(channel.clone());
                Event::ChannelUpdate(channel)
            }
            EventType::ChannelDelete => {
                let channel: Channel = json::deserialize_body(frame)?;
                self.cache.delete_channel(channel.id());
                Event::ChannelDelete(channel)
            }
            EventType::ChannelPinsUpdate => {
                let wire: ChannelPinsUpdate = json::deserialize_body(frame)?;
                Event::ChannelPinsUpdate(wire)
            }
            // A thread is a `Channel` variant (§3), cached through the same
            // channel store and guild-channel index CHANNEL_CREATE/UPDATE/
            // DELETE use, not a separate thread store.
            EventType::ThreadCreate => {
                let channel: Channel = json::deserialize_body(frame)?;
                self.cache.put_channel(channel.clone());
                Event::ThreadCreate(channel)
            }
            EventType::ThreadUpdate => {
                let channel: Channel = json::deserialize_body(frame)?;
                self.cache.put_channel(channel.clone());
                Event::ThreadUpdate(channel)
            }
            EventType::ThreadDelete => {
                let channel: Channel = json::deserialize_body(frame)?;
                self.cache.delete_channel(channel.id());
                Event::ThreadDelete(channel)
            }
            EventType::ThreadListSync => {
                let wire: ThreadListSync = json::deserialize_body(frame)?;
                for thread in &wire.threads {
                    self.cache.put_channel(thread.clone());
                }
                for member in &wire.members {
                    if let Some(user_id) = member.user_id {
                        self.cache.put_thread_member(member.id, user_id, member.clone());
                    }
                }
                Event::ThreadListSync(wire)
            }
            EventType::ThreadMemberUpdate => {
                let wire: ThreadMemberEnvelope = json::deserialize_body(frame)?;
                let user_id = wire.member.user_id.unwrap_or(wire.user_id);
                self.cache
                    .put_thread_member(wire.member.id, user_id, wire.member.clone());
                Event::ThreadMemberUpdate {
                    channel_id: wire.member.id,
                    user_id,
                    member: wire.member,
                }
            }
            EventType::ThreadMembersUpdate => {
                let wire: ThreadMembersUpdate = json::deserialize_body(frame)?;
                for member in &wire.added_members {
                    if let Some(user_id) = member.user_id {
                        self.cache.put_thread_member(member.id, user_id, member.clone());
                    }
                }
                for user_id in &wire.removed_member_ids {
                    self.cache.delete_thread_member(wire.id, *user_id);
                }
                Event::ThreadMembersUpdate(wire)
            }
            EventType::MessageCreate => {
                let message: Message = json::deserialize_body(frame)?;
                self.cache.put_message(message.clone());
                Event::MessageCreate(message)
            }
            EventType::MessageUpdate => {
                let new: Message = json::deserialize_body(frame)?;
                let old = self
                    .cache
                    .message(new.id)
                    .map(|cached| cached.value().clone())
                    .unwrap_or_else(|| Message::synthesize_old(&new));
                self.cache.put_message(new.clone());
                Event::MessageUpdate(Update { old, new })
            }
            EventType::MessageDelete => {
                let wire: MessageDeleteEnvelope = json::deserialize_body(frame)?;
                let message = self
                    .cache
                    .message(wire.id)
                    .map(|cached| cached.value().clone())
                    .unwrap_or(Message {
                        id: wire.id,
                        channel_id: wire.channel_id,
                        guild_id: wire.guild_id,
                        ..Message::default()
                    });
                self.cache.delete_message(wire.id);
                Event::MessageDelete(message)
            }
            EventType::VoiceStateUpdate => {
                let new: VoiceState = json::deserialize_body(frame)?;
                let old = self
                    .cache
                    .voice_state(new.guild_id, new.user_id)
                    .map(|cached| cached.value().clone())
                    .unwrap_or_else(|| VoiceState::synthesize_old(&new));
                self.cache.put_voice_state(new.clone());
                Event::VoiceStateUpdate(Update { old, new })
            }
            EventType::GuildBanAdd => {
                let wire: GuildBan = json::deserialize_body(frame)?;
                Event::GuildBanAdd(wire)
            }
            EventType::GuildBanRemove => {
                let wire: GuildBan = json::deserialize_body(frame)?;
                Event::GuildBanRemove(wire)
            }
            EventType::GuildEmojisUpdate => {
                Event::GuildEmojisUpdate(json::deserialize_body(frame)?)
            }
            EventType::GuildStickersUpdate => {
                Event::GuildStickersUpdate(json::deserialize_body(frame)?)
            }
            EventType::GuildIntegrationsUpdate => {
                Event::GuildIntegrationsUpdate(json::deserialize_body(frame)?)
            }
            EventType::GuildMembersChunk => {
                let wire: GuildMembersChunk = json::deserialize_body(frame)?;
                for member in &wire.members {
                    self.cache.put_member(wire.guild_id, member.clone());
                }
                Event::GuildMembersChunk(wire)
            }
            EventType::GuildScheduledEventCreate => {
                Event::GuildScheduledEventCreate(json::deserialize_body(frame)?)
            }
            EventType::GuildScheduledEventUpdate => {
                Event::GuildScheduledEventUpdate(json::deserialize_body(frame)?)
            }
            EventType::GuildScheduledEventDelete => {
                Event::GuildScheduledEventDelete(json::deserialize_body(frame)?)
            }
            EventType::GuildScheduledEventUserAdd => {
                Event::GuildScheduledEventUserAdd(json::deserialize_body(frame)?)
            }
            EventType::GuildScheduledEventUserRemove => {
                Event::GuildScheduledEventUserRemove(json::deserialize_body(frame)?)
            }
            EventType::GuildSoundboardSoundCreate => {
                Event::GuildSoundboardSoundCreate(json::deserialize_body(frame)?)
            }
            EventType::GuildSoundboardSoundUpdate => {
                Event::GuildSoundboardSoundUpdate(json::deserialize_body(frame)?)
            }
            EventType::GuildSoundboardSoundDelete => {
                Event::GuildSoundboardSoundDelete(json::deserialize_body(frame)?)
            }
            EventType::GuildSoundboardSoundsUpdate => {
                Event::GuildSoundboardSoundsUpdate(json::deserialize_body(frame)?)
            }
            EventType::SoundboardSounds => {
                Event::SoundboardSounds(json::deserialize_body(frame)?)
            }
            EventType::GuildAuditLogEntryCreate => {
                Event::GuildAuditLogEntryCreate(json::deserialize_body(frame)?)
            }
            EventType::MessageDeleteBulk => {
                let wire: MessageDeleteBulk = json::deserialize_body(frame)?;
                for id in &wire.ids {
                    self.cache.delete_message(*id);
                }
                Event::MessageDeleteBulk(wire)
            }
            EventType::MessageReactionAdd => {
                Event::MessageReactionAdd(json::deserialize_body(frame)?)
            }
            EventType::MessageReactionRemove => {
                Event::MessageReactionRemove(json::deserialize_body(frame)?)
            }
            EventType::MessageReactionRemoveAll => {
                let wire: MessageReactionRemoveAll = json::deserialize_body(frame)?;
                Event::MessageReactionRemoveAll(wire)
            }
            EventType::MessageReactionRemoveEmoji => {
                Event::MessageReactionRemoveEmoji(json::deserialize_body(frame)?)
            }
            EventType::MessagePollVoteAdd => {
                let wire: MessagePollVote = json::deserialize_body(frame)?;
                Event::MessagePollVoteAdd(wire)
            }
            EventType::MessagePollVoteRemove => {
                let wire: MessagePollVote = json::deserialize_body(frame)?;
                Event::MessagePollVoteRemove(wire)
            }
            EventType::InteractionCreate => {
                let wire: InteractionCreate = json::deserialize_body(frame)?;
                Event::InteractionCreate(wire)
            }
            EventType::TypingStart => {
                let wire: TypingStart = json::deserialize_body(frame)?;
                Event::TypingStart(wire)
            }
            EventType::UserUpdate => {
                let user: User = json::deserialize_body(frame)?;
                self.cache.put_user(user.clone());
                Event::UserUpdate(user)
            }
            EventType::PresenceUpdate => {
                Event::PresenceUpdate(json::deserialize_body(frame)?)
            }
            EventType::VoiceChannelEffectSend => {
                Event::VoiceChannelEffectSend(json::deserialize_body(frame)?)
            }
            EventType::VoiceServerUpdate => {
                let wire: VoiceServerUpdate = json::deserialize_body(frame)?;
                Event::VoiceServerUpdate(wire)
            }
            EventType::StageInstanceCreate => {
                Event::StageInstanceCreate(json::deserialize_body(frame)?)
            }
            EventType::StageInstanceUpdate => {
                Event::StageInstanceUpdate(json::deserialize_body(frame)?)
            }
            EventType::StageInstanceDelete => {
                Event::StageInstanceDelete(json::deserialize_body(frame)?)
            }
            EventType::IntegrationCreate => {
                Event::IntegrationCreate(json::deserialize_body(frame)?)
            }
            EventType::IntegrationUpdate => {
                Event::IntegrationUpdate(json::deserialize_body(frame)?)
            }
            EventType::IntegrationDelete => {
                Event::IntegrationDelete(json::deserialize_body(frame)?)
            }
            EventType::InviteCreate => {
                Event::InviteCreate(json::deserialize_body(frame)?)
            }
            EventType::InviteDelete => {
                Event::InviteDelete(json::deserialize_body(frame)?)
            }
            EventType::WebhooksUpdate => {
                let wire: WebhooksUpdate = json::deserialize_body(frame)?;
                Event::WebhooksUpdate(wire)
            }
            EventType::EntitlementCreate => {
                Event::EntitlementCreate(json::deserialize_body(frame)?)
            }
            EventType::EntitlementUpdate => {
                Event::EntitlementUpdate(json::deserialize_body(frame)?)
            }
            EventType::EntitlementDelete => {
                Event::EntitlementDelete(json::deserialize_body(frame)?)
            }
            EventType::SubscriptionCreate => {
                Event::SubscriptionCreate(json::deserialize_body(frame)?)
            }
            EventType::SubscriptionUpdate => {
                Event::SubscriptionUpdate(json::deserialize_body(frame)?)
            }
            EventType::SubscriptionDelete => {
                Event::SubscriptionDelete(json::deserialize_body(frame)?)
            }
            EventType::AutoModerationRuleCreate => {
                Event::AutoModerationRuleCreate(json::deserialize_body(frame)?)
            }
            EventType::AutoModerationRuleUpdate => {
                Event::AutoModerationRuleUpdate(json::deserialize_body(frame)?)
            }
            EventType::AutoModerationRuleDelete => {
                Event::AutoModerationRuleDelete(json::deserialize_body(frame)?)
            }
            EventType::AutoModerationActionExecution => {
                Event::AutoModerationActionExecution(json::deserialize_body(frame)?)
            }
            EventType::ApplicationCommandPermissionsUpdate => {
                Event::ApplicationCommandPermissionsUpdate(json::deserialize_body(frame)?)
            }
        })
    }
}

#[derive(Deserialize)]
struct GuildCreateWire {
    #[serde(flatten)]
    guild: Guild,
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    roles: Vec<Role>,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    voice_states: Vec<VoiceState>,
}

#[derive(Deserialize)]
struct RoleEnvelope {
    guild_id: GuildId,
    role: Role,
}

#[derive(Deserialize)]
struct RoleDeleteEnvelope {
    guild_id: GuildId,
    role_id: RoleId,
}

#[derive(Deserialize)]
struct ThreadMemberEnvelope {
    #[serde(default)]
    user_id: UserId,
    member: ThreadMember,
}

#[derive(Deserialize)]
struct MessageDeleteEnvelope {
    id: embergate_model::id::MessageId,
    channel_id: ChannelId,
    #[serde(default)]
    guild_id: Option<GuildId>,
}

#[cfg(test)]
mod tests {
    use super::Dispatcher;
    use crate::dispatch::event::Event;
    use embergate_cache_inmemory::InMemoryCache;
    use std::sync::{Arc, Mutex};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(InMemoryCache::new()), false)
    }

    #[test]
    fn ready_caches_unavailable_guilds() {
        let dispatcher = dispatcher();
        let frame = br#"{"op":0,"t":"READY","s":1,"d":{"v":10,"user":{"id":"1","username":"bot","discriminator":"0"},"guilds":[{"id":"111","unavailable":true}],"session_id":"abc","resume_gateway_url":"wss://x","application":{"id":"2"}}}"#;

        dispatcher.dispatch(0, Some(embergate_model::gateway::EventType::Ready), frame);

        assert!(dispatcher
            .cache()
            .guild(embergate_model::id::GuildId::new(111))
            .is_some());
    }

    #[test]
    fn message_update_synthesizes_old_when_uncached() {
        let dispatcher = dispatcher();
        let received: Arc<Mutex<Vec<Event>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        dispatcher.register(move |_shard_id, event| sink.lock().unwrap().push(event));

        let frame = br#"{"op":0,"t":"MESSAGE_UPDATE","s":2,"d":{"id":"42","channel_id":"7","author":{"id":"9","username":"u","discriminator":"0"},"content":"new"}}"#;
        dispatcher.dispatch(
            0,
            Some(embergate_model::gateway::EventType::MessageUpdate),
            frame,
        );

        let events = received.lock().unwrap();
        let Event::MessageUpdate(update) = &events[0] else {
            panic!("expected a MessageUpdate event");
        };
        assert_eq!(update.old.content, "");
        assert_eq!(update.new.content, "new");
        assert!(dispatcher
            .cache()
            .message(embergate_model::id::MessageId::new(42))
            .is_some());
    }

    #[test]
    fn unrecognized_event_type_still_reaches_callbacks() {
        let dispatcher = dispatcher();
        let received: Arc<Mutex<Vec<Event>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        dispatcher.register(move |_shard_id, event| sink.lock().unwrap().push(event));

        dispatcher.dispatch(0, None, br#"{"op":0,"t":"SOME_FUTURE_EVENT","d":{"x":1}}"#);

        assert!(matches!(received.lock().unwrap()[0], Event::Unknown { .. }));
    }

    #[test]
    fn thread_create_caches_the_thread_as_a_channel() {
        let dispatcher = dispatcher();
        let frame = br#"{"op":0,"t":"THREAD_CREATE","s":3,"d":{"id":"55","type":11,"guild_id":"9","parent_id":"8","owner_id":"1","thread_metadata":{}}}"#;

        dispatcher.dispatch(
            0,
            Some(embergate_model::gateway::EventType::ThreadCreate),
            frame,
        );

        assert!(dispatcher
            .cache()
            .channel(embergate_model::id::ChannelId::new(55))
            .is_some());
    }

    #[test]
    fn thread_delete_removes_the_thread_channel() {
        let dispatcher = dispatcher();
        let create = br#"{"op":0,"t":"THREAD_CREATE","s":3,"d":{"id":"55","type":11,"guild_id":"9","parent_id":"8","owner_id":"1","thread_metadata":{}}}"#;
        dispatcher.dispatch(
            0,
            Some(embergate_model::gateway::EventType::ThreadCreate),
            create,
        );

        let delete = br#"{"op":0,"t":"THREAD_DELETE","s":4,"d":{"id":"55","type":11,"guild_id":"9","parent_id":"8","owner_id":"1","thread_metadata":{}}}"#;
        dispatcher.dispatch(
            0,
            Some(embergate_model::gateway::EventType::ThreadDelete),
            delete,
        );

        assert!(dispatcher
            .cache()
            .channel(embergate_model::id::ChannelId::new(55))
            .is_none());
    }

    #[test]
    fn guild_members_chunk_caches_every_member() {
        let dispatcher = dispatcher();
        let frame = br#"{"op":0,"t":"GUILD_MEMBERS_CHUNK","s":5,"d":{"guild_id":"9","chunk_index":0,"chunk_count":1,"members":[{"user":{"id":"1","username":"a","discriminator":"0"},"roles":[],"joined_at":"2020-01-01T00:00:00Z"},{"user":{"id":"2","username":"b","discriminator":"0"},"roles":[],"joined_at":"2020-01-01T00:00:00Z"}]}}"#;

        dispatcher.dispatch(
            0,
            Some(embergate_model::gateway::EventType::GuildMembersChunk),
            frame,
        );

        assert_eq!(
            dispatcher
                .cache()
                .count_guild_members(embergate_model::id::GuildId::new(9)),
            2
        );
    }

    #[test]
    fn user_update_upserts_the_user() {
        let dispatcher = dispatcher();
        let frame = br#"{"op":0,"t":"USER_UPDATE","s":6,"d":{"id":"1","username":"renamed","discriminator":"0"}}"#;

        dispatcher.dispatch(0, Some(embergate_model::gateway::EventType::UserUpdate), frame);

        assert_eq!(
            dispatcher
                .cache()
                .user(embergate_model::id::UserId::new(1))
                .unwrap()
                .value()
                .username,
            "renamed"
        );
    }

    #[test]
    fn guild_ban_add_decodes_without_mutating_the_cache() {
        let dispatcher = dispatcher();
        let received: Arc<Mutex<Vec<Event>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        dispatcher.register(move |_shard_id, event| sink.lock().unwrap().push(event));

        let frame = br#"{"op":0,"t":"GUILD_BAN_ADD","s":7,"d":{"guild_id":"9","user":{"id":"13","username":"banned","discriminator":"0"}}}"#;
        dispatcher.dispatch(0, Some(embergate_model::gateway::EventType::GuildBanAdd), frame);

        let Event::GuildBanAdd(ban) = &received.lock().unwrap()[0] else {
            panic!("expected a GuildBanAdd event");
        };
        assert_eq!(ban.user.id.get(), 13);
    }
}
