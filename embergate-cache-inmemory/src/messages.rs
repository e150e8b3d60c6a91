//! Message store operations.

use crate::{CacheFlags, InMemoryCache, Reference};
use embergate_model::{Message, MessageId};

impl InMemoryCache {
    pub fn put_message(&self, message: Message) {
        if !self.enabled(CacheFlags::MESSAGES) {
            return;
        }
        self.messages.insert(message.id, message);
    }

    pub fn message(&self, message_id: MessageId) -> Option<Reference<'_, MessageId, Message>> {
        self.messages.get(&message_id).map(Reference::new)
    }

    pub fn has_message(&self, message_id: MessageId) -> bool {
        self.enabled(CacheFlags::MESSAGES) && self.messages.contains_key(&message_id)
    }

    pub fn delete_message(&self, message_id: MessageId) -> bool {
        self.messages.remove(&message_id).is_some()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::InMemoryCache;
    use embergate_model::Message;

    fn message(id: u64, content: &str) -> Message {
        Message {
            id: id.into(),
            channel_id: 7.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    #[test]
    fn message_update_scenario_synthesizes_old() {
        let cache = InMemoryCache::new();
        // Cache empty: MESSAGE_UPDATE for an unseen message.
        let new = message(42, "new");
        let old = Message::synthesize_old(&new);
        assert_eq!(old.content, "");

        cache.put_message(new.clone());
        assert_eq!(cache.message(42.into()).unwrap().content, "new");
    }

    #[test]
    fn message_delete_attaches_prior_then_removes() {
        let cache = InMemoryCache::new();
        cache.put_message(message(50, "hi"));

        let prior = cache.message(50.into()).map(|r| r.value().clone());
        assert_eq!(prior.unwrap().content, "hi");

        assert!(cache.delete_message(50.into()));
        assert!(cache.message(50.into()).is_none());
    }
}
