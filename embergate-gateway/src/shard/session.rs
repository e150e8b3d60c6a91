//! Mutable session state a running [`Shard`](super::Shard) updates as
//! frames arrive: the sequence number Resume needs, and the session id/URL
//! a `READY` hands back.

use embergate_model::gateway::payload_in::Session;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};

#[derive(Debug, Default)]
pub(crate) struct SessionState {
    last_seq: AtomicU64,
    session_id: Mutex<Option<String>>,
    resume_gateway_url: Mutex<Option<String>>,
}

impl SessionState {
    pub(crate) fn last_seq(&self) -> u64 {
        self.last_seq.load(Ordering::Acquire)
    }

    pub(crate) fn set_last_seq(&self, seq: u64) {
        self.last_seq.store(seq, Ordering::Release);
    }

    pub(crate) fn session_id(&self) -> Option<String> {
        self.session_id
            .lock()
            .expect("session state mutex poisoned")
            .clone()
    }

    pub(crate) fn resume_gateway_url(&self) -> Option<String> {
        self.resume_gateway_url
            .lock()
            .expect("session state mutex poisoned")
            .clone()
    }

    /// Record a freshly established session, as handed back by `READY`.
    pub(crate) fn set_session(
        &self,
        session_id: impl Into<String>,
        resume_gateway_url: impl Into<String>,
    ) {
        *self.session_id.lock().expect("session state mutex poisoned") = Some(session_id.into());
        *self
            .resume_gateway_url
            .lock()
            .expect("session state mutex poisoned") = Some(resume_gateway_url.into());
    }

    /// Drop everything needed to Resume, forcing the next connect to
    /// Identify instead. Used on a non-resumable `INVALID_SESSION`.
    pub(crate) fn clear(&self) {
        self.last_seq.store(0, Ordering::Release);
        *self.session_id.lock().expect("session state mutex poisoned") = None;
        *self
            .resume_gateway_url
            .lock()
            .expect("session state mutex poisoned") = None;
    }

    /// A resumable snapshot, present once a `READY` has been processed and
    /// not since cleared.
    pub(crate) fn resume_info(&self) -> Option<Session> {
        Some(Session {
            session_id: self.session_id()?,
            resume_gateway_url: self.resume_gateway_url()?,
            last_seq: self.last_seq(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SessionState;

    #[test]
    fn fresh_state_has_no_resume_info() {
        let state = SessionState::default();
        assert!(state.resume_info().is_none());
    }

    #[test]
    fn set_session_then_resume_info_round_trips() {
        let state = SessionState::default();
        state.set_last_seq(7);
        state.set_session("abc", "wss://resume.example");

        let info = state.resume_info().unwrap();
        assert_eq!(info.session_id, "abc");
        assert_eq!(info.resume_gateway_url, "wss://resume.example");
        assert_eq!(info.last_seq, 7);
    }

    #[test]
    fn clear_drops_resume_info() {
        let state = SessionState::default();
        state.set_last_seq(7);
        state.set_session("abc", "wss://resume.example");
        state.clear();

        assert!(state.resume_info().is_none());
        assert_eq!(state.last_seq(), 0);
    }
}
