//! Cache feature flags.

use std::sync::atomic::{AtomicU16, Ordering};

bitflags::bitflags! {
    /// One bit per cached entity kind. `Put*` is a no-op for a kind whose
    /// bit is clear; `Get*`/`Count*` ignore flags entirely (reads are
    /// always served if data is present); `Has*` is false for a disabled
    /// kind even if data is present. Bit order is part of the public
    /// contract (§6): `Users(0), Guilds(1), Members(2), ThreadMembers(3),
    /// Messages(4), Channels(5), Roles(6), VoiceStates(7)`.
    pub struct CacheFlags: u16 {
        const USERS = 1 << 0;
        const GUILDS = 1 << 1;
        const MEMBERS = 1 << 2;
        const THREAD_MEMBERS = 1 << 3;
        const MESSAGES = 1 << 4;
        const CHANNELS = 1 << 5;
        const ROLES = 1 << 6;
        const VOICE_STATES = 1 << 7;
    }
}

impl Default for CacheFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// Atomic storage for [`CacheFlags`].
///
/// `SetFlags` is not synchronized against concurrent `Put*`/`Has*` calls —
/// flags are expected to be set once at startup, so this only needs to
/// guarantee that a value written before other threads start observing the
/// cache is visible to them, not that every in-flight operation sees a
/// consistent flag value mid-update. Hence plain acquire/release rather
/// than a lock.
#[derive(Debug)]
pub struct AtomicCacheFlags(AtomicU16);

impl AtomicCacheFlags {
    pub fn new(flags: CacheFlags) -> Self {
        Self(AtomicU16::new(flags.bits()))
    }

    pub fn get(&self) -> CacheFlags {
        CacheFlags::from_bits_truncate(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, flags: CacheFlags) {
        self.0.store(flags.bits(), Ordering::Release);
    }
}

impl Default for AtomicCacheFlags {
    fn default() -> Self {
        Self::new(CacheFlags::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{AtomicCacheFlags, CacheFlags};

    #[test]
    fn defaults_to_all_enabled() {
        assert_eq!(CacheFlags::default(), CacheFlags::all());
        assert_eq!(AtomicCacheFlags::default().get(), CacheFlags::all());
    }

    #[test]
    fn bit_positions_are_stable() {
        assert_eq!(CacheFlags::USERS.bits(), 1);
        assert_eq!(CacheFlags::GUILDS.bits(), 1 << 1);
        assert_eq!(CacheFlags::MEMBERS.bits(), 1 << 2);
        assert_eq!(CacheFlags::THREAD_MEMBERS.bits(), 1 << 3);
        assert_eq!(CacheFlags::MESSAGES.bits(), 1 << 4);
        assert_eq!(CacheFlags::CHANNELS.bits(), 1 << 5);
        assert_eq!(CacheFlags::ROLES.bits(), 1 << 6);
        assert_eq!(CacheFlags::VOICE_STATES.bits(), 1 << 7);
    }

    #[test]
    fn set_is_visible_to_later_get() {
        let flags = AtomicCacheFlags::default();
        flags.set(CacheFlags::empty());
        assert_eq!(flags.get(), CacheFlags::empty());
    }
}
