//! Rolling heartbeat round-trip tracking for a [`Shard`](crate::shard::Shard).

use std::{
    iter::FusedIterator,
    slice::Iter,
    time::{Duration, Instant},
};

/// Heartbeat round-trip information for a shard's websocket connection.
#[derive(Clone, Debug)]
pub struct Latency {
    heartbeats: u32,
    received: Option<Instant>,
    recent: [u64; Self::RECENT_LEN],
    sent: Option<Instant>,
    total_time: u64,
}

impl Latency {
    /// Number of recent latencies retained.
    const RECENT_LEN: usize = 5;

    pub(crate) const fn new() -> Self {
        Self {
            heartbeats: 0,
            received: None,
            recent: [0; Self::RECENT_LEN],
            sent: None,
            total_time: 0,
        }
    }

    /// Average round-trip time across every heartbeat this session, or
    /// `None` if no acknowledgement has been received yet.
    pub const fn average(&self) -> Option<Duration> {
        Duration::from_millis(self.total_time).checked_div(self.heartbeats)
    }

    /// Total number of heartbeats acknowledged this session.
    pub const fn heartbeats(&self) -> u32 {
        self.heartbeats
    }

    /// The 5 most recent round-trip times, oldest first.
    pub fn recent(&self) -> RecentLatencyIter<'_> {
        RecentLatencyIter::new(&self.recent)
    }

    pub const fn received(&self) -> Option<Instant> {
        self.received
    }

    pub const fn sent(&self) -> Option<Instant> {
        self.sent
    }

    /// Record that an ACK arrived, computing round-trip time against the
    /// last recorded send.
    pub(crate) fn track_received(&mut self) {
        self.received = Some(Instant::now());
        self.heartbeats += 1;

        let Some(duration) = self.sent.map(|instant| instant.elapsed()) else {
            return;
        };

        let Ok(millis) = u64::try_from(duration.as_millis()) else {
            tracing::error!(duration = ?duration, "heartbeat latency overflowed u64 millis");
            return;
        };

        self.total_time += millis;
        self.recent.rotate_right(1);
        self.recent[0] = millis;
    }

    /// Record that a heartbeat was sent, clearing the pending ACK marker.
    pub(crate) fn track_sent(&mut self) {
        self.received = None;
        self.sent = Some(Instant::now());
    }
}

/// Iterator over [`Latency::recent`].
#[derive(Debug)]
pub struct RecentLatencyIter<'a> {
    inner: Iter<'a, u64>,
}

impl<'a> RecentLatencyIter<'a> {
    fn new(recent: &'a [u64; Latency::RECENT_LEN]) -> Self {
        Self {
            inner: recent.iter(),
        }
    }
}

impl DoubleEndedIterator for RecentLatencyIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().copied().map(Duration::from_millis)
    }
}

impl ExactSizeIterator for RecentLatencyIter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl FusedIterator for RecentLatencyIter<'_> {}

impl Iterator for RecentLatencyIter<'_> {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied().map(Duration::from_millis)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::Latency;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Latency: Clone, Send, Sync);

    fn latency() -> Latency {
        Latency {
            heartbeats: 17,
            received: None,
            recent: [20, 25, 30, 35, 40],
            sent: None,
            total_time: 510,
        }
    }

    #[test]
    fn average_divides_total_by_heartbeat_count() {
        let latency = latency();
        assert_eq!(
            latency.average(),
            Some(std::time::Duration::from_millis(30))
        );
    }

    #[test]
    fn recent_iterates_oldest_to_newest() {
        let latency = latency();
        let values: Vec<_> = latency.recent().collect();
        assert_eq!(
            values,
            vec![20, 25, 30, 35, 40]
                .into_iter()
                .map(std::time::Duration::from_millis)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn no_heartbeats_yields_no_average() {
        assert_eq!(Latency::new().average(), None);
    }
}
