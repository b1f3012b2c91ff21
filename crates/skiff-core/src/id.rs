use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Temporary identifier for a message that has not yet been confirmed by the
/// server.
///
/// A `LocalId` combines the creation timestamp with a session-scoped random
/// nonce and a monotonic per-session counter. The counter guarantees
/// uniqueness within a session; the nonce keeps ids from two sessions started
/// in the same millisecond apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalId {
    pub stamp_ms: i64,
    pub nonce: u32,
    pub seq: u32,
}

impl std::fmt::Display for LocalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "local-{}-{:08x}-{}", self.stamp_ms, self.nonce, self.seq)
    }
}

/// Mints [`LocalId`]s for one client session.
#[derive(Debug)]
pub struct LocalIdGenerator {
    nonce: u32,
    next_seq: AtomicU32,
}

impl LocalIdGenerator {
    /// Creates a generator with the given session nonce. Callers are expected
    /// to draw the nonce from a real entropy source.
    pub fn new(nonce: u32) -> Self {
        Self {
            nonce,
            next_seq: AtomicU32::new(1),
        }
    }

    pub fn next(&self) -> LocalId {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let stamp_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        LocalId {
            stamp_ms,
            nonce: self.nonce,
            seq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_within_a_session() {
        let generator = LocalIdGenerator::new(0xfeed);
        let ids: HashSet<LocalId> = (0..1000).map(|_| generator.next()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn sequence_is_monotonic() {
        let generator = LocalIdGenerator::new(7);
        let first = generator.next();
        let second = generator.next();
        assert!(second.seq > first.seq);
        assert_eq!(first.nonce, second.nonce);
    }

    #[test]
    fn display_is_stable() {
        let id = LocalId {
            stamp_ms: 1_700_000_000_000,
            nonce: 0xab,
            seq: 3,
        };
        assert_eq!(id.to_string(), "local-1700000000000-000000ab-3");
    }
}
