use std::cmp::Reverse;

use crate::events::Event;

/// Ordering key of a balance entry.
///
/// Ascending `VersionKey` order is reverse-chronological, so the most recent
/// entry at or before a time `T` is the first key `>= VersionKey::floor(T)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey(Reverse<(i64, u64, u32)>);

impl VersionKey {
    pub fn new(timestamp: i64, block: u64, log_index: u32) -> Self {
        Self(Reverse((timestamp, block, log_index)))
    }

    pub fn for_event(event: &Event) -> Self {
        Self::new(event.timestamp, event.block, event.log_index)
    }

    /// Lower-bound probe for "latest entry with timestamp <= `timestamp`".
    pub fn floor(timestamp: i64) -> Self {
        Self::new(timestamp, u64::MAX, u32::MAX)
    }

    fn parts(&self) -> (i64, u64, u32) {
        self.0 .0
    }

    pub fn timestamp(&self) -> i64 {
        self.parts().0
    }

    pub fn block(&self) -> u64 {
        self.parts().1
    }

    pub fn log_index(&self) -> u32 {
        self.parts().2
    }
}
