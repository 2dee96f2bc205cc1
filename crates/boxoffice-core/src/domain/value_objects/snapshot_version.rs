//! Snapshot version tags
//!
//! Every diff is computed against a "last known persisted" snapshot that
//! only the completion of a prior write may advance. The version tag ties
//! a computed diff to the snapshot it is valid against so late-arriving
//! results can be recognized as stale and discarded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic tag identifying one persisted state of a write target
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SnapshotVersion(u64);

impl SnapshotVersion {
    /// Version of a target nothing has ever been written to
    pub const INITIAL: Self = Self(0);

    /// The version after one more applied write
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_advance_monotonically() {
        let v0 = SnapshotVersion::INITIAL;
        let v1 = v0.next();

        assert!(v1 > v0);
        assert_eq!(v1.value(), 1);
        assert_eq!(v1.to_string(), "v1");
    }
}
