//! Spin records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One resolved spin, as appended to the result log
///
/// Records are immutable once written. `forced` is always present so that
/// consumers can tell an overridden outcome from a genuine random pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinRecord {
    /// Spin number (≥ 1) the outcome was resolved for
    pub spin_number: u64,
    /// Winning candidate
    pub winner: String,
    /// Outcome came from the override registry
    pub forced: bool,
    /// An override existed for this spin but its target was not on the wheel,
    /// so a random pick was made instead
    #[serde(default)]
    pub override_missed: bool,
    /// Resolution time
    pub timestamp: DateTime<Utc>,
}

impl SpinRecord {
    pub fn new(spin_number: u64, winner: impl Into<String>, forced: bool) -> Self {
        Self {
            spin_number,
            winner: winner.into(),
            forced,
            override_missed: false,
            timestamp: Utc::now(),
        }
    }

    /// Mark the record as a fallback from a stale override
    pub fn with_override_missed(mut self, missed: bool) -> Self {
        self.override_missed = missed;
        self
    }

    /// Override the timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
