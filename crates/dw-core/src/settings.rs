//! Wheel settings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WheelResult;

/// Allowed spin duration range (seconds)
pub const SPIN_DURATION_RANGE: (u32, u32) = (2, 10);

/// Allowed full-rotation range per spin
pub const SPIN_COUNT_RANGE: (u32, u32) = (3, 15);

/// User-facing wheel settings
///
/// Every field has a default so partial or older configuration files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    /// Animation length in seconds
    pub spin_duration: u32,
    /// Full rotations before the wheel settles
    pub spin_count: u32,
    /// Allow the same name to be added twice
    pub allow_duplicates: bool,
    /// Remove the winner from the wheel after each spin
    pub remove_winner: bool,
    pub sound_enabled: bool,
    pub animation_style: String,
    /// Keys this version does not know about, kept for round-tripping
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            spin_duration: 4,
            spin_count: 8,
            allow_duplicates: true,
            remove_winner: false,
            sound_enabled: true,
            animation_style: "smooth".to_string(),
            extra: Map::new(),
        }
    }
}

impl WheelSettings {
    /// Settings with duration and rotation count pulled into their allowed ranges
    pub fn clamped(mut self) -> Self {
        self.spin_duration = self
            .spin_duration
            .clamp(SPIN_DURATION_RANGE.0, SPIN_DURATION_RANGE.1);
        self.spin_count = self.spin_count.clamp(SPIN_COUNT_RANGE.0, SPIN_COUNT_RANGE.1);
        self
    }

    /// Apply a partial settings object on top of these settings
    ///
    /// Keys absent from `patch` keep their current value. A key with the wrong
    /// type fails the whole merge and leaves `self` untouched.
    pub fn merge_json(&self, patch: &Map<String, Value>) -> WheelResult<Self> {
        let mut base = serde_json::to_value(self)?;
        if let Value::Object(ref mut fields) = base {
            for (key, value) in patch {
                fields.insert(key.clone(), value.clone());
            }
        }
        let merged: WheelSettings = serde_json::from_value(base)?;
        Ok(merged.clamped())
    }
}
