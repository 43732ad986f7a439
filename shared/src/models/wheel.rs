//! Wheel-of-fortune settings

use serde::{Deserialize, Serialize};

/// Server-configured wheel gift settings (single row)
///
/// `participation_delay_hours` is the TTL applied to newly won gifts and
/// retroactively to existing un-expired gifts whenever the value changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WheelGiftSettings {
    pub participation_delay_hours: i64,
}

impl Default for WheelGiftSettings {
    fn default() -> Self {
        Self {
            participation_delay_hours: 72,
        }
    }
}

impl WheelGiftSettings {
    /// TTL in milliseconds
    pub fn delay_millis(&self) -> i64 {
        self.participation_delay_hours * 3_600_000
    }
}
