//! Operator settings

use serde::{Deserialize, Serialize};

/// How a draw is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Immediate animated draw
    Timer,
    /// Pick 1 of N face-down cards
    Card,
}

impl Default for DrawMode {
    fn default() -> Self {
        Self::Timer
    }
}

/// Range the settings UI exposes for card counts
const CARD_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// Operator configuration, freely overwritten via [`SettingsPatch`]
///
/// Wire field names match the persisted blob (`autoStopOnEnd`, ...).
/// `#[serde(default)]` keeps older blobs loading leniently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Stop accepting draws once all quotas are exhausted
    pub auto_stop_on_end: bool,
    pub sound_enabled: bool,
    pub draw_mode: DrawMode,
    /// Cards dealt per card-game session (1..=10)
    pub card_count: u32,
    /// Bagels rendered on the winning card (1..=10, display only)
    pub card_bagel_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_stop_on_end: true,
            sound_enabled: true,
            draw_mode: DrawMode::Timer,
            card_count: 5,
            card_bagel_count: 4,
        }
    }
}

/// Partial settings update; unset fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub auto_stop_on_end: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub draw_mode: Option<DrawMode>,
    pub card_count: Option<u32>,
    pub card_bagel_count: Option<u32>,
}

impl SettingsPatch {
    /// Merge set fields into `settings`, clamping card counts to the UI range
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(v) = self.auto_stop_on_end {
            settings.auto_stop_on_end = v;
        }
        if let Some(v) = self.sound_enabled {
            settings.sound_enabled = v;
        }
        if let Some(v) = self.draw_mode {
            settings.draw_mode = v;
        }
        if let Some(v) = self.card_count {
            settings.card_count = v.clamp(*CARD_COUNT_RANGE.start(), *CARD_COUNT_RANGE.end());
        }
        if let Some(v) = self.card_bagel_count {
            settings.card_bagel_count = v.clamp(*CARD_COUNT_RANGE.start(), *CARD_COUNT_RANGE.end());
        }
    }
}
