// Settings module
// Timeline layout options, persisted as TOML

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::services::layout::VisibleWindow;

/// Screen class used to pick a default cell capacity for week/month grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// How many appointments a week/month cell shows before collapsing.
    pub fn default_max_visible_per_cell(self) -> usize {
        match self {
            DeviceClass::Mobile => 2,
            DeviceClass::Desktop => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    pub visible_hour_start: u32,
    pub visible_hour_end: u32,
    /// 0 = Sunday, 1 = Monday, etc.
    pub week_starts_on: u8,
    pub max_visible_per_cell: usize,
    pub tick_interval_ms: u64,
    /// Fraction of the timeline height removed from each lane as spacing.
    pub lane_gap: f64,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            visible_hour_start: 8,
            visible_hour_end: 20,
            week_starts_on: 0, // Sunday
            max_visible_per_cell: DeviceClass::Mobile.default_max_visible_per_cell(),
            tick_interval_ms: 60_000,
            lane_gap: 0.0,
        }
    }
}

impl TimelineSettings {
    /// Defaults tuned for a device class.
    pub fn for_device(device: DeviceClass) -> Self {
        Self {
            max_visible_per_cell: device.default_max_visible_per_cell(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.visible_hour_end > 24 {
            return Err("Visible hour end must be 24 or less".to_string());
        }

        if self.visible_hour_start >= self.visible_hour_end {
            return Err("Visible hour start must be before visible hour end".to_string());
        }

        if self.week_starts_on > 6 {
            return Err("Week start must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }

        if self.tick_interval_ms == 0 {
            return Err("Tick interval must be greater than zero".to_string());
        }

        if !(0.0..1.0).contains(&self.lane_gap) {
            return Err("Lane gap must be at least 0 and less than 1".to_string());
        }

        Ok(())
    }

    /// The configured day window. Assumes the settings are valid.
    pub fn visible_window(&self) -> VisibleWindow {
        VisibleWindow {
            start_hour: self.visible_hour_start,
            end_hour: self.visible_hour_end,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
