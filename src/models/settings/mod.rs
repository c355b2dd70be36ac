// Settings module
// Grid shape and appearance, loaded from settings.toml

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::block::DayOfWeek;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Day columns shown in every table
    pub days: Vec<DayOfWeek>,
    /// Rows per day; slots are numbered from 1
    pub slot_count: u32,
    pub first_slot_start: NaiveTime,
    pub slot_minutes: u32,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days: vec![
                DayOfWeek::Mon,
                DayOfWeek::Tue,
                DayOfWeek::Wed,
                DayOfWeek::Thu,
                DayOfWeek::Fri,
                DayOfWeek::Sat,
            ],
            slot_count: 24,
            first_slot_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_minutes: 30,
            theme: "light".to_string(),
        }
    }
}

impl Settings {
    /// Slot numbers shown on the grid, top to bottom
    pub fn slots(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.slot_count
    }

    pub fn slot_start(&self, slot: u32) -> NaiveTime {
        let offset = i64::from(slot.saturating_sub(1)) * i64::from(self.slot_minutes);
        self.first_slot_start + Duration::minutes(offset)
    }

    /// "09:00~09:30" style label for a slot
    pub fn slot_label(&self, slot: u32) -> String {
        let start = self.slot_start(slot);
        let end = start + Duration::minutes(i64::from(self.slot_minutes));
        format!("{}~{}", start.format("%H:%M"), end.format("%H:%M"))
    }

    pub fn is_dark_theme(&self) -> bool {
        self.theme.to_lowercase().contains("dark")
    }

    /// Reject values that would produce an unusable grid
    pub fn validate(&self) -> Result<(), String> {
        if self.days.is_empty() {
            return Err("At least one day column is required".to_string());
        }
        if self.slot_count == 0 {
            return Err("Slot count must be greater than zero".to_string());
        }
        if self.slot_minutes == 0 {
            return Err("Slot length must be greater than zero minutes".to_string());
        }
        Ok(())
    }
}
