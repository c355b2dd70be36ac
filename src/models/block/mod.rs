// Block module
// A course placed on the weekly grid: one day, a contiguous run of slots, opaque course data

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Day column of the weekly grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
            DayOfWeek::Sat => "Sat",
            DayOfWeek::Sun => "Sun",
        }
    }

    /// Single-character label used by the Korean course catalogue
    pub fn korean_label(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "월",
            DayOfWeek::Tue => "화",
            DayOfWeek::Wed => "수",
            DayOfWeek::Thu => "목",
            DayOfWeek::Fri => "금",
            DayOfWeek::Sat => "토",
            DayOfWeek::Sun => "일",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }

    pub fn to_weekday(self) -> Weekday {
        match self {
            DayOfWeek::Mon => Weekday::Mon,
            DayOfWeek::Tue => Weekday::Tue,
            DayOfWeek::Wed => Weekday::Wed,
            DayOfWeek::Thu => Weekday::Thu,
            DayOfWeek::Fri => Weekday::Fri,
            DayOfWeek::Sat => Weekday::Sat,
            DayOfWeek::Sun => Weekday::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(day) = DayOfWeek::ALL
            .iter()
            .find(|day| day.korean_label() == trimmed)
        {
            return Ok(*day);
        }

        // chrono accepts "mon", "Monday", "MON", ...
        trimmed
            .parse::<Weekday>()
            .map(DayOfWeek::from_weekday)
            .map_err(|_| format!("Unknown day of week: '{}'", s))
    }
}

/// Shape violations for a slot range
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("Slot range must contain at least one slot")]
    EmptyRange,

    #[error("Slot {found} at position {position} does not follow {previous}")]
    NotIncreasing {
        position: usize,
        previous: u32,
        found: u32,
    },

    #[error("Slot range has a gap between {previous} and {found}")]
    NotContiguous { previous: u32, found: u32 },

    #[error("A range of {len} slot(s) cannot start at slot {start}")]
    SlotOutOfRange { start: u32, len: u32 },
}

/// Ordered, gap-free run of time-slot indices occupied by one block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct SlotRange(Vec<u32>);

impl SlotRange {
    pub fn new(slots: Vec<u32>) -> Result<Self, BlockError> {
        let first = *slots.first().ok_or(BlockError::EmptyRange)?;
        if first == 0 {
            return Err(BlockError::SlotOutOfRange {
                start: first,
                len: slots.len() as u32,
            });
        }
        let mut previous = first;
        for (position, &found) in slots.iter().enumerate().skip(1) {
            if found <= previous {
                return Err(BlockError::NotIncreasing {
                    position,
                    previous,
                    found,
                });
            }
            if found != previous + 1 {
                return Err(BlockError::NotContiguous { previous, found });
            }
            previous = found;
        }
        Ok(Self(slots))
    }

    /// Range of `len` slots beginning at `start`. Slots are numbered from 1.
    pub fn span(start: u32, len: u32) -> Result<Self, BlockError> {
        if len == 0 {
            return Err(BlockError::EmptyRange);
        }
        let last = start
            .checked_add(len - 1)
            .filter(|_| start >= 1)
            .ok_or(BlockError::SlotOutOfRange { start, len })?;
        Ok(Self((start..=last).collect()))
    }

    pub fn contains(&self, slot: u32) -> bool {
        self.0.contains(&slot)
    }

    pub fn first(&self) -> u32 {
        self.0[0]
    }

    pub fn last(&self) -> u32 {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a range holds at least one slot
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn slots(&self) -> &[u32] {
        &self.0
    }

    /// Same length, starting at `start`
    pub fn shifted_to(&self, start: u32) -> Result<Self, BlockError> {
        Self::span(start, self.0.len() as u32)
    }
}

impl TryFrom<Vec<u32>> for SlotRange {
    type Error = BlockError;

    fn try_from(slots: Vec<u32>) -> Result<Self, Self::Error> {
        SlotRange::new(slots)
    }
}

impl From<SlotRange> for Vec<u32> {
    fn from(range: SlotRange) -> Self {
        range.0
    }
}

/// Course data carried by a block. The scheduler never interprets it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoursePayload {
    pub lecture_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Remaining catalogue fields (instructor, credits, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CoursePayload {
    pub fn new(lecture_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            lecture_id: lecture_id.into(),
            title: title.into(),
            room: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }
}

/// A course placement on the weekly grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub day: DayOfWeek,
    pub range: SlotRange,
    pub payload: CoursePayload,
}

impl Block {
    pub fn new(day: DayOfWeek, range: SlotRange, payload: CoursePayload) -> Self {
        Self {
            day,
            range,
            payload,
        }
    }

    /// Slot membership match: same day and the slot lies inside the range
    pub fn occupies(&self, day: DayOfWeek, slot: u32) -> bool {
        self.day == day && self.range.contains(slot)
    }

    pub fn moved_to(&self, day: DayOfWeek, start: u32) -> Result<Self, BlockError> {
        Ok(Self {
            day,
            range: self.range.shifted_to(start)?,
            payload: self.payload.clone(),
        })
    }
}
