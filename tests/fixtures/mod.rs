// Test fixtures - reusable test data
// Builds blocks, tables and stores with predictable ids

#![allow(dead_code)]

use timetable_planner::models::block::{Block, CoursePayload, DayOfWeek, SlotRange};
use timetable_planner::models::table::{ScheduleTable, TableId};
use timetable_planner::services::schedule::{ScheduleStore, TableIdGenerator};
use timetable_planner::services::session::ScheduleSession;

/// Sample course blocks
pub mod blocks {
    use super::*;

    pub fn lecture(title: &str, day: DayOfWeek, start: u32, len: u32) -> Block {
        Block::new(
            day,
            SlotRange::span(start, len).unwrap(),
            CoursePayload::new(title.to_uppercase().replace(' ', "_"), title),
        )
    }

    /// Mon 09:00-10:00
    pub fn calculus() -> Block {
        lecture("Calculus", DayOfWeek::Mon, 1, 2)
    }

    /// Mon 09:30-11:00, overlapping [`calculus`]
    pub fn physics_lab() -> Block {
        lecture("Physics Lab", DayOfWeek::Mon, 2, 3)
    }

    /// Wed 13:00-14:30
    pub fn data_structures() -> Block {
        let mut block = lecture("Data Structures", DayOfWeek::Wed, 9, 3);
        block.payload = block.payload.with_room("B-104");
        block
    }
}

/// Hands out "A", "B", "C", ... so assertions can name tables
pub struct LetterIds {
    next: u8,
}

impl LetterIds {
    pub fn new() -> Self {
        Self { next: b'A' }
    }
}

impl TableIdGenerator for LetterIds {
    fn next_id(&mut self) -> TableId {
        let id = TableId::new((self.next as char).to_string());
        self.next += 1;
        id
    }
}

/// A store whose only table is "A"
pub fn letter_store() -> ScheduleStore {
    ScheduleStore::new(Box::new(LetterIds::new()))
}

/// A session over [`letter_store`]
pub fn letter_session() -> ScheduleSession {
    ScheduleSession::from_store(letter_store())
}

/// A store seeded with table "A" holding the given blocks
pub fn seeded_store(blocks: Vec<Block>) -> ScheduleStore {
    let mut ids = LetterIds::new();
    let first = ids.next_id();
    ScheduleStore::from_tables(Box::new(ids), vec![ScheduleTable::with_blocks(first, blocks)])
        .unwrap()
}

pub fn id(raw: &str) -> TableId {
    TableId::new(raw)
}
