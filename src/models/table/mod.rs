// Table module
// Schedule tables and the ordered collection that holds them

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::block::{Block, DayOfWeek};

/// Identity of a schedule table. Never reused within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableId(String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One candidate timetable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTable {
    id: TableId,
    blocks: Vec<Block>,
}

impl ScheduleTable {
    pub fn new(id: TableId) -> Self {
        Self {
            id,
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(id: TableId, blocks: Vec<Block>) -> Self {
        Self { id, blocks }
    }

    pub fn id(&self) -> &TableId {
        &self.id
    }

    /// Blocks in display order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks covering the given cell, in display order
    pub fn blocks_at(&self, day: DayOfWeek, slot: u32) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(move |block| block.occupies(day, slot))
    }

    pub fn is_occupied(&self, day: DayOfWeek, slot: u32) -> bool {
        self.blocks_at(day, slot).next().is_some()
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

/// Every table of a session, in creation order.
///
/// Values of this type are immutable once published by the store; each
/// mutation produces a new collection with `version` incremented.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleCollection {
    tables: Vec<ScheduleTable>,
    version: u64,
}

impl ScheduleCollection {
    pub(crate) fn from_tables(tables: Vec<ScheduleTable>) -> Self {
        Self { tables, version: 0 }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Removal is only offered while another table would remain
    pub fn can_remove_table(&self) -> bool {
        self.tables.len() > 1
    }

    pub fn get(&self, id: &TableId) -> Option<&ScheduleTable> {
        self.tables.iter().find(|table| &table.id == id)
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.get(id).is_some()
    }

    /// Zero-based display position of a table
    pub fn position(&self, id: &TableId) -> Option<usize> {
        self.tables.iter().position(|table| &table.id == id)
    }

    pub fn tables(&self) -> &[ScheduleTable] {
        &self.tables
    }

    pub fn ids(&self) -> impl Iterator<Item = &TableId> {
        self.tables.iter().map(|table| &table.id)
    }

    pub(crate) fn get_mut(&mut self, id: &TableId) -> Option<&mut ScheduleTable> {
        self.tables.iter_mut().find(|table| &table.id == id)
    }

    pub(crate) fn push(&mut self, table: ScheduleTable) {
        self.tables.push(table);
    }

    pub(crate) fn remove(&mut self, id: &TableId) -> Option<ScheduleTable> {
        let idx = self.position(id)?;
        Some(self.tables.remove(idx))
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}
