// Targeting module
// Which table (and optionally which cell) the insert dialog is working on

use serde::{Deserialize, Serialize};

use crate::models::block::DayOfWeek;
use crate::models::table::TableId;

/// A single day/slot cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub day: DayOfWeek,
    pub time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTargeting {
    pub table_id: TableId,
    /// Present when the dialog was opened by clicking an empty cell
    pub cell: Option<GridCell>,
}

impl SearchTargeting {
    pub fn for_table(table_id: TableId) -> Self {
        Self {
            table_id,
            cell: None,
        }
    }

    pub fn for_cell(table_id: TableId, day: DayOfWeek, time: u32) -> Self {
        Self {
            table_id,
            cell: Some(GridCell { day, time }),
        }
    }

    pub fn day(&self) -> Option<DayOfWeek> {
        self.cell.map(|cell| cell.day)
    }

    pub fn time(&self) -> Option<u32> {
        self.cell.map(|cell| cell.time)
    }
}
