use thiserror::Error;

use crate::models::block::BlockError;
use crate::models::table::TableId;
use crate::models::targeting::GridCell;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Schedule table '{0}' not found")]
    NotFound(TableId),

    #[error("{0}")]
    InvariantViolation(String),

    #[error("Schedule table id '{0}' is used more than once")]
    DuplicateTableId(TableId),

    #[error("Block {index} does not exist in table '{table_id}' ({len} blocks)")]
    BlockIndexOutOfRange {
        table_id: TableId,
        index: usize,
        len: usize,
    },

    #[error("Block {index} in table '{table_id}' no longer starts at {} slot {}", .origin.day, .origin.time)]
    StaleBlock {
        table_id: TableId,
        index: usize,
        origin: GridCell,
    },

    #[error("Invalid block: {0}")]
    InvalidBlock(#[from] BlockError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
