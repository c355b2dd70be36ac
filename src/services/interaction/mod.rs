//! Interaction resolver.
//!
//! Translates grid and button events into store and targeting operations.
//! Holds no state of its own; every call reads and writes only what it is given.

use crate::models::block::DayOfWeek;
use crate::models::table::TableId;
use crate::services::schedule::{ScheduleResult, ScheduleStore};
use crate::services::targeting::SearchTargetingContext;

/// Events emitted by the table headers, the grid and the insert dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// "Add schedule" button of a table
    AddScheduleClicked(TableId),
    DuplicateClicked(TableId),
    /// "Remove" button; only honoured while more than one table exists
    RemoveClicked(TableId),
    EmptyCellClicked {
        table_id: TableId,
        day: DayOfWeek,
        time: u32,
    },
    BlockClicked {
        table_id: TableId,
        day: DayOfWeek,
        time: u32,
    },
    DialogDismissed,
}

/// What an event ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    TargetingOpened,
    TargetingClosed,
    TableDuplicated { source: TableId, created: TableId },
    TableRemoved(TableId),
    BlocksRemoved { table_id: TableId, count: usize },
    /// The event's affordance was disabled; nothing changed
    Ignored,
}

pub struct InteractionResolver;

impl InteractionResolver {
    pub fn resolve(
        store: &mut ScheduleStore,
        targeting: &mut SearchTargetingContext,
        event: UiEvent,
    ) -> ScheduleResult<InteractionOutcome> {
        match event {
            UiEvent::AddScheduleClicked(table_id) => {
                targeting.open_for_table(table_id);
                Ok(InteractionOutcome::TargetingOpened)
            }
            UiEvent::DuplicateClicked(source) => {
                let created = store.duplicate_table(&source)?;
                Ok(InteractionOutcome::TableDuplicated { source, created })
            }
            UiEvent::RemoveClicked(table_id) => {
                if !Self::can_remove(store) {
                    log::debug!("Ignoring remove of {}: it is the last table", table_id);
                    return Ok(InteractionOutcome::Ignored);
                }
                store.remove_table(&table_id)?;
                Ok(InteractionOutcome::TableRemoved(table_id))
            }
            UiEvent::EmptyCellClicked {
                table_id,
                day,
                time,
            } => {
                targeting.open_for_cell(table_id, day, time);
                Ok(InteractionOutcome::TargetingOpened)
            }
            UiEvent::BlockClicked {
                table_id,
                day,
                time,
            } => {
                let count = store.remove_blocks_matching(&table_id, day, time)?;
                Ok(InteractionOutcome::BlocksRemoved { table_id, count })
            }
            UiEvent::DialogDismissed => {
                targeting.close();
                Ok(InteractionOutcome::TargetingClosed)
            }
        }
    }

    /// Enabled state of every table's "Remove" button
    pub fn can_remove(store: &ScheduleStore) -> bool {
        store.can_remove_table()
    }
}
