// Search targeting context
// Transient state telling the insert dialog which table/cell it is working on

use crate::models::block::DayOfWeek;
use crate::models::table::{ScheduleCollection, ScheduleTable, TableId};
use crate::models::targeting::SearchTargeting;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTargetingContext {
    current: Option<SearchTargeting>,
}

impl SearchTargetingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target a whole table, replacing any prior targeting
    pub fn open_for_table(&mut self, table_id: TableId) {
        log::debug!("targeting: open for table {}", table_id);
        self.current = Some(SearchTargeting::for_table(table_id));
    }

    /// Target one empty cell of a table, replacing any prior targeting
    pub fn open_for_cell(&mut self, table_id: TableId, day: DayOfWeek, time: u32) {
        log::debug!("targeting: open for {} slot {} in {}", day, time, table_id);
        self.current = Some(SearchTargeting::for_cell(table_id, day, time));
    }

    pub fn close(&mut self) {
        if self.current.take().is_some() {
            log::debug!("targeting: closed");
        }
    }

    pub fn current(&self) -> Option<&SearchTargeting> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn targets(&self, table_id: &TableId) -> bool {
        self.current
            .as_ref()
            .is_some_and(|targeting| &targeting.table_id == table_id)
    }

    /// The targeting together with its table, or `None` when closed or the table is gone.
    pub fn resolve<'a>(
        &'a self,
        collection: &'a ScheduleCollection,
    ) -> Option<(&'a SearchTargeting, &'a ScheduleTable)> {
        let targeting = self.current.as_ref()?;
        let table = collection.get(&targeting.table_id)?;
        Some((targeting, table))
    }
}
