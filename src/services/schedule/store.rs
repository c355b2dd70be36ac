use std::collections::HashSet;
use std::sync::Arc;

use super::error::{ScheduleError, ScheduleResult};
use super::id_generator::{SequentialIdGenerator, TableIdGenerator};
use crate::models::block::{Block, DayOfWeek};
use crate::models::table::{ScheduleCollection, ScheduleTable, TableId};
use crate::models::targeting::GridCell;

/// Owns the collection of schedule tables for one session.
///
/// Every mutation works on a private copy of the current collection and
/// publishes it only when the whole operation succeeds. Snapshots handed
/// out earlier keep pointing at the value they were taken from.
pub struct ScheduleStore {
    current: Arc<ScheduleCollection>,
    id_generator: Box<dyn TableIdGenerator>,
    /// Every id ever handed out, including ids of removed tables
    issued: HashSet<TableId>,
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new(Box::new(SequentialIdGenerator::new()))
    }
}

impl ScheduleStore {
    /// Create a store holding a single empty table
    pub fn new(id_generator: Box<dyn TableIdGenerator>) -> Self {
        let mut store = Self {
            current: Arc::new(ScheduleCollection::default()),
            id_generator,
            issued: HashSet::new(),
        };
        let id = store.fresh_id();
        let mut initial = ScheduleCollection::default();
        initial.push(ScheduleTable::new(id));
        store.current = Arc::new(initial);
        store
    }

    /// Seed a store with existing tables, keeping their order
    pub fn from_tables(
        id_generator: Box<dyn TableIdGenerator>,
        tables: Vec<ScheduleTable>,
    ) -> ScheduleResult<Self> {
        if tables.is_empty() {
            return Err(ScheduleError::InvariantViolation(
                "A schedule collection needs at least one table".to_string(),
            ));
        }

        let mut issued = HashSet::new();
        for table in &tables {
            if !issued.insert(table.id().clone()) {
                return Err(ScheduleError::DuplicateTableId(table.id().clone()));
            }
        }

        Ok(Self {
            current: Arc::new(ScheduleCollection::from_tables(tables)),
            id_generator,
            issued,
        })
    }

    /// The current collection; cheap to clone and never changes underneath the caller
    pub fn snapshot(&self) -> Arc<ScheduleCollection> {
        Arc::clone(&self.current)
    }

    pub fn collection(&self) -> &ScheduleCollection {
        &self.current
    }

    pub fn version(&self) -> u64 {
        self.current.version()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn can_remove_table(&self) -> bool {
        self.current.can_remove_table()
    }

    pub fn create_table(&mut self) -> TableId {
        let id = self.fresh_id();
        let mut next = ScheduleCollection::clone(&self.current);
        next.push(ScheduleTable::new(id.clone()));
        self.publish(next);
        log::info!("create_table: created {} ({} tables)", id, self.len());
        id
    }

    pub fn duplicate_table(&mut self, source_id: &TableId) -> ScheduleResult<TableId> {
        let blocks = self
            .current
            .get(source_id)
            .ok_or_else(|| ScheduleError::NotFound(source_id.clone()))?
            .blocks()
            .to_vec();

        let id = self.fresh_id();
        let block_count = blocks.len();
        let duplicate = ScheduleTable::with_blocks(id.clone(), blocks);
        self.commit(|next| {
            next.push(duplicate);
            Ok(())
        })?;

        log::info!(
            "duplicate_table: copied {} blocks from {} into {}",
            block_count,
            source_id,
            id
        );
        Ok(id)
    }

    pub fn remove_table(&mut self, target_id: &TableId) -> ScheduleResult<()> {
        self.commit(|next| {
            if !next.contains(target_id) {
                return Err(ScheduleError::NotFound(target_id.clone()));
            }
            if !next.can_remove_table() {
                return Err(ScheduleError::InvariantViolation(format!(
                    "Cannot remove '{}': it is the only schedule table",
                    target_id
                )));
            }
            next.remove(target_id);
            Ok(())
        })?;

        log::info!(
            "remove_table: removed {} ({} tables remain)",
            target_id,
            self.len()
        );
        Ok(())
    }

    /// Remove every block in the table whose day matches and whose range contains `time`.
    /// Returns how many were removed; zero matches leaves the collection untouched.
    pub fn remove_blocks_matching(
        &mut self,
        table_id: &TableId,
        day: DayOfWeek,
        time: u32,
    ) -> ScheduleResult<usize> {
        let matching = self
            .current
            .get(table_id)
            .ok_or_else(|| ScheduleError::NotFound(table_id.clone()))?
            .blocks_at(day, time)
            .count();

        if matching == 0 {
            log::debug!(
                "remove_blocks_matching: nothing at {} slot {} in {}",
                day,
                time,
                table_id
            );
            return Ok(0);
        }

        let removed = self.commit(|next| {
            let table = next
                .get_mut(table_id)
                .ok_or_else(|| ScheduleError::NotFound(table_id.clone()))?;
            let blocks = table.blocks_mut();
            let before = blocks.len();
            blocks.retain(|block| !block.occupies(day, time));
            Ok(before - blocks.len())
        })?;

        log::info!(
            "remove_blocks_matching: removed {} block(s) at {} slot {} from {}",
            removed,
            day,
            time,
            table_id
        );
        Ok(removed)
    }

    /// Append a block to one table. Other tables are never touched.
    pub fn add_block(&mut self, table_id: &TableId, block: Block) -> ScheduleResult<()> {
        let summary = format!("{} {} {:?}", block.payload.title, block.day, block.range.slots());
        self.commit(|next| {
            next.get_mut(table_id)
                .ok_or_else(|| ScheduleError::NotFound(table_id.clone()))?
                .blocks_mut()
                .push(block);
            Ok(())
        })?;

        log::info!("add_block: placed {} in {}", summary, table_id);
        Ok(())
    }

    /// Move the block at `index` to `day`, starting at slot `start`; its length is kept
    pub fn move_block(
        &mut self,
        table_id: &TableId,
        index: usize,
        day: DayOfWeek,
        start: u32,
    ) -> ScheduleResult<()> {
        self.relocate(table_id, index, None, day, start)
    }

    /// Like [`move_block`](Self::move_block), but only while the block at `index`
    /// still sits at `origin`. A drag commit uses this so an index that went
    /// stale after earlier removals never moves a different block.
    pub fn move_block_from(
        &mut self,
        table_id: &TableId,
        index: usize,
        origin: GridCell,
        day: DayOfWeek,
        start: u32,
    ) -> ScheduleResult<()> {
        self.relocate(table_id, index, Some(origin), day, start)
    }

    fn relocate(
        &mut self,
        table_id: &TableId,
        index: usize,
        origin: Option<GridCell>,
        day: DayOfWeek,
        start: u32,
    ) -> ScheduleResult<()> {
        self.commit(|next| {
            let table = next
                .get_mut(table_id)
                .ok_or_else(|| ScheduleError::NotFound(table_id.clone()))?;
            let blocks = table.blocks_mut();
            let len = blocks.len();
            let block = blocks
                .get_mut(index)
                .ok_or_else(|| ScheduleError::BlockIndexOutOfRange {
                    table_id: table_id.clone(),
                    index,
                    len,
                })?;
            if let Some(origin) = origin {
                if block.day != origin.day || block.range.first() != origin.time {
                    return Err(ScheduleError::StaleBlock {
                        table_id: table_id.clone(),
                        index,
                        origin,
                    });
                }
            }
            *block = block.moved_to(day, start)?;
            Ok(())
        })?;

        log::info!(
            "move_block: moved block {} in {} to {} slot {}",
            index,
            table_id,
            day,
            start
        );
        Ok(())
    }

    /// Apply `mutate` to a copy of the collection and publish it on success.
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut ScheduleCollection) -> ScheduleResult<T>,
    ) -> ScheduleResult<T> {
        let mut next = ScheduleCollection::clone(&self.current);
        let value = mutate(&mut next)?;
        self.publish(next);
        Ok(value)
    }

    fn publish(&mut self, mut next: ScheduleCollection) {
        next.bump_version();
        self.current = Arc::new(next);
    }

    fn fresh_id(&mut self) -> TableId {
        let candidate = self.id_generator.next_id();
        if self.issued.insert(candidate.clone()) {
            return candidate;
        }

        log::warn!(
            "Table id generator repeated '{}'; deriving a fresh id",
            candidate
        );
        let mut suffix = 2u64;
        loop {
            let derived = TableId::new(format!("{}-{}", candidate, suffix));
            if self.issued.insert(derived.clone()) {
                return derived;
            }
            suffix += 1;
        }
    }
}
