//! Scheduling session.
//!
//! Owns the table store and the targeting context, and is the only writer
//! for both. UI events go through [`ScheduleSession::apply`]; every other
//! write is a [`SessionCommand`], either executed directly or queued from
//! another thread and applied by [`ScheduleSession::drain`].

mod queue;

use std::sync::Arc;

pub use queue::{CommandSender, SessionCommand, SessionQueue};

use crate::models::table::{ScheduleCollection, TableId};
use crate::models::targeting::SearchTargeting;
use crate::services::interaction::{InteractionOutcome, InteractionResolver, UiEvent};
use crate::services::schedule::{ScheduleResult, ScheduleStore, TableIdGenerator};
use crate::services::targeting::SearchTargetingContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    TableCreated(TableId),
    BlockInserted(TableId),
    BlockMoved(TableId),
    Interaction(InteractionOutcome),
}

/// A consistent view of the session for one render pass
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub collection: Arc<ScheduleCollection>,
    pub targeting: Option<SearchTargeting>,
}

#[derive(Default)]
pub struct ScheduleSession {
    store: ScheduleStore,
    targeting: SearchTargetingContext,
}

impl ScheduleSession {
    pub fn new(id_generator: Box<dyn TableIdGenerator>) -> Self {
        Self::from_store(ScheduleStore::new(id_generator))
    }

    pub fn from_store(store: ScheduleStore) -> Self {
        Self {
            store,
            targeting: SearchTargetingContext::new(),
        }
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn targeting(&self) -> &SearchTargetingContext {
        &self.targeting
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            collection: self.store.snapshot(),
            targeting: self.targeting.current().cloned(),
        }
    }

    pub fn apply(&mut self, event: UiEvent) -> ScheduleResult<InteractionOutcome> {
        let outcome = InteractionResolver::resolve(&mut self.store, &mut self.targeting, event)?;

        if let InteractionOutcome::TableRemoved(removed) = &outcome {
            if self.targeting.targets(removed) {
                log::warn!("Closing search targeting for removed table {}", removed);
                self.targeting.close();
            }
        }

        Ok(outcome)
    }

    pub fn execute(&mut self, command: SessionCommand) -> ScheduleResult<CommandOutcome> {
        match command {
            SessionCommand::CreateTable => Ok(CommandOutcome::TableCreated(
                self.store.create_table(),
            )),
            SessionCommand::InsertBlock { table_id, block } => {
                self.store.add_block(&table_id, block)?;
                // Insertion completes the dialog flow for this table
                if self.targeting.targets(&table_id) {
                    self.targeting.close();
                }
                Ok(CommandOutcome::BlockInserted(table_id))
            }
            SessionCommand::MoveBlock {
                table_id,
                index,
                origin,
                day,
                start,
            } => {
                self.store
                    .move_block_from(&table_id, index, origin, day, start)?;
                Ok(CommandOutcome::BlockMoved(table_id))
            }
            SessionCommand::Interaction(event) => {
                self.apply(event).map(CommandOutcome::Interaction)
            }
        }
    }

    /// Apply every queued command in arrival order
    pub fn drain(&mut self, queue: &SessionQueue) -> Vec<ScheduleResult<CommandOutcome>> {
        queue
            .pending()
            .map(|command| {
                let result = self.execute(command);
                if let Err(err) = &result {
                    log::warn!("Queued command failed: {}", err);
                }
                result
            })
            .collect()
    }
}
