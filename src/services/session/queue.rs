use std::sync::mpsc::{self, Receiver, Sender};

use crate::models::block::{Block, DayOfWeek};
use crate::models::table::TableId;
use crate::models::targeting::GridCell;
use crate::services::interaction::UiEvent;

/// A write request for the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    CreateTable,
    /// Commit from the insert dialog
    InsertBlock { table_id: TableId, block: Block },
    /// Commit from a finished block drag; `origin` is where the block sat when the drag began
    MoveBlock {
        table_id: TableId,
        index: usize,
        origin: GridCell,
        day: DayOfWeek,
        start: u32,
    },
    Interaction(UiEvent),
}

impl From<UiEvent> for SessionCommand {
    fn from(event: UiEvent) -> Self {
        SessionCommand::Interaction(event)
    }
}

/// Cloneable handle for queueing commands from any thread
#[derive(Debug, Clone)]
pub struct CommandSender {
    sender: Sender<SessionCommand>,
}

impl CommandSender {
    /// Returns false once the owning queue has been dropped
    pub fn send(&self, command: impl Into<SessionCommand>) -> bool {
        self.sender.send(command.into()).is_ok()
    }
}

/// Funnel for session writes. Producers hold a [`CommandSender`]; the thread
/// owning the session drains the queue and applies commands in arrival order.
pub struct SessionQueue {
    sender: Sender<SessionCommand>,
    receiver: Receiver<SessionCommand>,
}

impl Default for SessionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender {
            sender: self.sender.clone(),
        }
    }

    /// Commands queued so far, without blocking
    pub(crate) fn pending(&self) -> impl Iterator<Item = SessionCommand> + '_ {
        self.receiver.try_iter()
    }
}
