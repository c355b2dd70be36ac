use egui::{Context, Id};

use crate::models::block::{Block, DayOfWeek};
use crate::models::table::TableId;
use crate::models::targeting::GridCell;

/// A block being dragged across one table's grid
#[derive(Clone, Debug, PartialEq)]
pub struct BlockDragContext {
    pub table_id: TableId,
    /// Position of the block in the table when the drag began
    pub block_index: usize,
    /// Day and first slot of the block when the drag began
    pub origin: GridCell,
    pub block_len: u32,
    /// Slots between the block's first slot and the grabbed slot
    pub grab_offset: u32,
    pub hovered_day: Option<DayOfWeek>,
    pub hovered_slot: Option<u32>,
}

impl BlockDragContext {
    pub fn from_block(table_id: TableId, block_index: usize, block: &Block, grabbed_slot: u32) -> Self {
        Self {
            table_id,
            block_index,
            origin: GridCell {
                day: block.day,
                time: block.range.first(),
            },
            block_len: block.range.len() as u32,
            grab_offset: grabbed_slot.saturating_sub(block.range.first()),
            hovered_day: Some(block.day),
            hovered_slot: Some(grabbed_slot),
        }
    }

    /// Where the block would start if dropped now, kept inside `1..=slot_count`
    pub fn drop_target(&self, slot_count: u32) -> Option<(DayOfWeek, u32)> {
        let day = self.hovered_day?;
        let slot = self.hovered_slot?;
        let latest_start = slot_count.saturating_sub(self.block_len).saturating_add(1).max(1);
        let start = slot.saturating_sub(self.grab_offset).clamp(1, latest_start);
        Some((day, start))
    }
}

pub struct DragManager;

impl DragManager {
    fn storage_id() -> Id {
        Id::new("timetable_block_drag_state")
    }

    pub fn begin(ctx: &Context, context: BlockDragContext) {
        ctx.memory_mut(|mem| {
            mem.data.insert_temp(Self::storage_id(), context);
        });
    }

    pub fn active(ctx: &Context) -> Option<BlockDragContext> {
        ctx.memory_mut(|mem| mem.data.get_temp::<BlockDragContext>(Self::storage_id()))
    }

    pub fn active_for_table(ctx: &Context, table_id: &TableId) -> Option<BlockDragContext> {
        Self::active(ctx).filter(|drag| &drag.table_id == table_id)
    }

    pub fn update_hover(ctx: &Context, day: DayOfWeek, slot: u32) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(mut state) = mem.data.get_temp::<BlockDragContext>(id) {
                state.hovered_day = Some(day);
                state.hovered_slot = Some(slot);
                mem.data.insert_temp(id, state);
            }
        });
    }

    /// End the drag for this table, returning its final state
    pub fn finish_for_table(ctx: &Context, table_id: &TableId) -> Option<BlockDragContext> {
        let id = Self::storage_id();
        let mut result = None;
        ctx.memory_mut(|mem| {
            if let Some(current) = mem.data.get_temp::<BlockDragContext>(id) {
                if &current.table_id == table_id {
                    result = Some(current);
                    mem.data.remove::<BlockDragContext>(id);
                }
            }
        });
        result
    }

    pub fn cancel(ctx: &Context) {
        ctx.memory_mut(|mem| {
            mem.data.remove::<BlockDragContext>(Self::storage_id());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::{CoursePayload, SlotRange};

    fn drag_for(slots: Vec<u32>, grabbed: u32) -> BlockDragContext {
        let block = Block::new(
            DayOfWeek::Mon,
            SlotRange::new(slots).unwrap(),
            CoursePayload::new("L", "Lecture"),
        );
        BlockDragContext::from_block(TableId::new("A"), 0, &block, grabbed)
    }

    #[test]
    fn test_drop_target_keeps_grab_offset() {
        let mut drag = drag_for(vec![4, 5, 6], 5);
        drag.hovered_day = Some(DayOfWeek::Wed);
        drag.hovered_slot = Some(10);
        assert_eq!(drag.drop_target(24), Some((DayOfWeek::Wed, 9)));
    }

    #[test]
    fn test_drop_target_clamps_to_grid() {
        let mut drag = drag_for(vec![4, 5, 6], 6);
        drag.hovered_slot = Some(1);
        assert_eq!(drag.drop_target(24), Some((DayOfWeek::Mon, 1)));

        drag.grab_offset = 0;
        drag.hovered_slot = Some(24);
        assert_eq!(drag.drop_target(24), Some((DayOfWeek::Mon, 22)));
    }

    #[test]
    fn test_from_block_records_origin() {
        let drag = drag_for(vec![4, 5, 6], 5);
        assert_eq!(
            drag.origin,
            GridCell {
                day: DayOfWeek::Mon,
                time: 4
            }
        );
        assert_eq!(drag.grab_offset, 1);
    }

    #[test]
    fn test_cancel_discards_drag() {
        let ctx = Context::default();
        DragManager::begin(&ctx, drag_for(vec![2, 3], 2));
        DragManager::cancel(&ctx);

        DragManager::update_hover(&ctx, DayOfWeek::Fri, 7);
        assert!(DragManager::active(&ctx).is_none());
        assert!(DragManager::finish_for_table(&ctx, &TableId::new("A")).is_none());
    }

    #[test]
    fn test_drag_state_round_trip_through_memory() {
        let ctx = Context::default();
        let table = TableId::new("A");
        DragManager::begin(&ctx, drag_for(vec![2, 3], 2));
        DragManager::update_hover(&ctx, DayOfWeek::Fri, 7);

        assert!(DragManager::active_for_table(&ctx, &TableId::new("B")).is_none());
        assert!(DragManager::finish_for_table(&ctx, &TableId::new("B")).is_none());

        let finished = DragManager::finish_for_table(&ctx, &table).unwrap();
        assert_eq!(finished.drop_target(24), Some((DayOfWeek::Fri, 7)));
        assert!(DragManager::active(&ctx).is_none());
    }
}
