//! Weekly grid for a single schedule table.
//!
//! Draws day columns and slot rows, paints the table's blocks on top, and
//! reports clicks and finished drags as [`GridAction`]s. The grid never
//! changes the table itself.

use chrono::Timelike;
use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::models::block::{Block, DayOfWeek};
use crate::models::settings::Settings;
use crate::models::table::ScheduleTable;
use crate::models::targeting::GridCell;
use crate::ui_egui::drag::{BlockDragContext, DragManager};
use crate::ui_egui::theme::TimetableTheme;

pub const SLOT_HEIGHT: f32 = 22.0;
pub const TIME_LABEL_WIDTH: f32 = 84.0;
pub const HEADER_HEIGHT: f32 = 24.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    EmptyCellClicked { day: DayOfWeek, time: u32 },
    BlockClicked { day: DayOfWeek, time: u32 },
    /// A block was dragged onto a new start cell
    BlockDropped {
        index: usize,
        origin: GridCell,
        day: DayOfWeek,
        start: u32,
    },
}

/// Screen geometry of one grid
#[derive(Debug, Clone)]
pub struct GridLayout {
    rect: Rect,
    days: Vec<DayOfWeek>,
    slot_count: u32,
    col_width: f32,
}

impl GridLayout {
    pub fn new(rect: Rect, days: &[DayOfWeek], slot_count: u32) -> Self {
        let col_width = (rect.width() - TIME_LABEL_WIDTH) / days.len().max(1) as f32;
        Self {
            rect,
            days: days.to_vec(),
            slot_count,
            col_width,
        }
    }

    pub fn desired_size(width: f32, slot_count: u32) -> Vec2 {
        Vec2::new(width, HEADER_HEIGHT + SLOT_HEIGHT * slot_count as f32)
    }

    fn body_top(&self) -> f32 {
        self.rect.top() + HEADER_HEIGHT
    }

    fn column_left(&self, col: usize) -> f32 {
        self.rect.left() + TIME_LABEL_WIDTH + col as f32 * self.col_width
    }

    fn slot_top(&self, slot: u32) -> f32 {
        self.body_top() + slot.saturating_sub(1) as f32 * SLOT_HEIGHT
    }

    pub fn column_of(&self, day: DayOfWeek) -> Option<usize> {
        self.days.iter().position(|d| *d == day)
    }

    pub fn header_rect(&self, col: usize) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.column_left(col), self.rect.top()),
            Vec2::new(self.col_width, HEADER_HEIGHT),
        )
    }

    pub fn time_label_rect(&self, slot: u32) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.rect.left(), self.slot_top(slot)),
            Vec2::new(TIME_LABEL_WIDTH, SLOT_HEIGHT),
        )
    }

    pub fn cell_rect(&self, col: usize, slot: u32) -> Rect {
        self.span_rect(col, slot, slot)
    }

    /// Rect covering slots `first..=last` of a column
    pub fn span_rect(&self, col: usize, first: u32, last: u32) -> Rect {
        let rows = last.saturating_sub(first) + 1;
        Rect::from_min_size(
            Pos2::new(self.column_left(col), self.slot_top(first)),
            Vec2::new(self.col_width, rows as f32 * SLOT_HEIGHT),
        )
    }

    /// Day and slot under a screen position, if it lies on the grid body
    pub fn cell_at(&self, pos: Pos2) -> Option<(DayOfWeek, u32)> {
        let x = pos.x - self.column_left(0);
        let y = pos.y - self.body_top();
        if x < 0.0 || y < 0.0 || self.col_width <= 0.0 {
            return None;
        }

        let col = (x / self.col_width) as usize;
        let slot = (y / SLOT_HEIGHT) as u32 + 1;
        if slot > self.slot_count {
            return None;
        }
        self.days.get(col).map(|day| (*day, slot))
    }
}

pub fn render_table_grid(
    ui: &mut egui::Ui,
    table: &ScheduleTable,
    settings: &Settings,
    theme: &TimetableTheme,
    width: f32,
) -> Vec<GridAction> {
    let mut actions = Vec::new();
    let (rect, _) = ui.allocate_exact_size(
        GridLayout::desired_size(width, settings.slot_count),
        Sense::hover(),
    );
    let layout = GridLayout::new(rect, &settings.days, settings.slot_count);
    let painter = ui.painter_at(rect);
    let ctx = ui.ctx().clone();

    painter.rect_filled(rect, 4.0, theme.grid_background);

    // Header row
    for (col, day) in settings.days.iter().enumerate() {
        let header = layout.header_rect(col);
        painter.rect_filled(header, 0.0, theme.header_background);
        painter.text(
            header.center(),
            Align2::CENTER_CENTER,
            day.short_name(),
            FontId::proportional(13.0),
            theme.text_primary,
        );
    }

    // Time labels and row lines
    for slot in settings.slots() {
        let label_rect = layout.time_label_rect(slot);
        painter.rect_filled(label_rect, 0.0, theme.header_background);
        painter.text(
            label_rect.left_center() + Vec2::new(6.0, 0.0),
            Align2::LEFT_CENTER,
            settings.slot_label(slot),
            FontId::proportional(10.0),
            theme.text_secondary,
        );

        let on_the_hour = settings.slot_start(slot).minute() == 0;
        let line_color = if on_the_hour {
            theme.hour_line
        } else {
            theme.grid_line
        };
        painter.line_segment(
            [
                Pos2::new(rect.left(), label_rect.top()),
                Pos2::new(rect.right(), label_rect.top()),
            ],
            Stroke::new(1.0, line_color),
        );
    }

    // Empty cells
    for (col, day) in settings.days.iter().enumerate() {
        let column = layout.span_rect(col, 1, settings.slot_count);
        painter.line_segment(
            [column.left_top(), column.left_bottom()],
            Stroke::new(1.0, theme.grid_line),
        );

        for slot in settings.slots() {
            let cell = layout.cell_rect(col, slot);
            let id = ui.id().with(("cell", table.id().as_str(), col, slot));
            let response = ui.interact(cell, id, Sense::click());

            if table.is_occupied(*day, slot) {
                continue;
            }
            if response.hovered() {
                painter.rect_filled(cell, 0.0, theme.grid_line.gamma_multiply(0.6));
                ctx.set_cursor_icon(CursorIcon::PointingHand);
            }
            if response.clicked() {
                actions.push(GridAction::EmptyCellClicked {
                    day: *day,
                    time: slot,
                });
            }
        }
    }

    // Blocks, registered after the cells so they receive the pointer first
    for (index, block) in table.blocks().iter().enumerate() {
        let Some(col) = layout.column_of(block.day) else {
            continue;
        };

        let block_rect = layout
            .span_rect(col, block.range.first(), block.range.last())
            .shrink(1.5);
        painter.rect_filled(block_rect, 3.0, theme.block_fill(&block.payload));

        let text_painter = painter.with_clip_rect(block_rect.intersect(rect));
        text_painter.text(
            block_rect.left_top() + Vec2::new(4.0, 3.0),
            Align2::LEFT_TOP,
            &block.payload.title,
            FontId::proportional(11.0),
            theme.text_primary,
        );
        if let Some(room) = &block.payload.room {
            text_painter.text(
                block_rect.left_top() + Vec2::new(4.0, 16.0),
                Align2::LEFT_TOP,
                room,
                FontId::proportional(10.0),
                theme.text_secondary,
            );
        }

        let id = ui.id().with(("block", table.id().as_str(), index));
        let response = ui
            .interact(block_rect, id, Sense::click_and_drag())
            .on_hover_text(block_tooltip(block, settings));

        let pointer_slot = response
            .interact_pointer_pos()
            .or_else(|| response.hover_pos())
            .and_then(|pos| layout.cell_at(pos))
            .map(|(_, slot)| slot)
            .filter(|slot| block.range.contains(*slot))
            .unwrap_or_else(|| block.range.first());

        if response.hovered() {
            ctx.set_cursor_icon(CursorIcon::Grab);
        }

        if response.clicked() {
            actions.push(GridAction::BlockClicked {
                day: block.day,
                time: pointer_slot,
            });
        }

        if response.drag_started() {
            DragManager::begin(
                &ctx,
                BlockDragContext::from_block(table.id().clone(), index, block, pointer_slot),
            );
        }

        if response.dragged() {
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                DragManager::cancel(&ctx);
            }
            ctx.set_cursor_icon(CursorIcon::Grabbing);
            if let Some((day, slot)) = ctx.pointer_latest_pos().and_then(|pos| layout.cell_at(pos)) {
                DragManager::update_hover(&ctx, day, slot);
            }
        }

        if response.drag_stopped() {
            if let Some(drag) = DragManager::finish_for_table(&ctx, table.id()) {
                if let Some((day, start)) = drag.drop_target(settings.slot_count) {
                    if day != drag.origin.day || start != drag.origin.time {
                        actions.push(GridAction::BlockDropped {
                            index: drag.block_index,
                            origin: drag.origin,
                            day,
                            start,
                        });
                    }
                }
            }
        }
    }

    // Drop preview
    if let Some(drag) = DragManager::active_for_table(&ctx, table.id()) {
        if let Some((day, start)) = drag.drop_target(settings.slot_count) {
            if let Some(col) = layout.column_of(day) {
                let last = start + drag.block_len.saturating_sub(1);
                painter.rect_stroke(
                    layout.span_rect(col, start, last).shrink(1.0),
                    3.0,
                    Stroke::new(2.0, theme.drop_target),
                );
            }
        }
    }

    actions
}

fn block_tooltip(block: &Block, settings: &Settings) -> String {
    let start = settings.slot_start(block.range.first());
    let end = settings.slot_start(block.range.last() + 1);
    let mut tooltip = format!(
        "{}\n{} {}~{}",
        block.payload.title,
        block.day,
        start.format("%H:%M"),
        end.format("%H:%M")
    );
    if let Some(room) = &block.payload.room {
        tooltip.push_str(&format!("\n{}", room));
    }
    tooltip.push_str("\nClick to remove, drag to move");
    tooltip
}
