//! Insert dialog for placing a course in a table
//!
//! Opens whenever the session has search targeting. Course lookup is not done
//! here; the user types the course details and picks the slots by hand.

use egui::RichText;

use crate::models::block::{Block, CoursePayload, DayOfWeek, SlotRange};
use crate::models::settings::Settings;
use crate::models::table::ScheduleTable;
use crate::models::targeting::SearchTargeting;

/// Slots a new block spans unless the user changes it (one hour at 30-minute slots)
const DEFAULT_LENGTH: u32 = 2;

/// Form state for the insert dialog
pub struct SearchDialogState {
    pub title: String,
    pub lecture_id: String,
    pub room: String,
    pub day: DayOfWeek,
    pub start_slot: u32,
    pub length: u32,
    pub error: Option<String>,
    /// Targeting the form was last prefilled from
    prefilled_for: Option<SearchTargeting>,
}

impl Default for SearchDialogState {
    fn default() -> Self {
        Self {
            title: String::new(),
            lecture_id: String::new(),
            room: String::new(),
            day: DayOfWeek::Mon,
            start_slot: 1,
            length: DEFAULT_LENGTH,
            error: None,
            prefilled_for: None,
        }
    }
}

impl SearchDialogState {
    /// Reset the form when the targeting changed since the last frame
    pub fn sync_with(&mut self, targeting: &SearchTargeting, settings: &Settings) {
        if self.prefilled_for.as_ref() == Some(targeting) {
            return;
        }

        *self = Self::default();
        self.day = targeting
            .day()
            .or_else(|| settings.days.first().copied())
            .unwrap_or(DayOfWeek::Mon);
        self.start_slot = targeting.time().unwrap_or(1).clamp(1, settings.slot_count.max(1));
        self.length = DEFAULT_LENGTH.min(settings.slot_count.max(1) - self.start_slot + 1);
        self.prefilled_for = Some(targeting.clone());
    }

    /// Forget the form contents; the next sync prefills again
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn build_block(&self, settings: &Settings) -> Result<Block, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Course title cannot be empty".to_string());
        }

        let range = SlotRange::span(self.start_slot, self.length).map_err(|e| e.to_string())?;
        if range.first() < 1 || range.last() > settings.slot_count {
            return Err(format!(
                "Slots {}-{} are outside the grid (1-{})",
                range.first(),
                range.last(),
                settings.slot_count
            ));
        }

        let lecture_id = match self.lecture_id.trim() {
            "" => title.to_string(),
            id => id.to_string(),
        };
        let mut payload = CoursePayload::new(lecture_id, title);
        if !self.room.trim().is_empty() {
            payload = payload.with_room(self.room.trim());
        }

        Ok(Block::new(self.day, range, payload))
    }

    /// Number of existing blocks the chosen slots would overlap
    pub fn overlap_count(&self, table: &ScheduleTable) -> usize {
        let end = self.start_slot + self.length;
        table
            .blocks()
            .iter()
            .filter(|block| {
                block.day == self.day && (self.start_slot..end).any(|slot| block.range.contains(slot))
            })
            .count()
    }
}

/// Action result from the insert dialog
pub enum SearchDialogAction {
    None,
    Insert(Block),
    Close,
}

/// Render the insert dialog for the targeted table
pub fn render_search_dialog(
    ctx: &egui::Context,
    state: &mut SearchDialogState,
    targeting: &SearchTargeting,
    table: &ScheduleTable,
    table_number: usize,
    settings: &Settings,
) -> SearchDialogAction {
    state.sync_with(targeting, settings);

    let mut action = SearchDialogAction::None;
    let mut dialog_open = true;

    egui::Window::new(format!("Add schedule to Table {}", table_number))
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("insert_dialog_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Title:");
                    ui.add(
                        egui::TextEdit::singleline(&mut state.title)
                            .hint_text("e.g. Linear Algebra"),
                    );
                    ui.end_row();

                    ui.label("Lecture id:");
                    ui.text_edit_singleline(&mut state.lecture_id);
                    ui.end_row();

                    ui.label("Room:");
                    ui.text_edit_singleline(&mut state.room);
                    ui.end_row();

                    ui.label("Day:");
                    egui::ComboBox::from_id_source("insert_dialog_day")
                        .selected_text(state.day.short_name())
                        .show_ui(ui, |ui| {
                            for day in &settings.days {
                                ui.selectable_value(&mut state.day, *day, day.short_name());
                            }
                        });
                    ui.end_row();

                    ui.label("Start:");
                    ui.horizontal(|ui| {
                        ui.add(egui::Slider::new(
                            &mut state.start_slot,
                            1..=settings.slot_count.max(1),
                        ));
                        ui.label(
                            RichText::new(settings.slot_label(state.start_slot)).weak(),
                        );
                    });
                    ui.end_row();

                    ui.label("Slots:");
                    ui.add(egui::Slider::new(
                        &mut state.length,
                        1..=settings.slot_count.max(1),
                    ));
                    ui.end_row();
                });

            let overlaps = state.overlap_count(table);
            if overlaps > 0 {
                ui.add_space(4.0);
                ui.colored_label(
                    egui::Color32::from_rgb(214, 158, 46),
                    format!("Overlaps {} existing block(s)", overlaps),
                );
            }

            if let Some(error) = &state.error {
                ui.add_space(4.0);
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    match state.build_block(settings) {
                        Ok(block) => action = SearchDialogAction::Insert(block),
                        Err(e) => state.error = Some(e),
                    }
                }
                if ui.button("Cancel").clicked() {
                    action = SearchDialogAction::Close;
                }
            });
        });

    if !dialog_open {
        action = SearchDialogAction::Close;
    }
    action
}
