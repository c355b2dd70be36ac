// Table panels
// One framed panel per schedule table: heading, header buttons and the grid

use crate::models::settings::Settings;
use crate::models::table::ScheduleTable;
use crate::services::interaction::UiEvent;
use crate::services::session::{CommandSender, SessionCommand};
use crate::ui_egui::theme::TimetableTheme;
use crate::ui_egui::views::table_grid::{render_table_grid, GridAction};

const PANEL_WIDTH: f32 = 640.0;

pub(super) fn render_table_panel(
    ui: &mut egui::Ui,
    table: &ScheduleTable,
    table_number: usize,
    can_remove: bool,
    settings: &Settings,
    theme: &TimetableTheme,
    sender: &CommandSender,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(PANEL_WIDTH);
        ui.push_id(table.id().as_str(), |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("Table {}", table_number));
                ui.label(
                    egui::RichText::new(format!("{} block(s)", table.len()))
                        .small()
                        .weak(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let remove = ui
                        .add_enabled(can_remove, egui::Button::new("Remove"))
                        .on_disabled_hover_text("The last table cannot be removed");
                    if remove.clicked() {
                        sender.send(UiEvent::RemoveClicked(table.id().clone()));
                    }
                    if ui.button("Duplicate").clicked() {
                        sender.send(UiEvent::DuplicateClicked(table.id().clone()));
                    }
                    if ui.button("Add schedule").clicked() {
                        sender.send(UiEvent::AddScheduleClicked(table.id().clone()));
                    }
                });
            });

            ui.add_space(6.0);

            for action in render_table_grid(ui, table, settings, theme, PANEL_WIDTH) {
                sender.send(command_for(table, action));
            }
        });
    });
}

fn command_for(table: &ScheduleTable, action: GridAction) -> SessionCommand {
    let table_id = table.id().clone();
    match action {
        GridAction::EmptyCellClicked { day, time } => UiEvent::EmptyCellClicked {
            table_id,
            day,
            time,
        }
        .into(),
        GridAction::BlockClicked { day, time } => UiEvent::BlockClicked {
            table_id,
            day,
            time,
        }
        .into(),
        GridAction::BlockDropped {
            index,
            origin,
            day,
            start,
        } => SessionCommand::MoveBlock {
            table_id,
            index,
            origin,
            day,
            start,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::DayOfWeek;
    use crate::models::table::TableId;
    use crate::models::targeting::GridCell;

    #[test]
    fn test_grid_actions_map_to_commands() {
        let table = ScheduleTable::new(TableId::new("A"));

        assert_eq!(
            command_for(
                &table,
                GridAction::EmptyCellClicked {
                    day: DayOfWeek::Mon,
                    time: 3
                }
            ),
            SessionCommand::Interaction(UiEvent::EmptyCellClicked {
                table_id: TableId::new("A"),
                day: DayOfWeek::Mon,
                time: 3,
            })
        );
        assert_eq!(
            command_for(
                &table,
                GridAction::BlockDropped {
                    index: 1,
                    origin: GridCell {
                        day: DayOfWeek::Tue,
                        time: 4
                    },
                    day: DayOfWeek::Fri,
                    start: 9
                }
            ),
            SessionCommand::MoveBlock {
                table_id: TableId::new("A"),
                index: 1,
                origin: GridCell {
                    day: DayOfWeek::Tue,
                    time: 4,
                },
                day: DayOfWeek::Fri,
                start: 9,
            }
        );
    }
}
