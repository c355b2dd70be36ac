mod lifecycle;
mod state;
mod tables;
mod toast;

use self::state::AppState;
use crate::models::settings::Settings;
use crate::services::interaction::{InteractionOutcome, UiEvent};
use crate::services::schedule::ScheduleResult;
use crate::services::session::{
    CommandOutcome, CommandSender, ScheduleSession, SessionCommand, SessionQueue,
};
use crate::services::settings::SettingsService;
use crate::ui_egui::dialogs::search_dialog::{render_search_dialog, SearchDialogAction};
use crate::ui_egui::drag::DragManager;
use crate::ui_egui::theme::TimetableTheme;

pub struct TimetableApp {
    /// Single writer for tables and targeting
    session: ScheduleSession,
    /// Writes requested during a frame, applied once rendering is done
    queue: SessionQueue,
    settings: Settings,
    settings_service: SettingsService,
    theme: TimetableTheme,
    state: AppState,
}

impl eframe::App for TimetableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_update(ctx);
    }
}

impl TimetableApp {
    fn handle_update(&mut self, ctx: &egui::Context) {
        let snapshot = self.session.snapshot();
        let sender = self.queue.sender();

        if let Some(drag) = DragManager::active(ctx) {
            if !snapshot.collection.contains(&drag.table_id) {
                log::debug!("Cancelling drag on removed table {}", drag.table_id);
                DragManager::cancel(ctx);
            }
        }

        egui::TopBottomPanel::top("timetable_top_bar").show(ctx, |ui| {
            self.render_top_bar(ui, &sender);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let can_remove = snapshot.collection.can_remove_table();
                    for (position, table) in snapshot.collection.tables().iter().enumerate() {
                        tables::render_table_panel(
                            ui,
                            table,
                            position + 1,
                            can_remove,
                            &self.settings,
                            &self.theme,
                            &sender,
                        );
                        ui.add_space(12.0);
                    }
                });
        });

        match self.session.targeting().resolve(&snapshot.collection) {
            Some((targeting, table)) => {
                let table_number = snapshot
                    .collection
                    .position(table.id())
                    .map_or(1, |position| position + 1);
                let action = render_search_dialog(
                    ctx,
                    &mut self.state.search_dialog_state,
                    targeting,
                    table,
                    table_number,
                    &self.settings,
                );
                match action {
                    SearchDialogAction::Insert(block) => {
                        sender.send(SessionCommand::InsertBlock {
                            table_id: targeting.table_id.clone(),
                            block,
                        });
                    }
                    SearchDialogAction::Close => {
                        self.state.search_dialog_state.reset();
                        sender.send(UiEvent::DialogDismissed);
                    }
                    SearchDialogAction::None => {}
                }
            }
            None if self.session.targeting().is_open() => {
                log::warn!("Search targeting points at a missing table; closing it");
                self.state.search_dialog_state.reset();
                sender.send(UiEvent::DialogDismissed);
            }
            // Closed, whether by insert, dismissal or removal: the next opening starts clean
            None => self.state.search_dialog_state.reset(),
        }

        let results = self.session.drain(&self.queue);
        if !results.is_empty() {
            self.report(results);
            ctx.request_repaint();
        }

        self.state.toast_manager.render(ctx, self.theme.is_dark);
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui, sender: &CommandSender) {
        ui.horizontal(|ui| {
            ui.heading("Timetable Planner");
            ui.separator();

            if ui.button("➕ New table").clicked() {
                sender.send(SessionCommand::CreateTable);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if self.theme.is_dark {
                    "☀ Light"
                } else {
                    "🌙 Dark"
                };
                if ui.button(label).clicked() {
                    self.toggle_theme(ui.ctx());
                }
            });
        });
    }

    fn report(&mut self, results: Vec<ScheduleResult<CommandOutcome>>) {
        for result in results {
            match result {
                Ok(CommandOutcome::TableCreated(id)) => {
                    log::info!("report: created table {}", id);
                }
                Ok(CommandOutcome::BlockInserted(_)) => {
                    self.state.toast_manager.info("Schedule added");
                }
                Ok(CommandOutcome::Interaction(InteractionOutcome::TableDuplicated {
                    ..
                })) => {
                    self.state.toast_manager.info("Table duplicated");
                }
                Ok(CommandOutcome::Interaction(InteractionOutcome::BlocksRemoved {
                    count,
                    ..
                })) => {
                    self.state
                        .toast_manager
                        .info(format!("Removed {} block(s)", count));
                }
                Ok(_) => {}
                Err(err) => {
                    log::error!("report: command failed: {}", err);
                    self.state.toast_manager.error(err.to_string());
                }
            }
        }
    }
}
