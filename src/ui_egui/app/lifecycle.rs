use super::state::AppState;
use super::TimetableApp;
use crate::services::session::{ScheduleSession, SessionQueue};
use crate::services::settings::SettingsService;
use crate::ui_egui::theme::TimetableTheme;

impl TimetableApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings_service: SettingsService) -> Self {
        let settings = settings_service.load_or_default();
        log::info!(
            "Loaded settings: {} days, {} slots of {} minutes, theme={}",
            settings.days.len(),
            settings.slot_count,
            settings.slot_minutes,
            settings.theme
        );

        let theme = TimetableTheme::from_settings(&settings);
        theme.apply_to_context(&cc.egui_ctx);

        Self {
            session: ScheduleSession::default(),
            queue: SessionQueue::new(),
            settings,
            settings_service,
            theme,
            state: AppState::new(),
        }
    }

    /// Flip between light and dark and persist the choice
    pub(super) fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.settings.theme = if self.settings.is_dark_theme() {
            "light".to_string()
        } else {
            "dark".to_string()
        };
        self.theme = TimetableTheme::from_settings(&self.settings);
        self.theme.apply_to_context(ctx);

        if let Err(err) = self.settings_service.save(&self.settings) {
            log::warn!("toggle_theme: failed to save settings: {:#}", err);
            self.state
                .toast_manager
                .warning("Theme changed but could not be saved");
        }
    }
}
