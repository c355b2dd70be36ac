use super::toast::ToastManager;
use crate::ui_egui::dialogs::search_dialog::SearchDialogState;

/// Per-window UI state that is not part of the session
pub struct AppState {
    pub search_dialog_state: SearchDialogState,
    pub toast_manager: ToastManager,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            search_dialog_state: SearchDialogState::default(),
            toast_manager: ToastManager::new(),
        }
    }
}
