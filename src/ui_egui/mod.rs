mod app;
pub mod dialogs;
pub mod drag;
pub mod theme;
mod views;

pub use app::TimetableApp;
