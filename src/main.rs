// Timetable Planner Application
// Main entry point

use anyhow::Result;
use timetable_planner::services::settings::SettingsService;
use timetable_planner::ui_egui::TimetableApp;

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting Timetable Planner");

    let settings_service = SettingsService::from_environment()?;
    log::info!("Using settings file {}", settings_service.path().display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Timetable Planner")
            .with_inner_size([720.0, 860.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Timetable Planner",
        options,
        Box::new(|cc| Ok(Box::new(TimetableApp::new(cc, settings_service)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run timetable window: {}", err))
}
