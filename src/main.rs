mod app;
mod dropper;
mod loader;
mod logging;
mod surface;
mod ui;

use app::DropperApp;

fn main() -> eframe::Result<()> {
    logging::init();

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1024.0, 768.0)),
        min_window_size: Some(egui::vec2(640.0, 480.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Color Dropper",
        native_options,
        Box::new(|cc| Box::new(DropperApp::new(cc)))
    )
}
