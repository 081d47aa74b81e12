mod analysis;
mod app;
mod audio;
mod config;
mod stages;
mod ui;

use app::VoiceGraphApp;
use eframe::{NativeOptions, egui};

fn main() {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Voice Graph",
        options,
        Box::new(|cc| Ok(Box::new(VoiceGraphApp::new(cc)))),
    )
    .expect("Failed to start application");
}
