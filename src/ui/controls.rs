use eframe::egui::{self, Ui};

use crate::audio::devices::AudioDevice;
use crate::config::{AnalysisConfig, GraphConfig, MAX_DELAY_SECONDS};

fn param_slider<T>(ui: &mut Ui, value: &mut T, range: std::ops::RangeInclusive<T>, text: &str) -> bool
where
    T: egui::emath::Numeric,
{
    ui.horizontal(|ui| {
        ui.label(text);
        ui.add(egui::Slider::new(value, range).text(""))
    })
    .inner
    .changed()
}

/// Input device combo box. Returns true when the selection changed.
pub fn draw_device_selector(
    ui: &mut Ui,
    devices: &[AudioDevice],
    selected: &mut Option<String>,
) -> bool {
    let mut changed = false;

    let selected_name = selected
        .as_deref()
        .and_then(|id| devices.iter().find(|d| d.id == id))
        .map(|d| d.name.as_str())
        .unwrap_or("Default");

    egui::ComboBox::from_label("Input Device")
        .selected_text(selected_name)
        .show_ui(ui, |ui| {
            for device in devices {
                let is_selected = selected.as_deref() == Some(device.id.as_str());
                if ui.selectable_label(is_selected, &device.name).clicked() && !is_selected {
                    *selected = Some(device.id.clone());
                    changed = true;
                }
            }
        });

    changed
}

/// Signal-chain sliders. Returns true when any parameter changed; the
/// caller rebuilds the graph to apply an edited config.
pub fn draw_graph_controls(ui: &mut Ui, config: &mut GraphConfig) -> bool {
    let mut changed = false;

    ui.label("Monitoring");
    let mut delay = config.delay_seconds;
    if param_slider(ui, &mut delay, 0.0..=MAX_DELAY_SECONDS, "Delay (s)") {
        config.set_delay_seconds(delay);
        changed = true;
    }
    let mut gain = config.gain_level;
    if param_slider(ui, &mut gain, 0.0..=16.0, "Gain") {
        config.set_gain_level(gain);
        changed = true;
    }

    ui.separator();
    ui.label("Band-pass");
    let mut frequency = config.filter_frequency;
    if param_slider(ui, &mut frequency, 50.0..=1000.0, "Frequency (Hz)") {
        config.set_filter_frequency(frequency);
        changed = true;
    }
    let mut q = config.filter_q;
    if param_slider(ui, &mut q, 0.1..=10.0, "Q") {
        config.set_filter_q(q);
        changed = true;
    }

    ui.separator();
    ui.label("Compressor");
    let mut threshold = config.compressor_threshold;
    if param_slider(ui, &mut threshold, -100.0..=0.0, "Threshold (dB)") {
        config.set_compressor_threshold(threshold);
        changed = true;
    }
    let mut knee = config.compressor_knee;
    if param_slider(ui, &mut knee, 0.0..=40.0, "Knee (dB)") {
        config.set_compressor_knee(knee);
        changed = true;
    }
    let mut attack = config.compressor_attack;
    if param_slider(ui, &mut attack, 0.0..=1.0, "Attack (s)") {
        config.set_compressor_attack(attack);
        changed = true;
    }
    let mut release = config.compressor_release;
    if param_slider(ui, &mut release, 0.0..=2.0, "Release (s)") {
        config.set_compressor_release(release);
        changed = true;
    }

    changed
}

/// Analysis sliders. Returns true when the analyzer itself must be
/// rebuilt (smoothing); the peak threshold applies on the next tick.
pub fn draw_analysis_controls(ui: &mut Ui, config: &mut AnalysisConfig) -> bool {
    let mut rebuild = false;

    let mut threshold = config.peak_threshold;
    if param_slider(ui, &mut threshold, 0..=255u8, "Peak threshold") {
        config.peak_threshold = threshold;
    }

    let mut smoothing = config.smoothing;
    if param_slider(ui, &mut smoothing, 0.0..=1.0, "Smoothing") {
        config.set_smoothing(smoothing);
        rebuild = true;
    }

    rebuild
}
