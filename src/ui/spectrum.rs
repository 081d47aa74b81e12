use eframe::egui;

use crate::analysis::{Estimate, PitchRing};
use crate::config::GRAPH_MAX_FREQUENCY;

/// Live byte spectrum with resonance and formant markers.
pub fn draw_spectrum(
    ui: &mut egui::Ui,
    frame: &[u8],
    estimate: Option<&Estimate>,
    sample_rate: u32,
) {
    ui.group(|ui| {
        ui.set_height(160.0);
        ui.heading("Spectrum");

        let available_width = ui.available_width();
        let available_height = ui.available_height();

        let response = ui.allocate_rect(
            egui::Rect::from_min_size(
                ui.min_rect().min,
                egui::vec2(available_width, available_height),
            ),
            egui::Sense::hover(),
        );

        let painter = ui.painter();
        let rect = response.rect;

        // Background
        painter.rect_filled(rect, 5.0, egui::Color32::from_rgb(20, 20, 30));

        if frame.is_empty() {
            return;
        }

        let nyquist = sample_rate as f32 / 2.0;
        let freq_to_x = |frequency: f32| rect.left() + (frequency / nyquist) * rect.width();
        let amp_to_y = |amplitude: u8| rect.bottom() - (amplitude as f32 / 255.0) * rect.height();

        // Magnitude bars, one per bin
        let bar_width = rect.width() / frame.len() as f32;
        let bar_color = egui::Color32::from_rgb(50, 120, 250);

        for (i, &value) in frame.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let x = rect.left() + i as f32 * bar_width;
            painter.rect_filled(
                egui::Rect::from_min_max(
                    egui::pos2(x, amp_to_y(value)),
                    egui::pos2(x + bar_width, rect.bottom()),
                ),
                0.0,
                bar_color,
            );
        }

        let Some(estimate) = estimate else {
            return;
        };

        // Resonance markers at their measured amplitude
        for resonance in &estimate.resonances {
            painter.rect_filled(
                egui::Rect::from_center_size(
                    egui::pos2(freq_to_x(resonance.frequency), amp_to_y(resonance.amplitude)),
                    egui::vec2(4.0, 4.0),
                ),
                0.0,
                egui::Color32::from_rgb(120, 170, 255),
            );
        }

        // Formant markers on the midline
        for &formant in &estimate.formants {
            painter.circle_filled(
                egui::pos2(freq_to_x(formant), rect.center().y),
                3.0,
                egui::Color32::from_rgb(255, 100, 100),
            );
        }
    });
}

/// Short-term pitch contour from the fixed-size ring, oldest on the left.
/// Zeroed slots are gaps, not 0 Hz.
pub fn draw_pitch_contour(ui: &mut egui::Ui, contour: &PitchRing) {
    ui.group(|ui| {
        ui.set_height(80.0);
        ui.heading("Contour");

        let available_width = ui.available_width();
        let available_height = ui.available_height();

        let response = ui.allocate_rect(
            egui::Rect::from_min_size(
                ui.min_rect().min,
                egui::vec2(available_width, available_height),
            ),
            egui::Sense::hover(),
        );

        let painter = ui.painter();
        let rect = response.rect;

        painter.rect_filled(rect, 5.0, egui::Color32::from_rgb(20, 20, 30));

        let step = rect.width() / contour.capacity() as f32;
        let stroke = egui::Stroke::new(1.5, egui::Color32::from_rgb(80, 220, 100));
        let mut segment: Vec<egui::Pos2> = Vec::new();

        for (i, pitch) in contour.iter_chronological().enumerate() {
            if pitch > 0.0 && pitch < GRAPH_MAX_FREQUENCY {
                let x = rect.left() + i as f32 * step;
                let y = rect.bottom() - (pitch / GRAPH_MAX_FREQUENCY) * rect.height();
                segment.push(egui::pos2(x, y));
            } else if segment.len() > 1 {
                painter.add(egui::Shape::line(std::mem::take(&mut segment), stroke));
            } else {
                segment.clear();
            }
        }
        if segment.len() > 1 {
            painter.add(egui::Shape::line(segment, stroke));
        }
    });
}
