use eframe::egui;

use crate::analysis::Estimate;
use crate::config::{GRAPH_MAX_FREQUENCY, GRAPH_MIN_FREQUENCY};

// Gender bands drawn behind the pitch trace, in Hz.
const MALE_BAND: (f32, f32) = (85.0, 165.0);
const FEMALE_BAND: (f32, f32) = (180.0, 255.0);

/// Scrolling time/frequency graph of the pitch history. The right edge is
/// "now"; entries scroll left as they age out of the window.
pub fn draw_voice_graph<'a>(
    ui: &mut egui::Ui,
    now: f64,
    window_seconds: f64,
    history: impl Iterator<Item = &'a Estimate>,
    category: &str,
) {
    ui.group(|ui| {
        ui.set_height(280.0);
        ui.horizontal(|ui| {
            ui.heading("Pitch");
            ui.add_space(12.0);
            ui.label(format!("Voice: {}", category));
        });

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

        let freq_to_y = |frequency: f32| {
            let t = (frequency - GRAPH_MIN_FREQUENCY) / (GRAPH_MAX_FREQUENCY - GRAPH_MIN_FREQUENCY);
            rect.bottom() - t * rect.height()
        };
        let time_to_x =
            |t: f64| rect.right() - ((now - t) / window_seconds) as f32 * rect.width();

        // Gender bands
        let band = |painter: &egui::Painter, range: (f32, f32), color: egui::Color32| {
            painter.rect_filled(
                egui::Rect::from_min_max(
                    egui::pos2(rect.left(), freq_to_y(range.1)),
                    egui::pos2(rect.right(), freq_to_y(range.0)),
                ),
                0.0,
                color,
            );
        };
        band(painter, MALE_BAND, egui::Color32::from_rgb(36, 52, 71));
        band(painter, FEMALE_BAND, egui::Color32::from_rgb(70, 42, 58));
        band(
            painter,
            (MALE_BAND.1, FEMALE_BAND.0),
            egui::Color32::from_rgb(45, 45, 55),
        );

        // Frequency gridlines with Hz labels
        let grid_color = egui::Color32::from_rgba_premultiplied(100, 100, 100, 100);
        let span = GRAPH_MAX_FREQUENCY - GRAPH_MIN_FREQUENCY;
        let step = (span / (rect.height() / 30.0)).round().max(1.0);

        let mut frequency = GRAPH_MIN_FREQUENCY;
        while frequency < GRAPH_MAX_FREQUENCY {
            let y = freq_to_y(frequency);
            painter.line_segment(
                [
                    egui::pos2(rect.left() + 45.0, y),
                    egui::pos2(rect.right(), y),
                ],
                egui::Stroke::new(1.0, grid_color),
            );
            painter.text(
                egui::pos2(rect.left() + 5.0, y),
                egui::Align2::LEFT_CENTER,
                format!("{:.0}Hz", frequency),
                egui::FontId::proportional(9.0),
                egui::Color32::from_rgb(180, 180, 180),
            );
            frequency += step;
        }

        // Pitch trace, broken wherever the pitch leaves the display range
        // (the 0.0 sentinel always does).
        let stroke = egui::Stroke::new(2.0, egui::Color32::from_rgb(80, 220, 100));
        let mut segment: Vec<egui::Pos2> = Vec::new();

        for estimate in history {
            let in_range = estimate.pitch > GRAPH_MIN_FREQUENCY
                && estimate.pitch < GRAPH_MAX_FREQUENCY;

            if in_range {
                segment.push(egui::pos2(
                    time_to_x(estimate.timestamp),
                    freq_to_y(estimate.pitch),
                ));
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
