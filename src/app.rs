use std::time::Instant;

use cpal::Host;
use eframe::{App, CreationContext, egui};

use crate::analysis::{
    Estimate, EstimateHistory, PitchRing, VoiceCategory, classify, detect_formants, detect_pitch,
    detect_resonances,
};
use crate::audio::analyzer::SpectrumAnalyzer;
use crate::audio::devices::{AudioDevice, list_input_devices};
use crate::audio::graph::SignalGraph;
use crate::config::{AnalysisConfig, GraphConfig};
use crate::ui::{
    draw_analysis_controls, draw_device_selector, draw_graph_controls, draw_pitch_contour,
    draw_spectrum, draw_voice_graph,
};

pub struct VoiceGraphApp {
    host: Host,
    devices: Vec<AudioDevice>,
    graph_config: GraphConfig,
    analysis_config: AnalysisConfig,

    // "Graph ready" is both of these Some; anything else is pending/idle
    // and the tick is a no-op.
    graph: Option<SignalGraph>,
    analyzer: Option<SpectrumAnalyzer>,

    history: EstimateHistory,
    contour: PitchRing,
    category: VoiceCategory,
    spectrum_view: Vec<u8>, // copy of the latest frame for painting

    epoch: Instant,
    running: bool,
    status: Option<String>,
}

impl VoiceGraphApp {
    pub fn new(_cc: &CreationContext) -> Self {
        let host = cpal::default_host();
        let devices = list_input_devices(&host);

        let mut graph_config = GraphConfig::default();
        // First enumerated device is the default selection.
        graph_config.device_id = devices.first().map(|d| d.id.clone());

        let analysis_config = AnalysisConfig::default();

        Self {
            host,
            devices,
            history: EstimateHistory::new(analysis_config.history_seconds),
            contour: PitchRing::new(analysis_config.contour_capacity),
            graph_config,
            analysis_config,
            graph: None,
            analyzer: None,
            category: VoiceCategory::Indeterminate,
            spectrum_view: Vec::new(),
            epoch: Instant::now(),
            running: false,
            status: None,
        }
    }

    fn start(&mut self) {
        self.rebuild_graph();
        self.running = self.analyzer.is_some();
    }

    fn stop(&mut self) {
        self.teardown_graph();
        self.running = false;
    }

    // Teardown-then-build as one step, superseding whatever graph was
    // active. On failure the app keeps running with no graph and the
    // error is surfaced in the status line.
    fn rebuild_graph(&mut self) {
        self.teardown_graph();

        match SignalGraph::build(&self.host, &self.graph_config) {
            Ok(mut graph) => {
                if let Some(tap) = graph.take_tap() {
                    self.analyzer = Some(SpectrumAnalyzer::new(
                        tap.consumer,
                        tap.sample_rate,
                        self.analysis_config.fft_size,
                        self.analysis_config.smoothing,
                    ));
                }
                self.graph = Some(graph);
                self.status = None;
            }
            Err(e) => {
                eprintln!("Failed to build signal graph: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn teardown_graph(&mut self) {
        if let Some(mut graph) = self.graph.take() {
            graph.teardown();
        }
        self.analyzer = None;
    }

    // One analysis tick: capture -> detect -> append -> classify.
    fn tick(&mut self) {
        let Some(analyzer) = &mut self.analyzer else {
            return;
        };

        let now = self.epoch.elapsed().as_secs_f64();
        let threshold = self.analysis_config.peak_threshold;
        let sample_rate = analyzer.sample_rate();
        let fft_size = analyzer.fft_size();

        let frame = analyzer.capture();
        let estimate = Estimate {
            timestamp: now,
            pitch: detect_pitch(frame, threshold, sample_rate, fft_size),
            formants: detect_formants(frame, threshold, sample_rate, fft_size),
            resonances: detect_resonances(frame, threshold, sample_rate, fft_size),
        };

        // The analyzer reuses its frame buffer; copy what the painter needs.
        self.spectrum_view.clear();
        self.spectrum_view.extend_from_slice(frame);

        self.contour.push(estimate.pitch);
        self.history.append(estimate);
        self.history.prune(now);
        self.category = self
            .history
            .latest()
            .map(classify)
            .unwrap_or(VoiceCategory::Indeterminate);
    }
}

impl App for VoiceGraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.running {
            self.tick();
            ctx.request_repaint();
        }

        // controls
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                if ui
                    .button(if self.running { "Stop" } else { "Start" })
                    .clicked()
                {
                    if self.running {
                        self.stop();
                    } else {
                        self.start();
                    }
                }

                ui.label(if self.running {
                    "Status: Listening"
                } else {
                    "Status: Stopped"
                });

                if let Some(status) = &self.status {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(240, 120, 100), status.as_str());
                }
            });
        });

        // device and parameter panel
        egui::SidePanel::right("controls_panel").show(ctx, |ui| {
            ui.heading("Signal Chain");

            let mut rebuild = draw_device_selector(
                ui,
                &self.devices,
                &mut self.graph_config.device_id,
            );

            ui.separator();
            rebuild |= draw_graph_controls(ui, &mut self.graph_config);

            ui.separator();
            ui.heading("Analysis");
            rebuild |= draw_analysis_controls(ui, &mut self.analysis_config);

            // Edits apply through a fresh graph, never to a live one.
            if rebuild && self.running {
                self.rebuild_graph();
                self.running = self.analyzer.is_some();
            }

            if ui.button("Rescan Devices").clicked() {
                self.devices = list_input_devices(&self.host);
                if self.graph_config.device_id.is_none() {
                    self.graph_config.device_id = self.devices.first().map(|d| d.id.clone());
                }
            }
        });

        // graphs
        egui::CentralPanel::default().show(ctx, |ui| {
            let now = self.epoch.elapsed().as_secs_f64();
            let window = self.analysis_config.history_seconds;

            draw_voice_graph(
                ui,
                now,
                window,
                self.history.iter_window(now, window),
                self.category.label(),
            );

            let sample_rate = self
                .analyzer
                .as_ref()
                .map(|a| a.sample_rate())
                .unwrap_or(44100);
            draw_spectrum(ui, &self.spectrum_view, self.history.latest(), sample_rate);

            draw_pitch_contour(ui, &self.contour);
        });
    }
}
