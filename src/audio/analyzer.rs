use apodize::hanning_iter;
use ringbuf::HeapCons;
use ringbuf::traits::Consumer;
use rustfft::{FftPlanner, num_complex::Complex32};

use crate::config::{MAX_DECIBELS, MIN_DECIBELS};

/// Byte magnitude spectrum over the most recent `fft_size` tap samples.
///
/// Hann window, forward FFT, per-bin exponential smoothing, then a dB
/// mapping of MIN_DECIBELS..MAX_DECIBELS onto 0..=255. The frame buffer
/// is reused and overwritten on every capture; copy it to retain a frame.
pub struct SpectrumAnalyzer {
    tap: HeapCons<f32>,
    sample_rate: u32,
    fft_size: usize,
    smoothing: f32,
    fft_planner: FftPlanner<f32>,
    fft_input: Vec<Complex32>,
    window: Vec<f32>,
    samples: Vec<f32>,  // sliding window of the last fft_size tap samples
    smoothed: Vec<f32>, // per-bin smoothed magnitudes
    frame: Vec<u8>,     // reusable byte spectrum
}

impl SpectrumAnalyzer {
    pub fn new(tap: HeapCons<f32>, sample_rate: u32, fft_size: usize, smoothing: f32) -> Self {
        let bins = fft_size / 2;

        Self {
            tap,
            sample_rate,
            fft_size,
            smoothing: smoothing.max(0.0).min(1.0),
            fft_planner: FftPlanner::new(),
            fft_input: vec![Complex32::new(0.0, 0.0); fft_size],
            window: hanning_iter(fft_size).map(|x| x as f32).collect(),
            samples: vec![0.0; fft_size],
            smoothed: vec![0.0; bins],
            frame: vec![0; bins],
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Center frequency of bin `i`.
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate as f32 / self.fft_size as f32
    }

    /// Drains the tap and recomputes the frame in place. When no fresh
    /// samples arrived since the last call the previous frame is returned
    /// unchanged, so a tick with a stalled graph stays a no-op.
    pub fn capture(&mut self) -> &[u8] {
        if !self.drain_tap() {
            return &self.frame;
        }

        for i in 0..self.fft_size {
            self.fft_input[i] = Complex32::new(self.samples[i] * self.window[i], 0.0);
        }

        let fft = self.fft_planner.plan_fft_forward(self.fft_size);
        fft.process(&mut self.fft_input);

        let scale = 2.0 / self.fft_size as f32;
        let range = MAX_DECIBELS - MIN_DECIBELS;

        for i in 0..self.frame.len() {
            let magnitude = self.fft_input[i].norm() * scale;
            self.smoothed[i] =
                self.smoothing * self.smoothed[i] + (1.0 - self.smoothing) * magnitude;

            let db = 20.0 * self.smoothed[i].max(1e-10).log10();
            let value = 255.0 * (db - MIN_DECIBELS) / range;
            self.frame[i] = value.max(0.0).min(255.0) as u8;
        }

        &self.frame
    }

    fn drain_tap(&mut self) -> bool {
        let mut chunk = [0.0f32; 256];
        let mut fresh = false;

        loop {
            let n = self.tap.pop_slice(&mut chunk);
            if n == 0 {
                break;
            }
            fresh = true;
            self.push_samples(&chunk[..n]);
        }

        fresh
    }

    // Slide the analysis window left and append the new chunk. Unfilled
    // leading slots stay zero, which reads as silence.
    fn push_samples(&mut self, chunk: &[f32]) {
        if chunk.len() >= self.fft_size {
            let start = chunk.len() - self.fft_size;
            self.samples.copy_from_slice(&chunk[start..]);
            return;
        }

        let keep = self.fft_size - chunk.len();
        self.samples.copy_within(chunk.len().., 0);
        self.samples[keep..].copy_from_slice(chunk);
    }
}
