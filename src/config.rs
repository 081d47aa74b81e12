pub const FFT_SIZE: usize = 2048;
pub const SMOOTHING: f32 = 0.7;
pub const PEAK_THRESHOLD: u8 = 128;
pub const CONTOUR_CAPACITY: usize = 128;
pub const HISTORY_SECONDS: f64 = 5.0;

pub const MAX_DELAY_SECONDS: f32 = 5.0;

// Byte-spectrum dB mapping range.
pub const MIN_DECIBELS: f32 = -100.0;
pub const MAX_DECIBELS: f32 = -30.0;

// Vertical range of the scrolling pitch graph.
pub const GRAPH_MIN_FREQUENCY: f32 = 50.0;
pub const GRAPH_MAX_FREQUENCY: f32 = 400.0;

/// Parameters of the signal-shaping chain. Rebuilding the graph from an
/// edited copy is the only way these take effect; nothing mutates a live
/// graph in place.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
    pub device_id: Option<String>,
    pub delay_seconds: f32,        // 0.0 to 5.0, monitoring playback delay
    pub filter_frequency: f32,     // band-pass center frequency, Hz
    pub filter_q: f32,
    pub filter_gain: f32,          // carried for parity; a band-pass biquad ignores it
    pub gain_level: f32,           // output gain multiplier
    pub compressor_threshold: f32, // -100.0 to 0.0 dB
    pub compressor_knee: f32,      // 0.0 to 40.0 dB
    pub compressor_ratio: f32,     // 1.0 to 20.0
    pub compressor_attack: f32,    // 0.0 to 1.0 s
    pub compressor_release: f32,   // 0.0 to 2.0 s
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            device_id: None,
            delay_seconds: 0.0,
            filter_frequency: 175.0,
            filter_q: 1.0,
            filter_gain: 2.0,
            gain_level: 8.0,
            compressor_threshold: 0.0,
            compressor_knee: 0.0,
            compressor_ratio: 12.0,
            compressor_attack: 0.0,
            compressor_release: 0.25,
        }
    }
}

impl GraphConfig {
    pub fn set_delay_seconds(&mut self, seconds: f32) {
        self.delay_seconds = seconds.max(0.0).min(MAX_DELAY_SECONDS);
    }

    pub fn set_filter_frequency(&mut self, frequency: f32) {
        self.filter_frequency = frequency.max(10.0).min(20_000.0);
    }

    pub fn set_filter_q(&mut self, q: f32) {
        self.filter_q = q.max(0.001).min(100.0);
    }

    pub fn set_gain_level(&mut self, level: f32) {
        self.gain_level = level.max(0.0).min(32.0);
    }

    pub fn set_compressor_threshold(&mut self, threshold: f32) {
        self.compressor_threshold = threshold.max(-100.0).min(0.0);
    }

    pub fn set_compressor_knee(&mut self, knee: f32) {
        self.compressor_knee = knee.max(0.0).min(40.0);
    }

    pub fn set_compressor_ratio(&mut self, ratio: f32) {
        self.compressor_ratio = ratio.max(1.0).min(20.0);
    }

    pub fn set_compressor_attack(&mut self, seconds: f32) {
        self.compressor_attack = seconds.max(0.0).min(1.0);
    }

    pub fn set_compressor_release(&mut self, seconds: f32) {
        self.compressor_release = seconds.max(0.0).min(2.0);
    }
}

/// Parameters of the analysis side: spectrum capture, peak picking and
/// history retention.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    pub fft_size: usize,      // power of two
    pub smoothing: f32,       // 0.0 to 1.0, spectral smoothing constant
    pub peak_threshold: u8,   // local-maximum amplitude floor
    pub history_seconds: f64, // scrolling graph retention window
    pub contour_capacity: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: FFT_SIZE,
            smoothing: SMOOTHING,
            peak_threshold: PEAK_THRESHOLD,
            history_seconds: HISTORY_SECONDS,
            contour_capacity: CONTOUR_CAPACITY,
        }
    }
}

impl AnalysisConfig {
    pub fn set_fft_size(&mut self, fft_size: usize) {
        self.fft_size = fft_size.next_power_of_two().max(32).min(32_768);
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.max(0.0).min(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_parameters_clamp() {
        let mut config = GraphConfig::default();

        config.set_delay_seconds(9.0);
        assert_eq!(config.delay_seconds, MAX_DELAY_SECONDS);
        config.set_delay_seconds(-1.0);
        assert_eq!(config.delay_seconds, 0.0);

        // The source feeds 40 dB into a compressor whose maximum is 0 dB.
        config.set_compressor_threshold(40.0);
        assert_eq!(config.compressor_threshold, 0.0);
    }

    #[test]
    fn fft_size_rounds_up_to_power_of_two() {
        let mut config = AnalysisConfig::default();
        config.set_fft_size(1000);
        assert_eq!(config.fft_size, 1024);
    }
}
