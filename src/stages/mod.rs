pub mod bandpass;
pub mod compressor;
pub mod delay;
pub mod gain;

pub use bandpass::BandpassFilter;
pub use compressor::Compressor;
pub use delay::Delay;
pub use gain::Gain;

use crate::config::GraphConfig;

/// A mono signal-shaping stage of the graph chain.
pub trait Stage {
    fn process(&mut self, buffer: &mut [f32]);
    fn reset(&mut self);
}

/// The fixed chain upstream of the spectrum tap:
/// band-pass -> compressor -> delay. The output gain sits after the tap
/// and is applied by the graph separately.
pub struct StageChain {
    bandpass: BandpassFilter,
    compressor: Compressor,
    delay: Delay,
}

impl StageChain {
    pub fn new(config: &GraphConfig, sample_rate: u32) -> Self {
        let bandpass =
            BandpassFilter::new(config.filter_frequency, config.filter_q, sample_rate);

        let mut compressor = Compressor::new(sample_rate);
        compressor.set_threshold(config.compressor_threshold);
        compressor.set_knee(config.compressor_knee);
        compressor.set_ratio(config.compressor_ratio);
        compressor.set_attack(config.compressor_attack);
        compressor.set_release(config.compressor_release);

        let delay = Delay::new(config.delay_seconds, sample_rate);

        Self {
            bandpass,
            compressor,
            delay,
        }
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        self.bandpass.process(buffer);
        self.compressor.process(buffer);
        self.delay.process(buffer);
    }

    pub fn reset(&mut self) {
        self.bandpass.reset();
        self.compressor.reset();
        self.delay.reset();
    }
}
