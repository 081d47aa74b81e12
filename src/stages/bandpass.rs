use std::f32::consts::PI;

use super::Stage;

/// Band-pass biquad (constant 0 dB peak gain), Direct Form 1.
pub struct BandpassFilter {
    b0: f32,
    b1: f32,
    b2: f32, // Numerator coefficients
    a1: f32,
    a2: f32, // Denominator coefficients

    // State variables for the filter
    x1: f32,
    x2: f32, // Previous inputs
    y1: f32,
    y2: f32, // Previous outputs
}

impl BandpassFilter {
    pub fn new(frequency: f32, q: f32, sample_rate: u32) -> Self {
        let (b0, b1, b2, a1, a2) = bandpass_coefficients(sample_rate as f32, frequency, q);

        Self {
            b0,
            b1,
            b2,
            a1,
            a2,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }
}

impl Stage for BandpassFilter {
    fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let input = *sample;
            let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
                - self.a1 * self.y1
                - self.a2 * self.y2;

            self.x2 = self.x1;
            self.x1 = input;
            self.y2 = self.y1;
            self.y1 = output;

            *sample = output;
        }
    }

    fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

fn bandpass_coefficients(sample_rate: f32, frequency: f32, q: f32) -> (f32, f32, f32, f32, f32) {
    // Calculate intermediate values with safety check for alpha
    let omega = 2.0 * PI * frequency / sample_rate;
    let alpha = (omega.sin() / (2.0 * q)).max(0.001);
    let cos_omega = omega.cos();

    // Calculate filter coefficients (based on Audio EQ Cookbook)
    let b0 = alpha;
    let b1 = 0.0;
    let b2 = -alpha;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    // Normalize by a0
    (b0 / a0, b1 / a0, b2 / a0, a1 / a0, a2 / a0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    fn tone(frequency: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * frequency * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn passes_center_frequency_and_rejects_far_tones() {
        let sample_rate = 44100.0;
        let mut at_center = tone(175.0, sample_rate, 44100);
        let mut far_above = tone(8000.0, sample_rate, 44100);

        let mut filter = BandpassFilter::new(175.0, 1.0, 44100);
        filter.process(&mut at_center);
        filter.reset();
        filter.process(&mut far_above);

        // Compare steady-state energy, past the filter settling.
        let center_rms = rms(&at_center[4410..]);
        let far_rms = rms(&far_above[4410..]);
        assert!(center_rms > 10.0 * far_rms);
    }

    #[test]
    fn reset_clears_filter_state() {
        let mut filter = BandpassFilter::new(175.0, 1.0, 44100);
        let mut buffer = tone(175.0, 44100.0, 512);
        filter.process(&mut buffer);
        filter.reset();

        let mut silence = vec![0.0f32; 64];
        filter.process(&mut silence);
        assert!(silence.iter().all(|&s| s == 0.0));
    }
}
