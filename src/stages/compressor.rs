use super::Stage;

/// Mono downward compressor with a soft knee.
pub struct Compressor {
    pub threshold: f32, // -100.0 to 0.0 dB, the level at which compression begins
    pub knee: f32,      // 0.0 to 40.0 dB, width of the soft-knee region
    pub ratio: f32,     // 1.0 to 20.0, amount of compression applied
    pub attack: f32,    // 0.0 to 1.0 s, how quickly compression is applied
    pub release: f32,   // 0.0 to 2.0 s, how quickly compression is released

    envelope: f32,
    sample_rate: u32,
}

impl Compressor {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            threshold: 0.0,
            knee: 0.0,
            ratio: 12.0,
            attack: 0.0,
            release: 0.25,
            envelope: 0.0,
            sample_rate,
        }
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold.max(-100.0).min(0.0);
    }

    pub fn set_knee(&mut self, knee: f32) {
        self.knee = knee.max(0.0).min(40.0);
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.max(1.0).min(20.0);
    }

    pub fn set_attack(&mut self, seconds: f32) {
        self.attack = seconds.max(0.0).min(1.0);
    }

    pub fn set_release(&mut self, seconds: f32) {
        self.release = seconds.max(0.0).min(2.0);
    }

    fn db_to_linear(db: f32) -> f32 {
        10.0_f32.powf(db / 20.0)
    }

    fn linear_to_db(linear: f32) -> f32 {
        20.0 * linear.abs().max(1e-6).log10()
    }

    // Gain change in dB for a given envelope level. Inside the knee the
    // transfer curve is blended quadratically; above it the slope is 1/ratio.
    fn gain_reduction(&self, envelope_db: f32) -> f32 {
        let over = envelope_db - self.threshold;

        if self.knee > 0.0 && 2.0 * over.abs() <= self.knee {
            let x = over + self.knee * 0.5;
            (1.0 / self.ratio - 1.0) * x * x / (2.0 * self.knee)
        } else if over > 0.0 {
            (1.0 / self.ratio - 1.0) * over
        } else {
            0.0
        }
    }
}

impl Stage for Compressor {
    fn process(&mut self, buffer: &mut [f32]) {
        let attack_coeff = time_coefficient(self.attack, self.sample_rate);
        let release_coeff = time_coefficient(self.release, self.sample_rate);

        for sample in buffer.iter_mut() {
            let input = *sample;
            let input_abs = input.abs();

            // Envelope follower
            self.envelope = if input_abs > self.envelope {
                attack_coeff * self.envelope + (1.0 - attack_coeff) * input_abs
            } else {
                release_coeff * self.envelope + (1.0 - release_coeff) * input_abs
            };

            let envelope_db = Self::linear_to_db(self.envelope);
            let gain = Self::db_to_linear(self.gain_reduction(envelope_db));

            *sample = input * gain;
        }
    }

    fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

// A zero time constant makes the follower track instantly.
fn time_coefficient(seconds: f32, sample_rate: u32) -> f32 {
    if seconds <= 0.0 {
        return 0.0;
    }
    (-2.2 / (seconds * sample_rate as f32)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loud_signal_is_attenuated() {
        let mut compressor = Compressor::new(44100);
        compressor.set_threshold(-20.0);
        compressor.set_ratio(4.0);
        compressor.set_attack(0.0);

        // 0 dBFS constant signal, 20 dB over threshold at 4:1 -> -15 dB gain.
        let mut buffer = vec![1.0f32; 256];
        compressor.process(&mut buffer);

        let settled = *buffer.last().unwrap();
        assert!(settled < 0.25);
        assert!(settled > 0.1);
    }

    #[test]
    fn signal_below_threshold_passes_at_unity() {
        let mut compressor = Compressor::new(44100);
        compressor.set_threshold(-20.0);
        compressor.set_ratio(4.0);

        // -40 dBFS, well below the threshold.
        let mut buffer = vec![0.01f32; 256];
        compressor.process(&mut buffer);
        assert!(buffer.iter().all(|&s| (s - 0.01).abs() < 1e-6));
    }

    #[test]
    fn parameters_clamp_to_their_ranges() {
        let mut compressor = Compressor::new(44100);
        compressor.set_threshold(40.0);
        assert_eq!(compressor.threshold, 0.0);
        compressor.set_ratio(0.5);
        assert_eq!(compressor.ratio, 1.0);
        compressor.set_knee(100.0);
        assert_eq!(compressor.knee, 40.0);
    }
}
