use super::Stage;
use crate::config::MAX_DELAY_SECONDS;

/// Pure delay line over a circular buffer. No feedback, no dry/wet mix.
pub struct Delay {
    buffer: Vec<f32>,
    write_pos: usize,
    delay_samples: usize,
}

impl Delay {
    /// Delay time is clamped to [0, MAX_DELAY_SECONDS].
    pub fn new(delay_seconds: f32, sample_rate: u32) -> Self {
        let delay_seconds = delay_seconds.max(0.0).min(MAX_DELAY_SECONDS);
        let capacity =
            ((sample_rate as f32 * MAX_DELAY_SECONDS) as usize + 1).next_power_of_two();
        let delay_samples = (sample_rate as f32 * delay_seconds).round() as usize;

        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
            delay_samples,
        }
    }

    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    fn read_pos(&self) -> usize {
        (self.write_pos + self.buffer.len() - self.delay_samples) % self.buffer.len()
    }
}

impl Stage for Delay {
    fn process(&mut self, buffer: &mut [f32]) {
        // Zero delay is the identity.
        if self.delay_samples == 0 {
            return;
        }

        for sample in buffer.iter_mut() {
            let delayed = self.buffer[self.read_pos()];
            self.buffer[self.write_pos] = *sample;
            self.write_pos = (self.write_pos + 1) % self.buffer.len();
            *sample = delayed;
        }
    }

    fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_reappears_after_the_delay_time() {
        let sample_rate = 1000;
        let mut delay = Delay::new(0.1, sample_rate); // 100 samples

        let mut buffer = vec![0.0f32; 256];
        buffer[0] = 1.0;
        delay.process(&mut buffer);

        assert_eq!(buffer[0], 0.0);
        assert_eq!(buffer[100], 1.0);
        assert!(buffer[1..100].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn zero_delay_is_identity() {
        let mut delay = Delay::new(0.0, 44100);
        let original: Vec<f32> = (0..64).map(|i| i as f32 / 64.0).collect();
        let mut buffer = original.clone();
        delay.process(&mut buffer);
        assert_eq!(buffer, original);
    }

    #[test]
    fn delay_time_clamps_to_supported_range() {
        let delay = Delay::new(9.0, 1000);
        assert_eq!(
            delay.delay_samples(),
            (1000.0 * MAX_DELAY_SECONDS) as usize
        );
    }
}
