//! Peak picking over a byte magnitude spectrum.
//!
//! All three detectors share one primitive: a bin qualifies when it is a
//! strict local maximum above the amplitude threshold. They are pure
//! functions of the frame; running them twice on the same frame yields
//! identical results.

/// A qualifying spectral peak paired with its raw magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resonance {
    pub frequency: f32,
    pub amplitude: u8,
}

/// Center frequency of FFT bin `i` for the given transform size.
pub fn bin_frequency(bin: usize, sample_rate: u32, fft_size: usize) -> f32 {
    bin as f32 * sample_rate as f32 / fft_size as f32
}

fn is_peak(frame: &[u8], i: usize, threshold: u8) -> bool {
    frame[i] > threshold && frame[i] > frame[i - 1] && frame[i] > frame[i + 1]
}

/// Frequency of the first qualifying peak scanning low to high, or 0.0
/// when nothing qualifies. A coarse fundamental proxy: only reasonable
/// when the signal is band-limited upstream.
pub fn detect_pitch(frame: &[u8], threshold: u8, sample_rate: u32, fft_size: usize) -> f32 {
    for i in 1..frame.len().saturating_sub(1) {
        if is_peak(frame, i, threshold) {
            return bin_frequency(i, sample_rate, fft_size);
        }
    }
    0.0
}

/// Up to the first three qualifying peaks, in ascending frequency order.
pub fn detect_formants(
    frame: &[u8],
    threshold: u8,
    sample_rate: u32,
    fft_size: usize,
) -> Vec<f32> {
    let mut formants = Vec::with_capacity(3);

    for i in 1..frame.len().saturating_sub(1) {
        if is_peak(frame, i, threshold) {
            formants.push(bin_frequency(i, sample_rate, fft_size));
            if formants.len() == 3 {
                break;
            }
        }
    }

    formants
}

/// Every qualifying peak with its magnitude. The list is uncapped;
/// truncation, if any, belongs to the renderer.
pub fn detect_resonances(
    frame: &[u8],
    threshold: u8,
    sample_rate: u32,
    fft_size: usize,
) -> Vec<Resonance> {
    let mut peaks = Vec::new();

    for i in 1..frame.len().saturating_sub(1) {
        if is_peak(frame, i, threshold) {
            peaks.push(Resonance {
                frequency: bin_frequency(i, sample_rate, fft_size),
                amplitude: frame[i],
            });
        }
    }

    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 44100;
    const FFT_SIZE: usize = 2048;

    fn frame_with_peaks(bins: &[usize], amplitude: u8) -> Vec<u8> {
        let mut frame = vec![0u8; FFT_SIZE / 2];
        for &bin in bins {
            frame[bin] = amplitude;
        }
        frame
    }

    #[test]
    fn empty_and_silent_frames_detect_nothing() {
        let silent = vec![0u8; FFT_SIZE / 2];
        assert_eq!(detect_pitch(&[], 128, SAMPLE_RATE, FFT_SIZE), 0.0);
        assert_eq!(detect_pitch(&silent, 128, SAMPLE_RATE, FFT_SIZE), 0.0);
        assert!(detect_formants(&silent, 128, SAMPLE_RATE, FFT_SIZE).is_empty());
        assert!(detect_resonances(&silent, 128, SAMPLE_RATE, FFT_SIZE).is_empty());
    }

    #[test]
    fn isolated_peaks_are_detected_with_their_frequencies() {
        let frame = frame_with_peaks(&[50, 120], 200);

        let pitch = detect_pitch(&frame, 128, SAMPLE_RATE, FFT_SIZE);
        assert_eq!(pitch, 50.0 * SAMPLE_RATE as f32 / FFT_SIZE as f32);
        assert!((pitch - 1076.66).abs() < 0.01);

        let formants = detect_formants(&frame, 128, SAMPLE_RATE, FFT_SIZE);
        assert_eq!(
            formants,
            vec![
                50.0 * SAMPLE_RATE as f32 / FFT_SIZE as f32,
                120.0 * SAMPLE_RATE as f32 / FFT_SIZE as f32,
            ]
        );

        let resonances = detect_resonances(&frame, 128, SAMPLE_RATE, FFT_SIZE);
        assert_eq!(resonances.len(), 2);
        assert!(resonances.iter().all(|r| r.amplitude == 200));
    }

    #[test]
    fn formants_are_capped_at_three_in_ascending_order() {
        let frame = frame_with_peaks(&[10, 30, 50, 70, 90], 200);
        let formants = detect_formants(&frame, 128, SAMPLE_RATE, FFT_SIZE);

        assert_eq!(formants.len(), 3);
        assert!(formants.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(formants[2], bin_frequency(50, SAMPLE_RATE, FFT_SIZE));
    }

    #[test]
    fn resonances_are_unbounded() {
        let bins: Vec<usize> = (1..500).map(|i| i * 2).collect();
        let frame = frame_with_peaks(&bins, 200);
        let resonances = detect_resonances(&frame, 128, SAMPLE_RATE, FFT_SIZE);
        assert_eq!(resonances.len(), bins.len());
    }

    #[test]
    fn value_at_threshold_does_not_qualify() {
        let frame = frame_with_peaks(&[50], 128);
        assert_eq!(detect_pitch(&frame, 128, SAMPLE_RATE, FFT_SIZE), 0.0);

        let frame = frame_with_peaks(&[50], 129);
        assert!(detect_pitch(&frame, 128, SAMPLE_RATE, FFT_SIZE) > 0.0);
    }

    #[test]
    fn plateaus_are_not_strict_local_maxima() {
        let mut frame = vec![0u8; FFT_SIZE / 2];
        frame[50] = 200;
        frame[51] = 200;
        assert_eq!(detect_pitch(&frame, 128, SAMPLE_RATE, FFT_SIZE), 0.0);
    }

    #[test]
    fn edge_bins_never_qualify() {
        let mut frame = vec![0u8; FFT_SIZE / 2];
        frame[0] = 255;
        frame[FFT_SIZE / 2 - 1] = 255;
        assert_eq!(detect_pitch(&frame, 128, SAMPLE_RATE, FFT_SIZE), 0.0);
        assert!(detect_resonances(&frame, 128, SAMPLE_RATE, FFT_SIZE).is_empty());
    }

    #[test]
    fn detection_is_idempotent_on_an_unmutated_frame() {
        let frame = frame_with_peaks(&[50, 120, 300], 200);
        assert_eq!(
            detect_formants(&frame, 128, SAMPLE_RATE, FFT_SIZE),
            detect_formants(&frame, 128, SAMPLE_RATE, FFT_SIZE)
        );
        assert_eq!(
            detect_resonances(&frame, 128, SAMPLE_RATE, FFT_SIZE),
            detect_resonances(&frame, 128, SAMPLE_RATE, FFT_SIZE)
        );
    }
}
