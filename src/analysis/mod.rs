pub mod classify;
pub mod history;
pub mod peaks;

pub use classify::{VoiceCategory, classify};
pub use history::{Estimate, EstimateHistory, PitchRing};
pub use peaks::{Resonance, detect_formants, detect_pitch, detect_resonances};
