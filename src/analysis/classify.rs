use crate::analysis::history::Estimate;

/// Coarse voice category derived from the latest estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceCategory {
    Male,
    Female,
    NeutralMale,
    NeutralFemale,
    Indeterminate,
}

impl VoiceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            VoiceCategory::Male => "Male",
            VoiceCategory::Female => "Female",
            VoiceCategory::NeutralMale => "Neutral Male",
            VoiceCategory::NeutralFemale => "Neutral Female",
            VoiceCategory::Indeterminate => "-",
        }
    }
}

// Pitch bands in Hz. The formant fallback applies only when no pitch was
// detected at all; a nonzero pitch outside both bands stays indeterminate.
const MALE_PITCH_MIN: f32 = 85.0;
const MALE_PITCH_MAX: f32 = 165.0;
const FEMALE_PITCH_MAX: f32 = 300.0;
const FALLBACK_F1_SPLIT: f32 = 500.0;
const FALLBACK_F2_SPLIT: f32 = 1500.0;

pub fn classify(estimate: &Estimate) -> VoiceCategory {
    let pitch = estimate.pitch;

    if pitch >= MALE_PITCH_MIN && pitch < MALE_PITCH_MAX {
        VoiceCategory::Male
    } else if pitch >= MALE_PITCH_MAX && pitch <= FEMALE_PITCH_MAX {
        VoiceCategory::Female
    } else if pitch == 0.0 {
        formant_fallback(&estimate.formants)
    } else {
        VoiceCategory::Indeterminate
    }
}

// Higher formants track a shorter vocal tract. Fewer than two formants
// fail the test outright.
fn formant_fallback(formants: &[f32]) -> VoiceCategory {
    match (formants.first(), formants.get(1)) {
        (Some(&f1), Some(&f2)) if f1 < FALLBACK_F1_SPLIT && f2 > FALLBACK_F2_SPLIT => {
            VoiceCategory::NeutralFemale
        }
        (Some(&f1), Some(&f2)) if f1 > FALLBACK_F1_SPLIT && f2 < FALLBACK_F2_SPLIT => {
            VoiceCategory::NeutralMale
        }
        _ => VoiceCategory::Indeterminate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(pitch: f32, formants: &[f32]) -> Estimate {
        Estimate {
            timestamp: 0.0,
            pitch,
            formants: formants.to_vec(),
            resonances: Vec::new(),
        }
    }

    #[test]
    fn pitch_bands_take_priority() {
        assert_eq!(classify(&estimate(120.0, &[])), VoiceCategory::Male);
        assert_eq!(classify(&estimate(200.0, &[])), VoiceCategory::Female);
        assert_eq!(classify(&estimate(165.0, &[])), VoiceCategory::Female);
        assert_eq!(classify(&estimate(300.0, &[])), VoiceCategory::Female);
    }

    #[test]
    fn missing_pitch_falls_back_to_formants() {
        assert_eq!(
            classify(&estimate(0.0, &[300.0, 2000.0])),
            VoiceCategory::NeutralFemale
        );
        assert_eq!(
            classify(&estimate(0.0, &[800.0, 1000.0])),
            VoiceCategory::NeutralMale
        );
    }

    #[test]
    fn out_of_band_pitch_is_indeterminate() {
        assert_eq!(
            classify(&estimate(400.0, &[600.0, 1000.0])),
            VoiceCategory::Indeterminate
        );
        assert_eq!(classify(&estimate(60.0, &[])), VoiceCategory::Indeterminate);
    }

    #[test]
    fn too_few_formants_never_panic() {
        assert_eq!(classify(&estimate(0.0, &[])), VoiceCategory::Indeterminate);
        assert_eq!(
            classify(&estimate(0.0, &[300.0])),
            VoiceCategory::Indeterminate
        );
    }

    #[test]
    fn mixed_formant_shapes_stay_indeterminate() {
        assert_eq!(
            classify(&estimate(0.0, &[300.0, 1000.0])),
            VoiceCategory::Indeterminate
        );
        assert_eq!(
            classify(&estimate(0.0, &[600.0, 2000.0])),
            VoiceCategory::Indeterminate
        );
    }

    #[test]
    fn indeterminate_displays_as_a_dash() {
        assert_eq!(VoiceCategory::Indeterminate.label(), "-");
    }
}
