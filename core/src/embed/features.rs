use serde::{Deserialize, Serialize};

use crate::records::{GaitMetrics, RunnerRecord};

/// `[cadence, heel_strike, vertical_oscillation]`, unit length unless all zero.
pub type GaitVector = [f32; 3];

/// Steps per minute.
pub const CADENCE_RANGE: (f64, f64) = (50.0, 250.0);
/// Centimetres.
pub const VERTICAL_OSCILLATION_RANGE: (f64, f64) = (6.0, 20.0);
pub const HEEL_DEGREES_MAX: f64 = 90.0;

/// How the heel-strike ratio enters the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeelStrikeScale {
    /// The ratio is already in [0, 1] and is used as is.
    #[default]
    Ratio,
    /// The ratio is scaled to degrees (x90) and normalized against [0, 90].
    Degrees,
}

/// Linear rescale of `value` from `[min, max]` onto `[0, 1]`. Not clamped.
pub fn normalize_feature(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

/// Scale to unit Euclidean length. The zero vector is returned unchanged.
pub fn normalize_vector(v: [f64; 3]) -> [f64; 3] {
    let mag = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if mag == 0.0 {
        return v;
    }
    [v[0] / mag, v[1] / mag, v[2] / mag]
}

pub fn format_vector(v: &GaitVector) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.3}")).collect();
    format!("[{}]", parts.join(", "))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureEmbedder {
    heel_strike: HeelStrikeScale,
}

impl FeatureEmbedder {
    pub fn new(heel_strike: HeelStrikeScale) -> Self {
        Self { heel_strike }
    }

    pub fn heel_strike_scale(&self) -> HeelStrikeScale {
        self.heel_strike
    }

    /// Per-feature normalized triple, before unit scaling.
    pub fn raw_features(&self, m: &GaitMetrics) -> [f64; 3] {
        let (cad_min, cad_max) = CADENCE_RANGE;
        let (vert_min, vert_max) = VERTICAL_OSCILLATION_RANGE;
        let heel = match self.heel_strike {
            HeelStrikeScale::Ratio => m.heel_strike,
            HeelStrikeScale::Degrees => {
                normalize_feature(m.heel_strike * HEEL_DEGREES_MAX, 0.0, HEEL_DEGREES_MAX)
            }
        };
        [
            normalize_feature(m.cadence, cad_min, cad_max),
            heel,
            normalize_feature(m.vertical_oscillation, vert_min, vert_max),
        ]
    }

    pub fn embed(&self, m: &GaitMetrics) -> GaitVector {
        let v = normalize_vector(self.raw_features(m));
        [v[0] as f32, v[1] as f32, v[2] as f32]
    }

    pub fn embed_runner(&self, record: &RunnerRecord) -> GaitVector {
        self.embed(&record.metrics())
    }
}
