//! Gait feature embedding.
//!
//! Turns raw measurements into a 3-dimensional unit vector so similarity
//! search compares the shape of a gait rather than its magnitude.

mod features;

pub use features::{
    format_vector, normalize_feature, normalize_vector, FeatureEmbedder, GaitVector,
    HeelStrikeScale, CADENCE_RANGE, HEEL_DEGREES_MAX, VERTICAL_OSCILLATION_RANGE,
};
