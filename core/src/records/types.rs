use serde::{Deserialize, Serialize};

/// One runner (or animal) as stored in the records file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerRecord {
    pub name: String,
    /// Steps per minute.
    pub cadence: f64,
    /// 0 = toe-first, 1 = heel-first.
    pub heel_strike: f64,
    /// Centimetres.
    pub vertical_oscillation: f64,
}

impl RunnerRecord {
    pub fn metrics(&self) -> GaitMetrics {
        GaitMetrics {
            cadence: self.cadence,
            heel_strike: self.heel_strike,
            vertical_oscillation: self.vertical_oscillation,
        }
    }
}

/// Raw gait measurements, as typed by a user or read from a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaitMetrics {
    pub cadence: f64,
    pub heel_strike: f64,
    pub vertical_oscillation: f64,
}
