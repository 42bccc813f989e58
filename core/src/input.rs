use crate::error::GaitError;
use crate::records::GaitMetrics;

/// Where the query path gets its three raw measurements from.
pub trait GaitInputSource {
    fn read_metrics(&mut self) -> Result<GaitMetrics, GaitError>;
}

/// Source that always yields the same metrics.
#[derive(Debug, Clone, Copy)]
pub struct FixedInput(pub GaitMetrics);

impl GaitInputSource for FixedInput {
    fn read_metrics(&mut self) -> Result<GaitMetrics, GaitError> {
        Ok(self.0)
    }
}

/// Parse one numeric answer. `field` is used in the error message.
pub fn parse_metric(field: &str, raw: &str) -> Result<f64, GaitError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| GaitError::Input(format!("{field} must be a number, got '{trimmed}'")))?;
    check_metric(field, value)
}

/// Reject NaN and infinities, which would poison the embedding.
pub fn check_metric(field: &str, value: f64) -> Result<f64, GaitError> {
    if !value.is_finite() {
        return Err(GaitError::Input(format!("{field} must be finite")));
    }
    Ok(value)
}
