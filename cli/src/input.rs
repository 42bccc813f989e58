use std::io::{BufRead, Write};

use gait_core::api::{check_metric, parse_metric, GaitError, GaitInputSource, GaitMetrics};

const CADENCE_PROMPT: &str = "Cadence (e.g., 180): ";
const HEEL_PROMPT: &str = "Heel Strike Ratio (0 = toe-first, 1 = heel-first): ";
const VERT_PROMPT: &str = "Vertical Oscillation (cm): ";

/// Reads any metric that was not given on the command line from `reader`,
/// writing a prompt to `writer` first.
pub struct PromptInput<R, W> {
    reader: R,
    writer: W,
    cadence: Option<f64>,
    heel_strike: Option<f64>,
    vertical_oscillation: Option<f64>,
}

impl<R: BufRead, W: Write> PromptInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            cadence: None,
            heel_strike: None,
            vertical_oscillation: None,
        }
    }

    pub fn with_preset(
        mut self,
        cadence: Option<f64>,
        heel_strike: Option<f64>,
        vertical_oscillation: Option<f64>,
    ) -> Self {
        self.cadence = cadence;
        self.heel_strike = heel_strike;
        self.vertical_oscillation = vertical_oscillation;
        self
    }

    fn ask(&mut self, field: &str, prompt: &str) -> Result<f64, GaitError> {
        let io_err = |e: std::io::Error| GaitError::Input(format!("{field}: {e}"));
        self.writer.write_all(prompt.as_bytes()).map_err(io_err)?;
        self.writer.flush().map_err(io_err)?;

        let mut line = String::new();
        let n = self.reader.read_line(&mut line).map_err(io_err)?;
        if n == 0 {
            return Err(GaitError::Input(format!(
                "unexpected end of input while reading {field}"
            )));
        }
        parse_metric(field, &line)
    }
}

impl<R: BufRead, W: Write> GaitInputSource for PromptInput<R, W> {
    fn read_metrics(&mut self) -> Result<GaitMetrics, GaitError> {
        let cadence = match self.cadence {
            Some(v) => check_metric("cadence", v)?,
            None => self.ask("cadence", CADENCE_PROMPT)?,
        };
        let heel_strike = match self.heel_strike {
            Some(v) => check_metric("heel strike ratio", v)?,
            None => self.ask("heel strike ratio", HEEL_PROMPT)?,
        };
        let vertical_oscillation = match self.vertical_oscillation {
            Some(v) => check_metric("vertical oscillation", v)?,
            None => self.ask("vertical oscillation", VERT_PROMPT)?,
        };
        Ok(GaitMetrics {
            cadence,
            heel_strike,
            vertical_oscillation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn prompts_for_every_metric() {
        let mut prompts = Vec::new();
        let mut src = PromptInput::new(Cursor::new("180\n0.2\n8.5\n"), &mut prompts);
        let m = src.read_metrics().unwrap();
        assert_eq!(
            m,
            GaitMetrics {
                cadence: 180.0,
                heel_strike: 0.2,
                vertical_oscillation: 8.5,
            }
        );
        drop(src);
        assert_eq!(
            String::from_utf8(prompts).unwrap(),
            format!("{CADENCE_PROMPT}{HEEL_PROMPT}{VERT_PROMPT}")
        );
    }

    #[test]
    fn skips_prompts_for_preset_values() {
        let mut prompts = Vec::new();
        let mut src = PromptInput::new(Cursor::new("9\n"), &mut prompts).with_preset(
            Some(170.0),
            Some(1.0),
            None,
        );
        let m = src.read_metrics().unwrap();
        assert_eq!(m.vertical_oscillation, 9.0);
        drop(src);
        assert_eq!(String::from_utf8(prompts).unwrap(), VERT_PROMPT);
    }

    #[test]
    fn non_finite_preset_is_input_error() {
        let mut src = PromptInput::new(Cursor::new(""), Vec::new()).with_preset(
            Some(f64::NAN),
            Some(0.0),
            Some(f64::INFINITY),
        );
        let err = src.read_metrics().unwrap_err();
        assert!(matches!(err, GaitError::Input(_)));
        assert_eq!(err.to_string(), "invalid input: cadence must be finite");

        let mut src = PromptInput::new(Cursor::new(""), Vec::new()).with_preset(
            Some(180.0),
            Some(0.0),
            Some(f64::INFINITY),
        );
        let err = src.read_metrics().unwrap_err();
        assert!(err.to_string().contains("vertical oscillation must be finite"));
    }

    #[test]
    fn bad_number_is_input_error() {
        let mut src = PromptInput::new(Cursor::new("fast\n"), Vec::new());
        let err = src.read_metrics().unwrap_err();
        assert!(matches!(err, GaitError::Input(_)));
        assert!(err.to_string().contains("cadence"));
    }

    #[test]
    fn eof_is_input_error() {
        let mut src = PromptInput::new(Cursor::new("180\n"), Vec::new());
        let err = src.read_metrics().unwrap_err();
        assert!(err.to_string().contains("end of input while reading heel strike ratio"));
    }
}
