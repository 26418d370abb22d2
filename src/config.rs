//! Editor options.
//!
//! Options only feed the coordinate math and the initial measure count;
//! none of them affect the tab invariants once the state exists.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabError};

/// Vertical padding added to `fret_height` to get one measure's height.
pub const MEASURE_PADDING: f64 = 10.0;

/// Options recognized by the editor. JSON keys are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabOptions {
    /// Number of strings
    #[serde(alias = "strings")]
    pub lines: usize,
    /// Width of one fret cell in pixels
    pub fret_width: f64,
    /// Height of the fretboard area of one measure in pixels
    pub fret_height: f64,
    /// Measures allocated at construction
    pub measures: usize,
    /// Vertical distance between two strings in pixels
    pub space_between_strings: f64,
    /// Snap quantum for placing a note
    pub grid_size: f64,
    /// Snap quantum while dragging an existing note
    pub move_grid_size: f64,
    /// Class carried by every rendered measure
    pub svg_class: String,
}

impl Default for TabOptions {
    fn default() -> Self {
        Self {
            lines: 6,
            fret_width: 40.0,
            fret_height: 200.0,
            measures: 4,
            space_between_strings: 50.0,
            grid_size: 20.0,
            move_grid_size: 5.0,
            svg_class: "guitar-tab".into(),
        }
    }
}

impl TabOptions {
    /// Parse options from JSON, filling missing keys with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: TabOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Height of one measure band: `fret_height + 10`.
    pub fn measure_height(&self) -> f64 {
        self.fret_height + MEASURE_PADDING
    }

    /// Reject options the geometry cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.lines == 0 {
            return Err(TabError::InvalidOptions("lines must be at least 1".into()));
        }
        let positive = [
            ("fretWidth", self.fret_width),
            ("fretHeight", self.fret_height),
            ("spaceBetweenStrings", self.space_between_strings),
            ("gridSize", self.grid_size),
            ("moveGridSize", self.move_grid_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TabError::InvalidOptions(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let options = TabOptions::from_json("{}").unwrap();
        assert_eq!(options, TabOptions::default());
    }

    #[test]
    fn strings_is_an_alias_for_lines() {
        let options = TabOptions::from_json(r#"{"strings": 4, "fretHeight": 400}"#).unwrap();
        assert_eq!(options.lines, 4);
        assert_eq!(options.fret_height, 400.0);
        assert_eq!(options.measure_height(), 410.0);
    }

    #[test]
    fn zero_grid_is_rejected() {
        let err = TabOptions::from_json(r#"{"gridSize": 0}"#).unwrap_err();
        assert!(matches!(err, TabError::InvalidOptions(_)));
    }

    #[test]
    fn zero_lines_is_rejected() {
        assert!(TabOptions::from_json(r#"{"lines": 0}"#).is_err());
    }
}
