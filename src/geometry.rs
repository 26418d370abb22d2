//! Pointer → tab slot resolution.
//!
//! The editor stacks measures vertically. Each measure band is
//! `fret_height + 10` tall and its strings sit `space_between_strings`
//! apart, so a pointer position maps onto a measure, the nearest string and
//! a snapped horizontal offset.

use serde::{Deserialize, Serialize};

use crate::config::TabOptions;

/// A pointer position resolved against the tab grid.
///
/// Indices are signed: a pointer above or left of the editor resolves to
/// negative slots, which the state rejects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotePosition {
    pub measure_index: i64,
    pub string_index: i64,
    /// Snapped horizontal offset
    pub x: f64,
    /// Offset inside the measure band, before snapping to a string
    pub y: f64,
}

impl NotePosition {
    /// `(measure, string)` when both indices are non-negative and the
    /// pointer was at a finite position.
    pub fn slot(&self) -> Option<(usize, usize)> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            return None;
        }
        let measure = usize::try_from(self.measure_index).ok()?;
        let string = usize::try_from(self.string_index).ok()?;
        Some((measure, string))
    }
}

/// Round half towards positive infinity, the way browsers round.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    // `value + 0.5` can round up across the half; this comparison cannot
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Snap `value` to the nearest multiple of `quantum`.
pub fn snap(value: f64, quantum: f64) -> f64 {
    round_half_up(value / quantum) * quantum
}

/// Map pointer coordinates (relative to the editor's top-left corner) to
/// a measure, a string and a snapped x offset.
pub fn calculate_note_position(mouse_x: f64, mouse_y: f64, options: &TabOptions) -> NotePosition {
    let measure_height = options.measure_height();
    let measure_index = (mouse_y / measure_height).floor() as i64;
    // `%` keeps the sign of the dividend
    let relative_y = mouse_y % measure_height;
    let string_index = round_half_up(relative_y / options.space_between_strings) as i64;

    NotePosition {
        measure_index,
        string_index,
        x: snap(mouse_x, options.grid_size),
        y: relative_y,
    }
}
