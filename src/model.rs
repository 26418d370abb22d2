//! Data model for a guitar tab.
//!
//! The tab is stored string-major: `strings[s].measures[m].notes`. Notes
//! hold only musical data; anything a view needs to draw them lives in
//! the renderer, keyed by [`NoteId`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest fret a note may carry (0 is the open string).
pub const MAX_FRET: u8 = 24;

/// Identity of a note within one tab. Never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A fret number placed on a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// String the note sits on (0-based)
    pub string_index: usize,
    /// Measure the note belongs to (0-based)
    pub measure_index: usize,
    /// Fret played, 0..=24
    pub fret: u8,
    /// Horizontal offset within the measure
    pub x: f64,
}

/// The notes of one string within one measure, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub notes: Vec<Note>,
}

/// One string of the instrument across all measures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabString {
    pub measures: Vec<Measure>,
}

impl TabString {
    pub(crate) fn with_measures(count: usize) -> Self {
        Self {
            measures: vec![Measure::default(); count],
        }
    }
}

/// Whether `fret` is a playable fret number.
pub fn is_valid_fret(fret: u8) -> bool {
    fret <= MAX_FRET
}
