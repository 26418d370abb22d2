//! Tab editing state — the single source of truth for an editor instance.
//!
//! Every mutation is a plain in-memory list operation. Out-of-range input
//! is ignored rather than reported: the caller gets `None` back and a
//! debug log line, and the state is left untouched.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::TabOptions;
use crate::error::{Result, TabError};
use crate::geometry::snap;
use crate::model::*;

/// Strings × measures × notes, plus the options the editor was built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabState {
    options: TabOptions,
    measures: usize,
    strings: Vec<TabString>,
    next_id: u64,
}

impl TabState {
    /// Create an empty tab with `options.lines` strings and
    /// `options.measures` empty measures on each.
    pub fn new(options: TabOptions) -> Self {
        let measures = options.measures;
        let strings = (0..options.lines)
            .map(|_| TabString::with_measures(measures))
            .collect();
        Self {
            options,
            measures,
            strings,
            next_id: 0,
        }
    }

    pub fn options(&self) -> &TabOptions {
        &self.options
    }

    /// Number of strings.
    pub fn lines(&self) -> usize {
        self.strings.len()
    }

    /// Number of measures on every string.
    pub fn measures(&self) -> usize {
        self.measures
    }

    pub fn strings(&self) -> &[TabString] {
        &self.strings
    }

    /// Whether `(measure_index, string_index)` addresses an existing slot.
    pub fn contains_slot(&self, measure_index: usize, string_index: usize) -> bool {
        measure_index < self.measures && string_index < self.strings.len()
    }

    pub fn measure(&self, measure_index: usize, string_index: usize) -> Option<&Measure> {
        self.strings
            .get(string_index)
            .and_then(|s| s.measures.get(measure_index))
    }

    /// Notes of one string in one measure; empty for a missing slot.
    pub fn notes(&self, measure_index: usize, string_index: usize) -> &[Note] {
        self.measure(measure_index, string_index)
            .map_or(&[], |m| m.notes.as_slice())
    }

    pub fn note_count(&self, measure_index: usize, string_index: usize) -> usize {
        self.notes(measure_index, string_index).len()
    }

    /// Total number of notes in the tab.
    pub fn total_notes(&self) -> usize {
        self.iter_notes().count()
    }

    /// All notes, string-major then measure then insertion order.
    pub fn iter_notes(&self) -> impl Iterator<Item = &Note> {
        self.strings
            .iter()
            .flat_map(|s| s.measures.iter())
            .flat_map(|m| m.notes.iter())
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.iter_notes().find(|n| n.id == id)
    }

    /// Append one empty measure to every string. Returns its index.
    pub fn add_measure(&mut self) -> usize {
        for string in &mut self.strings {
            string.measures.push(Measure::default());
        }
        self.measures += 1;
        self.measures - 1
    }

    /// Drop the last measure of every string along with its notes.
    ///
    /// Returns the removed measure's index and the notes that went with it,
    /// or `None` when the tab has no measures.
    pub fn remove_measure(&mut self) -> Option<(usize, Vec<Note>)> {
        if self.measures == 0 {
            debug!("remove_measure ignored: tab has no measures");
            return None;
        }
        let mut removed = Vec::new();
        for string in &mut self.strings {
            if let Some(measure) = string.measures.pop() {
                removed.extend(measure.notes);
            }
        }
        self.measures -= 1;
        Some((self.measures, removed))
    }

    /// Append a note to one string's measure.
    ///
    /// Ignored (returns `None`) when the slot does not exist, `fret` is
    /// above [`MAX_FRET`], `x` is not finite or note ids are exhausted.
    pub fn add_note(
        &mut self,
        measure_index: usize,
        string_index: usize,
        fret: u8,
        x: f64,
    ) -> Option<NoteId> {
        if !self.contains_slot(measure_index, string_index) {
            debug!(
                "add_note ignored: slot (measure {measure_index}, string {string_index}) outside {}x{}",
                self.measures,
                self.strings.len()
            );
            return None;
        }
        if !is_valid_fret(fret) {
            debug!("add_note ignored: fret {fret} above {MAX_FRET}");
            return None;
        }
        if !x.is_finite() {
            debug!("add_note ignored: x {x} is not finite");
            return None;
        }
        let Some(next_id) = self.next_id.checked_add(1) else {
            debug!("add_note ignored: note ids exhausted");
            return None;
        };

        let id = NoteId(self.next_id);
        self.next_id = next_id;
        let measure = self.measure_mut(measure_index, string_index)?;
        measure.notes.push(Note {
            id,
            string_index,
            measure_index,
            fret,
            x,
        });
        Some(id)
    }

    /// Remove the note with identity `id` from one string's measure.
    pub fn remove_note(
        &mut self,
        measure_index: usize,
        string_index: usize,
        id: NoteId,
    ) -> Option<Note> {
        let Some(measure) = self.measure_mut(measure_index, string_index) else {
            debug!("remove_note ignored: no slot (measure {measure_index}, string {string_index})");
            return None;
        };
        match measure.notes.iter().position(|n| n.id == id) {
            Some(pos) => Some(measure.notes.remove(pos)),
            None => {
                debug!("remove_note ignored: {id} not in (measure {measure_index}, string {string_index})");
                None
            }
        }
    }

    /// Move a note horizontally, snapped to the move grid. Returns the
    /// stored offset.
    pub fn move_note(
        &mut self,
        measure_index: usize,
        string_index: usize,
        id: NoteId,
        new_x: f64,
    ) -> Option<f64> {
        if !new_x.is_finite() {
            debug!("move_note ignored: x {new_x} is not finite");
            return None;
        }
        let snapped = snap(new_x, self.options.move_grid_size);
        let note = self
            .measure_mut(measure_index, string_index)?
            .notes
            .iter_mut()
            .find(|n| n.id == id);
        match note {
            Some(note) => {
                note.x = snapped;
                Some(snapped)
            }
            None => {
                debug!("move_note ignored: {id} not in (measure {measure_index}, string {string_index})");
                None
            }
        }
    }

    fn measure_mut(&mut self, measure_index: usize, string_index: usize) -> Option<&mut Measure> {
        self.strings
            .get_mut(string_index)
            .and_then(|s| s.measures.get_mut(measure_index))
    }

    // ─── Snapshots ──────────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a snapshot, rejecting any that break a tab invariant.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: TabState = serde_json::from_str(json)?;
        state.options.validate()?;
        state.check_invariants()?;
        Ok(state)
    }

    fn check_invariants(&self) -> Result<()> {
        if self.strings.len() != self.options.lines {
            return Err(TabError::Invariant(format!(
                "{} strings stored but options declare {}",
                self.strings.len(),
                self.options.lines
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for (s, string) in self.strings.iter().enumerate() {
            if string.measures.len() != self.measures {
                return Err(TabError::Invariant(format!(
                    "string {s} has {} measures, expected {}",
                    string.measures.len(),
                    self.measures
                )));
            }
            for (m, measure) in string.measures.iter().enumerate() {
                for note in &measure.notes {
                    if note.string_index != s || note.measure_index != m {
                        return Err(TabError::Invariant(format!(
                            "{} claims (measure {}, string {}) but is stored in (measure {m}, string {s})",
                            note.id, note.measure_index, note.string_index
                        )));
                    }
                    if !is_valid_fret(note.fret) {
                        return Err(TabError::Invariant(format!(
                            "{} has fret {} above {MAX_FRET}",
                            note.id, note.fret
                        )));
                    }
                    if note.id.0 >= self.next_id || !seen.insert(note.id) {
                        return Err(TabError::Invariant(format!(
                            "{} is duplicated or not below next id {}",
                            note.id, self.next_id
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for TabState {
    fn default() -> Self {
        Self::new(TabOptions::default())
    }
}
