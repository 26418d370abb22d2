//! Editing commands and the dispatcher that applies them.
//!
//! Input handling produces [`Command`]s; [`dispatch`] applies one to the
//! state and reports what changed as [`TabChange`]s, which the renderer
//! consumes. A rejected command yields no changes.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::calculate_note_position;
use crate::model::{Note, NoteId};
use crate::state::TabState;

/// A discrete state mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    AddMeasure,
    RemoveMeasure,
    /// Add a note at an already resolved slot.
    AddNote {
        measure: usize,
        string: usize,
        fret: u8,
        x: f64,
    },
    /// Add a note at pointer coordinates relative to the editor.
    PlaceNote { mouse_x: f64, mouse_y: f64, fret: u8 },
    RemoveNote {
        measure: usize,
        string: usize,
        note: NoteId,
    },
    MoveNote {
        measure: usize,
        string: usize,
        note: NoteId,
        x: f64,
    },
}

/// A change applied to the state, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabChange {
    MeasureAdded { measure: usize },
    /// The last measure was dropped with the listed notes.
    MeasureRemoved { measure: usize, notes: Vec<NoteId> },
    NoteAdded { note: Note },
    NoteRemoved { note: Note },
    NoteMoved { note: NoteId, x: f64 },
}

/// Apply `command` to `state`.
pub fn dispatch(state: &mut TabState, command: Command) -> Vec<TabChange> {
    match command {
        Command::AddMeasure => {
            let measure = state.add_measure();
            vec![TabChange::MeasureAdded { measure }]
        }
        Command::RemoveMeasure => state
            .remove_measure()
            .map(|(measure, notes)| TabChange::MeasureRemoved {
                measure,
                notes: notes.iter().map(|n| n.id).collect(),
            })
            .into_iter()
            .collect(),
        Command::AddNote {
            measure,
            string,
            fret,
            x,
        } => {
            let id = state.add_note(measure, string, fret, x);
            added(state, id)
        }
        Command::PlaceNote {
            mouse_x,
            mouse_y,
            fret,
        } => {
            let position = calculate_note_position(mouse_x, mouse_y, state.options());
            let id = position
                .slot()
                .and_then(|(measure, string)| state.add_note(measure, string, fret, position.x));
            added(state, id)
        }
        Command::RemoveNote {
            measure,
            string,
            note,
        } => state
            .remove_note(measure, string, note)
            .map(|note| TabChange::NoteRemoved { note })
            .into_iter()
            .collect(),
        Command::MoveNote {
            measure,
            string,
            note,
            x,
        } => state
            .move_note(measure, string, note, x)
            .map(|x| TabChange::NoteMoved { note, x })
            .into_iter()
            .collect(),
    }
}

fn added(state: &TabState, id: Option<NoteId>) -> Vec<TabChange> {
    id.and_then(|id| state.note(id))
        .map(|note| TabChange::NoteAdded { note: note.clone() })
        .into_iter()
        .collect()
}

/// Apply commands in order, collecting every change.
pub fn dispatch_all<I>(state: &mut TabState, commands: I) -> Vec<TabChange>
where
    I: IntoIterator<Item = Command>,
{
    commands
        .into_iter()
        .flat_map(|c| dispatch(state, c))
        .collect()
}

/// Parse a JSON array of commands.
///
/// Indices, frets and note ids that no tab could hold (negative, or too
/// large for their type) drop that one command, the same way `dispatch`
/// ignores an out-of-range edit. Malformed JSON fails the whole batch.
pub fn commands_from_json(json: &str) -> Result<Vec<Command>> {
    let records: Vec<CommandRecord> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .filter_map(|record| {
            let command = record.to_command();
            if command.is_none() {
                debug!("command ignored: {record:?} is out of range");
            }
            command
        })
        .collect())
}

/// JSON shape of [`Command`], with integers wide enough to take whatever
/// a caller sends.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CommandRecord {
    AddMeasure,
    RemoveMeasure,
    AddNote {
        measure: i128,
        string: i128,
        fret: i128,
        x: f64,
    },
    PlaceNote {
        mouse_x: f64,
        mouse_y: f64,
        fret: i128,
    },
    RemoveNote {
        measure: i128,
        string: i128,
        note: i128,
    },
    MoveNote {
        measure: i128,
        string: i128,
        note: i128,
        x: f64,
    },
}

impl CommandRecord {
    fn to_command(&self) -> Option<Command> {
        let command = match *self {
            CommandRecord::AddMeasure => Command::AddMeasure,
            CommandRecord::RemoveMeasure => Command::RemoveMeasure,
            CommandRecord::AddNote {
                measure,
                string,
                fret,
                x,
            } => Command::AddNote {
                measure: usize::try_from(measure).ok()?,
                string: usize::try_from(string).ok()?,
                fret: u8::try_from(fret).ok()?,
                x,
            },
            CommandRecord::PlaceNote {
                mouse_x,
                mouse_y,
                fret,
            } => Command::PlaceNote {
                mouse_x,
                mouse_y,
                fret: u8::try_from(fret).ok()?,
            },
            CommandRecord::RemoveNote {
                measure,
                string,
                note,
            } => Command::RemoveNote {
                measure: usize::try_from(measure).ok()?,
                string: usize::try_from(string).ok()?,
                note: NoteId(u64::try_from(note).ok()?),
            },
            CommandRecord::MoveNote {
                measure,
                string,
                note,
                x,
            } => Command::MoveNote {
                measure: usize::try_from(measure).ok()?,
                string: usize::try_from(string).ok()?,
                note: NoteId(u64::try_from(note).ok()?),
                x,
            },
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TabOptions;

    #[test]
    fn place_note_resolves_pointer() {
        let mut state = TabState::new(TabOptions::default());
        let changes = dispatch(
            &mut state,
            Command::PlaceNote {
                mouse_x: 47.0,
                mouse_y: 15.0,
                fret: 3,
            },
        );
        assert_eq!(changes.len(), 1);
        let TabChange::NoteAdded { note } = &changes[0] else {
            panic!("expected NoteAdded, got {changes:?}");
        };
        assert_eq!((note.measure_index, note.string_index, note.x), (0, 0, 40.0));
        assert_eq!(state.note_count(0, 0), 1);
    }

    #[test]
    fn place_note_outside_editor_changes_nothing() {
        let mut state = TabState::new(TabOptions::default());
        let changes = dispatch(
            &mut state,
            Command::PlaceNote {
                mouse_x: 10.0,
                mouse_y: -30.0,
                fret: 3,
            },
        );
        assert!(changes.is_empty());
        assert_eq!(state.total_notes(), 0);
    }

    #[test]
    fn commands_parse_from_tagged_json() {
        let commands = commands_from_json(
            r#"[{"type": "add_measure"},
                {"type": "add_note", "measure": 4, "string": 0, "fret": 12, "x": 60},
                {"type": "move_note", "measure": 4, "string": 0, "note": 0, "x": 63}]"#,
        )
        .unwrap();
        let mut state = TabState::new(TabOptions::default());
        let changes = dispatch_all(&mut state, commands);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[2], TabChange::NoteMoved { note: NoteId(0), x: 65.0 });
    }

    #[test]
    fn out_of_range_commands_are_skipped_not_fatal() {
        let commands = commands_from_json(
            r#"[{"type": "add_note", "measure": 0, "string": 1, "fret": 5, "x": 20},
                {"type": "add_note", "measure": -1, "string": 0, "fret": 5, "x": 20},
                {"type": "add_note", "measure": 0, "string": -3, "fret": 5, "x": 20},
                {"type": "add_note", "measure": 0, "string": 0, "fret": 300, "x": 20},
                {"type": "place_note", "mouse_x": 47, "mouse_y": 15, "fret": -1},
                {"type": "remove_note", "measure": 0, "string": 1, "note": -7},
                {"type": "move_note", "measure": 0, "string": 1, "note": 0, "x": 41},
                {"type": "add_note", "measure": 2, "string": 0, "fret": 25, "x": 20}]"#,
        )
        .unwrap();
        assert_eq!(commands.len(), 3);

        let mut state = TabState::new(TabOptions::default());
        let changes = dispatch_all(&mut state, commands);
        // fret 25 parses but the tab rejects it
        assert_eq!(changes.len(), 2);
        assert_eq!(state.total_notes(), 1);
        assert_eq!(state.notes(0, 1)[0].x, 40.0);
    }
}
