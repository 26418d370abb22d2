//! Pointer and palette input → editing commands.
//!
//! Holds only transient view state: which palette fret is selected, which
//! fret is being dragged in from the palette, and which note (if any) is
//! being dragged along its string. Nothing here touches the tab directly;
//! every edit leaves as a [`Command`].

use log::trace;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::geometry::{calculate_note_position, round_half_up};
use crate::model::NoteId;
use crate::state::TabState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Input coming from the view. Coordinates are relative to the editor's
/// top-left corner unless noted otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// A fret button in the palette was clicked.
    FretClicked { fret: u8 },
    /// A string line was clicked.
    LineClicked { x: f64, y: f64 },
    DragStarted { fret: u8 },
    DragOver { x: f64, y: f64 },
    /// Drop onto the editor. `fret` is whatever the drag payload carried.
    Dropped { x: f64, y: f64, fret: Option<u8> },
    DragEnded,
    /// A note marker was pressed.
    NotePressed {
        measure: usize,
        string: usize,
        note: NoteId,
        button: PointerButton,
    },
    /// Pointer moved during a note drag; `x` is relative to the measure.
    PointerMoved { x: f64 },
    PointerReleased,
}

/// Gesture on an existing note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteGesture {
    Idle,
    Moving {
        measure: usize,
        string: usize,
        note: NoteId,
        fret: u8,
    },
}

/// Where a note stands from the view's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePhase {
    Absent,
    Idle,
    Dragged,
}

/// Floating readout shown while a note is being moved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveReadout {
    /// Pointer x as a whole percentage of the editor width
    pub position_percent: f64,
    pub fret: u8,
    /// 1-based string number
    pub string_number: usize,
}

#[derive(Debug, Clone)]
pub struct Interaction {
    editor_width: f64,
    selected_fret: Option<u8>,
    dragging_fret: Option<u8>,
    over_slot: bool,
    gesture: NoteGesture,
    readout: Option<MoveReadout>,
}

impl Interaction {
    pub fn new(editor_width: f64) -> Self {
        Self {
            editor_width,
            selected_fret: None,
            dragging_fret: None,
            over_slot: false,
            gesture: NoteGesture::Idle,
            readout: None,
        }
    }

    /// Fret chosen by clicking the palette, waiting for a string click.
    pub fn selected_fret(&self) -> Option<u8> {
        self.selected_fret
    }

    /// Fret being dragged in from the palette.
    pub fn dragging_fret(&self) -> Option<u8> {
        self.dragging_fret
    }

    /// Whether the last drag-over was above an existing slot; the view
    /// highlights the dragged button while this holds.
    pub fn is_over_slot(&self) -> bool {
        self.over_slot
    }

    pub fn gesture(&self) -> NoteGesture {
        self.gesture
    }

    pub fn readout(&self) -> Option<&MoveReadout> {
        self.readout.as_ref()
    }

    pub fn note_phase(&self, state: &TabState, id: NoteId) -> NotePhase {
        match self.gesture {
            _ if state.note(id).is_none() => NotePhase::Absent,
            NoteGesture::Moving { note, .. } if note == id => NotePhase::Dragged,
            _ => NotePhase::Idle,
        }
    }

    /// Update view state for `event` and return the commands it implies.
    pub fn handle(&mut self, state: &TabState, event: InputEvent) -> Vec<Command> {
        match event {
            InputEvent::FretClicked { fret } => {
                self.selected_fret = match self.selected_fret {
                    Some(current) if current == fret => None,
                    _ => Some(fret),
                };
                trace!("palette selection: {:?}", self.selected_fret);
                Vec::new()
            }
            InputEvent::LineClicked { x, y } => match self.selected_fret.take() {
                Some(fret) => vec![Command::PlaceNote {
                    mouse_x: x,
                    mouse_y: y,
                    fret,
                }],
                None => Vec::new(),
            },
            InputEvent::DragStarted { fret } => {
                trace!("palette drag started with fret {fret}");
                self.dragging_fret = Some(fret);
                self.over_slot = false;
                Vec::new()
            }
            InputEvent::DragOver { x, y } => {
                if self.dragging_fret.is_some() {
                    self.over_slot = calculate_note_position(x, y, state.options())
                        .slot()
                        .is_some_and(|(m, s)| state.contains_slot(m, s));
                }
                Vec::new()
            }
            InputEvent::Dropped { x, y, fret } => {
                self.over_slot = false;
                match fret.or(self.dragging_fret) {
                    Some(fret) => vec![Command::PlaceNote {
                        mouse_x: x,
                        mouse_y: y,
                        fret,
                    }],
                    None => Vec::new(),
                }
            }
            InputEvent::DragEnded => {
                self.dragging_fret = None;
                self.over_slot = false;
                Vec::new()
            }
            InputEvent::NotePressed {
                measure,
                string,
                note,
                button: PointerButton::Secondary,
            } => {
                if matches!(self.gesture, NoteGesture::Moving { note: n, .. } if n == note) {
                    self.end_gesture();
                }
                vec![Command::RemoveNote {
                    measure,
                    string,
                    note,
                }]
            }
            InputEvent::NotePressed {
                measure,
                string,
                note,
                button: PointerButton::Primary,
            } => {
                if let Some(n) = state.note(note) {
                    if n.measure_index == measure && n.string_index == string {
                        trace!("move started for {note}");
                        self.gesture = NoteGesture::Moving {
                            measure,
                            string,
                            note,
                            fret: n.fret,
                        };
                    }
                }
                Vec::new()
            }
            InputEvent::PointerMoved { x } => match self.gesture {
                NoteGesture::Moving {
                    measure,
                    string,
                    note,
                    fret,
                } => {
                    self.readout = Some(MoveReadout {
                        position_percent: round_half_up(x / self.editor_width * 100.0),
                        fret,
                        string_number: string + 1,
                    });
                    vec![Command::MoveNote {
                        measure,
                        string,
                        note,
                        x,
                    }]
                }
                NoteGesture::Idle => Vec::new(),
            },
            InputEvent::PointerReleased => {
                self.end_gesture();
                Vec::new()
            }
        }
    }

    fn end_gesture(&mut self) {
        if let NoteGesture::Moving { note, .. } = self.gesture {
            trace!("move ended for {note}");
        }
        self.gesture = NoteGesture::Idle;
        self.readout = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TabOptions;

    #[test]
    fn palette_click_toggles_and_switches() {
        let state = TabState::new(TabOptions::default());
        let mut input = Interaction::new(800.0);
        input.handle(&state, InputEvent::FretClicked { fret: 5 });
        assert_eq!(input.selected_fret(), Some(5));
        input.handle(&state, InputEvent::FretClicked { fret: 7 });
        assert_eq!(input.selected_fret(), Some(7));
        input.handle(&state, InputEvent::FretClicked { fret: 7 });
        assert_eq!(input.selected_fret(), None);
    }

    #[test]
    fn line_click_without_selection_does_nothing() {
        let state = TabState::new(TabOptions::default());
        let mut input = Interaction::new(800.0);
        let commands = input.handle(&state, InputEvent::LineClicked { x: 40.0, y: 10.0 });
        assert!(commands.is_empty());
    }

    #[test]
    fn drag_over_tracks_slot_validity() {
        let state = TabState::new(TabOptions::default());
        let mut input = Interaction::new(800.0);
        input.handle(&state, InputEvent::DragStarted { fret: 2 });
        input.handle(&state, InputEvent::DragOver { x: 30.0, y: 60.0 });
        assert!(input.is_over_slot());
        // measure 4 does not exist
        input.handle(&state, InputEvent::DragOver { x: 30.0, y: 900.0 });
        assert!(!input.is_over_slot());
        input.handle(&state, InputEvent::DragEnded);
        assert_eq!(input.dragging_fret(), None);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let state = TabState::new(TabOptions::default());
        let mut input = Interaction::new(800.0);
        assert!(input.handle(&state, InputEvent::PointerMoved { x: 10.0 }).is_empty());
        assert!(input.readout().is_none());
    }
}
