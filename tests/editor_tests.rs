//! End-to-end editor tests — input events in, tab state and SVG out.

use pretty_assertions::assert_eq;
use tablib::interaction::{NoteGesture, NotePhase};
use tablib::{
    apply_commands_json, new_tab_json, render_json_to_svg, InputEvent, PointerButton, SvgSurface,
    TabChange, TabEditor, TabError, TabOptions, TabState,
};

fn editor() -> TabEditor<SvgSurface> {
    let options = TabOptions::default();
    let surface = SvgSurface::new(options.clone(), 800.0);
    TabEditor::new(options, Some(800.0), surface)
}

#[test]
fn click_fret_then_line_places_note_and_clears_selection() {
    let mut editor = editor();
    editor.handle(InputEvent::FretClicked { fret: 7 });
    let changes = editor.handle(InputEvent::LineClicked { x: 95.0, y: 112.0 });

    assert_eq!(changes.len(), 1);
    let notes = editor.state().notes(0, 2);
    assert_eq!(notes.len(), 1);
    assert_eq!((notes[0].fret, notes[0].x), (7, 100.0));
    assert_eq!(editor.interaction().selected_fret(), None);

    // a second click without a selection adds nothing
    assert!(editor.handle(InputEvent::LineClicked { x: 95.0, y: 112.0 }).is_empty());
}

#[test]
fn drag_from_palette_and_drop() {
    let mut editor = editor();
    editor.handle(InputEvent::DragStarted { fret: 12 });
    editor.handle(InputEvent::DragOver { x: 200.0, y: 470.0 });
    assert!(editor.interaction().is_over_slot());

    let changes = editor.handle(InputEvent::Dropped { x: 200.0, y: 470.0, fret: None });
    editor.handle(InputEvent::DragEnded);

    // 470 → measure 2, 50 into the band → string 1
    assert!(matches!(&changes[..], [TabChange::NoteAdded { note }]
        if note.measure_index == 2 && note.string_index == 1 && note.fret == 12));
    assert_eq!(editor.interaction().dragging_fret(), None);
}

#[test]
fn drop_outside_the_measures_is_ignored() {
    let mut editor = editor();
    editor.handle(InputEvent::DragStarted { fret: 1 });
    let changes = editor.handle(InputEvent::Dropped { x: 10.0, y: 5000.0, fret: Some(1) });
    assert!(changes.is_empty());
    assert_eq!(editor.state().total_notes(), 0);
}

#[test]
fn press_move_release_repositions_note() {
    let mut editor = editor();
    editor.handle(InputEvent::Dropped { x: 40.0, y: 10.0, fret: Some(5) });
    let id = editor.state().notes(0, 0)[0].id;

    editor.handle(InputEvent::NotePressed {
        measure: 0,
        string: 0,
        note: id,
        button: PointerButton::Primary,
    });
    assert_eq!(editor.interaction().note_phase(editor.state(), id), NotePhase::Dragged);

    editor.handle(InputEvent::PointerMoved { x: 123.0 });
    let readout = editor.interaction().readout().unwrap();
    assert_eq!(readout.position_percent, 15.0);
    assert_eq!((readout.fret, readout.string_number), (5, 1));
    assert_eq!(editor.state().note(id).unwrap().x, 125.0);
    assert_eq!(editor.renderer().marker(id).unwrap().cx, 125.0);

    editor.handle(InputEvent::PointerReleased);
    assert_eq!(editor.interaction().gesture(), NoteGesture::Idle);
    assert!(editor.interaction().readout().is_none());

    // moves after release no longer reach the note
    editor.handle(InputEvent::PointerMoved { x: 300.0 });
    assert_eq!(editor.state().note(id).unwrap().x, 125.0);
    assert_eq!(editor.interaction().note_phase(editor.state(), id), NotePhase::Idle);
}

#[test]
fn secondary_press_deletes_note() {
    let mut editor = editor();
    editor.handle(InputEvent::Dropped { x: 40.0, y: 60.0, fret: Some(9) });
    let id = editor.state().notes(0, 1)[0].id;

    editor.handle(InputEvent::NotePressed {
        measure: 0,
        string: 1,
        note: id,
        button: PointerButton::Secondary,
    });
    assert_eq!(editor.state().total_notes(), 0);
    assert!(editor.renderer().marker(id).is_none());
    assert_eq!(editor.interaction().note_phase(editor.state(), id), NotePhase::Absent);
    assert!(!editor.surface().to_svg().contains("<circle"));
}

#[test]
fn json_pipeline_round_trip() {
    let tab = new_tab_json(r#"{"lines": 4, "measures": 1}"#).unwrap();
    let tab = apply_commands_json(
        &tab,
        r#"[{"type": "add_measure"},
            {"type": "place_note", "mouse_x": 61, "mouse_y": 220, "fret": 24},
            {"type": "place_note", "mouse_x": 61, "mouse_y": 220, "fret": 25}]"#,
    )
    .unwrap();

    let state = TabState::from_json(&tab).unwrap();
    assert_eq!((state.lines(), state.measures()), (4, 2));
    let notes = state.notes(1, 0);
    assert_eq!(notes.len(), 1);
    assert_eq!((notes[0].fret, notes[0].x), (24, 60.0));

    let svg = render_json_to_svg(&tab, None).unwrap();
    assert!(svg.contains("measure-1"));
    assert!(svg.contains(">24</text>"));
}

#[test]
fn broken_inputs_surface_as_errors() {
    assert!(matches!(new_tab_json("{"), Err(TabError::Json(_))));
    assert!(matches!(
        new_tab_json(r#"{"spaceBetweenStrings": -1}"#),
        Err(TabError::InvalidOptions(_))
    ));
    let tab = new_tab_json("{}").unwrap();
    assert!(apply_commands_json(&tab, r#"[{"type": "explode"}]"#).is_err());
}

#[test]
fn out_of_range_json_commands_do_not_sink_the_batch() {
    let tab = new_tab_json(r#"{"lines": 4, "measures": 2}"#).unwrap();
    let tab = apply_commands_json(
        &tab,
        r#"[{"type": "add_note", "measure": -1, "string": 0, "fret": 3, "x": 20},
            {"type": "add_note", "measure": 1, "string": 2, "fret": 7, "x": 40},
            {"type": "add_note", "measure": 0, "string": 0, "fret": 300, "x": 20},
            {"type": "add_note", "measure": 0, "string": 0, "fret": -1, "x": 20},
            {"type": "remove_note", "measure": 1, "string": 2, "note": -1},
            {"type": "add_note", "measure": 0, "string": 9, "fret": 3, "x": 20}]"#,
    )
    .unwrap();

    let state = TabState::from_json(&tab).unwrap();
    assert_eq!(state.total_notes(), 1);
    let notes = state.notes(1, 2);
    assert_eq!((notes[0].fret, notes[0].x), (7, 40.0));
}
