//! Tab renderer — keeps a drawing surface in step with a [`TabState`].
//!
//! The state never holds view handles. Instead [`TabRenderer`] keeps its
//! own `NoteId → Marker` lookup and forwards state changes to any
//! [`RenderSurface`]: the bundled [`SvgSurface`], or a front end's own
//! DOM/canvas surface.

mod constants;
mod svg_builder;
mod svg_surface;

use std::collections::HashMap;

use serde::Serialize;

use crate::command::TabChange;
use crate::config::TabOptions;
use crate::model::{Note, NoteId};
use crate::state::TabState;
use constants::*;
use svg_builder::empty_svg;

pub use svg_surface::SvgSurface;

// ═══════════════════════════════════════════════════════════════════════
// Surface interface
// ═══════════════════════════════════════════════════════════════════════

/// Geometry of one rendered measure, in editor coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureLayout {
    pub index: usize,
    /// Top of the measure band
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// y of each string line, relative to the measure top
    pub string_ys: Vec<f64>,
    /// e.g. `"guitar-tab measure-2"`
    pub class: String,
}

/// Visual marker for one note, relative to its measure's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub measure_index: usize,
    pub string_index: usize,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub label_x: f64,
    pub label_y: f64,
    /// Fret number as displayed
    pub label: String,
}

impl Marker {
    /// Whether a measure-local point falls on the marker's circle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.cx, y - self.cy);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Something that can show measures and note markers.
pub trait RenderSurface {
    /// Number of measures currently shown.
    fn measure_count(&self) -> usize;
    /// Show a new measure; measures are always appended in index order.
    fn insert_measure(&mut self, layout: &MeasureLayout);
    /// Hide the measure at `measure_index` (always the last one).
    fn remove_measure(&mut self, measure_index: usize);
    fn place_marker(&mut self, id: NoteId, marker: &Marker);
    fn move_marker(&mut self, id: NoteId, marker: &Marker);
    fn remove_marker(&mut self, id: NoteId);
}

// ═══════════════════════════════════════════════════════════════════════
// Layout
// ═══════════════════════════════════════════════════════════════════════

/// Layout of measure `index` for a tab `width` units wide.
pub fn measure_layout(options: &TabOptions, index: usize, width: f64) -> MeasureLayout {
    let string_ys = (0..options.lines)
        .map(|s| string_y(options, s))
        .collect();
    MeasureLayout {
        index,
        y: index as f64 * options.measure_height(),
        width,
        height: options.fret_height,
        string_ys,
        class: format!("{} measure-{}", options.svg_class, index),
    }
}

fn string_y(options: &TabOptions, string_index: usize) -> f64 {
    string_index as f64 * options.space_between_strings + STRING_TOP_OFFSET
}

/// Marker geometry for a note.
pub fn marker_for_note(options: &TabOptions, note: &Note) -> Marker {
    let cy = string_y(options, note.string_index);
    Marker {
        measure_index: note.measure_index,
        string_index: note.string_index,
        cx: note.x,
        cy,
        radius: MARKER_RADIUS,
        label_x: note.x,
        label_y: note.string_index as f64 * options.space_between_strings + LABEL_BASELINE_OFFSET,
        label: note.fret.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Renderer
// ═══════════════════════════════════════════════════════════════════════

/// Render-state for one editor: which marker stands for which note.
#[derive(Debug, Clone)]
pub struct TabRenderer {
    width: f64,
    markers: HashMap<NoteId, Marker>,
}

impl TabRenderer {
    /// `width` is the editor width; `None` or a non-positive value uses
    /// the default (820).
    pub fn new(width: Option<f64>) -> Self {
        let width = match width {
            Some(w) if w > 0.0 => w,
            _ => DEFAULT_PAGE_WIDTH,
        };
        Self {
            width,
            markers: HashMap::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn marker(&self, id: NoteId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// The note whose marker covers a measure-local point, if any.
    pub fn hit_test(&self, measure_index: usize, x: f64, y: f64) -> Option<NoteId> {
        self.markers
            .iter()
            .filter(|(_, m)| m.measure_index == measure_index && m.contains(x, y))
            .map(|(id, _)| *id)
            .max()
    }

    /// Clear `surface` and redraw everything in `state`.
    pub fn rebuild<S: RenderSurface>(&mut self, state: &TabState, surface: &mut S) {
        for id in self.markers.keys() {
            surface.remove_marker(*id);
        }
        self.markers.clear();
        while let Some(last) = surface.measure_count().checked_sub(1) {
            surface.remove_measure(last);
        }

        let options = state.options();
        for index in 0..state.measures() {
            surface.insert_measure(&measure_layout(options, index, self.width));
        }
        for note in state.iter_notes() {
            self.place(options, note, surface);
        }
    }

    /// Forward `changes` (as returned by `dispatch`) to `surface`.
    pub fn sync<S: RenderSurface>(&mut self, state: &TabState, changes: &[TabChange], surface: &mut S) {
        let options = state.options();
        for change in changes {
            match change {
                TabChange::MeasureAdded { measure } => {
                    surface.insert_measure(&measure_layout(options, *measure, self.width));
                }
                TabChange::MeasureRemoved { measure, notes } => {
                    for id in notes {
                        if self.markers.remove(id).is_some() {
                            surface.remove_marker(*id);
                        }
                    }
                    surface.remove_measure(*measure);
                }
                TabChange::NoteAdded { note } => self.place(options, note, surface),
                TabChange::NoteRemoved { note } => {
                    if self.markers.remove(&note.id).is_some() {
                        surface.remove_marker(note.id);
                    }
                }
                TabChange::NoteMoved { note, x } => {
                    if let Some(marker) = self.markers.get_mut(note) {
                        marker.cx = *x;
                        marker.label_x = *x;
                        surface.move_marker(*note, marker);
                    }
                }
            }
        }
    }

    fn place<S: RenderSurface>(&mut self, options: &TabOptions, note: &Note, surface: &mut S) {
        let marker = marker_for_note(options, note);
        surface.place_marker(note.id, &marker);
        self.markers.insert(note.id, marker);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render a tab into a complete SVG string.
///
/// `width` sets the SVG width in user units. Pass `None` to use the
/// default (820).
pub fn render_tab_to_svg(state: &TabState, width: Option<f64>) -> String {
    if state.measures() == 0 {
        return empty_svg("No measures in tab");
    }
    let mut renderer = TabRenderer::new(width);
    let mut surface = SvgSurface::new(state.options().clone(), renderer.width());
    renderer.rebuild(state, &mut surface);
    surface.to_svg()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_sits_on_its_string() {
        let options = TabOptions::default();
        let note = Note {
            id: NoteId(0),
            string_index: 2,
            measure_index: 1,
            fret: 12,
            x: 40.0,
        };
        let marker = marker_for_note(&options, &note);
        assert_eq!((marker.cx, marker.cy), (40.0, 110.0));
        assert_eq!(marker.label_y, 115.0);
        assert_eq!(marker.label, "12");
        assert!(marker.contains(45.0, 105.0));
        assert!(!marker.contains(55.0, 110.0));
    }

    #[test]
    fn measure_layout_stacks_bands() {
        let options = TabOptions::default();
        let layout = measure_layout(&options, 2, 600.0);
        assert_eq!(layout.y, 420.0);
        assert_eq!(layout.string_ys, vec![10.0, 60.0, 110.0, 160.0, 210.0, 260.0]);
        assert_eq!(layout.class, "guitar-tab measure-2");
    }

    #[test]
    fn empty_tab_renders_placeholder() {
        let state = TabState::new(TabOptions {
            measures: 0,
            ..TabOptions::default()
        });
        let svg = render_tab_to_svg(&state, None);
        assert!(svg.contains("No measures in tab"));
    }
}
