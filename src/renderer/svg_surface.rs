//! In-memory SVG surface: remembers what is shown and serializes it on
//! demand. Each measure becomes a `<g>` translated to its band.

use std::collections::BTreeMap;

use super::constants::*;
use super::svg_builder::SvgBuilder;
use super::{MeasureLayout, Marker, RenderSurface};
use crate::config::TabOptions;
use crate::model::NoteId;

#[derive(Debug, Clone)]
pub struct SvgSurface {
    options: TabOptions,
    width: f64,
    measures: Vec<MeasureLayout>,
    markers: BTreeMap<NoteId, Marker>,
}

impl SvgSurface {
    pub fn new(options: TabOptions, width: f64) -> Self {
        Self {
            options,
            width,
            measures: Vec::new(),
            markers: BTreeMap::new(),
        }
    }

    pub fn marker(&self, id: NoteId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn to_svg(&self) -> String {
        let height = self.measures.len() as f64 * self.options.measure_height();
        let mut svg = SvgBuilder::new(self.width, height);

        svg.rect(0.0, 0.0, self.width, height, BACKGROUND_COLOR);

        for layout in &self.measures {
            svg.open_group(&layout.class, 0.0, layout.y);
            for (i, y) in layout.string_ys.iter().enumerate() {
                svg.line(
                    0.0,
                    *y,
                    layout.width,
                    *y,
                    STRING_COLOR,
                    STRING_LINE_WIDTH,
                    &format!("guitar-line string-{i}"),
                );
            }
            // Markers draw in id order so later notes sit on top.
            for marker in self.markers.values().filter(|m| m.measure_index == layout.index) {
                svg.circle(marker.cx, marker.cy, marker.radius, MARKER_COLOR, &marker.label);
                svg.text(
                    marker.label_x,
                    marker.label_y,
                    &marker.label,
                    LABEL_FONT_SIZE,
                    LABEL_COLOR,
                    "middle",
                );
            }
            svg.close_group();
        }

        svg.build()
    }
}

impl RenderSurface for SvgSurface {
    fn measure_count(&self) -> usize {
        self.measures.len()
    }

    fn insert_measure(&mut self, layout: &MeasureLayout) {
        self.measures.push(layout.clone());
    }

    fn remove_measure(&mut self, measure_index: usize) {
        if measure_index < self.measures.len() {
            self.measures.remove(measure_index);
        }
        self.markers.retain(|_, m| m.measure_index != measure_index);
    }

    fn place_marker(&mut self, id: NoteId, marker: &Marker) {
        self.markers.insert(id, marker.clone());
    }

    fn move_marker(&mut self, id: NoteId, marker: &Marker) {
        if let Some(existing) = self.markers.get_mut(&id) {
            *existing = marker.clone();
        }
    }

    fn remove_marker(&mut self, id: NoteId) {
        self.markers.remove(&id);
    }
}
