//! One editor instance: state, input handling and rendering wired in a
//! single direction.
//!
//! ```text
//! InputEvent → Interaction → Command → dispatch → TabChange → TabRenderer → surface
//! ```

use crate::command::{dispatch, Command, TabChange};
use crate::config::TabOptions;
use crate::interaction::{InputEvent, Interaction};
use crate::renderer::{RenderSurface, TabRenderer};
use crate::state::TabState;

pub struct TabEditor<S: RenderSurface> {
    state: TabState,
    input: Interaction,
    renderer: TabRenderer,
    surface: S,
}

impl<S: RenderSurface> TabEditor<S> {
    /// Build an editor and draw its initial measures onto `surface`.
    pub fn new(options: TabOptions, width: Option<f64>, surface: S) -> Self {
        Self::from_state(TabState::new(options), width, surface)
    }

    /// Wrap an existing state, e.g. one restored from a snapshot.
    pub fn from_state(state: TabState, width: Option<f64>, mut surface: S) -> Self {
        let mut renderer = TabRenderer::new(width);
        renderer.rebuild(&state, &mut surface);
        let input = Interaction::new(renderer.width());
        Self {
            state,
            input,
            renderer,
            surface,
        }
    }

    pub fn state(&self) -> &TabState {
        &self.state
    }

    pub fn interaction(&self) -> &Interaction {
        &self.input
    }

    pub fn renderer(&self) -> &TabRenderer {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Feed one input event through to the surface.
    pub fn handle(&mut self, event: InputEvent) -> Vec<TabChange> {
        let commands = self.input.handle(&self.state, event);
        commands
            .into_iter()
            .flat_map(|c| self.apply(c))
            .collect()
    }

    /// Apply a command directly, bypassing input handling.
    pub fn apply(&mut self, command: Command) -> Vec<TabChange> {
        let changes = dispatch(&mut self.state, command);
        self.renderer.sync(&self.state, &changes, &mut self.surface);
        changes
    }

    pub fn into_parts(self) -> (TabState, S) {
        (self.state, self.surface)
    }
}
