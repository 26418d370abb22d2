//! Shared constants for the tab renderer (all in SVG user units).

// ── Page ────────────────────────────────────────────────────────────
pub(super) const DEFAULT_PAGE_WIDTH: f64 = 820.0;

// ── Strings ─────────────────────────────────────────────────────────
pub(super) const STRING_TOP_OFFSET: f64 = 10.0; // first string below the measure top
pub(super) const STRING_LINE_WIDTH: f64 = 2.0;

// ── Note markers ────────────────────────────────────────────────────
pub(super) const MARKER_RADIUS: f64 = 10.0;
pub(super) const LABEL_BASELINE_OFFSET: f64 = 15.0; // counted like STRING_TOP_OFFSET, lands 5 below the line
pub(super) const LABEL_FONT_SIZE: f64 = 12.0;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const BACKGROUND_COLOR: &str = "white";
pub(super) const STRING_COLOR: &str = "#000";
pub(super) const MARKER_COLOR: &str = "black";
pub(super) const LABEL_COLOR: &str = "white";
