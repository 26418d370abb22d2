//! tablib — guitar tablature editing model and SVG rendering library.
//!
//! A tab is a grid of strings × measures, each slot holding the fret
//! numbers placed on that string in that measure. Front ends turn pointer
//! input into [`Command`]s, [`dispatch`] applies them to a [`TabState`],
//! and a [`TabRenderer`] mirrors the resulting changes onto a drawing
//! surface.
//!
//! # Example
//! ```
//! use tablib::{dispatch, render_tab_to_svg, Command, TabOptions, TabState};
//!
//! let mut tab = TabState::new(TabOptions::default());
//! dispatch(&mut tab, Command::PlaceNote { mouse_x: 47.0, mouse_y: 15.0, fret: 3 });
//! assert_eq!(tab.note_count(0, 0), 1);
//!
//! let svg = render_tab_to_svg(&tab, None);
//! assert!(svg.contains(">3</text>"));
//! ```

pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod renderer;
pub mod state;

#[cfg(target_os = "android")]
pub mod android;

pub use command::{commands_from_json, dispatch, dispatch_all, Command, TabChange};
pub use config::TabOptions;
pub use editor::TabEditor;
pub use error::{Result, TabError};
pub use geometry::{calculate_note_position, NotePosition};
pub use interaction::{InputEvent, Interaction, PointerButton};
pub use model::*;
pub use renderer::{render_tab_to_svg, RenderSurface, SvgSurface, TabRenderer};
pub use state::TabState;

/// Create an empty tab from JSON options and return its snapshot.
pub fn new_tab_json(options_json: &str) -> Result<String> {
    TabState::new(TabOptions::from_json(options_json)?).to_json()
}

/// Apply a JSON array of commands to a tab snapshot and return the
/// updated snapshot. Commands that do not apply are skipped.
pub fn apply_commands_json(tab_json: &str, commands_json: &str) -> Result<String> {
    let mut tab = TabState::from_json(tab_json)?;
    let commands = commands_from_json(commands_json)?;
    dispatch_all(&mut tab, commands);
    tab.to_json()
}

/// Render a tab snapshot to SVG.
///
/// `width` sets the SVG width in user units. Pass `None` to use the
/// default (820).
pub fn render_json_to_svg(tab_json: &str, width: Option<f64>) -> Result<String> {
    let tab = TabState::from_json(tab_json)?;
    Ok(render_tab_to_svg(&tab, width))
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// # Safety
/// `ptr` must be null or a valid null-terminated C string.
unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn into_c_string(result: Result<String>) -> *mut c_char {
    match result {
        Ok(s) => CString::new(s).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Create an empty tab and return its JSON snapshot.
/// The caller must free the returned string with `tablib_free_string`.
///
/// # Safety
/// `options_json` must be a valid null-terminated UTF-8 C string, or null
/// for default options.
#[no_mangle]
pub unsafe extern "C" fn tablib_new_tab(options_json: *const c_char) -> *mut c_char {
    let options = unsafe { str_arg(options_json) }.unwrap_or("{}");
    into_c_string(new_tab_json(options))
}

/// Apply commands to a tab snapshot and return the new snapshot.
/// The caller must free the returned string with `tablib_free_string`.
///
/// # Safety
/// Both arguments must be valid null-terminated UTF-8 C strings.
#[no_mangle]
pub unsafe extern "C" fn tablib_apply_commands(
    tab_json: *const c_char,
    commands_json: *const c_char,
) -> *mut c_char {
    let Some(tab) = (unsafe { str_arg(tab_json) }) else {
        return std::ptr::null_mut();
    };
    let Some(commands) = (unsafe { str_arg(commands_json) }) else {
        return std::ptr::null_mut();
    };
    into_c_string(apply_commands_json(tab, commands))
}

/// Render a tab snapshot and return SVG as a C string.
/// The caller must free the returned string with `tablib_free_string`.
///
/// `width` sets the SVG width in user units. Pass 0.0 to use the default.
///
/// # Safety
/// `tab_json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn tablib_render_json(tab_json: *const c_char, width: f64) -> *mut c_char {
    let Some(tab) = (unsafe { str_arg(tab_json) }) else {
        return std::ptr::null_mut();
    };
    let w = if width > 0.0 { Some(width) } else { None };
    into_c_string(render_json_to_svg(tab, w))
}

/// Free a string previously returned by tablib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a tablib function, or null.
#[no_mangle]
pub unsafe extern "C" fn tablib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
