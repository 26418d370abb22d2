//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge. Tabs cross
//! the boundary as JSON snapshots.

use jni::objects::{JClass, JString};
use jni::sys::{jfloat, jstring};
use jni::JNIEnv;

use crate::{apply_commands_json, new_tab_json, render_json_to_svg, Result};

fn to_jstring(env: &mut JNIEnv, result: Result<String>) -> jstring {
    match result {
        Ok(s) => match env.new_string(&s) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(_) => std::ptr::null_mut(),
    }
}

/// Create an empty tab.
///
/// Called from Kotlin as:
///   external fun newTab(optionsJson: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_tablib_app_TabLib_newTab(
    mut env: JNIEnv,
    _class: JClass,
    options_json: JString,
) -> jstring {
    let options: String = if options_json.is_null() {
        "{}".into()
    } else {
        match env.get_string(&options_json) {
            Ok(s) => s.into(),
            Err(_) => return std::ptr::null_mut(),
        }
    };
    let result = new_tab_json(&options);
    to_jstring(&mut env, result)
}

/// Apply a JSON array of commands to a tab snapshot.
///
/// Called from Kotlin as:
///   external fun applyCommands(tabJson: String, commandsJson: String): String?
#[no_mangle]
pub extern "system" fn Java_com_tablib_app_TabLib_applyCommands(
    mut env: JNIEnv,
    _class: JClass,
    tab_json: JString,
    commands_json: JString,
) -> jstring {
    let tab: String = match env.get_string(&tab_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let commands: String = match env.get_string(&commands_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let result = apply_commands_json(&tab, &commands);
    to_jstring(&mut env, result)
}

/// Render a tab snapshot to SVG.
///
/// Called from Kotlin as:
///   external fun renderTab(tabJson: String, width: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_tablib_app_TabLib_renderTab(
    mut env: JNIEnv,
    _class: JClass,
    tab_json: JString,
    width: jfloat,
) -> jstring {
    let tab: String = match env.get_string(&tab_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let w = if width > 0.0 { Some(width as f64) } else { None };

    let result = render_json_to_svg(&tab, w);
    to_jstring(&mut env, result)
}
