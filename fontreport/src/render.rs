//! Serializing an assembled report

use std::path::Path;

pub mod html;
pub mod sample;
pub mod tex;
pub mod text;

/// `U+0041` style notation for a code point
pub(crate) fn codepoint(cp: u32) -> String {
    format!("U+{cp:04X}")
}

/// The directory (for fontspec's `Path` option) and file name of a font
pub(crate) fn font_location(font_path: &Path) -> (String, String) {
    let dir = font_path
        .parent()
        .map(|dir| dir.to_string_lossy().replace('\\', "/"))
        .filter(|dir| !dir.is_empty())
        .unwrap_or_else(|| ".".to_string());
    let file = font_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    (dir, file)
}
