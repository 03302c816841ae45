//! Reporting on the contents of a TrueType or OpenType font
//!
//! A font is read through a [`FontSource`], [`extract`]ed into plain data,
//! assembled into a sorted [`Report`] and rendered as plain text, TeX or HTML.

mod agl;
pub mod args;
mod blocks;
mod error;
pub mod extract;
mod feature_names;
mod glyph_names;
pub mod model;
pub mod render;
pub mod report;
pub mod source;
pub mod typeset;

#[cfg(test)]
mod test_helpers;

pub use error::Error;
pub use extract::{extract, ExtractedFont};
pub use glyph_names::GlyphName;
pub use report::Report;
pub use source::{load_font, FontFile, FontSource};
