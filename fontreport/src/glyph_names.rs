//! Human readable names for glyphs

use std::fmt::{Debug, Display};

use smol_str::SmolStr;
use write_fonts::types::GlyphId16;

use crate::agl::agl_name_for_char;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphName(SmolStr);

impl GlyphName {
    /// The name of the undefined glyph
    pub const NOTDEF: GlyphName = GlyphName(SmolStr::new_inline(".notdef"));

    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// A name for a glyph that has none in the font.
    ///
    /// Glyph 0 is `.notdef`; otherwise the name is derived from the lowest
    /// codepoint mapped to the glyph (its AGL name if it has one), or failing
    /// that from its glyph id.
    pub fn fallback(gid: GlyphId16, codepoint: Option<u32>) -> GlyphName {
        if gid == GlyphId16::NOTDEF {
            return GlyphName::NOTDEF;
        }
        if let Some(name) = codepoint.and_then(agl_name_for_char) {
            return name.into();
        }
        match codepoint {
            Some(raw) if raw <= 0xFFFF => smol_str::format_smolstr!("uni{raw:04X}").into(),
            Some(raw) => smol_str::format_smolstr!("u{raw:X}").into(),
            None => smol_str::format_smolstr!("glyph.{:05}", gid.to_u16()).into(),
        }
    }
}

impl From<&str> for GlyphName {
    fn from(value: &str) -> Self {
        GlyphName(value.into())
    }
}

impl From<SmolStr> for GlyphName {
    fn from(value: SmolStr) -> Self {
        GlyphName(value)
    }
}

impl Debug for GlyphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for GlyphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for GlyphName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for GlyphName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_names() {
        assert_eq!(GlyphName::fallback(GlyphId16::new(0), Some(0x41)), ".notdef");
        assert_eq!(GlyphName::fallback(GlyphId16::new(3), Some(0x41)), "A");
        assert_eq!(GlyphName::fallback(GlyphId16::new(3), Some(0x20)), "space");
        assert_eq!(GlyphName::fallback(GlyphId16::new(3), Some(0x06F7)), "uni06F7");
        assert_eq!(GlyphName::fallback(GlyphId16::new(3), Some(0x1F600)), "u1F600");
        assert_eq!(GlyphName::fallback(GlyphId16::new(42), None), "glyph.00042");
    }
}
