//! The normalized entities a report is built from

use std::{cmp::Ordering, collections::BTreeMap, fmt::Display};

use write_fonts::types::{GlyphId16, Tag};

use crate::glyph_names::GlyphName;

pub(crate) const DFLT_SCRIPT: Tag = Tag::new(b"DFLT");
pub(crate) const DFLT_LANG: Tag = Tag::new(b"dflt");

/// The layout tables we report on
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayoutTable {
    Gsub,
    Gpos,
}

impl LayoutTable {
    pub fn tag(self) -> Tag {
        match self {
            LayoutTable::Gsub => Tag::new(b"GSUB"),
            LayoutTable::Gpos => Tag::new(b"GPOS"),
        }
    }
}

impl Display for LayoutTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutTable::Gsub => f.write_str("GSUB"),
            LayoutTable::Gpos => f.write_str("GPOS"),
        }
    }
}

/// A glyph's class in the GDEF glyph class definition table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlyphClass {
    #[default]
    Unclassified,
    Base,
    Ligature,
    Mark,
    Component,
}

impl GlyphClass {
    pub(crate) fn from_raw(class: u16) -> GlyphClass {
        match class {
            1 => GlyphClass::Base,
            2 => GlyphClass::Ligature,
            3 => GlyphClass::Mark,
            4 => GlyphClass::Component,
            _ => GlyphClass::Unclassified,
        }
    }

    pub fn name(self) -> Option<&'static str> {
        match self {
            GlyphClass::Unclassified => None,
            GlyphClass::Base => Some("base"),
            GlyphClass::Ligature => Some("ligature"),
            GlyphClass::Mark => Some("mark"),
            GlyphClass::Component => Some("component"),
        }
    }
}

/// The shape of a substitution rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubstitutionKind {
    Single,
    Multiple,
    Alternate,
    Ligature,
    ReverseChain,
}

impl SubstitutionKind {
    pub fn name(self) -> &'static str {
        match self {
            SubstitutionKind::Single => "single",
            SubstitutionKind::Multiple => "multiple",
            SubstitutionKind::Alternate => "alternate",
            SubstitutionKind::Ligature => "ligature",
            SubstitutionKind::ReverseChain => "reverse",
        }
    }
}

/// A (script, language) pair.
///
/// Ordered with `DFLT` before other scripts and `dflt` before other
/// languages, then by tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LanguageSystem {
    pub script: Tag,
    pub language: Tag,
}

impl LanguageSystem {
    pub fn new(script: Tag, language: Tag) -> Self {
        Self { script, language }
    }
}

impl Ord for LanguageSystem {
    fn cmp(&self, other: &Self) -> Ordering {
        (tag_to_int(self.script), tag_to_int(self.language))
            .cmp(&(tag_to_int(other.script), tag_to_int(other.language)))
    }
}

impl PartialOrd for LanguageSystem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for LanguageSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", tag_str(self.script), tag_str(self.language))
    }
}

/// A run of contiguous code points within a single Unicode block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageRange {
    pub start: u32,
    /// inclusive
    pub end: u32,
    pub block: &'static str,
}

impl CoverageRange {
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRecord {
    pub id: GlyphId16,
    pub name: GlyphName,
    /// ascending
    pub codepoints: Vec<u32>,
    pub advance: Option<u16>,
    pub lsb: Option<i16>,
    pub class: GlyphClass,
    pub carets: Vec<i16>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureRecord {
    pub table: LayoutTable,
    pub tag: Tag,
    pub lang_system: LanguageSystem,
    /// The lookups the feature references directly, ascending
    pub lookups: Vec<u16>,
    pub rule_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubstitutionRule {
    /// `None` when no feature reaches the lookups this rule came from
    pub feature: Option<Tag>,
    pub kind: SubstitutionKind,
    pub input: Vec<GlyphId16>,
    /// For alternate substitutions, the alternatives
    pub output: Vec<GlyphId16>,
    pub lookups: Vec<u16>,
    pub lang_systems: Vec<LanguageSystem>,
}

impl SubstitutionRule {
    pub fn is_ligature(&self) -> bool {
        self.input.len() > 1
    }
}

/// Name table entries we know how to label, in report order
pub const KNOWN_NAMES: &[(u16, &str)] = &[
    (0, "Copyright"),
    (1, "Family"),
    (2, "Subfamily"),
    (4, "Full name"),
    (5, "Version"),
    (6, "PostScript name"),
    (7, "Trademark"),
    (8, "Manufacturer"),
    (9, "Designer"),
    (10, "Description"),
    (11, "Vendor URL"),
    (12, "Designer URL"),
    (13, "License"),
    (14, "License URL"),
    (19, "Sample text"),
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontMetadata {
    /// name id -> decoded string
    pub names: BTreeMap<u16, String>,
    /// sorted
    pub tables: Vec<Tag>,
}

impl FontMetadata {
    pub fn name(&self, name_id: u16) -> Option<&str> {
        self.names
            .get(&name_id)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// A sort key that puts `DFLT` and `dflt` ahead of everything else.
pub(crate) fn tag_to_int(tag: Tag) -> u32 {
    match tag {
        DFLT_SCRIPT => 0,
        DFLT_LANG => 1,
        _ => u32::from_be_bytes(tag.to_be_bytes()),
    }
}

/// A tag as text, without trailing padding.
pub fn tag_str(tag: Tag) -> String {
    tag.to_string().trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_system_order() {
        let mut systems = vec![
            LanguageSystem::new(Tag::new(b"latn"), Tag::new(b"TRK ")),
            LanguageSystem::new(Tag::new(b"arab"), Tag::new(b"URD ")),
            LanguageSystem::new(Tag::new(b"latn"), DFLT_LANG),
            LanguageSystem::new(DFLT_SCRIPT, DFLT_LANG),
        ];
        systems.sort();
        let rendered = systems.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(rendered, ["DFLT/dflt", "arab/URD", "latn/dflt", "latn/TRK"]);
    }

    #[test]
    fn blank_names_are_missing() {
        let mut meta = FontMetadata::default();
        meta.names.insert(1, "  ".into());
        meta.names.insert(4, "Test Sans".into());
        assert_eq!(meta.name(1), None);
        assert_eq!(meta.name(4), Some("Test Sans"));
    }
}
