//! Turning raw font data into the entities a report lists

use std::collections::BTreeMap;

use write_fonts::types::GlyphId16;

use crate::{
    blocks,
    error::Error,
    glyph_names::GlyphName,
    model::{
        CoverageRange, FeatureRecord, FontMetadata, GlyphRecord, LayoutTable, SubstitutionRule,
    },
    source::FontSource,
};

mod layout;

/// Everything we know about a font, in extraction order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedFont {
    pub metadata: FontMetadata,
    pub coverage: Vec<CoverageRange>,
    /// indexed by glyph id
    pub glyphs: Vec<GlyphRecord>,
    pub features: Vec<FeatureRecord>,
    pub substitutions: Vec<SubstitutionRule>,
}

impl ExtractedFont {
    pub fn glyph(&self, gid: GlyphId16) -> Option<&GlyphRecord> {
        self.glyphs.get(gid.to_u16() as usize)
    }

    /// The number of code points the font maps
    pub fn mapped_codepoints(&self) -> usize {
        self.coverage.iter().map(CoverageRange::len).sum()
    }
}

pub fn extract<S: FontSource + ?Sized>(source: &S) -> Result<ExtractedFont, Error> {
    let raw_glyphs = source.glyphs()?;
    let mut char_map = source.char_map()?;
    char_map.retain(|cp, gid| {
        let in_font = (gid.to_u16() as usize) < raw_glyphs.len();
        if !in_font {
            log::warn!(
                "U+{cp:04X} maps to glyph {} which is not in the font",
                gid.to_u16()
            );
        }
        in_font
    });

    let mut codepoints = vec![Vec::new(); raw_glyphs.len()];
    for (cp, gid) in &char_map {
        codepoints[gid.to_u16() as usize].push(*cp);
    }

    let glyphs = raw_glyphs
        .into_iter()
        .zip(codepoints)
        .enumerate()
        .map(|(gid, (raw, codepoints))| {
            let id = GlyphId16::new(gid as u16);
            let name = raw
                .name
                .unwrap_or_else(|| GlyphName::fallback(id, codepoints.first().copied()));
            GlyphRecord {
                id,
                name,
                codepoints,
                advance: raw.advance,
                lsb: raw.lsb,
                class: raw.class,
                carets: raw.carets,
            }
        })
        .collect::<Vec<_>>();

    let mut features = Vec::new();
    let mut substitutions = Vec::new();
    for table in [LayoutTable::Gsub, LayoutTable::Gpos] {
        let Some(raw) = source.layout(table)? else {
            continue;
        };
        log::debug!(
            "{table}: {} language systems, {} features, {} lookups",
            raw.lang_systems.len(),
            raw.features.len(),
            raw.lookups.len()
        );
        features.extend(layout::feature_records(&raw)?);
        if table == LayoutTable::Gsub {
            substitutions = layout::substitution_rules(&raw)?;
        }
    }

    Ok(ExtractedFont {
        metadata: source.metadata()?,
        coverage: coverage_ranges(&char_map),
        glyphs,
        features,
        substitutions,
    })
}

/// Merge contiguous code points into ranges that never cross a block boundary.
fn coverage_ranges(char_map: &BTreeMap<u32, GlyphId16>) -> Vec<CoverageRange> {
    let mut ranges: Vec<CoverageRange> = Vec::new();
    for &cp in char_map.keys() {
        match ranges.last_mut() {
            Some(range)
                if range.end + 1 == cp && blocks::block_of(range.end) == blocks::block_of(cp) =>
            {
                range.end = cp
            }
            _ => ranges.push(CoverageRange {
                start: cp,
                end: cp,
                block: blocks::block_name(cp),
            }),
        }
    }
    ranges
}
