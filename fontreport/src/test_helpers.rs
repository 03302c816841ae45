//! An in-memory font for exercising the extractor and assembler

use std::collections::BTreeMap;

use write_fonts::types::{GlyphId16, Tag};

use crate::{
    error::Error,
    glyph_names::GlyphName,
    model::{FontMetadata, LayoutTable, SubstitutionKind},
    source::{FontSource, RawFeature, RawGlyph, RawLangSys, RawLayout, RawLookup, RawRule},
};

pub(crate) fn gids(raw: &[u16]) -> Vec<GlyphId16> {
    raw.iter().copied().map(GlyphId16::new).collect()
}

#[derive(Clone, Debug, Default)]
pub(crate) struct FakeFont {
    pub glyphs: Vec<RawGlyph>,
    pub char_map: BTreeMap<u32, GlyphId16>,
    pub gsub: Option<RawLayout>,
    pub gpos: Option<RawLayout>,
    pub metadata: FontMetadata,
}

impl FakeFont {
    /// A font with one glyph per name; empty names are left unset.
    pub fn new(names: &[&str]) -> Self {
        let glyphs = names
            .iter()
            .map(|name| RawGlyph {
                name: (!name.is_empty()).then(|| GlyphName::new(name)),
                advance: Some(500),
                lsb: Some(50),
                ..Default::default()
            })
            .collect();
        FakeFont {
            glyphs,
            ..Default::default()
        }
    }

    pub fn map_chars(self, mappings: &[(char, u16)]) -> Self {
        let mappings = mappings
            .iter()
            .map(|(c, gid)| (*c as u32, *gid))
            .collect::<Vec<_>>();
        self.map_codepoints(&mappings)
    }

    pub fn map_codepoints(mut self, mappings: &[(u32, u16)]) -> Self {
        self.char_map.extend(
            mappings
                .iter()
                .map(|(cp, gid)| (*cp, GlyphId16::new(*gid))),
        );
        self
    }

    pub fn with_name(mut self, name_id: u16, value: &str) -> Self {
        self.metadata.names.insert(name_id, value.to_string());
        self
    }

    pub fn single_lookup(pairs: &[(u16, u16)]) -> RawLookup {
        RawLookup {
            subtables: 1,
            rules: pairs
                .iter()
                .map(|(from, to)| RawRule {
                    kind: SubstitutionKind::Single,
                    input: gids(&[*from]),
                    output: gids(&[*to]),
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn ligature_lookup(components: &[u16], ligature: u16) -> RawLookup {
        RawLookup {
            subtables: 1,
            rules: vec![RawRule {
                kind: SubstitutionKind::Ligature,
                input: gids(components),
                output: gids(&[ligature]),
            }],
            ..Default::default()
        }
    }

    pub fn alternate_lookup(glyph: u16, alternates: &[u16]) -> RawLookup {
        RawLookup {
            subtables: 1,
            rules: vec![RawRule {
                kind: SubstitutionKind::Alternate,
                input: gids(&[glyph]),
                output: gids(alternates),
            }],
            ..Default::default()
        }
    }

    pub fn contextual_lookup(nested: &[u16], rules: usize) -> RawLookup {
        RawLookup {
            subtables: 1,
            contextual_rules: rules,
            nested: nested.to_vec(),
            ..Default::default()
        }
    }

    /// A GPOS lookup with the given number of subtables
    pub fn positioning_lookup(subtables: usize) -> RawLookup {
        RawLookup {
            subtables,
            ..Default::default()
        }
    }

    fn layout_mut(&mut self, table: LayoutTable) -> &mut RawLayout {
        let layout = match table {
            LayoutTable::Gsub => &mut self.gsub,
            LayoutTable::Gpos => &mut self.gpos,
        };
        layout.get_or_insert_with(|| RawLayout {
            table,
            lang_systems: Vec::new(),
            features: Vec::new(),
            lookups: Vec::new(),
        })
    }

    /// Returns the new lookup's index
    pub fn add_lookup(&mut self, table: LayoutTable, lookup: RawLookup) -> u16 {
        let layout = self.layout_mut(table);
        layout.lookups.push(lookup);
        (layout.lookups.len() - 1) as u16
    }

    /// Add a feature and register it with each (script, language) pair.
    pub fn add_feature(
        &mut self,
        table: LayoutTable,
        tag: &[u8; 4],
        lookups: &[u16],
        lang_systems: &[(&[u8; 4], &[u8; 4])],
    ) -> u16 {
        let layout = self.layout_mut(table);
        layout.features.push(RawFeature {
            tag: Tag::new(tag),
            lookups: lookups.to_vec(),
        });
        let feature_idx = (layout.features.len() - 1) as u16;
        for (script, language) in lang_systems {
            let (script, language) = (Tag::new(script), Tag::new(language));
            match layout
                .lang_systems
                .iter_mut()
                .find(|sys| sys.script == script && sys.language == language)
            {
                Some(sys) => sys.feature_indices.push(feature_idx),
                None => layout.lang_systems.push(RawLangSys {
                    script,
                    language,
                    required_feature: None,
                    feature_indices: vec![feature_idx],
                }),
            }
        }
        feature_idx
    }
}

impl FontSource for FakeFont {
    fn char_map(&self) -> Result<BTreeMap<u32, GlyphId16>, Error> {
        Ok(self.char_map.clone())
    }

    fn glyphs(&self) -> Result<Vec<RawGlyph>, Error> {
        Ok(self.glyphs.clone())
    }

    fn layout(&self, table: LayoutTable) -> Result<Option<RawLayout>, Error> {
        Ok(match table {
            LayoutTable::Gsub => self.gsub.clone(),
            LayoutTable::Gpos => self.gpos.clone(),
        })
    }

    fn metadata(&self) -> Result<FontMetadata, Error> {
        Ok(self.metadata.clone())
    }
}
