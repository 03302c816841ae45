//! Reading the parts of a font a report needs

use std::collections::BTreeMap;

use write_fonts::{
    read::{
        tables::{
            cmap::{CmapSubtable, EncodingRecord, PlatformId},
            gdef::{CaretValue, Gdef},
            hmtx::Hmtx,
        },
        FileRef, FontRef, ReadError, TableProvider,
    },
    types::{GlyphId, GlyphId16, Tag},
};

use crate::{
    error::Error,
    glyph_names::GlyphName,
    model::{FontMetadata, GlyphClass, LanguageSystem, LayoutTable, SubstitutionKind},
};

mod gsub;
mod layout;

const CMAP: Tag = Tag::new(b"cmap");
const GDEF: Tag = Tag::new(b"GDEF");
const HMTX: Tag = Tag::new(b"hmtx");
const MAXP: Tag = Tag::new(b"maxp");
const NAME: Tag = Tag::new(b"name");
const POST: Tag = Tag::new(b"post");

/// The font data the extractor needs, independent of the binary format
pub trait FontSource {
    /// Unicode code point -> glyph
    fn char_map(&self) -> Result<BTreeMap<u32, GlyphId16>, Error>;

    /// One entry per glyph id, in glyph id order
    fn glyphs(&self) -> Result<Vec<RawGlyph>, Error>;

    /// `None` if the font has no such table
    fn layout(&self, table: LayoutTable) -> Result<Option<RawLayout>, Error>;

    fn metadata(&self) -> Result<FontMetadata, Error>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawGlyph {
    pub name: Option<GlyphName>,
    pub advance: Option<u16>,
    pub lsb: Option<i16>,
    pub class: GlyphClass,
    pub carets: Vec<i16>,
}

/// A GSUB or GPOS table, reduced to what we report
#[derive(Clone, Debug, PartialEq)]
pub struct RawLayout {
    pub table: LayoutTable,
    pub lang_systems: Vec<RawLangSys>,
    pub features: Vec<RawFeature>,
    pub lookups: Vec<RawLookup>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawLangSys {
    pub script: Tag,
    pub language: Tag,
    pub required_feature: Option<u16>,
    pub feature_indices: Vec<u16>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawFeature {
    pub tag: Tag,
    pub lookups: Vec<u16>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawLookup {
    pub subtables: usize,
    /// Substitutions, one per input sequence
    pub rules: Vec<RawRule>,
    /// Number of contextual or chained contextual rules
    pub contextual_rules: usize,
    /// Lookups invoked by contextual rules, ascending
    pub nested: Vec<u16>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRule {
    pub kind: SubstitutionKind,
    pub input: Vec<GlyphId16>,
    pub output: Vec<GlyphId16>,
}

impl RawLangSys {
    pub fn lang_system(&self) -> LanguageSystem {
        LanguageSystem::new(self.script, self.language)
    }

    /// The required feature, if any, followed by the others
    pub fn all_feature_indices(&self) -> impl Iterator<Item = u16> + '_ {
        self.required_feature
            .into_iter()
            .chain(self.feature_indices.iter().copied())
    }
}

impl RawLayout {
    pub fn feature(&self, idx: u16) -> Result<&RawFeature, Error> {
        self.features
            .get(idx as usize)
            .ok_or_else(|| self.out_of_bounds())
    }

    pub fn lookup(&self, idx: u16) -> Result<&RawLookup, Error> {
        self.lookups
            .get(idx as usize)
            .ok_or_else(|| self.out_of_bounds())
    }

    fn out_of_bounds(&self) -> Error {
        Error::CorruptTable {
            table: self.table.tag(),
            inner: ReadError::OutOfBounds,
        }
    }
}

impl RawLookup {
    /// The number of rules this lookup contributes to a feature's count.
    pub fn rule_count(&self, table: LayoutTable) -> usize {
        match table {
            LayoutTable::Gsub => self.rules.len() + self.contextual_rules,
            LayoutTable::Gpos => self.subtables,
        }
    }
}

/// Open a font, or one member of a font collection.
pub fn load_font(bytes: &[u8], index: Option<u32>) -> Result<FontRef, Error> {
    let file = FileRef::new(bytes).map_err(Error::UnsupportedFormat)?;
    match (file, index.unwrap_or(0)) {
        (FileRef::Font(font), 0) => Ok(font),
        (FileRef::Font(_), other) => Err(Error::UnsupportedFormat(
            ReadError::InvalidCollectionIndex(other),
        )),
        (FileRef::Collection(collection), idx) => {
            collection.get(idx).map_err(Error::UnsupportedFormat)
        }
    }
}

/// A [`FontSource`] backed by a parsed font file
pub struct FontFile<'a> {
    font: FontRef<'a>,
}

impl<'a> FontFile<'a> {
    pub fn new(font: FontRef<'a>) -> Self {
        Self { font }
    }
}

impl FontSource for FontFile<'_> {
    fn char_map(&self) -> Result<BTreeMap<u32, GlyphId16>, Error> {
        let mut map = BTreeMap::new();
        let Some(cmap) = optional(CMAP, self.font.cmap())? else {
            log::warn!("font has no cmap table");
            return Ok(map);
        };
        let data = cmap.offset_data();
        for record in cmap.encoding_records().iter().filter(is_unicode) {
            let mut add = |(cp, gid): (u32, GlyphId)| {
                // glyph 0 means unmapped, e.g. the U+FFFF end segment of format 4
                if gid == GlyphId::NOTDEF {
                    return;
                }
                match GlyphId16::try_from(gid) {
                    Ok(gid) => {
                        map.entry(cp).or_insert(gid);
                    }
                    Err(_) => {
                        log::warn!("U+{cp:04X} maps to out of range glyph {}", gid.to_u32())
                    }
                }
            };
            match record.subtable(data).map_err(Error::corrupt(CMAP))? {
                CmapSubtable::Format4(subtable) => subtable.iter().for_each(&mut add),
                CmapSubtable::Format12(subtable) => subtable.iter().for_each(&mut add),
                _ => log::debug!(
                    "skipping unsupported cmap subtable ({:?}, {})",
                    record.platform_id(),
                    record.encoding_id()
                ),
            }
        }
        Ok(map)
    }

    fn glyphs(&self) -> Result<Vec<RawGlyph>, Error> {
        let num_glyphs = optional(MAXP, self.font.maxp())?
            .ok_or(Error::MissingTable(MAXP))?
            .num_glyphs();
        let post = optional(POST, self.font.post())?;
        let hmtx = optional(HMTX, self.font.hmtx())?;
        let gdef = optional(GDEF, self.font.gdef())?;

        let mut glyphs = (0..num_glyphs)
            .map(|gid| {
                let (advance, lsb) = hmtx
                    .as_ref()
                    .map(|hmtx| metrics(hmtx, gid as usize))
                    .unwrap_or_default();
                let name = post
                    .as_ref()
                    .and_then(|post| post.glyph_name(GlyphId16::new(gid)))
                    .filter(|name| !name.is_empty())
                    .map(GlyphName::new);
                RawGlyph {
                    name,
                    advance,
                    lsb,
                    ..Default::default()
                }
            })
            .collect::<Vec<_>>();
        if let Some(gdef) = gdef {
            add_gdef_info(&gdef, &mut glyphs).map_err(Error::corrupt(GDEF))?;
        }
        Ok(glyphs)
    }

    fn layout(&self, table: LayoutTable) -> Result<Option<RawLayout>, Error> {
        match table {
            LayoutTable::Gsub => optional(table.tag(), self.font.gsub())?
                .map(|gsub| layout::read_gsub(&gsub).map_err(Error::corrupt(table.tag())))
                .transpose(),
            LayoutTable::Gpos => optional(table.tag(), self.font.gpos())?
                .map(|gpos| layout::read_gpos(&gpos).map_err(Error::corrupt(table.tag())))
                .transpose(),
        }
    }

    fn metadata(&self) -> Result<FontMetadata, Error> {
        let mut tables = self
            .font
            .table_directory
            .table_records()
            .iter()
            .map(|record| record.tag())
            .collect::<Vec<_>>();
        tables.sort();

        let mut names = BTreeMap::new();
        if let Some(name) = optional(NAME, self.font.name())? {
            let data = name.string_data();
            let mut records = name.name_record().iter().collect::<Vec<_>>();
            records.sort_by_key(|record| {
                name_preference(
                    record.platform_id(),
                    record.language_id(),
                    record.is_unicode(),
                )
            });
            for record in records {
                let id = record.name_id().to_u16();
                if names.contains_key(&id) {
                    continue;
                }
                let string = record.string(data).map_err(Error::corrupt(NAME))?;
                names.insert(id, string.chars().collect::<String>());
            }
        }
        Ok(FontMetadata { names, tables })
    }
}

/// Treat a missing table as `None` and any other failure as corruption.
fn optional<T>(table: Tag, result: Result<T, ReadError>) -> Result<Option<T>, Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ReadError::TableIsMissing(missing)) => {
            log::debug!("no '{missing}' table");
            Ok(None)
        }
        Err(inner) => Err(Error::CorruptTable { table, inner }),
    }
}

/// Layout and GDEF glyph ids are 16 bit, whatever width the parser hands us.
pub(crate) fn gid16(gid: impl Into<GlyphId>) -> Result<GlyphId16, ReadError> {
    GlyphId16::try_from(gid.into()).map_err(|_| ReadError::OutOfBounds)
}

fn is_unicode(record: &&EncodingRecord) -> bool {
    record.platform_id() == PlatformId::Unicode
        || record.platform_id() == PlatformId::Windows
            && matches!(record.encoding_id(), 1 | 10)
}

/// Sort key for name records sharing an id, lower wins: Windows English,
/// other Windows Unicode, other Unicode, then legacy encodings.
fn name_preference(platform: u16, language: u16, unicode: bool) -> u8 {
    const WINDOWS: u16 = 3;
    const ENGLISH_US: u16 = 0x409;
    match (platform, language, unicode) {
        (WINDOWS, ENGLISH_US, true) => 0,
        (WINDOWS, _, true) => 1,
        (_, _, true) => 2,
        _ => 3,
    }
}

/// Advance and left side bearing; glyphs past the end of the long metrics
/// array share the last advance.
fn metrics(hmtx: &Hmtx, gid: usize) -> (Option<u16>, Option<i16>) {
    let long_metrics = hmtx.h_metrics();
    match long_metrics.get(gid) {
        Some(metric) => (Some(metric.advance()), Some(metric.side_bearing())),
        None => (
            long_metrics.last().map(|metric| metric.advance()),
            hmtx.left_side_bearings()
                .get(gid.saturating_sub(long_metrics.len()))
                .map(|lsb| lsb.get()),
        ),
    }
}

fn add_gdef_info(gdef: &Gdef, glyphs: &mut [RawGlyph]) -> Result<(), ReadError> {
    if let Some(class_def) = gdef.glyph_class_def().transpose()? {
        for (gid, class) in class_def.iter() {
            if let Some(glyph) = glyphs.get_mut(gid16(gid)?.to_u16() as usize) {
                glyph.class = GlyphClass::from_raw(class);
            }
        }
    }

    let Some(caret_list) = gdef.lig_caret_list().transpose()? else {
        return Ok(());
    };
    let coverage = caret_list.coverage()?;
    for (gid, lig_glyph) in coverage.iter().zip(caret_list.lig_glyphs().iter()) {
        let Some(glyph) = glyphs.get_mut(gid16(gid)?.to_u16() as usize) else {
            continue;
        };
        for caret in lig_glyph?.caret_values().iter() {
            match caret? {
                CaretValue::Format1(caret) => glyph.carets.push(caret.coordinate()),
                CaretValue::Format3(caret) => glyph.carets.push(caret.coordinate()),
                // contour point carets have no coordinate until the outline is known
                CaretValue::Format2(_) => (),
            }
        }
    }
    Ok(())
}
