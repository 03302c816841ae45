//! Organizing extracted entities into the tables of a report

use std::borrow::Cow;

use write_fonts::types::GlyphId16;

use crate::{
    extract::ExtractedFont,
    feature_names::feature_name,
    glyph_names::GlyphName,
    model::{
        tag_str, CoverageRange, FeatureRecord, GlyphClass, GlyphRecord, SubstitutionKind,
        SubstitutionRule, KNOWN_NAMES,
    },
};

const FULL_NAME: u16 = 4;
const FAMILY: u16 = 1;
const SUBFAMILY: u16 = 2;
const VERSION: u16 = 5;
const MANUFACTURER: u16 = 8;
const DESIGNER: u16 = 9;

/// The sections of a report, in the order they appear
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    UnicodeCoverage,
    Glyphs,
    Features,
    Ligatures,
    Substitutions,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::UnicodeCoverage => "Unicode Coverage",
            Section::Glyphs => "Glyphs Coverage",
            Section::Features => "OpenType Features",
            Section::Ligatures => "Ligatures",
            Section::Substitutions => "Substitutions",
        }
    }

    pub fn columns(self) -> &'static [Column] {
        match self {
            Section::UnicodeCoverage => COVERAGE_COLUMNS,
            Section::Glyphs => GLYPH_COLUMNS,
            Section::Features => FEATURE_COLUMNS,
            Section::Ligatures | Section::Substitutions => RULE_COLUMNS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    /// minimum width in plain text
    pub width: usize,
    pub align: Align,
    /// longtable column specifier
    pub tex: &'static str,
}

const fn column(title: &'static str, width: usize, align: Align, tex: &'static str) -> Column {
    Column {
        title,
        width,
        align,
        tex,
    }
}

static COVERAGE_COLUMNS: &[Column] = &[
    column("Range", 16, Align::Left, "l"),
    column("Count", 6, Align::Right, "r"),
    column("Block", 0, Align::Left, "l"),
];

static GLYPH_COLUMNS: &[Column] = &[
    column("Index", 6, Align::Right, "r"),
    column("Glyph", 24, Align::Left, "l"),
    column("Advance", 7, Align::Right, "r"),
    column("LSB", 6, Align::Right, "r"),
    column("Class", 9, Align::Left, "l"),
    column("Code points", 16, Align::Left, "p{.18\\textwidth}"),
    column("Carets", 0, Align::Left, "l"),
];

static FEATURE_COLUMNS: &[Column] = &[
    column("Feature", 7, Align::Left, "l"),
    column("Name", 34, Align::Left, "l"),
    column("Table", 5, Align::Left, "l"),
    column("Script", 6, Align::Left, "l"),
    column("Language", 8, Align::Left, "l"),
    column("Rules", 5, Align::Right, "r"),
    column("Lookups", 0, Align::Left, "p{.12\\textwidth}"),
];

static RULE_COLUMNS: &[Column] = &[
    column("Feature", 7, Align::Left, "l"),
    column("Kind", 9, Align::Left, "l"),
    column("Input", 28, Align::Left, "p{.22\\textwidth}"),
    column("", 2, Align::Left, "c"),
    column("Output", 28, Align::Left, "p{.22\\textwidth}"),
    column("Lookups", 8, Align::Left, "l"),
    column("Language systems", 0, Align::Left, "p{.12\\textwidth}"),
];

/// A glyph as it appears in a table cell
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRef<'a> {
    pub id: GlyphId16,
    pub name: Cow<'a, str>,
    /// The lowest code point mapped to the glyph
    pub codepoint: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell<'a> {
    Text(Cow<'a, str>),
    Number(i64),
    CodeRange { start: u32, end: u32 },
    CodePoints(&'a [u32]),
    Glyph(GlyphRef<'a>),
    Sequence(Vec<GlyphRef<'a>>),
    Alternatives(Vec<GlyphRef<'a>>),
    Arrow,
    Empty,
}

impl<'a> Cell<'a> {
    fn text(s: impl Into<Cow<'a, str>>) -> Self {
        Cell::Text(s.into())
    }

    fn number(n: Option<impl Into<i64>>) -> Self {
        n.map(|n| Cell::Number(n.into())).unwrap_or(Cell::Empty)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row<'a> {
    /// The GDEF class of the glyph a row describes; unclassified elsewhere
    pub class: GlyphClass,
    pub cells: Vec<Cell<'a>>,
}

impl<'a> Row<'a> {
    fn new(cells: Vec<Cell<'a>>) -> Self {
        Row {
            class: GlyphClass::Unclassified,
            cells,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table<'a> {
    pub section: Section,
    pub rows: Vec<Row<'a>>,
}

impl Table<'_> {
    pub fn columns(&self) -> &'static [Column] {
        self.section.columns()
    }
}

const CHART_CELLS: usize = 256;

/// One 16x16 page of a Unicode chart, starting at a multiple of 256
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartPage {
    pub start: u32,
    mapped: [bool; CHART_CELLS],
}

impl ChartPage {
    pub const SIDE: u32 = 16;
    const LEN: u32 = CHART_CELLS as u32;

    fn new(start: u32) -> Self {
        ChartPage {
            start,
            mapped: [false; CHART_CELLS],
        }
    }

    /// The last code point on the page
    pub fn end(&self) -> u32 {
        self.start + Self::LEN - 1
    }

    /// The code point in a chart cell; columns run down, like the Unicode charts.
    pub fn codepoint(&self, row: u32, column: u32) -> u32 {
        self.start + column * Self::SIDE + row
    }

    pub fn is_mapped(&self, cp: u32) -> bool {
        cp.checked_sub(self.start)
            .and_then(|offset| self.mapped.get(offset as usize))
            .copied()
            .unwrap_or(false)
    }
}

/// An extracted font, sorted and labeled for rendering
#[derive(Clone, Debug)]
pub struct Report<'a> {
    font: &'a ExtractedFont,
    pub title: Cow<'a, str>,
    pub author: Cow<'a, str>,
    pub version: Cow<'a, str>,
    coverage: Vec<&'a CoverageRange>,
    glyphs: Vec<&'a GlyphRecord>,
    features: Vec<&'a FeatureRecord>,
    ligatures: Vec<&'a SubstitutionRule>,
    substitutions: Vec<&'a SubstitutionRule>,
}

impl<'a> Report<'a> {
    /// `fallback_title` is used when the font has no usable name.
    pub fn assemble(font: &'a ExtractedFont, fallback_title: &str) -> Report<'a> {
        let meta = &font.metadata;
        let title: Cow<str> = match (meta.name(FULL_NAME), meta.name(FAMILY)) {
            (Some(full), _) => full.into(),
            (None, Some(family)) => match meta.name(SUBFAMILY) {
                Some(sub) => format!("{family} {sub}").into(),
                None => family.into(),
            },
            (None, None) => fallback_title.to_owned().into(),
        };
        let author: Cow<str> = match (meta.name(DESIGNER), meta.name(MANUFACTURER)) {
            (Some(designer), Some(maker)) if designer != maker => {
                format!("{designer} ({maker})").into()
            }
            (Some(designer), _) => designer.into(),
            (None, Some(maker)) => maker.into(),
            (None, None) => "Author is not set".into(),
        };
        let version: Cow<str> = meta.name(VERSION).unwrap_or("Unknown version").into();

        let mut coverage = font.coverage.iter().collect::<Vec<_>>();
        coverage.sort_by_key(|range| range.start);

        let mut glyphs = font.glyphs.iter().collect::<Vec<_>>();
        glyphs.sort_by_key(|glyph| glyph.id);

        let mut features = font.features.iter().collect::<Vec<_>>();
        features.sort_by(|a, b| {
            (a.tag, a.lang_system, a.table).cmp(&(b.tag, b.lang_system, b.table))
        });

        let (mut ligatures, mut substitutions): (Vec<_>, Vec<_>) = font
            .substitutions
            .iter()
            .partition(|rule| rule.is_ligature());
        // rules without a feature go last
        let rule_key = |rule: &&SubstitutionRule| {
            (
                rule.feature.is_none(),
                rule.feature,
                rule.input.clone(),
                rule.output.clone(),
                rule.kind,
            )
        };
        ligatures.sort_by_key(rule_key);
        substitutions.sort_by_key(rule_key);

        Report {
            font,
            title,
            author,
            version,
            coverage,
            glyphs,
            features,
            ligatures,
            substitutions,
        }
    }

    /// Labeled name table entries, then the list of tables in the font
    pub fn metadata(&self) -> Vec<(&'static str, Cow<'a, str>)> {
        let meta = &self.font.metadata;
        let mut result = KNOWN_NAMES
            .iter()
            .filter_map(|(id, label)| meta.name(*id).map(|value| (*label, value.into())))
            .collect::<Vec<_>>();
        let tables = meta.tables.iter().map(|tag| tag_str(*tag)).collect::<Vec<_>>();
        result.push(("Tables", tables.join(" ").into()));
        result
    }

    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        let with_class = |class| self.glyphs.iter().filter(|g| g.class == class).count();
        vec![
            ("Unicode characters", self.font.mapped_codepoints()),
            ("Glyphs", self.glyphs.len()),
            ("Ligature glyphs", with_class(GlyphClass::Ligature)),
            ("Mark glyphs", with_class(GlyphClass::Mark)),
            ("Component glyphs", with_class(GlyphClass::Component)),
            ("Features", self.features.len()),
            ("Ligatures", self.ligatures.len()),
            ("Substitutions", self.substitutions.len()),
        ]
    }

    /// The font's ligature rules, in report order
    pub fn ligatures(&self) -> &[&'a SubstitutionRule] {
        &self.ligatures
    }

    /// The font's non-ligature substitution rules, in report order
    pub fn substitutions(&self) -> &[&'a SubstitutionRule] {
        &self.substitutions
    }

    /// The five report tables, in section order
    pub fn tables(&self) -> Vec<Table<'a>> {
        vec![
            self.coverage_table(),
            self.glyph_table(),
            self.feature_table(),
            self.rule_table(Section::Ligatures, &self.ligatures),
            self.rule_table(Section::Substitutions, &self.substitutions),
        ]
    }

    /// A chart page for every 256 code points holding a mapped character
    pub fn charts(&self) -> Vec<ChartPage> {
        let mut pages: Vec<ChartPage> = Vec::new();
        for cp in self.coverage.iter().flat_map(|range| range.start..=range.end) {
            let start = cp - cp % ChartPage::LEN;
            if pages.last().map(|page| page.start) != Some(start) {
                pages.push(ChartPage::new(start));
            }
            if let Some(page) = pages.last_mut() {
                page.mapped[(cp - start) as usize] = true;
            }
        }
        pages
    }

    pub fn glyph_ref(&self, gid: GlyphId16) -> GlyphRef<'a> {
        match self.font.glyph(gid) {
            Some(glyph) => GlyphRef {
                id: gid,
                name: glyph.name.as_str().into(),
                codepoint: glyph.codepoints.first().copied(),
            },
            None => GlyphRef {
                id: gid,
                name: GlyphName::fallback(gid, None).as_str().to_owned().into(),
                codepoint: None,
            },
        }
    }

    fn coverage_table(&self) -> Table<'a> {
        let rows = self
            .coverage
            .iter()
            .map(|range| {
                Row::new(vec![
                    Cell::CodeRange {
                        start: range.start,
                        end: range.end,
                    },
                    Cell::Number(range.len() as i64),
                    Cell::text(range.block),
                ])
            })
            .collect();
        Table {
            section: Section::UnicodeCoverage,
            rows,
        }
    }

    fn glyph_table(&self) -> Table<'a> {
        let rows = self
            .glyphs
            .iter()
            .map(|glyph| {
                let carets = glyph
                    .carets
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>();
                Row {
                    class: glyph.class,
                    cells: vec![
                        Cell::Number(glyph.id.to_u16().into()),
                        Cell::Glyph(self.glyph_ref(glyph.id)),
                        Cell::number(glyph.advance),
                        Cell::number(glyph.lsb),
                        glyph.class.name().map(Cell::text).unwrap_or(Cell::Empty),
                        if glyph.codepoints.is_empty() {
                            Cell::Empty
                        } else {
                            Cell::CodePoints(&glyph.codepoints)
                        },
                        if carets.is_empty() {
                            Cell::Empty
                        } else {
                            Cell::text(carets.join(","))
                        },
                    ],
                }
            })
            .collect();
        Table {
            section: Section::Glyphs,
            rows,
        }
    }

    fn feature_table(&self) -> Table<'a> {
        let rows = self
            .features
            .iter()
            .map(|feature| {
                Row::new(vec![
                    Cell::text(tag_str(feature.tag)),
                    Cell::text(feature_name(feature.tag)),
                    Cell::text(feature.table.to_string()),
                    Cell::text(tag_str(feature.lang_system.script)),
                    Cell::text(tag_str(feature.lang_system.language)),
                    Cell::Number(feature.rule_count as i64),
                    Cell::text(join(&feature.lookups, ",")),
                ])
            })
            .collect();
        Table {
            section: Section::Features,
            rows,
        }
    }

    fn rule_table(&self, section: Section, rules: &[&'a SubstitutionRule]) -> Table<'a> {
        let rows = rules
            .iter()
            .map(|rule| {
                let glyphs = |ids: &[GlyphId16]| {
                    ids.iter().map(|gid| self.glyph_ref(*gid)).collect::<Vec<_>>()
                };
                let output = match rule.kind {
                    SubstitutionKind::Alternate => Cell::Alternatives(glyphs(&rule.output)),
                    _ => Cell::Sequence(glyphs(&rule.output)),
                };
                Row::new(vec![
                    rule.feature
                        .map(|tag| Cell::text(tag_str(tag)))
                        .unwrap_or(Cell::Empty),
                    Cell::text(rule.kind.name()),
                    Cell::Sequence(glyphs(&rule.input)),
                    Cell::Arrow,
                    output,
                    Cell::text(join(&rule.lookups, ",")),
                    if rule.lang_systems.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::text(join(&rule.lang_systems, " "))
                    },
                ])
            })
            .collect();
        Table { section, rows }
    }
}

fn join<T: ToString>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use write_fonts::types::Tag;

    use super::*;
    use crate::{
        extract::extract,
        model::LayoutTable,
        test_helpers::FakeFont,
    };

    const GSUB: LayoutTable = LayoutTable::Gsub;
    const GPOS: LayoutTable = LayoutTable::Gpos;

    fn ligature_font() -> FakeFont {
        let mut font = FakeFont::new(&[".notdef", "f", "i", "l", "f_i", "f_l", "a", "a.alt"])
            .map_chars(&[('f', 1), ('i', 2), ('l', 3), ('a', 6)]);
        let fl = font.add_lookup(GSUB, FakeFont::ligature_lookup(&[1, 3], 5));
        let fi = font.add_lookup(GSUB, FakeFont::ligature_lookup(&[1, 2], 4));
        let salt = font.add_lookup(GSUB, FakeFont::alternate_lookup(6, &[7]));
        let orphan = FakeFont::single_lookup(&[(2, 3)]);
        font.add_lookup(GSUB, orphan);
        font.add_feature(GSUB, b"liga", &[fi, fl], &[(b"latn", b"dflt")]);
        font.add_feature(GSUB, b"aalt", &[salt], &[(b"latn", b"dflt")]);
        let kern = font.add_lookup(GPOS, FakeFont::positioning_lookup(2));
        font.add_feature(GPOS, b"kern", &[kern], &[(b"latn", b"dflt"), (b"DFLT", b"dflt")]);
        font
    }

    #[test]
    fn chart_pages() {
        let font = FakeFont::new(&[".notdef", "a", "b", "alpha", "smile"]).map_chars(&[
            ('a', 1),
            ('b', 2),
            ('\u{3B1}', 3),
            ('\u{1F600}', 4),
        ]);
        let extracted = extract(&font).unwrap();
        let report = Report::assemble(&extracted, "Fake");
        let charts = report.charts();

        assert_eq!(
            charts
                .iter()
                .map(|page| (page.start, page.end()))
                .collect::<Vec<_>>(),
            [(0x0000, 0x00FF), (0x0300, 0x03FF), (0x1F600, 0x1F6FF)]
        );
        assert!(charts[0].is_mapped(0x61));
        assert!(charts[0].is_mapped(0x62));
        assert!(!charts[0].is_mapped(0x63));
        assert!(charts[1].is_mapped(0x3B1));
        // outside the page
        assert!(!charts[1].is_mapped(0x61));
        assert_eq!(charts[0].codepoint(1, 6), 0x61);
    }

    fn cell_text(cell: &Cell) -> String {
        match cell {
            Cell::Text(s) => s.to_string(),
            Cell::Number(n) => n.to_string(),
            Cell::Sequence(glyphs) | Cell::Alternatives(glyphs) => glyphs
                .iter()
                .map(|g| g.name.as_ref())
                .collect::<Vec<_>>()
                .join(" "),
            Cell::Empty => "-".into(),
            other => format!("{other:?}"),
        }
    }

    #[test]
    fn table_order_is_fixed() {
        let font = extract(&ligature_font()).unwrap();
        let report = Report::assemble(&font, "ligatures");
        let sections = report
            .tables()
            .iter()
            .map(|table| table.section)
            .collect::<Vec<_>>();
        assert_eq!(
            sections,
            [
                Section::UnicodeCoverage,
                Section::Glyphs,
                Section::Features,
                Section::Ligatures,
                Section::Substitutions
            ]
        );
        for table in report.tables() {
            for row in &table.rows {
                assert_eq!(row.cells.len(), table.columns().len());
            }
        }
    }

    #[test]
    fn features_sorted_by_tag_then_lang_system() {
        let font = extract(&ligature_font()).unwrap();
        let report = Report::assemble(&font, "ligatures");
        let features = &report.tables()[2];
        let rows = features
            .rows
            .iter()
            .map(|row| {
                [0, 2, 3, 5]
                    .iter()
                    .map(|i| cell_text(&row.cells[*i]))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            [
                "aalt GSUB latn 1",
                "kern GPOS DFLT 2",
                "kern GPOS latn 2",
                "liga GSUB latn 2",
            ]
        );
        assert_eq!(cell_text(&features.rows[3].cells[1]), "Standard Ligatures");
    }

    #[test]
    fn ligatures_and_substitutions_partition_rules() {
        let font = extract(&ligature_font()).unwrap();
        let report = Report::assemble(&font, "ligatures");
        assert!(report.ligatures().iter().all(|rule| rule.input.len() > 1));
        assert!(report.substitutions().iter().all(|rule| rule.input.len() == 1));
        assert_eq!(
            report.ligatures().len() + report.substitutions().len(),
            font.substitutions.len()
        );

        let tables = report.tables();
        let ligatures = tables[3]
            .rows
            .iter()
            .map(|row| cell_text(&row.cells[2]))
            .collect::<Vec<_>>();
        // sorted by input sequence within the feature
        assert_eq!(ligatures, ["f i", "f l"]);

        let subs = tables[4]
            .rows
            .iter()
            .map(|row| (cell_text(&row.cells[0]), cell_text(&row.cells[4])))
            .collect::<Vec<_>>();
        // the rule no feature reaches sorts last
        assert_eq!(
            subs,
            [("aalt".to_string(), "a.alt".to_string()), ("-".to_string(), "l".to_string())]
        );
        assert!(matches!(tables[4].rows[0].cells[4], Cell::Alternatives(_)));
    }

    #[test]
    fn summary_counts() {
        let mut fake = ligature_font();
        fake.glyphs[4].class = GlyphClass::Ligature;
        fake.glyphs[5].class = GlyphClass::Ligature;
        let font = extract(&fake).unwrap();
        let report = Report::assemble(&font, "ligatures");
        assert_eq!(
            report.summary(),
            vec![
                ("Unicode characters", 4),
                ("Glyphs", 8),
                ("Ligature glyphs", 2),
                ("Mark glyphs", 0),
                ("Component glyphs", 0),
                ("Features", 4),
                ("Ligatures", 2),
                ("Substitutions", 2),
            ]
        );
        assert_eq!(report.tables()[1].rows[4].class, GlyphClass::Ligature);
    }

    #[test]
    fn title_author_version_fallbacks() {
        let font = extract(&FakeFont::new(&[".notdef"])).unwrap();
        let report = Report::assemble(&font, "MyFont-Regular");
        assert_eq!(report.title, "MyFont-Regular");
        assert_eq!(report.author, "Author is not set");
        assert_eq!(report.version, "Unknown version");

        let fake = FakeFont::new(&[".notdef"])
            .with_name(1, "Test Sans")
            .with_name(2, "Bold")
            .with_name(8, "Type Co")
            .with_name(9, "A. Designer")
            .with_name(5, "Version 1.002");
        let font = extract(&fake).unwrap();
        let report = Report::assemble(&font, "ignored");
        assert_eq!(report.title, "Test Sans Bold");
        assert_eq!(report.author, "A. Designer (Type Co)");
        assert_eq!(report.version, "Version 1.002");

        let fake = fake.with_name(4, "Test Sans Bold Display").with_name(8, "A. Designer");
        let font = extract(&fake).unwrap();
        let report = Report::assemble(&font, "ignored");
        assert_eq!(report.title, "Test Sans Bold Display");
        assert_eq!(report.author, "A. Designer");
    }

    #[test]
    fn metadata_rows() {
        let mut fake = FakeFont::new(&[".notdef"]).with_name(1, "Test Sans").with_name(0, "(c) me");
        fake.metadata.tables = vec![Tag::new(b"cmap"), Tag::new(b"cvt ")];
        let font = extract(&fake).unwrap();
        let report = Report::assemble(&font, "x");
        let meta = report
            .metadata()
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>();
        assert_eq!(meta, ["Copyright: (c) me", "Family: Test Sans", "Tables: cmap cvt"]);
    }

    #[test]
    fn missing_glyphs_get_fallback_names() {
        let font = extract(&FakeFont::new(&[".notdef", "a"])).unwrap();
        let report = Report::assemble(&font, "x");
        assert_eq!(report.glyph_ref(GlyphId16::new(1)).name, "a");
        assert_eq!(report.glyph_ref(GlyphId16::new(9)).name, "glyph.00009");
    }
}
