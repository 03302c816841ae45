//! Reports on binary fonts built in memory

use std::{path::Path, process::Command};

use fontreport::{
    extract, load_font,
    model::{LanguageSystem, LayoutTable, SubstitutionKind},
    render, Error, FontFile, Report,
};
use write_fonts::read::ReadError;
use pretty_assertions::assert_eq;
use write_fonts::{
    dump_table,
    tables::{
        cmap::Cmap,
        gsub::{Gsub, SingleSubst, SubstitutionLookup},
        layout::{
            CoverageTable, Feature, FeatureList, FeatureRecord, LangSys, LangSysRecord, Lookup,
            LookupFlag, LookupList, Script, ScriptList, ScriptRecord,
        },
        maxp::Maxp,
        post::Post,
    },
    types::{GlyphId, GlyphId16, Tag},
    FontBuilder,
};

/// A font with the given glyph names and cmap, plus any extra raw tables.
fn build_font(names: &[&str], mappings: &[(char, u32)], extra: &[(Tag, Vec<u8>)]) -> Vec<u8> {
    let cmap = Cmap::from_mappings(mappings.iter().map(|(c, gid)| (*c, GlyphId::new(*gid))))
        .unwrap();
    let maxp = Maxp {
        num_glyphs: names.len() as u16,
        ..Default::default()
    };
    let post = Post::new_v2(names.iter().copied());

    let mut builder = FontBuilder::new();
    builder
        .add_raw(Tag::new(b"cmap"), dump_table(&cmap).unwrap())
        .add_raw(Tag::new(b"maxp"), dump_table(&maxp).unwrap())
        .add_raw(Tag::new(b"post"), dump_table(&post).unwrap());
    for (tag, data) in extra {
        builder.add_raw(*tag, data.clone());
    }
    builder.build()
}

/// A GSUB with one feature holding a single substitution lookup, registered
/// under one language system.
fn single_sub_gsub(
    feature: &[u8; 4],
    script: &[u8; 4],
    lang: &[u8; 4],
    subs: &[(u16, u16)],
) -> Vec<u8> {
    let coverage = subs
        .iter()
        .map(|(from, _)| GlyphId16::new(*from))
        .collect::<CoverageTable>();
    let replacements = subs.iter().map(|(_, to)| GlyphId16::new(*to)).collect();
    let lookup = SubstitutionLookup::Single(Lookup::new(
        LookupFlag::empty(),
        vec![SingleSubst::format_2(coverage, replacements)],
    ));

    let script_table = Script::new(
        None,
        vec![LangSysRecord::new(Tag::new(lang), LangSys::new(vec![0]))],
    );
    let gsub = Gsub::new(
        ScriptList::new(vec![ScriptRecord::new(Tag::new(script), script_table)]),
        FeatureList::new(vec![FeatureRecord::new(
            Tag::new(feature),
            Feature::new(None, vec![0]),
        )]),
        LookupList::new(vec![lookup]),
    );
    dump_table(&gsub).unwrap()
}

fn urdu_font() -> Vec<u8> {
    let gsub = single_sub_gsub(b"locl", b"arab", b"URD ", &[(1, 2)]);
    build_font(
        &[".notdef", "uni06F7", "uni06F7.urdu"],
        &[('\u{06F7}', 1)],
        &[(Tag::new(b"GSUB"), gsub)],
    )
}

/// A `ttcf` collection of the given fonts, with every table offset rebased
/// onto the collection.
fn build_collection(fonts: &[Vec<u8>]) -> Vec<u8> {
    let header_len = 12 + 4 * fonts.len();
    let mut data = Vec::new();
    data.extend_from_slice(b"ttcf");
    data.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    data.extend_from_slice(&(fonts.len() as u32).to_be_bytes());
    let mut body = Vec::new();
    for font in fonts {
        let base = (header_len + body.len()) as u32;
        data.extend_from_slice(&base.to_be_bytes());
        let mut font = font.clone();
        let num_tables = u16::from_be_bytes([font[4], font[5]]) as usize;
        for record in 0..num_tables {
            let pos = 12 + 16 * record + 8;
            let offset = u32::from_be_bytes(font[pos..pos + 4].try_into().unwrap());
            font[pos..pos + 4].copy_from_slice(&(offset + base).to_be_bytes());
        }
        body.extend_from_slice(&font);
        body.resize(body.len().next_multiple_of(4), 0);
    }
    data.extend_from_slice(&body);
    data
}

fn glyph_names(bytes: &[u8], index: Option<u32>) -> Vec<String> {
    let font = load_font(bytes, index).unwrap();
    extract(&FontFile::new(font))
        .unwrap()
        .glyphs
        .iter()
        .map(|g| g.name.as_str().to_owned())
        .collect()
}

fn text_report(bytes: &[u8]) -> Result<String, Error> {
    let font = load_font(bytes, None)?;
    let extracted = extract(&FontFile::new(font))?;
    let report = Report::assemble(&extracted, "Test");
    let mut buf = Vec::new();
    render::text::write_report(&mut buf, &report)?;
    Ok(String::from_utf8(buf).unwrap())
}

fn section<'a>(text: &'a str, header: &str) -> Vec<&'a str> {
    text.lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .filter(|line| !line.starts_with('#'))
        .collect()
}

#[test]
fn three_glyphs_no_layout() {
    let _ = env_logger::builder().is_test(true).try_init();
    let bytes = build_font(
        &[".notdef", "A", "B", "C"],
        &[('A', 1), ('B', 2), ('C', 3)],
        &[],
    );
    let font = load_font(&bytes, None).unwrap();
    let extracted = extract(&FontFile::new(font)).unwrap();

    assert_eq!(extracted.coverage.len(), 1);
    assert_eq!(
        (extracted.coverage[0].start, extracted.coverage[0].end),
        (0x41, 0x43)
    );
    assert_eq!(extracted.mapped_codepoints(), 3);
    assert_eq!(
        extracted
            .glyphs
            .iter()
            .map(|g| (g.name.as_str(), g.codepoints.clone()))
            .collect::<Vec<_>>(),
        [
            (".notdef", vec![]),
            ("A", vec![0x41]),
            ("B", vec![0x42]),
            ("C", vec![0x43])
        ]
    );
    assert!(extracted.features.is_empty());
    assert!(extracted.substitutions.is_empty());

    let text = text_report(&bytes).unwrap();
    assert!(text.contains("  Unicode characters: 3\n"), "{text}");
    assert!(!text.contains("FFFF"), "{text}");
    assert_eq!(
        section(&text, "UNICODE COVERAGE"),
        ["U+0041..U+0043        3 Basic Latin"]
    );
    assert_eq!(section(&text, "GLYPHS COVERAGE").len(), 4);
    for header in ["OPENTYPE FEATURES", "LIGATURES", "SUBSTITUTIONS"] {
        assert!(section(&text, header).is_empty(), "{header}");
    }
}

#[test]
fn mappings_to_notdef_are_unmapped() {
    let bytes = build_font(&[".notdef", "A"], &[('A', 1), ('B', 0)], &[]);
    let font = load_font(&bytes, None).unwrap();
    let extracted = extract(&FontFile::new(font)).unwrap();
    assert_eq!(extracted.mapped_codepoints(), 1);
    assert!(extracted.glyphs[0].codepoints.is_empty());
}

#[test]
fn index_into_a_single_font() {
    let bytes = urdu_font();
    assert!(load_font(&bytes, Some(0)).is_ok());
    let err = load_font(&bytes, Some(1)).err().unwrap();
    assert!(
        matches!(
            err,
            Error::UnsupportedFormat(ReadError::InvalidCollectionIndex(1))
        ),
        "{err:?}"
    );
    assert_eq!(err.stage(), "font parsing");
}

#[test]
fn collection_member_by_index() {
    let latin = build_font(&[".notdef", "A", "B"], &[('A', 1), ('B', 2)], &[]);
    let collection = build_collection(&[latin, urdu_font()]);

    assert_eq!(glyph_names(&collection, None), [".notdef", "A", "B"]);
    assert_eq!(
        glyph_names(&collection, Some(1)),
        [".notdef", "uni06F7", "uni06F7.urdu"]
    );
    let font = load_font(&collection, Some(1)).unwrap();
    let extracted = extract(&FontFile::new(font)).unwrap();
    assert_eq!(extracted.substitutions.len(), 1);

    let err = load_font(&collection, Some(2)).err().unwrap();
    assert!(
        matches!(
            err,
            Error::UnsupportedFormat(ReadError::InvalidCollectionIndex(2))
        ),
        "{err:?}"
    );
}

#[test]
fn supplementary_plane_mapping() {
    // no post name for glyph 1, so it is named from its code point
    let bytes = build_font(&[".notdef", ""], &[('\u{1F600}', 1)], &[]);
    let font = load_font(&bytes, None).unwrap();
    let extracted = extract(&FontFile::new(font)).unwrap();

    assert_eq!(extracted.coverage.len(), 1);
    let range = &extracted.coverage[0];
    assert_eq!((range.start, range.end), (0x1F600, 0x1F600));
    assert_eq!(extracted.glyphs[1].name, "u1F600");
    assert_eq!(extracted.glyphs[1].codepoints, [0x1F600]);

    let text = text_report(&bytes).unwrap();
    assert_eq!(
        section(&text, "UNICODE COVERAGE"),
        [format!("U+1F600{}1 Emoticons", " ".repeat(15))]
    );
}

#[test]
fn urdu_localized_form() {
    let bytes = urdu_font();
    let font = load_font(&bytes, None).unwrap();
    let extracted = extract(&FontFile::new(font)).unwrap();

    let urdu = LanguageSystem {
        script: Tag::new(b"arab"),
        language: Tag::new(b"URD "),
    };
    assert_eq!(extracted.features.len(), 1);
    let feature = &extracted.features[0];
    assert_eq!(feature.table, LayoutTable::Gsub);
    assert_eq!(feature.tag, Tag::new(b"locl"));
    assert_eq!(feature.lang_system, urdu);
    assert!(feature.rule_count >= 1);

    assert_eq!(extracted.substitutions.len(), 1);
    let rule = &extracted.substitutions[0];
    assert_eq!(rule.kind, SubstitutionKind::Single);
    assert_eq!(rule.input, [GlyphId16::new(1)]);
    assert_eq!(rule.output, [GlyphId16::new(2)]);
    assert_eq!(rule.lang_systems, [urdu]);

    let text = text_report(&bytes).unwrap();
    let features = section(&text, "OPENTYPE FEATURES");
    assert_eq!(features.len(), 1);
    assert!(features[0].starts_with("locl    Localized Forms"), "{}", features[0]);
    assert!(features[0].contains(" arab   URD "), "{}", features[0]);
    let substitutions = section(&text, "SUBSTITUTIONS");
    assert_eq!(substitutions.len(), 1);
    assert!(
        substitutions[0].contains("uni06F7") && substitutions[0].contains("-> uni06F7.urdu"),
        "{}",
        substitutions[0]
    );
}

#[test]
fn text_output_is_deterministic() {
    let bytes = urdu_font();
    assert_eq!(text_report(&bytes).unwrap(), text_report(&bytes).unwrap());
}

#[test]
fn tex_has_a_line_per_row() {
    let bytes = urdu_font();
    let font = load_font(&bytes, None).unwrap();
    let extracted = extract(&FontFile::new(font)).unwrap();
    let report = Report::assemble(&extracted, "Test");
    let mut buf = Vec::new();
    render::tex::write_report(&mut buf, &report, Path::new("fonts/Test.ttf")).unwrap();
    let tex = String::from_utf8(buf).unwrap();

    let glyph_rows = tex
        .lines()
        .skip_while(|line| *line != "\\section{Glyphs Coverage}")
        .skip_while(|line| *line != "\\endfoot")
        .skip(1)
        .take_while(|line| *line != "\\end{longtable}")
        .count();
    assert_eq!(glyph_rows, 3);
    assert!(tex.contains("\\glyph{2}{uni06F7.urdu}"));
}

#[test]
fn not_a_font() {
    let err = text_report(b"this is not a font, just some text").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)), "{err:?}");
    assert_eq!(err.stage(), "font parsing");
}

#[test]
fn truncated_gsub() {
    let mut gsub = single_sub_gsub(b"locl", b"arab", b"URD ", &[(1, 2)]);
    // keep the header, lose the lists it points to
    gsub.truncate(10);
    let bytes = build_font(
        &[".notdef", "uni06F7", "uni06F7.urdu"],
        &[('\u{06F7}', 1)],
        &[(Tag::new(b"GSUB"), gsub)],
    );
    let err = text_report(&bytes).unwrap_err();
    match err {
        Error::CorruptTable { table, .. } => assert_eq!(table, Tag::new(b"GSUB")),
        other => panic!("expected a corrupt GSUB, got {other:?}"),
    }
}

#[test]
fn cli_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let font_path = dir.path().join("Urdu-Regular.ttf");
    let out_path = dir.path().join("report.txt");
    std::fs::write(&font_path, urdu_font()).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_fontreport"))
        .arg(&font_path)
        .arg(&out_path)
        .status()
        .unwrap();
    assert!(status.success());
    let text = std::fs::read_to_string(&out_path).unwrap();
    assert!(text.starts_with("FONT METADATA\n           Title: Urdu-Regular\n"), "{text}");
    assert_eq!(section(&text, "SUBSTITUTIONS").len(), 1);
}

#[test]
fn cli_reports_the_failing_stage() {
    let dir = tempfile::tempdir().unwrap();
    let font_path = dir.path().join("notes.ttf");
    std::fs::write(&font_path, "plain text").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fontreport"))
        .arg(&font_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: font parsing: "), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_rejects_sample_text_for_plain_output() {
    let dir = tempfile::tempdir().unwrap();
    let font_path = dir.path().join("Urdu-Regular.ttf");
    std::fs::write(&font_path, urdu_font()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fontreport"))
        .arg(&font_path)
        .arg(dir.path().join("sample.txt"))
        .args(["--render", "\u{06F7}"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: input: "), "{stderr}");
}

#[test]
fn cli_missing_engine() {
    let dir = tempfile::tempdir().unwrap();
    let font_path = dir.path().join("Urdu-Regular.ttf");
    std::fs::write(&font_path, urdu_font()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fontreport"))
        .arg(&font_path)
        .arg(dir.path().join("report.pdf"))
        .args(["--engine", "no-such-tex-engine-anywhere"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: rendering: "), "{stderr}");
    // the TeX source is kept for inspection
    assert!(dir.path().join("report.tex").exists());
}
