//! Names of the features in the OpenType layout tag registry

use write_fonts::types::Tag;

pub const UNKNOWN_FEATURE: &str = "N/A";

/// The registered name for a feature tag, or [`UNKNOWN_FEATURE`].
pub fn feature_name(tag: Tag) -> &'static str {
    let bytes = tag.to_be_bytes();
    if let Some(name) = numbered_feature(&bytes) {
        return name;
    }
    REGISTERED
        .binary_search_by(|(registered, _)| registered.as_bytes().cmp(&bytes[..]))
        .map(|idx| REGISTERED[idx].1)
        .unwrap_or(UNKNOWN_FEATURE)
}

/// `ss01`..`ss20` and `cv01`..`cv99` are registered as ranges.
fn numbered_feature(bytes: &[u8; 4]) -> Option<&'static str> {
    let num = std::str::from_utf8(&bytes[2..])
        .ok()
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))?
        .parse::<u8>()
        .ok()?;
    match &bytes[..2] {
        b"ss" if (1..=20).contains(&num) => Some("Stylistic Set"),
        b"cv" if (1..=99).contains(&num) => Some("Character Variant"),
        _ => None,
    }
}

/// Sorted by tag
static REGISTERED: &[(&str, &str)] = &[
    ("aalt", "Access All Alternates"),
    ("abvf", "Above-base Forms"),
    ("abvm", "Above-base Mark Positioning"),
    ("abvs", "Above-base Substitutions"),
    ("afrc", "Alternative Fractions"),
    ("akhn", "Akhands"),
    ("apkn", "Kerning for Alternate Proportional Widths"),
    ("blwf", "Below-base Forms"),
    ("blwm", "Below-base Mark Positioning"),
    ("blws", "Below-base Substitutions"),
    ("c2pc", "Petite Capitals From Capitals"),
    ("c2sc", "Small Capitals From Capitals"),
    ("calt", "Contextual Alternates"),
    ("case", "Case-Sensitive Forms"),
    ("ccmp", "Glyph Composition / Decomposition"),
    ("cfar", "Conjunct Form After Ro"),
    ("chws", "Contextual Half-width Spacing"),
    ("cjct", "Conjunct Forms"),
    ("clig", "Contextual Ligatures"),
    ("cpct", "Centered CJK Punctuation"),
    ("cpsp", "Capital Spacing"),
    ("cswh", "Contextual Swash"),
    ("curs", "Cursive Positioning"),
    ("dist", "Distances"),
    ("dlig", "Discretionary Ligatures"),
    ("dnom", "Denominators"),
    ("dtls", "Dotless Forms"),
    ("expt", "Expert Forms"),
    ("falt", "Final Glyph on Line Alternates"),
    ("fin2", "Terminal Forms #2"),
    ("fin3", "Terminal Forms #3"),
    ("fina", "Terminal Forms"),
    ("flac", "Flattened accent forms"),
    ("frac", "Fractions"),
    ("fwid", "Full Widths"),
    ("half", "Half Forms"),
    ("haln", "Halant Forms"),
    ("halt", "Alternate Half Widths"),
    ("hist", "Historical Forms"),
    ("hkna", "Horizontal Kana Alternates"),
    ("hlig", "Historical Ligatures"),
    ("hngl", "Hangul"),
    ("hojo", "Hojo Kanji Forms (JIS X 0212-1990 Kanji Forms)"),
    ("hwid", "Half Widths"),
    ("init", "Initial Forms"),
    ("isol", "Isolated Forms"),
    ("ital", "Italics"),
    ("jalt", "Justification Alternates"),
    ("jp04", "JIS2004 Forms"),
    ("jp78", "JIS78 Forms"),
    ("jp83", "JIS83 Forms"),
    ("jp90", "JIS90 Forms"),
    ("kern", "Kerning"),
    ("lfbd", "Left Bounds"),
    ("liga", "Standard Ligatures"),
    ("ljmo", "Leading Jamo Forms"),
    ("lnum", "Lining Figures"),
    ("locl", "Localized Forms"),
    ("ltra", "Left-to-right alternates"),
    ("ltrm", "Left-to-right mirrored forms"),
    ("mark", "Mark Positioning"),
    ("med2", "Medial Forms #2"),
    ("medi", "Medial Forms"),
    ("mgrk", "Mathematical Greek"),
    ("mkmk", "Mark to Mark Positioning"),
    ("mset", "Mark Positioning via Substitution"),
    ("nalt", "Alternate Annotation Forms"),
    ("nlck", "NLC Kanji Forms"),
    ("nukt", "Nukta Forms"),
    ("numr", "Numerators"),
    ("onum", "Oldstyle Figures"),
    ("opbd", "Optical Bounds"),
    ("ordn", "Ordinals"),
    ("ornm", "Ornaments"),
    ("palt", "Proportional Alternate Widths"),
    ("pcap", "Petite Capitals"),
    ("pkna", "Proportional Kana"),
    ("pnum", "Proportional Figures"),
    ("pref", "Pre-Base Forms"),
    ("pres", "Pre-base Substitutions"),
    ("pstf", "Post-base Forms"),
    ("psts", "Post-base Substitutions"),
    ("pwid", "Proportional Widths"),
    ("qwid", "Quarter Widths"),
    ("rand", "Randomize"),
    ("rclt", "Required Contextual Alternates"),
    ("rkrf", "Rakar Forms"),
    ("rlig", "Required Ligatures"),
    ("rphf", "Reph Forms"),
    ("rtbd", "Right Bounds"),
    ("rtla", "Right-to-left alternates"),
    ("rtlm", "Right-to-left mirrored forms"),
    ("ruby", "Ruby Notation Forms"),
    ("rvrn", "Required Variation Alternates"),
    ("salt", "Stylistic Alternates"),
    ("sinf", "Scientific Inferiors"),
    ("size", "Optical size"),
    ("smcp", "Small Capitals"),
    ("smpl", "Simplified Forms"),
    ("ssty", "Math script style alternates"),
    ("stch", "Stretching Glyph Decomposition"),
    ("subs", "Subscript"),
    ("sups", "Superscript"),
    ("swsh", "Swash"),
    ("titl", "Titling"),
    ("tjmo", "Trailing Jamo Forms"),
    ("tnam", "Traditional Name Forms"),
    ("tnum", "Tabular Figures"),
    ("trad", "Traditional Forms"),
    ("twid", "Third Widths"),
    ("unic", "Unicase"),
    ("valt", "Alternate Vertical Metrics"),
    ("vatu", "Vattu Variants"),
    ("vchw", "Vertical Contextual Half-width Spacing"),
    ("vert", "Vertical Writing"),
    ("vhal", "Alternate Vertical Half Metrics"),
    ("vjmo", "Vowel Jamo Forms"),
    ("vkna", "Vertical Kana Alternates"),
    ("vkrn", "Vertical Kerning"),
    ("vpal", "Proportional Alternate Vertical Metrics"),
    ("vrt2", "Vertical Alternates and Rotation"),
    ("vrtr", "Vertical Alternates for Rotation"),
    ("zero", "Slashed Zero"),
];
