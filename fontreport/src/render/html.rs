//! An HTML page of the font's ligatures and substitutions, for checking shaping in a browser

use std::io;

use crate::{
    error::Error,
    model::{tag_str, LanguageSystem, DFLT_LANG, DFLT_SCRIPT},
    report::Report,
};

/// One `<div>` per rule whose input glyphs are all encoded.
///
/// Each line shows the input characters separated (so they are not shaped
/// together) and then joined, so the browser applies the substitution.
pub fn write_report(f: &mut dyn io::Write, report: &Report) -> Result<(), Error> {
    writeln!(f, "<!DOCTYPE html>")?;
    writeln!(f, "<html>")?;
    writeln!(f, "<head><meta charset=\"utf-8\"><title>{}</title></head>", html_escape(&report.title))?;
    writeln!(f, "<body>")?;
    for rule in report.ligatures().iter().chain(report.substitutions()) {
        let Some(codepoints) = rule
            .input
            .iter()
            .map(|gid| report.glyph_ref(*gid).codepoint)
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };
        let chars = codepoints
            .iter()
            .map(|cp| format!("&#x{cp:04X};"))
            .collect::<Vec<_>>();
        let lang = rule
            .lang_systems
            .first()
            .map(|sys| format!(" lang=\"{}\"", lang_attribute(sys)))
            .unwrap_or_default();
        writeln!(f, "<div{lang}>{} = {}</div>", chars.join(" + "), chars.concat())?;
    }
    writeln!(f, "</body>")?;
    writeln!(f, "</html>")?;
    Ok(())
}

/// `script-LANG` from a language system, omitting defaults
fn lang_attribute(sys: &LanguageSystem) -> String {
    match (sys.script, sys.language) {
        (DFLT_SCRIPT, DFLT_LANG) => "und".to_string(),
        (script, DFLT_LANG) => tag_str(script),
        (DFLT_SCRIPT, language) => tag_str(language),
        (script, language) => format!("{}-{}", tag_str(script), tag_str(language)),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
