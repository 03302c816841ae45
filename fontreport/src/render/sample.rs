//! Typesetting sample text with the inspected font

use std::{io, path::Path};

use crate::error::Error;

use super::{font_location, tex::escape};

/// Text to render and the OpenType settings to render it with
#[derive(Clone, Debug, Default)]
pub struct SampleText<'a> {
    pub text: &'a str,
    pub features: &'a [String],
    pub script: Option<&'a str>,
    pub language: Option<&'a str>,
}

impl SampleText<'_> {
    fn has_settings(&self) -> bool {
        !self.features.is_empty() || self.script.is_some() || self.language.is_some()
    }

    /// fontspec options for the sample font, with script and language in
    /// XeTeX's raw feature syntax
    fn font_options(&self) -> String {
        let mut raw = Vec::new();
        if let Some(script) = self.script {
            raw.push(format!("script={}", script.trim()));
        }
        if let Some(language) = self.language {
            raw.push(format!("language={}", language.trim()));
        }
        raw.extend(self.features.iter().map(|tag| format!("+{}", tag.trim())));
        if raw.is_empty() {
            "Scale=2".to_string()
        } else {
            format!("Scale=2,RawFeature={{{}}}", raw.join(";"))
        }
    }

    fn description(&self) -> String {
        let mut parts = Vec::new();
        if !self.features.is_empty() {
            parts.push(format!("features {}", self.features.join(", ")));
        }
        if let Some(script) = self.script {
            parts.push(format!("script {script}"));
        }
        if let Some(language) = self.language {
            parts.push(format!("language {language}"));
        }
        parts.join("; ")
    }
}

/// A `letter` document showing `sample` set in the font at `font_path`.
///
/// When features, a script or a language are requested, each line is also
/// shown with the font's defaults for comparison.
pub fn write_document(
    f: &mut dyn io::Write,
    font_path: &Path,
    sample: &SampleText,
) -> Result<(), Error> {
    let (dir, file) = font_location(font_path);

    writeln!(f, "\\documentclass{{letter}}")?;
    writeln!(f, "\\usepackage[a4paper,margin=2cm]{{geometry}}")?;
    writeln!(f, "\\usepackage{{fontspec}}")?;
    writeln!(f, "\\setlength{{\\parindent}}{{0pt}}")?;
    writeln!(
        f,
        "\\newfontface\\samplefont[Path = {dir}/, {}]{{{file}}}",
        sample.font_options()
    )?;
    if sample.has_settings() {
        writeln!(f, "\\newfontface\\reffont[Path = {dir}/, Scale=2]{{{file}}}")?;
    }
    writeln!(f, "\\begin{{document}}")?;
    if sample.has_settings() {
        writeln!(f, "{}\\\\[1em]", escape(&sample.description()))?;
    }
    for line in sample.text.lines().filter(|line| !line.trim().is_empty()) {
        let line = escape(line);
        writeln!(f, "{{\\samplefont {line}}}\\\\")?;
        if sample.has_settings() {
            writeln!(f, "{{\\reffont {line}}}\\\\[1em]")?;
        }
    }
    writeln!(f, "\\end{{document}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(sample: &SampleText) -> String {
        let mut buf = Vec::new();
        write_document(&mut buf, Path::new("fonts/Fake.otf"), sample).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_sample() {
        let doc = render(&SampleText {
            text: "office\n\nfinal 100%",
            ..Default::default()
        });
        assert_eq!(
            doc,
            "\\documentclass{letter}\n\
             \\usepackage[a4paper,margin=2cm]{geometry}\n\
             \\usepackage{fontspec}\n\
             \\setlength{\\parindent}{0pt}\n\
             \\newfontface\\samplefont[Path = fonts/, Scale=2]{Fake.otf}\n\
             \\begin{document}\n\
             {\\samplefont office}\\\\\n\
             {\\samplefont final 100\\%}\\\\\n\
             \\end{document}\n"
        );
    }

    #[test]
    fn features_add_a_reference_line() {
        let features = vec!["dlig".to_string(), "ss01".to_string()];
        let doc = render(&SampleText {
            text: "office",
            features: &features,
            script: Some("arab"),
            language: Some("URD"),
        });
        assert!(doc.contains(
            "\\newfontface\\samplefont[Path = fonts/, Scale=2,RawFeature={script=arab;language=URD;+dlig;+ss01}]{Fake.otf}"
        ));
        assert!(doc.contains("\\newfontface\\reffont[Path = fonts/, Scale=2]{Fake.otf}"));
        assert!(doc.contains("features dlig, ss01; script arab; language URD\\\\[1em]"));
        assert!(doc.contains("{\\samplefont office}\\\\\n{\\reffont office}\\\\[1em]\n"));
    }
}
