use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

/// Report on the unicode coverage, glyphs and OpenType layout of a font
#[derive(Clone, Debug, clap::Parser)]
#[command(version)]
pub struct Args {
    /// A TrueType or OpenType font, or a font collection
    pub font_path: PathBuf,
    /// Destination for the report. The extension picks the format:
    /// .pdf, .tex, .html, anything else is plain text. Default is stdout.
    pub out: Option<PathBuf>,
    /// Output format, overriding the one implied by the output extension
    /// (one of text/tex/pdf/html, case insensitive)
    #[arg(long)]
    pub format: Option<OutputKind>,
    /// Index of font to examine, if target is a font collection
    #[arg(short, long)]
    pub index: Option<u32>,
    /// The TeX engine used to produce PDF output
    #[arg(long, default_value = "xelatex")]
    pub engine: String,
    /// Text to render using the provided font
    #[arg(long, conflicts_with = "render_file")]
    pub render: Option<String>,
    /// A UTF-8 file with text to render using the provided font
    #[arg(long)]
    pub render_file: Option<PathBuf>,
    /// OpenType features to enable when rendering text (repeatable)
    #[arg(long = "features")]
    pub features: Vec<String>,
    /// Script to use when rendering text
    #[arg(long)]
    pub script: Option<String>,
    /// Language to use when rendering text
    #[arg(long)]
    pub language: Option<String>,
}

impl Args {
    /// The output format, from `--format` or the output path's extension.
    pub fn output_kind(&self) -> OutputKind {
        self.format
            .unwrap_or_else(|| OutputKind::for_path(self.out.as_deref()))
    }
}

/// What kind of output to produce
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputKind {
    #[default]
    Text,
    Tex,
    Pdf,
    Html,
}

impl OutputKind {
    /// Pick an output kind from a file extension; unknown or missing
    /// extensions mean plain text.
    pub fn for_path(path: Option<&Path>) -> OutputKind {
        let ext = path
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => OutputKind::Pdf,
            Some("tex") => OutputKind::Tex,
            Some("html") | Some("htm") => OutputKind::Html,
            _ => OutputKind::Text,
        }
    }

    /// `true` if this output is produced from TeX source.
    pub fn is_typeset(self) -> bool {
        matches!(self, OutputKind::Tex | OutputKind::Pdf)
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputKind::Text => f.write_str("text"),
            OutputKind::Tex => f.write_str("tex"),
            OutputKind::Pdf => f.write_str("pdf"),
            OutputKind::Html => f.write_str("html"),
        }
    }
}

impl FromStr for OutputKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static ERR_MSG: &str = "expected one of 'text', 'tex', 'pdf', 'html'";
        match s.to_ascii_lowercase().trim() {
            "text" | "txt" => Ok(Self::Text),
            "tex" => Ok(Self::Tex),
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            _ => Err(ERR_MSG),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, OutputKind::Text)]
    #[case(Some("report.txt"), OutputKind::Text)]
    #[case(Some("report"), OutputKind::Text)]
    #[case(Some("out/report.PDF"), OutputKind::Pdf)]
    #[case(Some("report.tex"), OutputKind::Tex)]
    #[case(Some("report.html"), OutputKind::Html)]
    fn kind_from_extension(#[case] path: Option<&str>, #[case] expected: OutputKind) {
        assert_eq!(OutputKind::for_path(path.map(Path::new)), expected);
    }

    #[test]
    fn format_flag_overrides_extension() {
        let args = Args::parse_from(["fontreport", "font.ttf", "report.txt", "--format", "TeX"]);
        assert_eq!(args.output_kind(), OutputKind::Tex);

        let args = Args::parse_from(["fontreport", "font.ttf", "report.pdf"]);
        assert_eq!(args.output_kind(), OutputKind::Pdf);
        assert_eq!(args.engine, "xelatex");
    }

    #[test]
    fn repeated_features() {
        let args = Args::parse_from([
            "fontreport",
            "font.otf",
            "sample.pdf",
            "--render",
            "office",
            "--features",
            "liga",
            "--features",
            "dlig",
        ]);
        assert_eq!(args.features, ["liga", "dlig"]);
        assert_eq!(args.render.as_deref(), Some("office"));
    }

    #[test]
    fn bad_format() {
        assert!("svg".parse::<OutputKind>().is_err());
    }
}
