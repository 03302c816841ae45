//! The report as a XeLaTeX document

use std::{borrow::Cow, io, path::Path};

use crate::{
    error::Error,
    model::GlyphClass,
    report::{Cell, ChartPage, GlyphRef, Report, Table},
};

use super::{codepoint, font_location};

const PREAMBLE: &str = r"\documentclass[10pt]{article}
\usepackage[a4paper,margin=2cm]{geometry}
\usepackage{fontspec}
\usepackage{longtable}
\usepackage[table]{xcolor}
\usepackage{hyperref}
\hypersetup{colorlinks=true,linkcolor=blue}
\definecolor{header}{HTML}{DDDDDD}
\definecolor{ligature}{HTML}{FFF3C4}
\definecolor{mark}{HTML}{D6E9FF}
\definecolor{component}{HTML}{FFD9D9}
\definecolor{missing}{gray}{.85}
\setlength{\parindent}{0pt}
\newcommand{\glyph}[2]{{\customfont\XeTeXglyph #1}\,{\scriptsize\texttt{#2}}}
\newcommand{\chartcell}[2]{\begin{tabular}[c]{@{}c@{}}{\customfont\symbol{#1}}\\ {\tiny #2}\end{tabular}}";

/// Write the whole report as TeX source; `font_path` is the font to typeset glyphs with.
pub fn write_report(f: &mut dyn io::Write, report: &Report, font_path: &Path) -> Result<(), Error> {
    writeln!(f, "{PREAMBLE}")?;
    writeln!(f, "{}", font_declaration(font_path))?;
    writeln!(f, "\\title{{{}}}", escape(&report.title))?;
    writeln!(f, "\\author{{{}}}", escape(&report.author))?;
    writeln!(f, "\\date{{{}}}", escape(&report.version))?;
    writeln!(f, "\\begin{{document}}")?;
    writeln!(f, "\\maketitle")?;
    writeln!(f, "\\tableofcontents")?;
    writeln!(f, "\\newpage")?;

    writeln!(f, "\\section{{Font Metadata}}")?;
    writeln!(f, "\\begin{{longtable}}[l]{{|r|p{{.7\\textwidth}}|}}")?;
    writeln!(f, "\\hline")?;
    for (label, value) in report.metadata() {
        writeln!(f, "{} & {} \\\\ \\hline", escape(label), escape(&value))?;
    }
    writeln!(f, "\\end{{longtable}}")?;

    writeln!(f, "\\section{{Summary}}")?;
    writeln!(f, "\\begin{{tabular}}{{|l|r|}}")?;
    writeln!(f, "\\hline")?;
    for (label, count) in report.summary() {
        writeln!(f, "{} & {count} \\\\ \\hline", escape(label))?;
    }
    writeln!(f, "\\end{{tabular}}")?;

    for table in report.tables() {
        write_table(f, &table)?;
    }
    write_charts(f, &report.charts())?;
    writeln!(f, "\\end{{document}}")?;
    Ok(())
}

/// A `\section` holding one `longtable`, one source line per row.
pub fn write_table(f: &mut dyn io::Write, table: &Table) -> Result<(), Error> {
    let columns = table.columns();
    let spec = columns
        .iter()
        .map(|column| column.tex)
        .collect::<Vec<_>>()
        .join("|");
    let titles = columns
        .iter()
        .map(|column| format!("\\textbf{{{}}}", escape(column.title)))
        .collect::<Vec<_>>()
        .join(" & ");

    writeln!(f, "\\section{{{}}}", escape(table.section.title()))?;
    writeln!(f, "\\begin{{longtable}}[l]{{|{spec}|}}")?;
    writeln!(f, "\\hline")?;
    writeln!(f, "\\rowcolor{{header}} {titles} \\\\")?;
    writeln!(f, "\\hline")?;
    writeln!(f, "\\endhead")?;
    writeln!(f, "\\hline")?;
    writeln!(f, "\\endfoot")?;
    for row in &table.rows {
        let color = match row.class {
            GlyphClass::Ligature | GlyphClass::Mark | GlyphClass::Component => row.class.name(),
            GlyphClass::Unclassified | GlyphClass::Base => None,
        };
        let cells = row.cells.iter().map(cell_tex).collect::<Vec<_>>().join(" & ");
        match color {
            Some(color) => writeln!(f, "\\rowcolor{{{color}}} {cells} \\\\")?,
            None => writeln!(f, "{cells} \\\\")?,
        }
    }
    writeln!(f, "\\end{{longtable}}")?;
    Ok(())
}

/// A `\subsection` per chart page, one source line per chart row.
///
/// Mapped cells show the character in the font, unmapped cells are shaded.
pub fn write_charts(f: &mut dyn io::Write, charts: &[ChartPage]) -> Result<(), Error> {
    if charts.is_empty() {
        return Ok(());
    }
    let side = ChartPage::SIDE;
    let spec = vec!["c"; side as usize].join("|");
    writeln!(f, "\\section{{Unicode Charts}}")?;
    for page in charts {
        writeln!(f, "\\subsection{{{:04X} - {:04X}}}", page.start, page.end())?;
        writeln!(f, "\\begin{{tabular}}{{r|{spec}|}}")?;
        let header = (0..side)
            .map(|column| {
                let rule = if column + 1 == side { "|" } else { "" };
                format!(
                    "\\multicolumn{{1}}{{c{rule}}}{{{:03X}}}",
                    page.start / side + column
                )
            })
            .collect::<Vec<_>>()
            .join(" & ");
        writeln!(f, "& {header} \\\\")?;
        writeln!(f, "\\cline{{2-{}}}", side + 1)?;
        for row in 0..side {
            let cells = (0..side)
                .map(|column| {
                    let cp = page.codepoint(row, column);
                    if page.is_mapped(cp) {
                        format!("\\chartcell{{{cp}}}{{{cp:04X}}}")
                    } else {
                        format!("\\cellcolor{{missing}}{{\\tiny {cp:04X}}}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" & ");
            writeln!(f, "{{\\small {row:X}}} & {cells} \\\\")?;
            writeln!(f, "\\cline{{2-{}}}", side + 1)?;
        }
        writeln!(f, "\\end{{tabular}}")?;
        writeln!(f, "\\pagebreak")?;
    }
    Ok(())
}

fn font_declaration(font_path: &Path) -> String {
    let (dir, file) = font_location(font_path);
    format!("\\newfontface\\customfont[Path = {dir}/, Color = 0000AA]{{{file}}}")
}

fn glyph_tex(glyph: &GlyphRef) -> String {
    format!("\\glyph{{{}}}{{{}}}", glyph.id.to_u16(), escape(&glyph.name))
}

fn glyphs_tex(glyphs: &[GlyphRef], sep: &str) -> String {
    glyphs.iter().map(glyph_tex).collect::<Vec<_>>().join(sep)
}

fn cell_tex(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => escape(text).into_owned(),
        Cell::Number(n) => n.to_string(),
        Cell::CodeRange { start, end } if start == end => {
            format!("\\texttt{{{}}}", codepoint(*start))
        }
        Cell::CodeRange { start, end } => {
            format!("\\texttt{{{}..{}}}", codepoint(*start), codepoint(*end))
        }
        Cell::CodePoints(cps) => {
            let cps = cps.iter().map(|cp| codepoint(*cp)).collect::<Vec<_>>();
            format!("\\texttt{{{}}}", cps.join(", "))
        }
        Cell::Glyph(glyph) => glyph_tex(glyph),
        Cell::Sequence(glyphs) => glyphs_tex(glyphs, " "),
        Cell::Alternatives(glyphs) => glyphs_tex(glyphs, ", "),
        Cell::Arrow => "$\\rightarrow$".to_string(),
        Cell::Empty => "--".to_string(),
    }
}

/// Escape characters with special meaning to TeX; newlines become spaces.
pub fn escape(s: &str) -> Cow<str> {
    const SPECIAL: &[char] = &[
        '\\', '{', '}', '$', '&', '#', '^', '_', '%', '~', '[', ']', '\n', '\r',
    ];
    if !s.contains(SPECIAL) {
        return s.into();
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '{' | '}' | '$' | '&' | '#' | '_' | '%' => {
                out.push('\\');
                out.push(c);
            }
            '[' | ']' => {
                out.push('{');
                out.push(c);
                out.push('}');
            }
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out.into()
}
