//! The plain text report

use std::{borrow::Cow, io};

use crate::{
    error::Error,
    report::{Align, Cell, Column, Report, Table},
};

use super::codepoint;

/// Write the whole report as plain text.
pub fn write_report(f: &mut dyn io::Write, report: &Report) -> Result<(), Error> {
    writeln!(f, "FONT METADATA")?;
    writeln!(f, "{:>16}: {}", "Title", report.title)?;
    writeln!(f, "{:>16}: {}", "Author", report.author)?;
    writeln!(f, "{:>16}: {}", "Version", report.version)?;
    for (label, value) in report.metadata() {
        writeln!(f, "{label:>16}: {}", single_line(&value))?;
    }
    writeln!(f)?;

    writeln!(f, "SUMMARY")?;
    for (label, count) in report.summary() {
        writeln!(f, "{label:>20}: {count}")?;
    }
    writeln!(f)?;

    for table in report.tables() {
        write_table(f, &table)?;
    }
    Ok(())
}

/// A section header, a `#` column header, one line per row and a blank line.
pub fn write_table(f: &mut dyn io::Write, table: &Table) -> Result<(), Error> {
    writeln!(f, "{}", table.section.title().to_uppercase())?;
    let columns = table.columns();
    let titles = columns
        .iter()
        .map(|column| Cow::Borrowed(column.title))
        .collect::<Vec<_>>();
    writeln!(f, "# {}", format_line(columns, &titles))?;
    for row in &table.rows {
        let cells = row.cells.iter().map(cell_text).collect::<Vec<_>>();
        writeln!(f, "{}", format_line(columns, &cells))?;
    }
    writeln!(f)?;
    Ok(())
}

fn format_line(columns: &[Column], cells: &[Cow<str>]) -> String {
    let mut line = String::new();
    for (i, (column, cell)) in columns.iter().zip(cells).enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let width = column.width;
        match column.align {
            Align::Left => line.push_str(&format!("{cell:<width$}")),
            Align::Right => line.push_str(&format!("{cell:>width$}")),
        }
    }
    line.truncate(line.trim_end().len());
    line
}

pub(crate) fn cell_text<'a>(cell: &'a Cell) -> Cow<'a, str> {
    match cell {
        Cell::Text(text) => single_line(text),
        Cell::Number(n) => n.to_string().into(),
        Cell::CodeRange { start, end } if start == end => codepoint(*start).into(),
        Cell::CodeRange { start, end } => {
            format!("{}..{}", codepoint(*start), codepoint(*end)).into()
        }
        Cell::CodePoints(cps) => cps
            .iter()
            .map(|cp| codepoint(*cp))
            .collect::<Vec<_>>()
            .join(",")
            .into(),
        Cell::Glyph(glyph) => single_line(&glyph.name),
        Cell::Sequence(glyphs) => glyphs
            .iter()
            .map(|glyph| glyph.name.as_ref())
            .collect::<Vec<_>>()
            .join(" ")
            .into(),
        Cell::Alternatives(glyphs) => glyphs
            .iter()
            .map(|glyph| glyph.name.as_ref())
            .collect::<Vec<_>>()
            .join(" | ")
            .into(),
        Cell::Arrow => "->".into(),
        Cell::Empty => "-".into(),
    }
}

/// Keep one row per line, whatever the font's strings contain
fn single_line(s: &str) -> Cow<str> {
    if s.contains(['\n', '\r']) {
        s.replace("\r\n", " ").replace(['\n', '\r'], " ").into()
    } else {
        s.into()
    }
}
