//! CLI app for reporting on a font's coverage and layout

use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use clap::Parser;
use fontreport::{
    args::{Args, OutputKind},
    extract, load_font,
    render::{self, sample::SampleText},
    typeset, Error, FontFile, Report,
};
use log::{info, warn};

fn main() -> ExitCode {
    env_logger::builder()
        .format(|buf, record| {
            let ts = buf.timestamp_micros();
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{}: {:?}: {style}{}{style:#}: {}",
                ts,
                std::thread::current().id(),
                record.level(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}: {e}", e.stage());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let kind = args.output_kind();
    let data = fs::read(&args.font_path).map_err(|inner| Error::Load {
        path: args.font_path.clone(),
        inner,
    })?;
    let sample = sample_text(args)?;
    if sample.is_some() && !kind.is_typeset() {
        return Err(Error::TextRequiresTex(kind));
    }

    let font = load_font(&data, args.index)?;
    // TeX resolves the font relative to its own working directory
    let tex_font_path =
        fs::canonicalize(&args.font_path).unwrap_or_else(|_| args.font_path.clone());

    let mut buf = Vec::new();
    match sample {
        Some(text) => {
            let sample = SampleText {
                text: &text,
                features: &args.features,
                script: args.script.as_deref(),
                language: args.language.as_deref(),
            };
            render::sample::write_document(&mut buf, &tex_font_path, &sample)?;
        }
        None => {
            let extracted = extract(&FontFile::new(font))?;
            let fallback_title = args
                .font_path
                .file_stem()
                .map(|stem| stem.to_string_lossy())
                .unwrap_or_default();
            let report = Report::assemble(&extracted, &fallback_title);
            match kind {
                OutputKind::Text => render::text::write_report(&mut buf, &report)?,
                OutputKind::Tex | OutputKind::Pdf => {
                    render::tex::write_report(&mut buf, &report, &tex_font_path)?
                }
                OutputKind::Html => render::html::write_report(&mut buf, &report)?,
            }
        }
    }
    deliver(args, kind, &buf)
}

/// The text to typeset instead of the report, if any was requested.
fn sample_text(args: &Args) -> Result<Option<String>, Error> {
    if let Some(path) = args.render_file.as_ref() {
        return fs::read_to_string(path)
            .map(Some)
            .map_err(|inner| Error::Load {
                path: path.clone(),
                inner,
            });
    }
    Ok(args.render.clone())
}

fn deliver(args: &Args, kind: OutputKind, content: &[u8]) -> Result<(), Error> {
    let Some(out) = args.out.as_ref() else {
        if kind == OutputKind::Pdf {
            warn!("PDF output needs an output path, writing TeX source to stdout");
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(content)?;
        stdout.flush()?;
        return Ok(());
    };
    if kind != OutputKind::Pdf {
        write_file(out, content)?;
        info!("Wrote {kind} report to {}", out.display());
        return Ok(());
    }
    let tex_path = out.with_extension("tex");
    write_file(&tex_path, content)?;
    typeset::compile_pdf(&args.engine, &tex_path)?;
    info!("Wrote {}", out.with_extension("pdf").display());
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), Error> {
    fs::write(path, content).map_err(|inner| Error::FileWrite {
        path: path.to_owned(),
        inner,
    })
}
