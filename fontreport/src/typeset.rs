//! Running an external TeX engine over generated source

use std::{
    path::Path,
    process::{Command, Output},
};

use log::{debug, info};

use crate::error::Error;

/// Lines of log kept after each `!` error line
const CONTEXT_LINES: usize = 4;
/// Lines of log forwarded when the engine reported no `!` errors
const TAIL_LINES: usize = 20;

/// Compile `tex_path` to PDF next to it.
///
/// The engine runs twice so the table of contents is populated.
pub fn compile_pdf(engine: &str, tex_path: &Path) -> Result<(), Error> {
    let out_dir = tex_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    for pass in 1..=2 {
        info!("Running {engine} on {}, pass {pass}", tex_path.display());
        let output = Command::new(engine)
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(format!("-output-directory={}", out_dir.display()))
            .arg(tex_path)
            .output()
            .map_err(|inner| Error::EngineUnavailable {
                engine: engine.to_string(),
                inner,
            })?;
        check(engine, output)?;
    }
    Ok(())
}

fn check(engine: &str, output: Output) -> Result<(), Error> {
    if output.status.success() {
        debug!("{engine} finished");
        return Ok(());
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(Error::Typesetting {
        engine: engine.to_string(),
        status: output.status,
        diagnostic: diagnostic(&stdout, &stderr),
    })
}

/// The useful part of an engine's output: each `!` line and the lines after
/// it, or the tail of the log when there are none, then anything on stderr.
fn diagnostic(stdout: &str, stderr: &str) -> String {
    let lines = stdout.lines().collect::<Vec<_>>();
    let mut keep = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if line.starts_with('!') {
            let end = (i + 1 + CONTEXT_LINES).min(lines.len());
            keep.extend_from_slice(&lines[i..end]);
        }
    }
    if keep.is_empty() {
        keep.extend_from_slice(&lines[lines.len().saturating_sub(TAIL_LINES)..]);
    }
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        keep.push(stderr);
    }
    keep.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_engine() {
        let dir = tempfile::tempdir().unwrap();
        let tex = dir.path().join("report.tex");
        std::fs::write(&tex, "\\end").unwrap();
        let err = compile_pdf("no-such-tex-engine-anywhere", &tex).unwrap_err();
        assert!(
            matches!(&err, Error::EngineUnavailable { engine, .. } if engine == "no-such-tex-engine-anywhere"),
            "{err:?}"
        );
        assert_eq!(err.stage(), "rendering");
    }

    #[cfg(unix)]
    #[test]
    fn failing_engine() {
        let dir = tempfile::tempdir().unwrap();
        let tex = dir.path().join("report.tex");
        std::fs::write(&tex, "\\end").unwrap();
        let err = compile_pdf("false", &tex).unwrap_err();
        assert!(matches!(err, Error::Typesetting { .. }), "{err:?}");
    }

    #[test]
    fn error_lines_with_context() {
        let log = "This is XeTeX\n(./report.tex\n! Undefined control sequence.\nl.12 \\foo\n\n?\nmore\nignored\n";
        assert_eq!(
            diagnostic(log, ""),
            "! Undefined control sequence.\nl.12 \\foo\n\n?\nmore"
        );
    }

    #[test]
    fn tail_without_error_lines() {
        let log = (0..30).map(|i| format!("line {i}\n")).collect::<String>();
        let diag = diagnostic(&log, "fontspec error\n");
        assert!(diag.starts_with("line 10\n"), "{diag}");
        assert!(diag.ends_with("line 29\nfontspec error"), "{diag}");
    }
}
