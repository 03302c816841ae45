use std::{path::PathBuf, process::ExitStatus};

use write_fonts::{read::ReadError, types::Tag};

use crate::args::OutputKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read path '{path}': '{inner}'")]
    Load {
        path: PathBuf,
        inner: std::io::Error,
    },
    #[error("could not create file '{path}': '{inner}'")]
    FileWrite {
        path: PathBuf,
        inner: std::io::Error,
    },
    #[error("write error: '{0}'")]
    Write(#[from] std::io::Error),
    #[error("rendering text requires a .pdf or .tex output, not {0}")]
    TextRequiresTex(OutputKind),
    #[error("not a valid TrueType/OpenType font: '{0}'")]
    UnsupportedFormat(ReadError),
    #[error("missing table '{0}'")]
    MissingTable(Tag),
    #[error("could not parse '{table}' table: '{inner}'")]
    CorruptTable { table: Tag, inner: ReadError },
    #[error("could not run typesetting engine '{engine}': '{inner}'")]
    EngineUnavailable {
        engine: String,
        inner: std::io::Error,
    },
    #[error("typesetting engine '{engine}' failed ({status}):\n{diagnostic}")]
    Typesetting {
        engine: String,
        status: ExitStatus,
        diagnostic: String,
    },
}

impl Error {
    /// Wrap a read error that occurred while parsing the given table.
    pub(crate) fn corrupt(table: Tag) -> impl Fn(ReadError) -> Error {
        move |inner| Error::CorruptTable { table, inner }
    }

    /// The pipeline stage that produced this error, for user-facing messages.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Load { .. } | Error::TextRequiresTex(_) => "input",
            Error::UnsupportedFormat(_) | Error::MissingTable(_) | Error::CorruptTable { .. } => {
                "font parsing"
            }
            Error::EngineUnavailable { .. } | Error::Typesetting { .. } => "rendering",
            Error::FileWrite { .. } | Error::Write(_) => "output",
        }
    }
}
