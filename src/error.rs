use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for the loading, parsing and writing stages.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the individual pipeline stages.
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be opened, read, created or written.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The lookup table is not valid CSV or lacks a required column.
    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The same (dstport, protocol) pair appears twice in the lookup table.
    #[error(
        "The pair ('{port}', '{protocol}') appears more than once in {}, please check.",
        .path.display()
    )]
    DuplicateKey {
        port: String,
        protocol: String,
        path: PathBuf,
    },

    /// A log record whose version field is not `2`.
    #[error("The log file {} is not in version 2, please check.", .path.display())]
    VersionMismatch {
        path: PathBuf,
        line: usize,
        version: String,
    },

    /// A version 2 log record that is too short to hold a port and protocol.
    #[error(
        "line {line} of {} has {found} fields, expected at least {expected}",
        .path.display()
    )]
    MalformedLine {
        path: PathBuf,
        line: usize,
        found: usize,
        expected: usize,
    },

    /// The report would replace an existing file.
    #[error(
        "The given output file {} already exists. It will not be overwritten. Program ends.",
        .path.display()
    )]
    OutputExists { path: PathBuf },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
