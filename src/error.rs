use std::error::Error as StdError;
use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Errors raised by the record store.
#[derive(Debug)]
pub enum Error {
    /// No backing file could be resolved for this session.
    StoreUnavailable,
    /// A numeric field of a record could not be converted.
    InvalidRecordData {
        field: &'static str,
        value: String,
        source: ParseIntError,
    },
    /// Reading or writing the backing file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The backing file content could not be tokenized.
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreUnavailable => write!(f, "studentMarks.txt not found"),
            Self::InvalidRecordData { field, value, .. } => {
                write!(f, "invalid {field} value {value:?}")
            }
            Self::Io { path, .. } => write!(f, "cannot access {}", path.display()),
            Self::Csv { path, .. } => write!(f, "cannot parse {}", path.display()),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::StoreUnavailable => None,
            Self::InvalidRecordData { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
