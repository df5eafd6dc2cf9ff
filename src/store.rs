use crate::error::{Error, Result};
use crate::model::{Collection, RawRecord, Record};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

const FIELDS: usize = 6;

/// Backing file of a collection.
///
/// A store without a path is unavailable: loading and saving both fail with
/// [`Error::StoreUnavailable`].
#[derive(Clone, Debug)]
pub struct Store {
    path: Option<PathBuf>,
}

impl Store {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn load(&self) -> Result<Collection> {
        let path = self.path.as_ref().ok_or(Error::StoreUnavailable)?;
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let collection = parse(&content).map_err(|source| Error::Csv {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), records = collection.len(), "records loaded");
        Ok(collection)
    }

    /// Replace the content of the backing file with `collection`.
    ///
    /// The new content goes to a sibling temporary file first, which is then
    /// renamed over the backing file.
    pub fn save(&self, collection: &Collection) -> Result<()> {
        let path = self.path.as_ref().ok_or(Error::StoreUnavailable)?;
        let content = serialize(collection).map_err(|source| Error::Csv {
            path: path.clone(),
            source,
        })?;
        let tmp = temporary_path(path);
        fs::write(&tmp, content).map_err(|source| Error::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, path) {
            if let Err(e) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %e, "cannot remove temporary file");
            }
            return Err(Error::Io {
                path: path.clone(),
                source,
            });
        }
        info!(path = %path.display(), records = collection.len(), "records saved");
        Ok(())
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Parse the content of a marks file.
///
/// A leading count line is ignored. Lines without exactly six fields, or
/// with non-numeric marks, are skipped.
pub fn parse(content: &str) -> Result<Collection, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);
        if idx == 0 && row.len() == 1 && row[0].parse::<i64>().is_ok() {
            trace!(line, count = &row[0], "skipping count header");
            continue;
        }
        if row.len() != FIELDS {
            debug!(line, fields = row.len(), "skipping malformed line");
            continue;
        }
        let raw: RawRecord = row.deserialize(None)?;
        match Record::try_from(raw) {
            Ok(record) => records.push(record),
            Err(e) => warn!(line, error = %e, "skipping invalid record"),
        }
    }
    Ok(Collection::new(records))
}

/// Render `collection` in the marks file format, count line included.
pub fn serialize(collection: &Collection) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record([collection.len().to_string()])?;
    for record in collection {
        writer.write_record(record.to_fields())?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
