//! Reads daily data files (one file per day) and whole folders of them.
//!
//! The observation date is not part of the file content: it is taken from the
//! 8-digit `yyyyMMdd` token in the file name, so `Aemet20170209.csv` and
//! `data_2017-02-09.csv` both describe 2017-02-09.

use crate::ingest::encoding::decode_legacy_line;
use crate::ingest::error::IngestError;
use crate::ingest::record_parser::{parse_record, FIELD_COUNT};
use crate::types::observation::Observation;
use chrono::NaiveDate;
use log::{debug, info};
use std::path::Path;
use uuid::Uuid;

const FIELD_SEPARATOR: char = ';';

/// Produces the id of each freshly parsed observation.
pub type IdGenerator = fn() -> Uuid;

/// Reads data files into [`Observation`]s.
///
/// An `Ingestor` holds no state besides its id generator, so one instance can be
/// reused for any number of files and folders.
#[derive(Debug, Clone, Copy)]
pub struct Ingestor {
    id_generator: IdGenerator,
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}

impl Ingestor {
    /// Creates an ingestor that assigns random v4 UUIDs.
    pub fn new() -> Self {
        Self {
            id_generator: Uuid::new_v4,
        }
    }

    /// Creates an ingestor that takes every id from `id_generator`.
    ///
    /// Useful when ids must be predictable, for example in tests.
    pub fn with_id_generator(id_generator: IdGenerator) -> Self {
        Self { id_generator }
    }

    /// Reads every regular file directly inside `folder` and concatenates their records.
    ///
    /// Sub-directories are skipped, not descended into. Files are processed in the
    /// order the operating system lists them, which is not guaranteed to be stable.
    /// An empty folder yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns the first [`IngestError`] encountered. Records read from earlier files
    /// are discarded.
    pub fn ingest_folder(&self, folder: &Path) -> Result<Vec<Observation>, IngestError> {
        let entries = std::fs::read_dir(folder)
            .map_err(|e| IngestError::FolderOpen(folder.to_path_buf(), e))?;

        let mut observations = Vec::new();
        let mut files_read = 0usize;
        for entry in entries {
            let entry = entry.map_err(|e| IngestError::FolderEntry(folder.to_path_buf(), e))?;
            let path = entry.path();
            if !path.is_file() {
                debug!("Skipping {:?}: not a regular file", path);
                continue;
            }
            // The lossy name only feeds the date; the file is opened by its real path.
            let file_name = entry.file_name().to_string_lossy().into_owned();
            observations.extend(self.read_file(&path, &file_name)?);
            files_read += 1;
        }

        info!(
            "Read {} observations from {} files in {:?}",
            observations.len(),
            files_read,
            folder
        );
        Ok(observations)
    }

    /// Reads one daily data file located at `folder/file_name`.
    ///
    /// Each line is decoded from Windows-1252 (unless it is already valid UTF-8),
    /// split on `;` and parsed. Every line is data, blank ones included; only the
    /// terminator of the last line does not start a new one.
    ///
    /// # Errors
    ///
    /// * [`IngestError::FileNameDate`] if `file_name` carries no valid `yyyyMMdd` date.
    /// * [`IngestError::FileRead`] if the file cannot be read.
    /// * [`IngestError::FieldCount`] if a line has fewer than seven fields.
    /// * [`IngestError::MalformedRecord`] if a field fails to parse.
    ///
    /// On error no record of the file is returned.
    pub fn ingest_file(
        &self,
        folder: &Path,
        file_name: &str,
    ) -> Result<Vec<Observation>, IngestError> {
        self.read_file(&folder.join(file_name), file_name)
    }

    fn read_file(&self, path: &Path, file_name: &str) -> Result<Vec<Observation>, IngestError> {
        let date = date_from_file_name(file_name)?;
        let path = path.to_path_buf();
        let bytes = std::fs::read(&path).map_err(|e| IngestError::FileRead(path.clone(), e))?;

        let mut observations = Vec::new();
        for (index, raw_line) in lines(&bytes).enumerate() {
            let line = decode_legacy_line(raw_line);
            let line_number = index + 1;
            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            if fields.len() < FIELD_COUNT {
                return Err(IngestError::FieldCount {
                    file: path,
                    line_number,
                    found: fields.len(),
                    expected: FIELD_COUNT,
                });
            }

            let observation = parse_record(&fields, date, (self.id_generator)(), &line)
                .map_err(|source| IngestError::MalformedRecord {
                    file: path.clone(),
                    line_number,
                    source,
                })?;
            observations.push(observation);
        }

        debug!(
            "Parsed {} observations for {} from {:?}",
            observations.len(),
            date,
            path
        );
        Ok(observations)
    }
}

// Splits on `\n`, `\r\n` or a trailing `\r`. A terminator at the very end closes the
// last line instead of opening an empty one, and an empty file has no lines.
fn lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = (!bytes.is_empty()).then(|| {
        bytes
            .strip_suffix(b"\n")
            .or_else(|| bytes.strip_suffix(b"\r"))
            .unwrap_or(bytes)
    });
    body.into_iter()
        .flat_map(|body| body.split(|&b| b == b'\n'))
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Derives the observation date from a data file name.
///
/// Every non-digit character is removed and the remaining digits must read as
/// `yyyyMMdd`.
///
/// # Errors
///
/// Returns [`IngestError::FileNameDate`] when there are not exactly eight digits or
/// they do not form a calendar date.
pub fn date_from_file_name(file_name: &str) -> Result<NaiveDate, IngestError> {
    let digits: String = file_name.chars().filter(|c| c.is_ascii_digit()).collect();
    let invalid = || IngestError::FileNameDate {
        file_name: file_name.to_string(),
        digits: digits.clone(),
    };
    if digits.len() != 8 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(&digits, "%Y%m%d").map_err(|_| invalid())
}
