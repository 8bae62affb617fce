use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The seven positional fields of a data line, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Location,
    Province,
    MaxTemperature,
    MaxTemperatureTime,
    MinTemperature,
    MinTemperatureTime,
    Precipitation,
}

impl RecordField {
    /// Fields in the order they appear on a line.
    pub const ORDER: [RecordField; 7] = [
        RecordField::Location,
        RecordField::Province,
        RecordField::MaxTemperature,
        RecordField::MaxTemperatureTime,
        RecordField::MinTemperature,
        RecordField::MinTemperatureTime,
        RecordField::Precipitation,
    ];

    /// Zero-based column of this field on a `;`-separated line.
    pub fn column(&self) -> usize {
        match self {
            RecordField::Location => 0,
            RecordField::Province => 1,
            RecordField::MaxTemperature => 2,
            RecordField::MaxTemperatureTime => 3,
            RecordField::MinTemperature => 4,
            RecordField::MinTemperatureTime => 5,
            RecordField::Precipitation => 6,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            RecordField::Location => "location",
            RecordField::Province => "province",
            RecordField::MaxTemperature => "maxTemperature",
            RecordField::MaxTemperatureTime => "maxTemperatureTime",
            RecordField::MinTemperature => "minTemperature",
            RecordField::MinTemperatureTime => "minTemperatureTime",
            RecordField::Precipitation => "precipitation",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The field is not present on the line at all.
    Missing,
    /// Not a decimal number with a `.` separator.
    InvalidNumber,
    /// Parsed, but NaN or infinite.
    NonFiniteNumber,
    /// Not an `H:mm` time of day.
    InvalidTime,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MalformedReason::Missing => "field is missing",
            MalformedReason::InvalidNumber => "expected a decimal number",
            MalformedReason::NonFiniteNumber => "number must be finite",
            MalformedReason::InvalidTime => "expected a time formatted as H:mm",
        };
        write!(f, "{}", text)
    }
}

/// A line whose fields do not parse as expected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Malformed {field} value '{value}' ({reason}) in line '{line}'")]
pub struct MalformedRecordError {
    pub field: RecordField,
    pub value: String,
    pub line: String,
    pub reason: MalformedReason,
}

/// Failure while reading a data file or folder. Nothing read so far is returned.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to open data folder '{0}'")]
    FolderOpen(PathBuf, #[source] std::io::Error),

    #[error("Failed to list an entry of data folder '{0}'")]
    FolderEntry(PathBuf, #[source] std::io::Error),

    #[error("Failed to read data file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("File name '{file_name}' does not contain an 8-digit yyyyMMdd date (found '{digits}')")]
    FileNameDate { file_name: String, digits: String },

    #[error("Line {line_number} of '{file}' has {found} fields, expected at least {expected}")]
    FieldCount {
        file: PathBuf,
        line_number: usize,
        found: usize,
        expected: usize,
    },

    #[error("Malformed record at line {line_number} of '{file}'")]
    MalformedRecord {
        file: PathBuf,
        line_number: usize,
        #[source]
        source: MalformedRecordError,
    },
}
