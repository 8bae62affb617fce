//! Ingestion of daily data files: line decoding, record parsing, file and folder reading.

pub mod encoding;
pub mod error;
pub mod ingestor;
pub mod record_parser;
