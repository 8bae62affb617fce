use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export directory '{0}'")]
    CreateFolder(PathBuf, #[source] std::io::Error),

    #[error("Failed to write export file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to serialize observations for '{0}'")]
    Serialize(PathBuf, #[source] serde_json::Error),
}
