use crate::export::error::ExportError;
use crate::ingest::error::IngestError;
use crate::storage::error::StorageError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum MeteoError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("No observation with id {0}")]
    NotFound(Uuid),
}
