use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage transaction could not start: a previous call panicked while holding the store")]
    TransactionPoisoned,

    #[error("An observation with id {0} is already stored")]
    DuplicateId(Uuid),

    #[error("No stored observation has id {0}")]
    RecordMissing(Uuid),
}
