use crate::storage::error::StorageError;
use crate::types::observation::Observation;
use log::debug;
use std::collections::{hash_map::Entry, HashMap};
use std::sync::Mutex;
use uuid::Uuid;

/// Storage of observations, keyed by id.
///
/// Every call is its own transaction: it either applies completely or leaves the
/// store untouched. Callers never batch several records into one call.
pub trait Repository {
    /// Every stored observation.
    fn find_all(&self) -> Result<Vec<Observation>, StorageError>;

    /// The observation with `id`, if one is stored.
    fn find_by_id(&self, id: Uuid) -> Result<Option<Observation>, StorageError>;

    /// Stores a new observation and returns it unchanged.
    ///
    /// # Errors
    ///
    /// [`StorageError::DuplicateId`] when an observation with the same id is already stored.
    fn save(&self, observation: Observation) -> Result<Observation, StorageError>;

    /// Replaces the observation stored under `id`. The stored replacement always keeps `id`,
    /// whatever id `observation` carries.
    ///
    /// # Errors
    ///
    /// [`StorageError::RecordMissing`] when nothing is stored under `id`.
    fn update(&self, id: Uuid, observation: Observation) -> Result<Observation, StorageError>;

    /// Removes the observation with `id`. Returns whether anything was removed.
    fn delete(&self, id: Uuid) -> Result<bool, StorageError>;
}

#[derive(Debug, Default)]
struct Store {
    records: Vec<Observation>,
    positions: HashMap<Uuid, usize>,
}

/// A [`Repository`] held in process memory. `find_all` returns records in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: Mutex<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Holds the store for the whole call. Operations check everything they need before
    // their first write, so an `Err` leaves the store as it was.
    fn transaction<T>(
        &self,
        operation: &str,
        body: impl FnOnce(&mut Store) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| StorageError::TransactionPoisoned)?;
        debug!("begin {}", operation);
        let result = body(&mut *store);
        match &result {
            Ok(_) => debug!("commit {}", operation),
            Err(e) => debug!("rollback {}: {}", operation, e),
        }
        result
    }
}

impl Repository for InMemoryRepository {
    fn find_all(&self) -> Result<Vec<Observation>, StorageError> {
        self.transaction("find_all", |store| Ok(store.records.clone()))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Observation>, StorageError> {
        self.transaction("find_by_id", |store| {
            Ok(store
                .positions
                .get(&id)
                .map(|&position| store.records[position].clone()))
        })
    }

    fn save(&self, observation: Observation) -> Result<Observation, StorageError> {
        self.transaction("save", |store| {
            let position = store.records.len();
            match store.positions.entry(observation.id) {
                Entry::Occupied(_) => Err(StorageError::DuplicateId(observation.id)),
                Entry::Vacant(entry) => {
                    entry.insert(position);
                    store.records.push(observation.clone());
                    Ok(observation)
                }
            }
        })
    }

    fn update(&self, id: Uuid, observation: Observation) -> Result<Observation, StorageError> {
        self.transaction("update", |store| {
            let position = *store
                .positions
                .get(&id)
                .ok_or(StorageError::RecordMissing(id))?;
            let replacement = observation.with_id(id);
            store.records[position] = replacement.clone();
            Ok(replacement)
        })
    }

    fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        self.transaction("delete", |store| {
            let Some(position) = store.positions.remove(&id) else {
                return Ok(false);
            };
            store.records.remove(position);
            for later in &store.records[position..] {
                if let Some(slot) = store.positions.get_mut(&later.id) {
                    *slot -= 1;
                }
            }
            Ok(true)
        })
    }
}
