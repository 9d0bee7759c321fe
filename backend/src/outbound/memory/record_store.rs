//! Mutex-guarded in-memory record repository.
//!
//! Every port call takes the lock once, so each operation is atomic. The
//! guard never crosses an `.await`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, error};

use super::IdStrategy;
use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{Record, RecordDraft, RecordId};

#[derive(Debug)]
struct StoreState {
    records: BTreeMap<RecordId, Record>,
    /// `None` once the monotonic counter has handed out `u64::MAX`.
    next_id: Option<RecordId>,
}

impl StoreState {
    /// Pick an unused id, or `None` when the id space is exhausted.
    fn allocate(&mut self, strategy: IdStrategy) -> Option<RecordId> {
        match strategy {
            IdStrategy::Monotonic => {
                let id = self.next_id?;
                self.next_id = id.next();
                Some(id)
            }
            IdStrategy::MaxPlusOne => self
                .records
                .keys()
                .next_back()
                .map_or(Some(RecordId::new(1)), |max| max.next()),
        }
    }
}

/// Record repository holding everything in process memory.
///
/// # Examples
/// ```
/// use registry_backend::outbound::memory::{IdStrategy, InMemoryRecordRepository};
///
/// let repo = InMemoryRecordRepository::new(IdStrategy::Monotonic);
/// assert_eq!(repo.strategy(), IdStrategy::Monotonic);
/// ```
#[derive(Debug)]
pub struct InMemoryRecordRepository {
    state: Mutex<StoreState>,
    strategy: IdStrategy,
}

impl Default for InMemoryRecordRepository {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

impl InMemoryRecordRepository {
    /// Create an empty store allocating ids with `strategy`.
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            state: Mutex::new(StoreState {
                records: BTreeMap::new(),
                next_id: Some(RecordId::new(1)),
            }),
            strategy,
        }
    }

    /// Id allocation strategy in use.
    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    fn with_state<T>(
        &self,
        op: impl FnOnce(&mut StoreState) -> T,
    ) -> Result<T, RecordRepositoryError> {
        let mut guard = self.state.lock().map_err(|_| {
            error!("record store lock poisoned");
            RecordRepositoryError::unavailable("record store lock poisoned")
        })?;
        Ok(op(&mut guard))
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn list(&self) -> Result<Vec<Record>, RecordRepositoryError> {
        self.with_state(|state| state.records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, RecordRepositoryError> {
        self.with_state(|state| state.records.get(&id).cloned())
    }

    async fn insert(&self, draft: RecordDraft) -> Result<Record, RecordRepositoryError> {
        let strategy = self.strategy;
        let record = self
            .with_state(|state| {
                state.allocate(strategy).map(|id| {
                    let record = draft.into_record(id);
                    state.records.insert(id, record.clone());
                    record
                })
            })?
            .ok_or_else(|| {
                error!(strategy = %strategy, "record ids exhausted");
                RecordRepositoryError::unavailable("record ids exhausted")
            })?;
        debug!(record_id = %record.id, strategy = %strategy, "stored new record");
        Ok(record)
    }

    async fn replace(&self, record: Record) -> Result<bool, RecordRepositoryError> {
        self.with_state(|state| match state.records.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        })
    }

    async fn remove(&self, id: RecordId) -> Result<bool, RecordRepositoryError> {
        self.with_state(|state| state.records.remove(&id).is_some())
    }
}
