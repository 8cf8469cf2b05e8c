use std::sync::Mutex;

use super::{AuditError, AuditFilter, AuditRecord, AuditStore};

/// In-memory audit store. Records live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<AuditRecord>>, AuditError> {
        self.records
            .lock()
            .map_err(|e| AuditError::Storage(format!("lock poisoned: {}", e)))
    }
}

impl AuditStore for MemoryAuditStore {
    fn insert(&self, record: &AuditRecord) -> Result<i64, AuditError> {
        let mut records = self.lock()?;
        let id = records.len() as i64 + 1;
        let mut stored = record.clone();
        stored.id = id;
        records.push(stored);
        Ok(id)
    }

    fn query(&self, filter: &AuditFilter) -> Result<Vec<AuditRecord>, AuditError> {
        let records = self.lock()?;
        Ok(records
            .iter()
            .filter(|r| filter.matches(r))
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect())
    }

    fn count(&self, filter: &AuditFilter) -> Result<usize, AuditError> {
        let records = self.lock()?;
        Ok(records.iter().filter(|r| filter.matches(r)).count())
    }
}
