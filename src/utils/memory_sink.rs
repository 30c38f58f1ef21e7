//! In-memory sink implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use crate::traits::*;
use crate::types::*;

/// In-memory store for accepted statements, for testing and development.
///
/// Clones share the same underlying store, so a clone kept by a test observes
/// everything accepted through the processor.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    statements: Arc<RwLock<Vec<PersistedStatement>>>,
}

impl MemorySink {
    /// Create a new, empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored statements, in insertion order
    pub fn all(&self) -> Vec<PersistedStatement> {
        self.read().clone()
    }

    /// Number of stored statements
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Stored statements carrying the given reference
    pub fn find_by_reference(&self, reference: i64) -> Vec<PersistedStatement> {
        self.read()
            .iter()
            .filter(|s| s.reference == reference)
            .cloned()
            .collect()
    }

    /// Stored statements for the given account number
    pub fn find_by_account_number(&self, account_number: &str) -> Vec<PersistedStatement> {
        self.read()
            .iter()
            .filter(|s| s.account_number == account_number)
            .cloned()
            .collect()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<PersistedStatement>> {
        self.statements
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<PersistedStatement>> {
        self.statements
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AcceptedRecordsSink for MemorySink {
    async fn accept(&self, statements: &[PersistedStatement]) -> StatementResult<()> {
        if statements.is_empty() {
            info!("No statements to store");
            return Ok(());
        }

        let mut stored = self.write();
        let first_id = stored.len() as u64 + 1;
        stored.extend(statements.iter().cloned().enumerate().map(|(offset, mut s)| {
            s.id = Some(first_id + offset as u64);
            s
        }));

        info!(count = statements.len(), "Stored accepted statements");
        Ok(())
    }
}
