//! Pool entries and their keyed storage.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use tarn_core::error::MempoolError;
use tarn_core::types::{Transaction, TxId};

/// A transaction stored in the pool with its metadata.
///
/// Entries are immutable once inserted: the pool never updates an entry in
/// place, replacement is always remove-then-insert of a distinct entry. The
/// entry owns its transaction exclusively; readers get references or clones.
#[derive(Debug, Clone)]
pub struct PoolEntry {
    /// The unconfirmed transaction.
    pub tx: Transaction,
    /// Precomputed transaction id.
    pub txid: TxId,
    /// Absolute fee in tarns, computed upstream from the resolved inputs.
    pub fee: u64,
    /// Policy priority score supplied by the caller.
    pub priority: f64,
    /// Wall-clock insertion time.
    pub entry_time: DateTime<Utc>,
    /// Chain height at insertion, for maturity/priority computation upstream.
    pub entry_height: u64,
    /// Canonical serialized size in bytes.
    pub size: usize,
}

/// Keyed storage of pool entries: txid → entry.
///
/// Knows nothing about the spend graph; graph edges live in
/// [`SpendIndex`](crate::spend_index::SpendIndex).
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: HashMap<TxId, PoolEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its txid.
    ///
    /// Fails with [`MempoolError::DuplicateKey`] if the txid is already
    /// present; the store is unchanged in that case.
    pub fn insert(&mut self, entry: PoolEntry) -> Result<(), MempoolError> {
        match self.entries.entry(entry.txid) {
            std::collections::hash_map::Entry::Occupied(occupied) => {
                Err(MempoolError::DuplicateKey(occupied.key().to_string()))
            }
            std::collections::hash_map::Entry::Vacant(vacant) => {
                vacant.insert(entry);
                Ok(())
            }
        }
    }

    /// Look up an entry by txid.
    pub fn lookup(&self, txid: &TxId) -> Option<&PoolEntry> {
        self.entries.get(txid)
    }

    /// Remove and return the entry if present; absent keys are a no-op.
    pub fn erase(&mut self, txid: &TxId) -> Option<PoolEntry> {
        self.entries.remove(txid)
    }

    pub fn contains(&self, txid: &TxId) -> bool {
        self.entries.contains_key(txid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = &PoolEntry> {
        self.entries.values()
    }

    /// Collect all stored txids.
    pub fn txids(&self) -> Vec<TxId> {
        self.entries.keys().copied().collect()
    }
}
