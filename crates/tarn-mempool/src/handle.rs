//! Shared pool handle with a single coarse critical section.
//!
//! The pool is one shared mutable resource hit from several call sites
//! (transaction validation, block connect/disconnect, policy sweeps, RPC).
//! Rather than an ambient global, collaborators each hold a clone of
//! [`MempoolHandle`]; every operation locks the whole pool for its full
//! duration, so no caller ever observes a half-applied acceptance or
//! removal. External validation and fee computation happen before the lock
//! is taken; all their facts arrive as plain arguments.

use std::sync::Arc;

use parking_lot::Mutex;

use tarn_core::error::MempoolError;
use tarn_core::types::{Transaction, TxId};

use crate::entry::PoolEntry;
use crate::pool::{Accepted, Mempool};

/// Cloneable handle to a pool guarded by one coarse mutex.
#[derive(Clone)]
pub struct MempoolHandle {
    inner: Arc<Mutex<Mempool>>,
}

impl MempoolHandle {
    /// Wrap a pool for shared access. Built once at node startup and cloned
    /// into each collaborator.
    pub fn new(pool: Mempool) -> Self {
        Self { inner: Arc::new(Mutex::new(pool)) }
    }

    /// Accept a transaction; one atomic critical section.
    ///
    /// Racing accepts on the same outpoint serialize here: one wins, the
    /// other then observes the post-insertion state and is judged against
    /// the new incumbent under the same rules.
    pub fn accept(
        &self,
        tx: Transaction,
        fee: u64,
        priority: f64,
        height: u64,
    ) -> Result<Accepted, MempoolError> {
        self.inner.lock().accept(tx, fee, priority, height)
    }

    /// Remove a transaction (and optionally its descendant closure); one
    /// atomic critical section.
    pub fn remove(&self, target: &Transaction, recursive: bool) -> Vec<PoolEntry> {
        self.inner.lock().remove(target, recursive)
    }

    /// Apply a connected block's effects to the pool atomically.
    pub fn remove_for_block(&self, block_txs: &[Transaction]) -> Vec<PoolEntry> {
        self.inner.lock().remove_for_block(block_txs)
    }

    /// Clone out a pool entry by txid.
    pub fn lookup(&self, txid: &TxId) -> Option<PoolEntry> {
        self.inner.lock().lookup(txid).cloned()
    }

    pub fn contains(&self, txid: &TxId) -> bool {
        self.inner.lock().contains(txid)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run a composite read under the lock.
    ///
    /// For multi-step queries (e.g. a mining template walk) that must see
    /// one consistent snapshot.
    pub fn read<R>(&self, f: impl FnOnce(&Mempool) -> R) -> R {
        f(&self.inner.lock())
    }
}
