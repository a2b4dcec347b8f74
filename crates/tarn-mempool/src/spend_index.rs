//! Outpoint → spender index.
//!
//! Maps each outpoint consumed by a pooled transaction to the txid of that
//! transaction. Parent→child edges of the pool's dependency graph are
//! derived from this index on demand (query a transaction's own outputs as
//! outpoints), never stored as adjacency lists: detaching an index mapping
//! is what severs an edge.

use std::collections::HashMap;

use tarn_core::error::MempoolError;
use tarn_core::types::{OutPoint, Transaction, TxId};

/// Single-spender index over the currently pooled transactions.
///
/// Invariant: an outpoint is a key only while some pooled transaction has an
/// input referencing it, and at most one transaction claims an outpoint at a
/// time. Conflicts are resolved by the acceptance pipeline before
/// registration, never left ambiguous here.
#[derive(Debug, Default)]
pub struct SpendIndex {
    spenders: HashMap<OutPoint, TxId>,
}

impl SpendIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every input outpoint of `tx` as claimed by `txid`.
    ///
    /// Verifies all outpoints first and only then inserts, so a rejected
    /// registration leaves no partial claims behind. Fails with
    /// [`MempoolError::OutpointAlreadyClaimed`] if any outpoint is held by a
    /// different txid; once the acceptance pipeline has resolved conflicts
    /// this must never trigger.
    pub fn register_inputs(&mut self, txid: TxId, tx: &Transaction) -> Result<(), MempoolError> {
        for input in &tx.inputs {
            if let Some(claimant) = self.spenders.get(&input.previous_output) {
                if *claimant != txid {
                    return Err(MempoolError::OutpointAlreadyClaimed {
                        outpoint: input.previous_output.to_string(),
                        claimed_by: claimant.to_string(),
                    });
                }
            }
        }
        for input in &tx.inputs {
            self.spenders.insert(input.previous_output.clone(), txid);
        }
        Ok(())
    }

    /// Remove the mappings previously registered for `tx`'s inputs.
    ///
    /// Idempotent-safe: mappings that are absent, or held by a different
    /// txid, are left alone. This defends against cascaded removals that
    /// have already detached part of the state.
    pub fn unregister_inputs(&mut self, txid: TxId, tx: &Transaction) {
        for input in &tx.inputs {
            self.release(&input.previous_output, txid);
        }
    }

    /// Remove a single mapping if it is held by `txid`; otherwise a no-op.
    pub fn release(&mut self, outpoint: &OutPoint, txid: TxId) {
        if self.spenders.get(outpoint) == Some(&txid) {
            self.spenders.remove(outpoint);
        }
    }

    /// The pooled transaction currently spending `outpoint`, if any.
    ///
    /// Used both to detect conflicts on acceptance and to walk descendant
    /// edges during removal.
    pub fn find_spender(&self, outpoint: &OutPoint) -> Option<TxId> {
        self.spenders.get(outpoint).copied()
    }

    pub fn len(&self) -> usize {
        self.spenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spenders.is_empty()
    }
}
