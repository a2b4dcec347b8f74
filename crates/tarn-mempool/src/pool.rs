//! In-memory pool of unconfirmed transactions.
//!
//! The pool stores validated transactions awaiting inclusion in blocks and
//! tracks, through the spend index, which pooled transactions consume
//! outputs of which others. That derived dependency graph drives two
//! operations:
//!
//! - **Removal** cascades through the descendant closure of a transaction,
//!   so invalidating or superseding a parent never strands children that
//!   spend its outputs.
//! - **Acceptance** detects double-spends against the pool and applies the
//!   injected replacement policy to decide whether the incumbent (and its
//!   descendants) may be evicted in favour of the incoming transaction.
//!
//! Transactions must be validated by the caller before acceptance; fee and
//! priority arrive precomputed. The pool itself only checks duplicates and
//! input conflicts.
//!
//! Not thread-safe; wrap in [`MempoolHandle`](crate::handle::MempoolHandle)
//! for shared access.

use std::collections::{HashSet, VecDeque};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use tarn_core::error::MempoolError;
use tarn_core::types::{OutPoint, Transaction, TxId};

use crate::config::MempoolConfig;
use crate::entry::{EntryStore, PoolEntry};
use crate::policy::{DustPolicy, ReplacementPolicy};
use crate::spend_index::SpendIndex;

/// Result of a successful acceptance.
#[derive(Debug)]
pub struct Accepted {
    /// Id of the newly pooled transaction.
    pub txid: TxId,
    /// Entries evicted to make room, in descendant-before-ancestor order.
    /// Empty unless the acceptance replaced a conflicting transaction.
    pub evicted: Vec<PoolEntry>,
}

/// Dependency-aware pool of unconfirmed transactions.
///
/// Composes the keyed [`EntryStore`] with the outpoint-keyed [`SpendIndex`];
/// every mutation keeps the two consistent: an entry exists iff its txid
/// keys the store, and an outpoint is claimed iff a pooled transaction's
/// input references it.
pub struct Mempool {
    /// Primary storage: txid → entry.
    entries: EntryStore,
    /// Spent outpoint → txid of the pool transaction that spends it.
    spends: SpendIndex,
    /// Injected replacement-eligibility rule.
    policy: Box<dyn ReplacementPolicy>,
    /// Current total serialized bytes in the pool.
    total_bytes: usize,
}

impl Mempool {
    /// Create a pool with the default policy built from `config`.
    pub fn new(config: MempoolConfig) -> Self {
        Self::with_policy(DustPolicy { dust_limit: config.dust_limit })
    }

    /// Create a pool with a custom replacement policy.
    pub fn with_policy(policy: impl ReplacementPolicy + 'static) -> Self {
        Self {
            entries: EntryStore::new(),
            spends: SpendIndex::new(),
            policy: Box::new(policy),
            total_bytes: 0,
        }
    }

    /// Accept a validated transaction into the pool.
    ///
    /// `fee` and `priority` are computed upstream from inputs the pool does
    /// not resolve; `height` is the chain height at submission. On success
    /// the transaction is pooled and any conflicting transactions (plus
    /// their descendants) have been evicted; the evicted entries are
    /// returned for relay notification.
    ///
    /// Rejections (`AlreadyInPool`, `ConflictNotReplaceable`) leave the pool
    /// unchanged.
    pub fn accept(
        &mut self,
        tx: Transaction,
        fee: u64,
        priority: f64,
        height: u64,
    ) -> Result<Accepted, MempoolError> {
        // Id and size from a single canonical encoding.
        let bytes = tx.canonical_bytes()?;
        let txid = TxId::digest(&bytes);
        let size = bytes.len();

        if self.entries.contains(&txid) {
            return Err(MempoolError::AlreadyInPool(txid.to_string()));
        }

        // Distinct pool transactions already claiming one of our inputs.
        let mut seen = HashSet::new();
        let conflicts: Vec<TxId> = tx
            .inputs
            .iter()
            .filter_map(|input| self.spends.find_spender(&input.previous_output))
            .filter(|id| seen.insert(*id))
            .collect();

        let mut evicted = Vec::new();
        if !conflicts.is_empty() {
            // Replacement is permitted only when every output of every
            // conflicting transaction, and of every pooled descendant of
            // one, is unspendable under the injected policy.
            for conflict in &conflicts {
                if !self.closure_outputs_unspendable(*conflict) {
                    debug!(%txid, incumbent = %conflict, "rejected double-spend of non-replaceable transaction");
                    return Err(MempoolError::ConflictNotReplaceable {
                        txid: conflict.to_string(),
                    });
                }
            }
            for conflict in &conflicts {
                if let Some(entry) = self.entries.lookup(conflict) {
                    let incumbent = entry.tx.clone();
                    evicted.extend(self.remove(&incumbent, true));
                }
            }
            info!(%txid, evicted = evicted.len(), "replaced conflicting pool transactions");
        }

        // Eviction must have severed every claim on our inputs; a surviving
        // claim means the removal above left the index inconsistent.
        let claimed: Vec<OutPoint> = tx
            .inputs
            .iter()
            .map(|input| input.previous_output.clone())
            .collect();
        if let Err(err) = self.spends.register_inputs(txid, &tx) {
            error!(%txid, %err, "outpoint claim survived conflict eviction");
            return Err(MempoolError::Internal(format!(
                "claim survived eviction: {err}"
            )));
        }

        let entry = PoolEntry {
            tx,
            txid,
            fee,
            priority,
            entry_time: Utc::now(),
            entry_height: height,
            size,
        };
        if let Err(err) = self.entries.insert(entry) {
            // Unreachable after the in-pool check above; back out the index
            // registrations so no partial state is left behind.
            for outpoint in &claimed {
                self.spends.release(outpoint, txid);
            }
            error!(%txid, %err, "entry store rejected insert after duplicate check");
            return Err(MempoolError::Internal(format!(
                "insert after conflict resolution: {err}"
            )));
        }
        self.total_bytes += size;

        debug!(%txid, fee, size, "accepted transaction into pool");
        Ok(Accepted { txid, evicted })
    }

    /// Remove a transaction and, if `recursive`, its full descendant
    /// closure. Returns the removed entries, each appearing after its own
    /// descendants.
    ///
    /// The recursive form also sweeps descendants of a `target` that is not
    /// itself pooled, the path taken when a parent confirms elsewhere and
    /// only its pooled children and grandchildren must be purged.
    ///
    /// Non-recursive removal of a transaction with pooled descendants is a
    /// caller contract violation: the pool does not promote or re-link
    /// orphaned children. Only block-connect uses the non-recursive form,
    /// where remaining children stay valid.
    pub fn remove(&mut self, target: &Transaction, recursive: bool) -> Vec<PoolEntry> {
        let txid = match target.txid() {
            Ok(txid) => txid,
            Err(err) => {
                warn!(%err, "refusing removal of unencodable transaction");
                return Vec::new();
            }
        };

        if !recursive {
            return self.detach(&txid).into_iter().collect();
        }

        // Breadth-first closure walk over the spend index. The target's own
        // outputs seed the walk whether or not the target is pooled.
        let mut order: Vec<TxId> = Vec::new();
        let mut visited: HashSet<TxId> = HashSet::new();
        visited.insert(txid);
        if self.entries.contains(&txid) {
            order.push(txid);
        }

        let mut queue: VecDeque<(TxId, usize)> = VecDeque::new();
        queue.push_back((txid, target.outputs.len()));
        while let Some((parent, output_count)) = queue.pop_front() {
            for index in 0..output_count as u64 {
                let outpoint = OutPoint { txid: parent, index };
                if let Some(spender) = self.spends.find_spender(&outpoint) {
                    if visited.insert(spender) {
                        order.push(spender);
                        if let Some(entry) = self.entries.lookup(&spender) {
                            queue.push_back((spender, entry.tx.outputs.len()));
                        }
                    }
                }
            }
        }

        // Detach deepest-first so no surviving index mapping ever points at
        // an erased entry mid-removal.
        let mut removed = Vec::with_capacity(order.len());
        for member in order.into_iter().rev() {
            if let Some(entry) = self.detach(&member) {
                removed.push(entry);
            }
        }
        if !removed.is_empty() {
            debug!(%txid, removed = removed.len(), "removed transaction closure");
        }
        removed
    }

    /// Drop confirmed transactions and sweep double-spent ones after a
    /// block connects.
    ///
    /// Confirmed transactions leave non-recursively (their pooled children
    /// now spend confirmed outputs and remain valid. Pool transactions
    /// whose inputs were spent by the block are dead along with their
    /// descendants; those are swept recursively and returned.
    pub fn remove_for_block(&mut self, block_txs: &[Transaction]) -> Vec<PoolEntry> {
        for tx in block_txs {
            self.remove(tx, false);
        }

        let mut evicted = Vec::new();
        for tx in block_txs {
            for input in &tx.inputs {
                if input.previous_output.is_null() {
                    continue;
                }
                if let Some(spender) = self.spends.find_spender(&input.previous_output) {
                    if let Some(entry) = self.entries.lookup(&spender) {
                        let conflict = entry.tx.clone();
                        evicted.extend(self.remove(&conflict, true));
                    }
                }
            }
        }
        if !evicted.is_empty() {
            info!(evicted = evicted.len(), "swept pool transactions double-spent by block");
        }
        evicted
    }

    /// Whether every output of `root`'s pooled closure (root included)
    /// passes the unspendability predicate.
    fn closure_outputs_unspendable(&self, root: TxId) -> bool {
        let mut queue = VecDeque::from([root]);
        let mut visited = HashSet::from([root]);
        while let Some(member) = queue.pop_front() {
            let Some(entry) = self.entries.lookup(&member) else {
                continue;
            };
            for (index, output) in entry.tx.outputs.iter().enumerate() {
                if !self.policy.is_unspendable(output) {
                    return false;
                }
                let outpoint = OutPoint { txid: member, index: index as u64 };
                if let Some(spender) = self.spends.find_spender(&outpoint) {
                    if visited.insert(spender) {
                        queue.push_back(spender);
                    }
                }
            }
        }
        true
    }

    /// Internal: erase one entry and sever its input claims.
    fn detach(&mut self, txid: &TxId) -> Option<PoolEntry> {
        let entry = self.entries.erase(txid)?;
        self.spends.unregister_inputs(entry.txid, &entry.tx);
        self.total_bytes -= entry.size;
        Some(entry)
    }

    /// Check if a transaction with the given txid is pooled.
    pub fn contains(&self, txid: &TxId) -> bool {
        self.entries.contains(txid)
    }

    /// Get a pool entry by txid.
    pub fn lookup(&self, txid: &TxId) -> Option<&PoolEntry> {
        self.entries.lookup(txid)
    }

    /// The pooled transaction currently spending `outpoint`, if any.
    pub fn spender_of(&self, outpoint: &OutPoint) -> Option<TxId> {
        self.spends.find_spender(outpoint)
    }

    /// Whether any input of `tx` is already spent by a pool transaction.
    pub fn has_conflict(&self, tx: &Transaction) -> bool {
        tx.inputs
            .iter()
            .any(|input| self.spends.find_spender(&input.previous_output).is_some())
    }

    /// Deduplicated txids of pool entries conflicting with `tx`.
    pub fn conflicting_txids(&self, tx: &Transaction) -> Vec<TxId> {
        let mut seen = HashSet::new();
        tx.inputs
            .iter()
            .filter_map(|input| self.spends.find_spender(&input.previous_output))
            .filter(|txid| seen.insert(*txid))
            .collect()
    }

    /// Number of transactions in the pool.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total serialized bytes of all pooled transactions.
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Total fees of all pooled transactions.
    pub fn total_fees(&self) -> u64 {
        self.entries.iter().map(|e| e.fee).sum()
    }

    /// Number of outpoints currently claimed by pooled transactions.
    pub fn claimed_outpoints(&self) -> usize {
        self.spends.len()
    }

    /// Iterate over all entries (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = &PoolEntry> {
        self.entries.iter()
    }

    /// Collect all pooled txids.
    pub fn txids(&self) -> Vec<TxId> {
        self.entries.txids()
    }
}

impl Default for Mempool {
    fn default() -> Self {
        Self::new(MempoolConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarn_core::constants::{COIN, DUST_LIMIT};
    use tarn_core::types::{OutputScript, PubkeyHash, TxInput, TxOutput};

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn pay(value: u64) -> TxOutput {
        TxOutput { value, script: OutputScript::PayToPubkeyHash(PubkeyHash([0xEE; 32])) }
    }

    fn burn(value: u64) -> TxOutput {
        TxOutput { value, script: OutputScript::DataCarrier(vec![0x42]) }
    }

    fn make_tx(inputs: &[OutPoint], outputs: Vec<TxOutput>, lock_time: u64) -> Transaction {
        Transaction {
            version: 1,
            inputs: inputs
                .iter()
                .map(|op| TxInput {
                    previous_output: op.clone(),
                    signature: vec![0; 64],
                    public_key: vec![0; 32],
                })
                .collect(),
            outputs,
            lock_time,
        }
    }

    fn op(seed: u8, index: u64) -> OutPoint {
        OutPoint { txid: TxId([seed; 32]), index }
    }

    fn outpoint_of(tx: &Transaction, index: u64) -> OutPoint {
        OutPoint { txid: tx.txid().unwrap(), index }
    }

    fn accept(pool: &mut Mempool, tx: &Transaction, fee: u64) -> Accepted {
        pool.accept(tx.clone(), fee, 0.0, 1).unwrap()
    }

    // ------------------------------------------------------------------
    // Basic operations
    // ------------------------------------------------------------------

    #[test]
    fn new_pool_is_empty() {
        let pool = Mempool::default();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.total_bytes(), 0);
        assert_eq!(pool.total_fees(), 0);
        assert_eq!(pool.claimed_outpoints(), 0);
    }

    #[test]
    fn accept_and_lookup() {
        let mut pool = Mempool::default();
        let tx = make_tx(&[op(1, 0)], vec![pay(49 * COIN)], 0);

        let accepted = accept(&mut pool, &tx, COIN);
        assert!(accepted.evicted.is_empty());

        let entry = pool.lookup(&accepted.txid).unwrap();
        assert_eq!(entry.txid, accepted.txid);
        assert_eq!(entry.fee, COIN);
        assert_eq!(entry.tx, tx);
        assert_eq!(entry.entry_height, 1);
        assert!(entry.size > 0);
    }

    #[test]
    fn accept_updates_counters() {
        let mut pool = Mempool::default();
        let tx = make_tx(&[op(1, 0), op(2, 0)], vec![pay(49 * COIN)], 0);
        let size = tx.canonical_bytes().unwrap().len();

        accept(&mut pool, &tx, COIN);

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.total_bytes(), size);
        assert_eq!(pool.total_fees(), COIN);
        assert_eq!(pool.claimed_outpoints(), 2);
    }

    #[test]
    fn accept_duplicate_rejected() {
        let mut pool = Mempool::default();
        let tx = make_tx(&[op(1, 0)], vec![pay(49 * COIN)], 0);

        accept(&mut pool, &tx, COIN);
        let err = pool.accept(tx, COIN, 0.0, 1).unwrap_err();
        assert!(matches!(err, MempoolError::AlreadyInPool(_)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn entry_time_is_stamped() {
        let mut pool = Mempool::default();
        let before = Utc::now();
        let accepted = accept(&mut pool, &make_tx(&[op(1, 0)], vec![pay(COIN)], 0), 100);
        let entry = pool.lookup(&accepted.txid).unwrap();
        assert!(entry.entry_time >= before);
        assert!(entry.entry_time <= Utc::now());
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    #[test]
    fn remove_absent_is_noop() {
        let mut pool = Mempool::default();
        let tx = make_tx(&[op(1, 0)], vec![pay(COIN)], 0);
        assert!(pool.remove(&tx, false).is_empty());
        assert!(pool.remove(&tx, true).is_empty());
    }

    #[test]
    fn remove_single_restores_state() {
        let mut pool = Mempool::default();
        let tx = make_tx(&[op(1, 0)], vec![pay(COIN)], 0);
        accept(&mut pool, &tx, 100);

        let removed = pool.remove(&tx, true);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].tx, tx);
        assert!(pool.is_empty());
        assert_eq!(pool.total_bytes(), 0);
        assert_eq!(pool.claimed_outpoints(), 0);
    }

    #[test]
    fn remove_nonrecursive_leaves_children() {
        let mut pool = Mempool::default();
        let parent = make_tx(&[op(1, 0)], vec![pay(COIN)], 0);
        let child = make_tx(&[outpoint_of(&parent, 0)], vec![pay(COIN / 2)], 0);
        accept(&mut pool, &parent, 100);
        accept(&mut pool, &child, 100);

        let removed = pool.remove(&parent, false);
        assert_eq!(removed.len(), 1);
        assert!(pool.contains(&child.txid().unwrap()));
        // The child's claim on the parent's output must survive.
        assert_eq!(pool.claimed_outpoints(), 1);
    }

    #[test]
    fn remove_recursive_sweeps_chain() {
        let mut pool = Mempool::default();
        let parent = make_tx(&[op(1, 0)], vec![pay(COIN), pay(COIN)], 0);
        let child = make_tx(&[outpoint_of(&parent, 1)], vec![pay(COIN / 2)], 0);
        let grandchild = make_tx(&[outpoint_of(&child, 0)], vec![pay(COIN / 4)], 0);
        accept(&mut pool, &parent, 100);
        accept(&mut pool, &child, 100);
        accept(&mut pool, &grandchild, 100);

        let removed = pool.remove(&parent, true);
        assert_eq!(removed.len(), 3);
        assert!(pool.is_empty());
        assert_eq!(pool.claimed_outpoints(), 0);
    }

    #[test]
    fn remove_recursive_orders_descendants_first() {
        let mut pool = Mempool::default();
        let parent = make_tx(&[op(1, 0)], vec![pay(COIN)], 0);
        let child = make_tx(&[outpoint_of(&parent, 0)], vec![pay(COIN / 2)], 0);
        let grandchild = make_tx(&[outpoint_of(&child, 0)], vec![pay(COIN / 4)], 0);
        accept(&mut pool, &parent, 100);
        accept(&mut pool, &child, 100);
        accept(&mut pool, &grandchild, 100);

        let removed = pool.remove(&parent, true);
        let ids: Vec<TxId> = removed.iter().map(|e| e.txid).collect();
        assert_eq!(
            ids,
            vec![
                grandchild.txid().unwrap(),
                child.txid().unwrap(),
                parent.txid().unwrap()
            ]
        );
    }

    #[test]
    fn remove_recursive_without_target_pooled_sweeps_descendants() {
        let mut pool = Mempool::default();
        // Parent is never pooled (e.g. already confirmed); only the child is.
        let parent = make_tx(&[op(1, 0)], vec![pay(COIN)], 0);
        let child = make_tx(&[outpoint_of(&parent, 0)], vec![pay(COIN / 2)], 0);
        accept(&mut pool, &child, 100);

        let removed = pool.remove(&parent, true);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].txid, child.txid().unwrap());
        assert!(pool.is_empty());
    }

    // ------------------------------------------------------------------
    // Conflicts and replacement
    // ------------------------------------------------------------------

    #[test]
    fn conflict_detection() {
        let mut pool = Mempool::default();
        let shared = op(1, 0);
        let incumbent = make_tx(&[shared.clone()], vec![pay(49 * COIN)], 0);
        accept(&mut pool, &incumbent, COIN);

        let challenger = make_tx(&[shared], vec![pay(48 * COIN)], 1);
        assert!(pool.has_conflict(&challenger));
        assert_eq!(
            pool.conflicting_txids(&challenger),
            vec![incumbent.txid().unwrap()]
        );
    }

    #[test]
    fn conflicting_txids_deduplicates() {
        let mut pool = Mempool::default();
        let a = op(1, 0);
        let b = op(1, 1);
        let incumbent = make_tx(&[a.clone(), b.clone()], vec![pay(49 * COIN)], 0);
        accept(&mut pool, &incumbent, COIN);

        let challenger = make_tx(&[a, b], vec![pay(48 * COIN)], 1);
        assert_eq!(pool.conflicting_txids(&challenger).len(), 1);
    }

    #[test]
    fn spendable_incumbent_rejects_replacement() {
        let mut pool = Mempool::default();
        let shared = op(1, 0);
        let incumbent = make_tx(&[shared.clone()], vec![pay(49 * COIN)], 0);
        accept(&mut pool, &incumbent, COIN);

        let challenger = make_tx(&[shared], vec![burn(48 * COIN)], 1);
        let err = pool.accept(challenger, 2 * COIN, 0.0, 1).unwrap_err();
        assert!(matches!(err, MempoolError::ConflictNotReplaceable { .. }));
        // Pool unchanged.
        assert!(pool.contains(&incumbent.txid().unwrap()));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn unspendable_incumbent_is_replaced() {
        let mut pool = Mempool::default();
        let shared = op(1, 0);
        let incumbent = make_tx(&[shared.clone()], vec![burn(900_000)], 0);
        let incumbent_id = accept(&mut pool, &incumbent, COIN).txid;

        let challenger = make_tx(&[shared], vec![burn(800_000)], 1);
        let accepted = accept(&mut pool, &challenger, 2 * COIN);

        assert_eq!(accepted.evicted.len(), 1);
        assert_eq!(accepted.evicted[0].txid, incumbent_id);
        assert!(!pool.contains(&incumbent_id));
        assert!(pool.contains(&accepted.txid));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn replacement_sweeps_incumbent_descendants() {
        let mut pool = Mempool::default();
        let shared = op(1, 0);
        // Incumbent burns its value; its child spends a dust-sized output.
        let incumbent = make_tx(&[shared.clone()], vec![burn(0), pay(DUST_LIMIT - 1)], 0);
        let child = make_tx(&[outpoint_of(&incumbent, 1)], vec![burn(0)], 0);
        accept(&mut pool, &incumbent, COIN);
        accept(&mut pool, &child, 100);
        assert_eq!(pool.len(), 2);

        let challenger = make_tx(&[shared], vec![burn(0)], 1);
        let accepted = accept(&mut pool, &challenger, 2 * COIN);
        assert_eq!(accepted.evicted.len(), 2);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(&accepted.txid));
    }

    #[test]
    fn spendable_descendant_output_blocks_replacement() {
        let mut pool = Mempool::default();
        let shared = op(1, 0);
        let incumbent = make_tx(&[shared.clone()], vec![pay(DUST_LIMIT - 1)], 0);
        // Child's own output is a fully spendable standard payment.
        let child = make_tx(&[outpoint_of(&incumbent, 0)], vec![pay(40 * COIN)], 0);
        accept(&mut pool, &incumbent, COIN);
        accept(&mut pool, &child, 100);

        let challenger = make_tx(&[shared], vec![burn(0)], 1);
        let err = pool.accept(challenger, 2 * COIN, 0.0, 1).unwrap_err();
        assert!(matches!(err, MempoolError::ConflictNotReplaceable { .. }));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn replacement_with_multiple_conflicts() {
        let mut pool = Mempool::default();
        let a = op(1, 0);
        let b = op(2, 0);
        let first = make_tx(&[a.clone()], vec![burn(1)], 0);
        let second = make_tx(&[b.clone()], vec![burn(2)], 0);
        accept(&mut pool, &first, 100);
        accept(&mut pool, &second, 100);

        // Challenger double-spends both incumbents at once.
        let challenger = make_tx(&[a, b], vec![burn(3)], 1);
        let accepted = accept(&mut pool, &challenger, 500);
        assert_eq!(accepted.evicted.len(), 2);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.claimed_outpoints(), 2);
    }

    #[test]
    fn custom_policy_is_consulted() {
        // A policy that never sacrifices anything: replacement always fails.
        let mut pool = Mempool::with_policy(|_: &TxOutput| false);
        let shared = op(1, 0);
        let incumbent = make_tx(&[shared.clone()], vec![burn(0)], 0);
        accept(&mut pool, &incumbent, 100);

        let challenger = make_tx(&[shared], vec![burn(0)], 1);
        let err = pool.accept(challenger, 200, 0.0, 1).unwrap_err();
        assert!(matches!(err, MempoolError::ConflictNotReplaceable { .. }));
    }

    // ------------------------------------------------------------------
    // Block connect
    // ------------------------------------------------------------------

    #[test]
    fn block_removes_confirmed_keeps_children() {
        let mut pool = Mempool::default();
        let parent = make_tx(&[op(1, 0)], vec![pay(COIN)], 0);
        let child = make_tx(&[outpoint_of(&parent, 0)], vec![pay(COIN / 2)], 0);
        accept(&mut pool, &parent, 100);
        accept(&mut pool, &child, 100);

        let evicted = pool.remove_for_block(std::slice::from_ref(&parent));
        assert!(evicted.is_empty());
        assert!(!pool.contains(&parent.txid().unwrap()));
        assert!(pool.contains(&child.txid().unwrap()));
    }

    #[test]
    fn block_sweeps_double_spent_pool_txs() {
        let mut pool = Mempool::default();
        let shared = op(1, 0);
        let pooled = make_tx(&[shared.clone()], vec![pay(COIN)], 0);
        let pooled_child = make_tx(&[outpoint_of(&pooled, 0)], vec![pay(COIN / 2)], 0);
        accept(&mut pool, &pooled, 100);
        accept(&mut pool, &pooled_child, 100);

        // A different transaction spending the same outpoint confirms.
        let confirmed = make_tx(&[shared], vec![pay(49 * COIN)], 7);
        let evicted = pool.remove_for_block(std::slice::from_ref(&confirmed));
        assert_eq!(evicted.len(), 2);
        assert!(pool.is_empty());
    }

    #[test]
    fn block_skips_null_outpoints() {
        let mut pool = Mempool::default();
        let coinbase = Transaction {
            version: 1,
            inputs: vec![TxInput {
                previous_output: OutPoint::null(),
                signature: vec![],
                public_key: vec![],
            }],
            outputs: vec![pay(50 * COIN)],
            lock_time: 0,
        };
        let unrelated = make_tx(&[op(9, 0)], vec![pay(COIN)], 0);
        accept(&mut pool, &unrelated, 100);

        let evicted = pool.remove_for_block(std::slice::from_ref(&coinbase));
        assert!(evicted.is_empty());
        assert_eq!(pool.len(), 1);
    }

    // ------------------------------------------------------------------
    // Accounting
    // ------------------------------------------------------------------

    #[test]
    fn total_fees_track_insert_and_remove() {
        let mut pool = Mempool::default();
        let tx1 = make_tx(&[op(1, 0)], vec![pay(COIN)], 0);
        let tx2 = make_tx(&[op(2, 0)], vec![pay(COIN)], 0);
        accept(&mut pool, &tx1, 1_000);
        accept(&mut pool, &tx2, 2_000);
        assert_eq!(pool.total_fees(), 3_000);

        pool.remove(&tx1, true);
        assert_eq!(pool.total_fees(), 2_000);
    }

    #[test]
    fn total_bytes_track_insert_and_remove() {
        let mut pool = Mempool::default();
        let tx1 = make_tx(&[op(1, 0)], vec![pay(COIN)], 0);
        let tx2 = make_tx(&[op(2, 0)], vec![pay(COIN), pay(COIN)], 0);
        let s1 = tx1.canonical_bytes().unwrap().len();
        let s2 = tx2.canonical_bytes().unwrap().len();
        accept(&mut pool, &tx1, 100);
        accept(&mut pool, &tx2, 100);
        assert_eq!(pool.total_bytes(), s1 + s2);

        pool.remove(&tx2, true);
        assert_eq!(pool.total_bytes(), s1);
    }

    #[test]
    fn txids_and_iter_cover_pool() {
        let mut pool = Mempool::default();
        let a = accept(&mut pool, &make_tx(&[op(1, 0)], vec![pay(COIN)], 0), 100).txid;
        let b = accept(&mut pool, &make_tx(&[op(2, 0)], vec![pay(COIN)], 0), 100).txid;

        let mut txids = pool.txids();
        txids.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(txids, expected);
        assert_eq!(pool.iter().count(), 2);
    }
}
