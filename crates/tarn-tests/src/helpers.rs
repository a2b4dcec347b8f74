//! Shared test helpers for pool integration tests.

use tarn_core::types::{
    OutPoint, OutputScript, PubkeyHash, Transaction, TxId, TxInput, TxOutput,
};
use tarn_mempool::Mempool;

/// Install a fmt subscriber honoring `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Simple pubkey hash from a seed byte.
pub fn pkh(seed: u8) -> PubkeyHash {
    PubkeyHash([seed; 32])
}

/// Standard spendable payment output.
pub fn pay(value: u64) -> TxOutput {
    TxOutput { value, script: OutputScript::PayToPubkeyHash(pkh(0xEE)) }
}

/// Provably unspendable data-carrier output.
pub fn burn(value: u64) -> TxOutput {
    TxOutput { value, script: OutputScript::DataCarrier(vec![0x42]) }
}

/// Outpoint of a pretend already-confirmed transaction.
pub fn confirmed_op(seed: u8, index: u64) -> OutPoint {
    OutPoint { txid: TxId([seed; 32]), index }
}

/// Outpoint referencing output `index` of `tx`.
pub fn spend_of(tx: &Transaction, index: u64) -> OutPoint {
    OutPoint { txid: tx.txid().unwrap(), index }
}

/// Create a spending transaction (unsigned payload, unique per `lock_time`).
pub fn make_tx(inputs: Vec<OutPoint>, outputs: Vec<TxOutput>, lock_time: u64) -> Transaction {
    Transaction {
        version: 1,
        inputs: inputs
            .into_iter()
            .map(|op| TxInput {
                previous_output: op,
                signature: vec![0; 64],
                public_key: vec![0; 32],
            })
            .collect(),
        outputs,
        lock_time,
    }
}

/// A parent with three children and one grandchild per child.
///
/// The parent spends a confirmed outpoint and creates three outputs; child
/// `i` spends the parent's output `i`; grandchild `i` spends child `i`'s
/// sole output.
pub struct Family {
    pub parent: Transaction,
    pub children: [Transaction; 3],
    pub grandchildren: [Transaction; 3],
}

pub fn family() -> Family {
    let parent = make_tx(
        vec![confirmed_op(0x01, 0)],
        vec![pay(33_000), pay(33_000), pay(33_000)],
        0,
    );
    let children: [Transaction; 3] = std::array::from_fn(|i| {
        make_tx(vec![spend_of(&parent, i as u64)], vec![pay(11_000)], 0)
    });
    let grandchildren: [Transaction; 3] = std::array::from_fn(|i| {
        make_tx(vec![spend_of(&children[i], 0)], vec![pay(11_000)], i as u64)
    });
    Family { parent, children, grandchildren }
}

/// Accept with default fee/priority/height, panicking on rejection.
pub fn accept_ok(pool: &mut Mempool, tx: &Transaction) -> TxId {
    pool.accept(tx.clone(), 1_000, 0.0, 1).unwrap().txid
}

/// Assert the store/index cross-references are mutually consistent:
/// every pooled input is claimed by its own transaction, nothing else is
/// claimed, and every spender recorded in the index is itself pooled.
pub fn assert_pool_consistent(pool: &Mempool) {
    let mut expected_claims = 0;
    for entry in pool.iter() {
        for input in &entry.tx.inputs {
            expected_claims += 1;
            assert_eq!(
                pool.spender_of(&input.previous_output),
                Some(entry.txid),
                "input of pooled {} not claimed by it",
                entry.txid
            );
        }
        for (index, _) in entry.tx.outputs.iter().enumerate() {
            let op = OutPoint { txid: entry.txid, index: index as u64 };
            if let Some(spender) = pool.spender_of(&op) {
                assert!(
                    pool.contains(&spender),
                    "index names absent spender {spender} for {op}"
                );
            }
        }
    }
    assert_eq!(
        pool.claimed_outpoints(),
        expected_claims,
        "dangling outpoint claims in index"
    );
}
