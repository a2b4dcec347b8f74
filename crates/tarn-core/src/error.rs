//! Error types for the Tarn pool.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("serialization: {0}")] Serialization(String),
}

/// Pool-level errors.
///
/// `AlreadyInPool` and `ConflictNotReplaceable` are normal rejections: the
/// pool is left unchanged and the submitter is told why. `DuplicateKey` and
/// `OutpointAlreadyClaimed` indicate an ordering bug in the caller or in the
/// pool itself; `Internal` is raised when the pool detects its own
/// invariants broken mid-operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MempoolError {
    #[error("transaction already in pool: {0}")] AlreadyInPool(String),
    #[error("entry already stored under key: {0}")] DuplicateKey(String),
    #[error("outpoint {outpoint} already claimed by {claimed_by}")] OutpointAlreadyClaimed { outpoint: String, claimed_by: String },
    #[error("insufficient priority to replace pool transaction {txid}")] ConflictNotReplaceable { txid: String },
    #[error("internal consistency: {0}")] Internal(String),
    #[error(transparent)] Transaction(#[from] TransactionError),
}
