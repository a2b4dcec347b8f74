//! Core transaction types.
//!
//! All monetary values are in tarns (1 TARN = 10^8 tarns). Transactions are
//! canonically encoded with bincode; the transaction id is the BLAKE3 digest
//! of that encoding, so the id is a function of the full content and can
//! never be referenced by the transaction's own inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TransactionError;

/// Content-derived transaction identifier (BLAKE3 of the canonical encoding).
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct TxId(pub [u8; 32]);

impl TxId {
    /// The zero id (32 zero bytes). Used for coinbase previous outpoints.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Digest arbitrary bytes into a transaction id.
    pub fn digest(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).into())
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero id.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for TxId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Hash of a recipient's public key. Deliberately a distinct type from
/// [`TxId`] so an output destination can never be confused with a
/// transaction reference.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct PubkeyHash(pub [u8; 32]);

impl fmt::Display for PubkeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Reference to a specific output of a previous transaction.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash,
    bincode::Encode, bincode::Decode,
)]
pub struct OutPoint {
    /// Transaction id containing the referenced output.
    pub txid: TxId,
    /// Index of the output within the transaction.
    pub index: u64,
}

impl OutPoint {
    /// The null outpoint, used for coinbase transaction inputs.
    pub fn null() -> Self {
        Self {
            txid: TxId::ZERO,
            index: u64::MAX,
        }
    }

    /// Check if this is the null outpoint (coinbase marker).
    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.index == u64::MAX
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

/// A transaction input, spending a previous output.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct TxInput {
    /// The outpoint being spent. Null outpoint for coinbase.
    pub previous_output: OutPoint,
    /// Ed25519 signature (64 bytes). Empty for coinbase inputs.
    /// Verified upstream; the pool treats it as opaque payload.
    pub signature: Vec<u8>,
    /// Ed25519 public key (32 bytes). Empty for coinbase inputs.
    pub public_key: Vec<u8>,
}

/// Destination of a transaction output.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub enum OutputScript {
    /// Standard pay-to-pubkey-hash destination.
    PayToPubkeyHash(PubkeyHash),
    /// Provably unspendable data carrier. Burns the output's value in
    /// exchange for embedding up to a relay-policy-bounded payload.
    DataCarrier(Vec<u8>),
}

/// A transaction output, creating a new spendable (or burned) value.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct TxOutput {
    /// Value in tarns.
    pub value: u64,
    /// Destination script.
    pub script: OutputScript,
}

impl TxOutput {
    /// Whether this output can never be redeemed, regardless of keys.
    pub fn is_data_carrier(&self) -> bool {
        matches!(self.script, OutputScript::DataCarrier(_))
    }
}

/// A transaction transferring value between addresses.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct Transaction {
    /// Protocol version.
    pub version: u64,
    /// Inputs consuming previous outputs.
    pub inputs: Vec<TxInput>,
    /// New outputs created by this transaction.
    pub outputs: Vec<TxOutput>,
    /// Block height or timestamp before which this tx is invalid.
    pub lock_time: u64,
}

impl Transaction {
    /// Canonical byte encoding (bincode, standard config).
    ///
    /// Both the transaction id and the serialized size are derived from this
    /// single encoding, so callers needing both should encode once.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    /// Compute the transaction id (BLAKE3 hash of the canonical encoding).
    pub fn txid(&self) -> Result<TxId, TransactionError> {
        Ok(TxId::digest(&self.canonical_bytes()?))
    }

    /// Check if this is a coinbase transaction (single input with null outpoint).
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }

    /// Sum of all output values. Returns None on overflow.
    pub fn total_output_value(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, out| acc.checked_add(out.value))
    }
}
