//! # tarn-mempool
//!
//! Dependency-aware pool of unconfirmed transactions for a Tarn node.
//!
//! This crate provides:
//! - Keyed entry storage with per-transaction metadata
//! - An outpoint → spender index exposing the pool's dependency graph
//!   without stored child pointers
//! - Cascading removal through descendant closures
//! - Conflict detection and policy-driven replacement on acceptance
//! - A coarse-locked handle for sharing one pool across collaborators
//!
//! Script and consensus validation happen upstream; the pool consumes
//! already-validated transactions plus precomputed fee and priority facts.

pub mod config;
pub mod entry;
pub mod handle;
pub mod policy;
pub mod pool;
pub mod spend_index;

pub use config::MempoolConfig;
pub use entry::{EntryStore, PoolEntry};
pub use handle::MempoolHandle;
pub use policy::{DustPolicy, ReplacementPolicy};
pub use pool::{Accepted, Mempool};
pub use spend_index::SpendIndex;
