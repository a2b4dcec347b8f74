//! # tarn-core
//! Foundation types for the Tarn transaction pool: transactions, outpoints,
//! content-derived ids, and the shared error enums.

pub mod constants;
pub mod error;
pub mod types;
