//! Integration test suite for the Tarn pool.
//!
//! Exercises the pool the way node orchestration does: acceptance under
//! conflicts, cascading removal through dependency graphs, block-connect
//! sweeps, and shared-handle concurrency. Property tests verify the
//! store/index cross-reference invariants under randomized operation
//! sequences.

pub mod helpers;
