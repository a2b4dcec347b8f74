//! Replacement eligibility policy.
//!
//! Whether a conflicting pooled transaction may be sacrificed in favour of
//! an incoming double-spender is a policy question, not a structural one,
//! and it has changed across node generations (output-unspendability
//! heuristics, later opt-in signaling with fee comparison). The pool
//! therefore consults an injected predicate and hard-codes nothing: swap the
//! policy and neither the removal engine nor the spend index moves.

use tarn_core::constants::DUST_LIMIT;
use tarn_core::types::TxOutput;

/// Judges whether a single output is incapable of ever being redeemed.
///
/// The acceptance pipeline permits replacement only when every output of
/// every conflicting transaction (and of their pooled descendants) passes
/// this predicate.
pub trait ReplacementPolicy: Send + Sync {
    fn is_unspendable(&self, output: &TxOutput) -> bool;
}

impl<F> ReplacementPolicy for F
where
    F: Fn(&TxOutput) -> bool + Send + Sync,
{
    fn is_unspendable(&self, output: &TxOutput) -> bool {
        self(output)
    }
}

/// Default policy: data-carrier outputs are provably unspendable, and
/// outputs below the dust limit are unspendable-equivalent (never worth
/// redeeming, so sacrificing them loses nobody anything).
#[derive(Debug, Clone)]
pub struct DustPolicy {
    pub dust_limit: u64,
}

impl Default for DustPolicy {
    fn default() -> Self {
        Self { dust_limit: DUST_LIMIT }
    }
}

impl ReplacementPolicy for DustPolicy {
    fn is_unspendable(&self, output: &TxOutput) -> bool {
        output.is_data_carrier() || output.value < self.dust_limit
    }
}
