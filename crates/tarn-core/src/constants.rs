//! Protocol constants. All monetary values in tarns (1 TARN = 10^8 tarns).

pub const COIN: u64 = 100_000_000;

/// Outputs below this value are treated as dust by the default replacement
/// policy: too small to ever be economically redeemed, so they count as
/// unspendable-equivalent when judging whether a conflicting transaction may
/// be sacrificed.
pub const DUST_LIMIT: u64 = 1_000;
