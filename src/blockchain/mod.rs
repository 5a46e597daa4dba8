pub mod block;
pub mod model;

pub use block::Block;
pub use model::Ledger;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Fixed block subsidy credited to the miner.
pub const BLOCK_REWARD: u64 = 50;

/// Difficulty ceiling for the HTTP setter (keep low in dev to avoid long waits).
pub const DIFF_MAX: u32 = 6;
