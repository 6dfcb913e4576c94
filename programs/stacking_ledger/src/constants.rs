//! Program constants for the Stacking Ledger program.
//!
//! PDA seeds, registry capacity and the fixed-point scale used for reward
//! accounting.

/// Seed for deriving ledger PDAs (`[LEDGER_SEED, mint, ledger_id]`)
pub const LEDGER_SEED: &[u8] = b"ledger";

/// Seed for deriving per-user balance PDAs (`[USER_BALANCE_SEED, ledger, user]`)
pub const USER_BALANCE_SEED: &[u8] = b"user_balance";

/// Seed for deriving the vault holding stacked principal
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";

/// Seed for deriving the vault holding converted rewards
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Maximum number of strategies a single ledger can register
pub const MAX_STRATEGIES: usize = 16;

/// Stack cap value meaning "no per-user cap"
pub const NO_STACK_CAP: u64 = 0;

/// Size of the Borsh length prefix for a `Vec`
pub const VEC_PREFIX_LEN: usize = 4;

/// Fixed-point scale for reward-per-share and per-user reward fractions
pub const REWARD_PRECISION: u128 = 1_000_000_000_000; // 10^12
