use anchor_lang::prelude::*;

use crate::accounting::LedgerState;
use crate::constants::NO_STACK_CAP;
use crate::error::LedgerError;

/// Runtime configuration chosen at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Maximum stacked amount per user; `NO_STACK_CAP` disables the check.
    pub stack_cap: u64,
}

impl LedgerConfig {
    pub const LEN: usize = 8;

    pub fn uncapped() -> Self {
        Self {
            stack_cap: NO_STACK_CAP,
        }
    }

    pub fn with_cap(stack_cap: u64) -> Self {
        Self { stack_cap }
    }

    pub fn check_cap(&self, new_staked: u64) -> Result<()> {
        if self.stack_cap != NO_STACK_CAP {
            require!(new_staked <= self.stack_cap, LedgerError::CapExceeded);
        }
        Ok(())
    }
}

/// PDA account holding one ledger instance: `[LEDGER_SEED, mint, ledger_id]`.
#[account]
pub struct Ledger {
    pub ledger_id: u64,
    pub staking_mint: Pubkey,
    pub stake_vault: Pubkey,
    pub reward_vault: Pubkey,

    pub state: LedgerState,

    pub created_at: i64,
    pub last_updated: i64,

    pub stake_vault_bump: u8,
    pub reward_vault_bump: u8,
    pub bump: u8,
}

impl Ledger {
    pub const LEN: usize = 8
        + 8
        + (32 * 3)
        + LedgerState::LEN
        + (8 * 2)
        + 3;

    pub fn id_bytes(&self) -> [u8; 8] {
        self.ledger_id.to_le_bytes()
    }
}
