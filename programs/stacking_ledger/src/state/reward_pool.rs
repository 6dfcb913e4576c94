use anchor_lang::prelude::*;

use crate::error::LedgerError;

/// Converted rewards waiting to be distributed, and the running
/// reward-per-share every balance settles against.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardPool {
    /// Whole units not yet handed to stakers.
    pub undistributed: u64,
    /// Scaled remainder below one unit that could not be split evenly.
    pub carry: u128,
    /// Cumulative reward per staked unit, scaled by `REWARD_PRECISION`.
    pub reward_per_share: u128,
}

impl RewardPool {
    pub const LEN: usize = 8 + 16 + 16;

    pub fn fill(&mut self, amount: u64) -> Result<u64> {
        self.undistributed = self
            .undistributed
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(self.undistributed)
    }
}
