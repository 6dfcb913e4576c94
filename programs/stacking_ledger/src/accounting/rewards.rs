//! Reward conversion, pro-rata distribution and withdrawal.
//!
//! Distribution is O(1): it raises a cumulative reward-per-share and each
//! record settles its share the next time it is touched. Shares are tracked
//! at `REWARD_PRECISION`; a record's whole units become claimable and the
//! fraction below one unit stays with the record until it adds up. What
//! cannot be split evenly at that precision stays in the pool.

use anchor_lang::prelude::*;

use super::LedgerState;
use crate::constants::REWARD_PRECISION;
use crate::custody::Custody;
use crate::error::LedgerError;
use crate::state::{AccountBalance, BalanceDelta};

/// `staked * reward_per_share`, still scaled by `REWARD_PRECISION`.
pub fn accrued(staked: u64, reward_per_share: u128) -> Result<u128> {
    Ok(u128::from(staked)
        .checked_mul(reward_per_share)
        .ok_or(LedgerError::MathOverflow)?)
}

/// Splits a scaled amount into whole units and the fraction below one unit.
fn split_units(scaled: u128) -> Result<(u64, u128)> {
    let units = u64::try_from(scaled / REWARD_PRECISION).map_err(|_| LedgerError::MathOverflow)?;
    Ok((units, scaled % REWARD_PRECISION))
}

impl LedgerState {
    /// Owner-only. Moves `amount` of base asset into the reward pool at 1:1.
    /// Returns the new undistributed pool amount.
    pub fn convert_rewards<C: Custody>(
        &mut self,
        custody: &mut C,
        caller: Pubkey,
        amount: u64,
    ) -> Result<u64> {
        self.access.require_owner(&caller)?;
        require!(amount > 0, LedgerError::ZeroAmount);
        require!(
            amount <= custody.available(),
            LedgerError::InsufficientFunds
        );

        self.transact(|draft| {
            let pool = draft.reward_pool.fill(amount)?;
            draft.totals.total_converted = draft
                .totals
                .total_converted
                .checked_add(amount)
                .ok_or(LedgerError::MathOverflow)?;
            custody.receive(amount)?;
            Ok(pool)
        })
    }

    /// Owner-only. Splits the reward pool across stakers in proportion to
    /// their stake. Returns the whole units that left the pool, zero when
    /// nothing is staked or pooled.
    pub fn distribute_rewards(&mut self, caller: &Pubkey) -> Result<u64> {
        self.access.require_owner(caller)?;

        let total_staked = u128::from(self.totals.total_staked);
        if self.reward_pool.undistributed == 0 || total_staked == 0 {
            return Ok(0);
        }

        self.transact(|draft| {
            let pool = &mut draft.reward_pool;
            let available = u128::from(pool.undistributed)
                .checked_mul(REWARD_PRECISION)
                .and_then(|scaled| scaled.checked_add(pool.carry))
                .ok_or(LedgerError::MathOverflow)?;

            let increment = available / total_staked;
            let assigned = increment
                .checked_mul(total_staked)
                .ok_or(LedgerError::MathOverflow)?;
            let leftover = available
                .checked_sub(assigned)
                .ok_or(LedgerError::InvariantViolation)?;
            let (remaining, carry) = split_units(leftover)?;

            let distributed = pool
                .undistributed
                .checked_sub(remaining)
                .ok_or(LedgerError::InvariantViolation)?;
            pool.reward_per_share = pool
                .reward_per_share
                .checked_add(increment)
                .ok_or(LedgerError::MathOverflow)?;
            pool.undistributed = remaining;
            pool.carry = carry;

            draft.totals.total_distributed = draft
                .totals
                .total_distributed
                .checked_add(distributed)
                .ok_or(LedgerError::MathOverflow)?;
            Ok(distributed)
        })
    }

    /// Pays out everything the caller's record has been credited. Returns the
    /// amount paid, zero when nothing is claimable or there is no record.
    pub fn withdraw_rewards<C: Custody>(
        &mut self,
        custody: &mut C,
        caller: &Pubkey,
        record: Option<&mut AccountBalance>,
    ) -> Result<u64> {
        let record = match record {
            Some(record) => record,
            None => return Ok(0),
        };
        require_keys_eq!(*caller, record.user, LedgerError::NotAuthorized);

        self.transact_with(record, |draft, balance| {
            draft.settle(balance)?;
            let amount = balance.claimable_rewards;
            if amount == 0 {
                return Ok(0);
            }

            draft
                .totals
                .apply(balance, BalanceDelta::debit_rewards(amount))?;
            draft.totals.total_withdrawn = draft
                .totals
                .total_withdrawn
                .checked_add(amount)
                .ok_or(LedgerError::MathOverflow)?;
            custody.release(amount)?;
            Ok(amount)
        })
    }

    /// Whole reward units `record` could withdraw right now.
    pub fn claimable_of(&self, record: &AccountBalance) -> Result<u64> {
        let scaled = record
            .reward_residue
            .checked_add(self.pending_scaled(record)?)
            .ok_or(LedgerError::MathOverflow)?;
        let (units, _) = split_units(scaled)?;
        Ok(record
            .claimable_rewards
            .checked_add(units)
            .ok_or(LedgerError::MathOverflow)?)
    }

    /// Credits `record` with everything distributed since it last settled.
    pub(super) fn settle(&mut self, record: &mut AccountBalance) -> Result<()> {
        let scaled = record
            .reward_residue
            .checked_add(self.pending_scaled(record)?)
            .ok_or(LedgerError::MathOverflow)?;
        let (units, residue) = split_units(scaled)?;

        self.totals
            .apply(record, BalanceDelta::credit_rewards(units))?;
        record.reward_residue = residue;
        self.sync_debt(record)
    }

    /// Re-anchors `record` at the current reward-per-share.
    pub(super) fn sync_debt(&self, record: &mut AccountBalance) -> Result<()> {
        record.reward_debt = accrued(record.staked, self.reward_pool.reward_per_share)?;
        Ok(())
    }

    fn pending_scaled(&self, record: &AccountBalance) -> Result<u128> {
        let accrued = accrued(record.staked, self.reward_pool.reward_per_share)?;
        Ok(accrued
            .checked_sub(record.reward_debt)
            .ok_or(LedgerError::InvariantViolation)?)
    }
}
