//! Stack/unstack and strategy pool deposit/withdraw.
//!
//! Credits are applied to the draft first and the transfer into custody runs
//! last, so the balance only becomes visible once the funds have moved. Debits
//! pay out after the draft is reduced; a failed payout discards the draft.
//!
//! Principal in a record belongs to the record's user, whoever funded it.
//! Only that user can take it out again.

use anchor_lang::prelude::*;

use super::LedgerState;
use crate::custody::Custody;
use crate::error::LedgerError;
use crate::state::{AccountBalance, BalanceDelta};

fn require_holder(record: &AccountBalance, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, record.user, LedgerError::NotAuthorized);
    Ok(())
}

impl LedgerState {
    /// Stacks `amount` from the caller into the caller's own record. Returns
    /// the new staked total.
    pub fn stack<C: Custody>(
        &mut self,
        custody: &mut C,
        caller: &Pubkey,
        record: &mut AccountBalance,
        amount: u64,
    ) -> Result<u64> {
        require!(amount > 0, LedgerError::ZeroAmount);
        require_holder(record, caller)?;
        require!(
            amount <= custody.available(),
            LedgerError::InsufficientFunds
        );

        self.transact_with(record, |draft, balance| {
            let staked = draft.credit_stake(balance, amount)?;
            custody.receive(amount)?;
            Ok(staked)
        })
    }

    /// Unstacks `amount` from the caller's record back to the caller. Returns
    /// the new staked total.
    pub fn unstack<C: Custody>(
        &mut self,
        custody: &mut C,
        caller: &Pubkey,
        record: &mut AccountBalance,
        amount: u64,
    ) -> Result<u64> {
        require!(amount > 0, LedgerError::ZeroAmount);
        require_holder(record, caller)?;
        require!(amount <= record.staked, LedgerError::InsufficientStaked);

        self.transact_with(record, |draft, balance| {
            let staked = draft.debit_stake(balance, amount)?;
            custody.release(amount)?;
            Ok(staked)
        })
    }

    /// Deposits `amount` from the caller into `record` under `strategy_id`.
    /// Anyone may fund any user's record. The record's strategy association
    /// is replaced by this one. Returns the user's new staked total.
    pub fn add_to_pool<C: Custody>(
        &mut self,
        custody: &mut C,
        record: &mut AccountBalance,
        amount: u64,
        strategy_id: u64,
    ) -> Result<u64> {
        require!(amount > 0, LedgerError::ZeroAmount);
        self.registry.require_accepting(strategy_id)?;
        require!(
            amount <= custody.available(),
            LedgerError::InsufficientFunds
        );

        self.transact_with(record, |draft, balance| {
            let staked = draft.credit_stake(balance, amount)?;
            balance.strategy_id = Some(strategy_id);
            custody.receive(amount)?;
            Ok(staked)
        })
    }

    /// Withdraws `amount` from the caller's pooled record back to the caller.
    /// Strategy state is not consulted. Returns the remaining staked total.
    pub fn remove_from_pool<C: Custody>(
        &mut self,
        custody: &mut C,
        caller: &Pubkey,
        record: &mut AccountBalance,
        amount: u64,
    ) -> Result<u64> {
        require!(amount > 0, LedgerError::ZeroAmount);
        require_holder(record, caller)?;
        require!(amount <= record.staked, LedgerError::InsufficientStaked);

        self.transact_with(record, |draft, balance| {
            let staked = draft.debit_stake(balance, amount)?;
            custody.release(amount)?;
            Ok(staked)
        })
    }

    fn credit_stake(&mut self, record: &mut AccountBalance, amount: u64) -> Result<u64> {
        self.settle(record)?;
        self.totals.apply(record, BalanceDelta::stake(amount))?;
        self.config.check_cap(record.staked)?;
        self.sync_debt(record)?;
        Ok(record.staked)
    }

    fn debit_stake(&mut self, record: &mut AccountBalance, amount: u64) -> Result<u64> {
        self.settle(record)?;
        self.totals.apply(record, BalanceDelta::unstake(amount))?;
        self.sync_debt(record)?;
        Ok(record.staked)
    }
}
