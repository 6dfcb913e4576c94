//! Host-independent accounting core.
//!
//! [`LedgerState`] holds everything a ledger owns besides the per-user
//! [`AccountBalance`] records, and exposes the stake, reward and
//! administration operations as methods. Each mutating operation runs
//! through [`LedgerState::transact`] or [`LedgerState::transact_with`]: it
//! works on draft copies, the invariants are checked on the result, and only
//! then are the drafts committed. A failed operation therefore leaves the
//! ledger and the record untouched.

pub mod admin;
pub mod invariants;
pub mod rewards;
pub mod stake;

use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::state::{
    AccessControl, AccountBalance, LedgerConfig, PoolTotals, RewardPool, StrategyRegistry,
};

pub use invariants::{check_invariants, check_record};

/// Ledger-wide state persisted in the ledger account.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LedgerState {
    pub access: AccessControl,
    pub config: LedgerConfig,
    pub totals: PoolTotals,
    pub registry: StrategyRegistry,
    pub reward_pool: RewardPool,
}

/// `get_stack_info` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackInfo {
    pub stacked: u64,
}

/// `get_user_details` view of the rewards ledger.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserDetails {
    pub staked: u64,
    pub rewards: u64,
}

/// `get_pool_details` view of the strategy pool.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolDetails {
    pub amount: u64,
    pub strategy_id: Option<u64>,
}

/// `get_total_stacked_and_rewards` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerTotals {
    pub total_staked: u64,
    /// Converted rewards not yet withdrawn, distributed or not.
    pub total_rewards: u64,
}

impl LedgerState {
    pub const LEN: usize = AccessControl::LEN
        + LedgerConfig::LEN
        + PoolTotals::LEN
        + StrategyRegistry::LEN
        + RewardPool::LEN;

    pub fn new(owner: Pubkey, config: LedgerConfig) -> Self {
        Self {
            access: AccessControl::new(owner),
            config,
            totals: PoolTotals::default(),
            registry: StrategyRegistry::default(),
            reward_pool: RewardPool::default(),
        }
    }

    pub fn owner(&self) -> Pubkey {
        self.access.owner
    }

    /// Runs `op` against a draft and commits it only if `op` succeeds and the
    /// result satisfies every invariant.
    pub fn transact<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerState) -> Result<T>,
    {
        let mut draft = self.clone();
        let value = op(&mut draft)?;
        check_invariants(&draft)?;
        *self = draft;
        Ok(value)
    }

    /// [`transact`](Self::transact) for operations that also touch one
    /// user's record. Both drafts commit together or not at all.
    pub fn transact_with<T, F>(&mut self, record: &mut AccountBalance, op: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerState, &mut AccountBalance) -> Result<T>,
    {
        let mut draft = self.clone();
        let mut draft_record = record.clone();
        let value = op(&mut draft, &mut draft_record)?;
        check_invariants(&draft)?;
        check_record(&draft, &draft_record)?;
        *self = draft;
        *record = draft_record;
        Ok(value)
    }

    pub fn stack_info(&self, record: Option<&AccountBalance>) -> Result<StackInfo> {
        let record = record.ok_or(LedgerError::UserNotFound)?;
        Ok(StackInfo {
            stacked: record.staked,
        })
    }

    pub fn user_details(&self, record: Option<&AccountBalance>) -> Result<UserDetails> {
        let record = record.ok_or(LedgerError::UserNotFound)?;
        Ok(UserDetails {
            staked: record.staked,
            rewards: self.claimable_of(record)?,
        })
    }

    pub fn pool_details(&self, record: Option<&AccountBalance>) -> Result<PoolDetails> {
        let record = record.ok_or(LedgerError::UserNotFound)?;
        Ok(PoolDetails {
            amount: record.staked,
            strategy_id: record.strategy_id,
        })
    }

    pub fn total_pooled(&self) -> u64 {
        self.totals.total_staked
    }

    pub fn totals(&self) -> Result<LedgerTotals> {
        let total_rewards = self
            .totals
            .total_converted
            .checked_sub(self.totals.total_withdrawn)
            .ok_or(LedgerError::InvariantViolation)?;
        Ok(LedgerTotals {
            total_staked: self.totals.total_staked,
            total_rewards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BalanceDelta;
    use crate::testing::{new_ledger, open_record, user, OWNER};

    #[test]
    fn views_report_missing_user_consistently() {
        let ledger = new_ledger();

        assert_eq!(
            ledger.stack_info(None).unwrap_err(),
            LedgerError::UserNotFound.into()
        );
        assert_eq!(
            ledger.user_details(None).unwrap_err(),
            LedgerError::UserNotFound.into()
        );
        assert_eq!(
            ledger.pool_details(None).unwrap_err(),
            LedgerError::UserNotFound.into()
        );
    }

    #[test]
    fn fresh_ledger_is_empty() {
        let ledger = new_ledger();
        assert_eq!(ledger.owner(), OWNER);
        assert_eq!(ledger.total_pooled(), 0);
        assert_eq!(
            ledger.totals().unwrap(),
            LedgerTotals {
                total_staked: 0,
                total_rewards: 0
            }
        );
    }

    #[test]
    fn failed_transaction_discards_drafts() {
        let mut ledger = new_ledger();
        let mut record = open_record(user(1));
        let (ledger_before, record_before) = (ledger.clone(), record.clone());

        let result: Result<()> = ledger.transact_with(&mut record, |draft, balance| {
            draft.totals.apply(balance, BalanceDelta::stake(10))?;
            err!(LedgerError::ZeroAmount)
        });

        assert_eq!(result.unwrap_err(), LedgerError::ZeroAmount.into());
        assert_eq!(ledger, ledger_before);
        assert_eq!(record, record_before);
    }

    #[test]
    fn invariant_failure_discards_draft() {
        let mut ledger = new_ledger();
        let before = ledger.clone();

        let result = ledger.transact(|draft| {
            draft.totals.total_withdrawn = 1;
            Ok(())
        });

        assert_eq!(result.unwrap_err(), LedgerError::InvariantViolation.into());
        assert_eq!(ledger, before);
    }

    #[test]
    fn record_check_runs_on_commit() {
        let mut ledger = new_ledger();
        let mut record = open_record(user(1));
        let before = record.clone();

        // Staked more than the ledger total can account for.
        let result = ledger.transact_with(&mut record, |_, balance| {
            balance.staked = 5;
            Ok(())
        });

        assert_eq!(result.unwrap_err(), LedgerError::InvariantViolation.into());
        assert_eq!(record, before);
    }

    #[test]
    fn views_read_the_supplied_record() {
        let ledger = new_ledger();
        let mut record = open_record(user(1));
        record.staked = 10;
        record.strategy_id = Some(2);
        record.claimable_rewards = 30;

        assert_eq!(ledger.stack_info(Some(&record)).unwrap().stacked, 10);
        assert_eq!(
            ledger.user_details(Some(&record)).unwrap(),
            UserDetails {
                staked: 10,
                rewards: 30
            }
        );
        assert_eq!(
            ledger.pool_details(Some(&record)).unwrap(),
            PoolDetails {
                amount: 10,
                strategy_id: Some(2)
            }
        );
    }
}
