//! Per-user balance records and the aggregates kept alongside them.
//!
//! The store is keyed by the program's PDA space: every `(ledger, user)` pair
//! owns at most one [`AccountBalance`] at `[USER_BALANCE_SEED, ledger, user]`.
//! A record is created on the first stack or deposit and is zeroed, never
//! closed, on full withdrawal. Nothing is shared between users, so no user
//! can exhaust space for another.

use anchor_lang::prelude::*;

use crate::error::LedgerError;

/// One user's position in a ledger.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct AccountBalance {
    pub ledger: Pubkey,
    pub user: Pubkey,

    pub staked: u64,
    pub strategy_id: Option<u64>,

    /// Whole reward units settled and not yet withdrawn.
    pub claimable_rewards: u64,
    /// Settled reward below one unit, scaled by `REWARD_PRECISION`.
    pub reward_residue: u128,
    /// `staked * reward_per_share` at the last settlement.
    pub reward_debt: u128,

    pub bump: u8,
}

impl AccountBalance {
    pub const LEN: usize = 8 + 32 + 32 + 8 + (1 + 8) + 8 + 16 + 16 + 1;

    pub fn new(ledger: Pubkey, user: Pubkey, bump: u8) -> Self {
        Self {
            ledger,
            user,
            staked: 0,
            strategy_id: None,
            claimable_rewards: 0,
            reward_residue: 0,
            reward_debt: 0,
            bump,
        }
    }

    /// A zero-initialized account has not been claimed by any user yet.
    pub fn is_open(&self) -> bool {
        self.user != Pubkey::default()
    }

    /// Binds a freshly created account to its ledger and user.
    pub fn open(&mut self, ledger: Pubkey, user: Pubkey, bump: u8) {
        *self = Self::new(ledger, user, bump);
    }

    pub fn belongs_to(&self, ledger: &Pubkey, user: &Pubkey) -> bool {
        self.ledger == *ledger && self.user == *user
    }
}

/// Signed change applied to a balance record by [`PoolTotals::apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceDelta {
    pub staked: i128,
    pub rewards: i128,
}

impl BalanceDelta {
    pub fn stake(amount: u64) -> Self {
        Self {
            staked: i128::from(amount),
            rewards: 0,
        }
    }

    pub fn unstake(amount: u64) -> Self {
        Self {
            staked: -i128::from(amount),
            rewards: 0,
        }
    }

    pub fn credit_rewards(amount: u64) -> Self {
        Self {
            staked: 0,
            rewards: i128::from(amount),
        }
    }

    pub fn debit_rewards(amount: u64) -> Self {
        Self {
            staked: 0,
            rewards: -i128::from(amount),
        }
    }
}

/// Ledger-wide aggregates.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolTotals {
    pub total_staked: u64,
    /// Base asset ever moved into the reward pool.
    pub total_converted: u64,
    /// Whole units ever moved out of the reward pool to stakers.
    pub total_distributed: u64,
    pub total_withdrawn: u64,
}

impl PoolTotals {
    pub const LEN: usize = 8 * 4;

    /// Applies `delta` to `record` and keeps `total_staked` in step.
    ///
    /// Every new value is computed before anything is written, so an error
    /// leaves both untouched.
    pub fn apply(&mut self, record: &mut AccountBalance, delta: BalanceDelta) -> Result<()> {
        let next_staked = apply_delta(record.staked, delta.staked)?;
        let next_rewards = apply_delta(record.claimable_rewards, delta.rewards)?;
        let next_total = apply_delta(self.total_staked, delta.staked)?;

        record.staked = next_staked;
        record.claimable_rewards = next_rewards;
        self.total_staked = next_total;
        Ok(())
    }
}

fn apply_delta(current: u64, delta: i128) -> Result<u64> {
    let next = i128::from(current)
        .checked_add(delta)
        .ok_or(LedgerError::MathOverflow)?;
    require!(next >= 0, LedgerError::InsufficientBalance);
    Ok(u64::try_from(next).map_err(|_| LedgerError::MathOverflow)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    #[test]
    fn fresh_account_is_not_open() {
        let mut record = AccountBalance::new(Pubkey::default(), Pubkey::default(), 0);
        assert!(!record.is_open());

        record.open(key(9), key(1), 254);
        assert!(record.is_open());
        assert!(record.belongs_to(&key(9), &key(1)));
        assert!(!record.belongs_to(&key(9), &key(2)));
        assert!(!record.belongs_to(&key(8), &key(1)));
        assert_eq!(record.bump, 254);
    }

    #[test]
    fn apply_moves_record_and_total_together() {
        let mut totals = PoolTotals::default();
        let mut alice = AccountBalance::new(key(9), key(1), 0);
        let mut bob = AccountBalance::new(key(9), key(2), 0);

        totals.apply(&mut alice, BalanceDelta::stake(250)).unwrap();
        totals.apply(&mut bob, BalanceDelta::stake(50)).unwrap();
        totals.apply(&mut alice, BalanceDelta::unstake(100)).unwrap();

        assert_eq!(alice.staked, 150);
        assert_eq!(bob.staked, 50);
        assert_eq!(totals.total_staked, 200);
    }

    #[test]
    fn negative_result_is_rejected_without_writing() {
        let mut totals = PoolTotals::default();
        let mut record = AccountBalance::new(key(9), key(1), 0);
        totals.apply(&mut record, BalanceDelta::stake(100)).unwrap();
        let (record_before, totals_before) = (record.clone(), totals);

        let err = totals
            .apply(&mut record, BalanceDelta::unstake(101))
            .unwrap_err();
        assert_eq!(err, LedgerError::InsufficientBalance.into());

        let err = totals
            .apply(&mut record, BalanceDelta::debit_rewards(1))
            .unwrap_err();
        assert_eq!(err, LedgerError::InsufficientBalance.into());

        assert_eq!(record, record_before);
        assert_eq!(totals, totals_before);
    }

    #[test]
    fn full_withdrawal_keeps_zeroed_record() {
        let mut totals = PoolTotals::default();
        let mut record = AccountBalance::new(key(9), key(4), 0);
        totals.apply(&mut record, BalanceDelta::stake(40)).unwrap();
        totals.apply(&mut record, BalanceDelta::unstake(40)).unwrap();

        assert!(record.is_open());
        assert_eq!(record.staked, 0);
        assert_eq!(totals.total_staked, 0);
    }

    #[test]
    fn overflow_is_reported() {
        let mut totals = PoolTotals::default();
        let mut record = AccountBalance::new(key(9), key(1), 0);
        totals.apply(&mut record, BalanceDelta::stake(u64::MAX)).unwrap();

        let err = totals.apply(&mut record, BalanceDelta::stake(1)).unwrap_err();
        assert_eq!(err, LedgerError::MathOverflow.into());
    }
}
