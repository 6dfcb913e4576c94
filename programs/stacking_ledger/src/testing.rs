//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;

use crate::accounting::{LedgerState, PoolDetails, StackInfo, UserDetails};
use crate::custody::Custody;
use crate::state::{AccountBalance, LedgerConfig};

pub const OWNER: Pubkey = Pubkey::new_from_array([200; 32]);
pub const LEDGER: Pubkey = Pubkey::new_from_array([100; 32]);

pub fn user(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

pub fn new_ledger() -> LedgerState {
    LedgerState::new(OWNER, LedgerConfig::uncapped())
}

pub fn open_record(who: Pubkey) -> AccountBalance {
    AccountBalance::new(LEDGER, who, 255)
}

/// A ledger plus the balance accounts that exist for it, the way the
/// instruction handlers see them: a record is created on first successful
/// use and never removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Harness {
    pub ledger: LedgerState,
    pub balances: BTreeMap<Pubkey, AccountBalance>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::uncapped())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            ledger: LedgerState::new(OWNER, config),
            balances: BTreeMap::new(),
        }
    }

    pub fn record(&self, who: Pubkey) -> Option<&AccountBalance> {
        self.balances.get(&who)
    }

    pub fn stack(&mut self, custody: &mut MemoryCustody, who: Pubkey, amount: u64) -> Result<u64> {
        self.run(who, |ledger, record| ledger.stack(custody, &who, record, amount))
    }

    pub fn unstack(&mut self, custody: &mut MemoryCustody, who: Pubkey, amount: u64) -> Result<u64> {
        self.unstack_as(custody, who, who, amount)
    }

    pub fn unstack_as(
        &mut self,
        custody: &mut MemoryCustody,
        caller: Pubkey,
        who: Pubkey,
        amount: u64,
    ) -> Result<u64> {
        self.run(who, |ledger, record| {
            ledger.unstack(custody, &caller, record, amount)
        })
    }

    pub fn add_to_pool(
        &mut self,
        custody: &mut MemoryCustody,
        amount: u64,
        who: Pubkey,
        strategy_id: u64,
    ) -> Result<u64> {
        self.run(who, |ledger, record| {
            ledger.add_to_pool(custody, record, amount, strategy_id)
        })
    }

    pub fn remove_from_pool(
        &mut self,
        custody: &mut MemoryCustody,
        caller: Pubkey,
        amount: u64,
        who: Pubkey,
    ) -> Result<u64> {
        self.run(who, |ledger, record| {
            ledger.remove_from_pool(custody, &caller, record, amount)
        })
    }

    pub fn withdraw_rewards(&mut self, custody: &mut MemoryCustody, who: Pubkey) -> Result<u64> {
        self.ledger
            .withdraw_rewards(custody, &who, self.balances.get_mut(&who))
    }

    pub fn stack_info(&self, who: Pubkey) -> Result<StackInfo> {
        self.ledger.stack_info(self.record(who))
    }

    pub fn user_details(&self, who: Pubkey) -> Result<UserDetails> {
        self.ledger.user_details(self.record(who))
    }

    pub fn pool_details(&self, who: Pubkey) -> Result<PoolDetails> {
        self.ledger.pool_details(self.record(who))
    }

    pub fn staked_sum(&self) -> u64 {
        self.balances.values().map(|record| record.staked).sum()
    }

    /// Rewards every record could withdraw right now.
    pub fn claimable_sum(&self) -> u128 {
        self.balances
            .values()
            .map(|record| self.ledger.claimable_of(record).map_or(0, u128::from))
            .sum()
    }

    fn run<T>(
        &mut self,
        who: Pubkey,
        op: impl FnOnce(&mut LedgerState, &mut AccountBalance) -> Result<T>,
    ) -> Result<T> {
        let mut record = self
            .balances
            .get(&who)
            .cloned()
            .unwrap_or_else(|| open_record(who));
        let value = op(&mut self.ledger, &mut record)?;
        self.balances.insert(who, record);
        Ok(value)
    }
}

/// In-memory stand-in for the token vault transfers.
#[derive(Debug, Default)]
pub struct MemoryCustody {
    pub wallet: u64,
    pub vault: u64,
    pub fail_transfers: bool,
}

impl MemoryCustody {
    pub fn with_wallet(wallet: u64) -> Self {
        Self {
            wallet,
            ..Self::default()
        }
    }

    pub fn failing(wallet: u64) -> Self {
        Self {
            wallet,
            vault: 0,
            fail_transfers: true,
        }
    }
}

impl Custody for MemoryCustody {
    fn available(&self) -> u64 {
        self.wallet
    }

    fn receive(&mut self, amount: u64) -> Result<()> {
        if self.fail_transfers || amount > self.wallet {
            return Err(ProgramError::InsufficientFunds.into());
        }
        self.wallet -= amount;
        self.vault += amount;
        Ok(())
    }

    fn release(&mut self, amount: u64) -> Result<()> {
        if self.fail_transfers {
            return Err(ProgramError::InsufficientFunds.into());
        }
        // Vault balance is not tracked per test; payouts come from elsewhere.
        self.vault = self.vault.saturating_sub(amount);
        self.wallet += amount;
        Ok(())
    }
}
