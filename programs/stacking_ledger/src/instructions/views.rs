//! Read-only instruction handlers.
//!
//! Values come back through Anchor return data. Per-user views take the
//! user's balance account as an optional account; leaving it out means the
//! user has no record and is reported as `UserNotFound`.

use anchor_lang::prelude::*;

use crate::accounting::{LedgerTotals, PoolDetails, StackInfo, UserDetails};
use crate::constants::*;
use crate::error::LedgerError;
use crate::state::{AccountBalance, Ledger, Strategy};

/// Accounts required to read a ledger.
#[derive(Accounts)]
pub struct ReadLedger<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref(), ledger.ledger_id.to_le_bytes().as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,
}

/// Accounts required to read one user's position in a ledger.
#[derive(Accounts)]
pub struct ReadBalance<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref(), ledger.ledger_id.to_le_bytes().as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    pub user_balance: Option<Account<'info, AccountBalance>>,
}

impl<'info> ReadBalance<'info> {
    fn record(&self, user: &Pubkey) -> Result<Option<&AccountBalance>> {
        match self.user_balance.as_deref() {
            Some(record) => {
                require!(
                    record.belongs_to(&self.ledger.key(), user),
                    LedgerError::BalanceMismatch
                );
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}

pub fn get_stack_info_handler(ctx: Context<ReadBalance>, user: Pubkey) -> Result<StackInfo> {
    let record = ctx.accounts.record(&user)?;
    ctx.accounts.ledger.state.stack_info(record)
}

pub fn get_user_details_handler(ctx: Context<ReadBalance>, user: Pubkey) -> Result<UserDetails> {
    let record = ctx.accounts.record(&user)?;
    ctx.accounts.ledger.state.user_details(record)
}

pub fn get_pool_details_handler(ctx: Context<ReadBalance>, user: Pubkey) -> Result<PoolDetails> {
    let record = ctx.accounts.record(&user)?;
    ctx.accounts.ledger.state.pool_details(record)
}

/// `None` when no strategy has that id.
pub fn get_strategy_handler(ctx: Context<ReadLedger>, strategy_id: u64) -> Result<Option<Strategy>> {
    Ok(ctx.accounts.ledger.state.registry.get(strategy_id).copied())
}

pub fn get_total_pooled_handler(ctx: Context<ReadLedger>) -> Result<u64> {
    Ok(ctx.accounts.ledger.state.total_pooled())
}

pub fn get_total_stacked_and_rewards_handler(ctx: Context<ReadLedger>) -> Result<LedgerTotals> {
    ctx.accounts.ledger.state.totals()
}
