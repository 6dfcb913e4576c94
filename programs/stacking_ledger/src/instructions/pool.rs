//! Strategy pool deposit and withdrawal handlers.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody::TokenCustody;
use crate::error::LedgerError;
use crate::events::{PoolDeposited, PoolWithdrawn};
use crate::state::{AccountBalance, Ledger};

/// Accounts required to move principal in or out of a user's pooled
/// position. The caller funds deposits; only the position's user can
/// withdraw.
#[derive(Accounts)]
#[instruction(amount: u64, user: Pubkey)]
pub struct PoolTransfer<'info> {
    /// The caller moving tokens.
    #[account(mut)]
    pub caller: Signer<'info>,

    /// The ledger.
    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref(), ledger.ledger_id.to_le_bytes().as_ref()],
        bump = ledger.bump,
        has_one = stake_vault @ LedgerError::VaultMismatch,
        has_one = staking_mint @ LedgerError::MintMismatch
    )]
    pub ledger: Account<'info, Ledger>,

    /// `user`'s balance record (created on first deposit, paid by the caller).
    #[account(
        init_if_needed,
        payer = caller,
        space = AccountBalance::LEN,
        seeds = [USER_BALANCE_SEED, ledger.key().as_ref(), user.as_ref()],
        bump
    )]
    pub user_balance: Account<'info, AccountBalance>,

    /// The base asset mint.
    pub staking_mint: Account<'info, Mint>,

    /// Caller's token account for the base asset.
    #[account(
        mut,
        constraint = caller_token_account.mint == staking_mint.key() @ LedgerError::MintMismatch,
        constraint = caller_token_account.owner == caller.key() @ LedgerError::NotAuthorized
    )]
    pub caller_token_account: Account<'info, TokenAccount>,

    /// Ledger's stake vault.
    #[account(
        mut,
        constraint = stake_vault.owner == ledger.key() @ LedgerError::InvalidVaultOwner
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// System program.
    pub system_program: Program<'info, System>,
}

/// Deposit tokens from the caller into `user`'s position under a strategy.
///
/// # Arguments
/// * `ctx` - PoolTransfer accounts context
/// * `amount` - Amount of tokens to deposit
/// * `user` - Owner of the position
/// * `strategy_id` - Active strategy to route the deposit into
///
/// # Returns
/// The user's new pooled total
pub fn add_to_pool_handler(
    ctx: Context<PoolTransfer>,
    amount: u64,
    user: Pubkey,
    strategy_id: u64,
) -> Result<u64> {
    let depositor = ctx.accounts.caller.key();
    let ledger_key = ctx.accounts.ledger.key();
    let clock = Clock::get()?;

    let record = &mut ctx.accounts.user_balance;
    if !record.is_open() {
        record.open(ledger_key, user, ctx.bumps.user_balance);
    }

    let staking_mint = ctx.accounts.ledger.staking_mint;
    let id_bytes = ctx.accounts.ledger.id_bytes();
    let bump = [ctx.accounts.ledger.bump];
    let ledger_seeds: &[&[u8]] = &[LEDGER_SEED, staking_mint.as_ref(), &id_bytes, &bump];
    let ledger_info = ctx.accounts.ledger.to_account_info();

    let mut custody = TokenCustody::new(
        &ctx.accounts.token_program,
        &ctx.accounts.caller_token_account,
        &ctx.accounts.caller,
        &ctx.accounts.stake_vault,
        ledger_info,
        ledger_seeds,
    );

    let ledger = &mut ctx.accounts.ledger;
    let staked = ledger.state.add_to_pool(
        &mut custody,
        &mut ctx.accounts.user_balance,
        amount,
        strategy_id,
    )?;
    ledger.last_updated = clock.unix_timestamp;

    emit!(PoolDeposited {
        ledger: ledger.key(),
        depositor,
        user,
        strategy_id,
        amount,
        user_staked: staked,
        total_staked: ledger.state.total_pooled(),
    });

    msg!("Pooled {} tokens for {} in strategy {}", amount, user, strategy_id);
    msg!("Total pooled: {}", ledger.state.total_pooled());

    Ok(staked)
}

/// Withdraw tokens from the caller's pooled position. `user` must be the
/// caller.
///
/// # Returns
/// The user's remaining pooled total
pub fn remove_from_pool_handler(ctx: Context<PoolTransfer>, amount: u64, user: Pubkey) -> Result<u64> {
    let caller = ctx.accounts.caller.key();
    let ledger_key = ctx.accounts.ledger.key();
    let clock = Clock::get()?;

    // A record created by this call holds nothing, so the withdrawal fails
    // below and the creation is rolled back with it.
    let record = &mut ctx.accounts.user_balance;
    if !record.is_open() {
        record.open(ledger_key, user, ctx.bumps.user_balance);
    }

    let staking_mint = ctx.accounts.ledger.staking_mint;
    let id_bytes = ctx.accounts.ledger.id_bytes();
    let bump = [ctx.accounts.ledger.bump];
    let ledger_seeds: &[&[u8]] = &[LEDGER_SEED, staking_mint.as_ref(), &id_bytes, &bump];
    let ledger_info = ctx.accounts.ledger.to_account_info();

    let mut custody = TokenCustody::new(
        &ctx.accounts.token_program,
        &ctx.accounts.caller_token_account,
        &ctx.accounts.caller,
        &ctx.accounts.stake_vault,
        ledger_info,
        ledger_seeds,
    );

    let ledger = &mut ctx.accounts.ledger;
    let staked = ledger.state.remove_from_pool(
        &mut custody,
        &caller,
        &mut ctx.accounts.user_balance,
        amount,
    )?;
    ledger.last_updated = clock.unix_timestamp;

    emit!(PoolWithdrawn {
        ledger: ledger.key(),
        user,
        amount,
        user_staked: staked,
        total_staked: ledger.state.total_pooled(),
    });

    msg!("Removed {} tokens from pool for {}", amount, user);
    msg!("Total pooled: {}", ledger.state.total_pooled());

    Ok(staked)
}
