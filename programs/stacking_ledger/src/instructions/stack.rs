//! Stack and unstack instruction handlers.
//!
//! Moves base tokens between the caller and the ledger's stake vault.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody::TokenCustody;
use crate::error::LedgerError;
use crate::events::{Stacked, Unstacked};
use crate::state::{AccountBalance, Ledger};

/// Accounts required to move the caller's own principal in or out of the
/// stake vault. Shared by `stack` and `unstack`.
#[derive(Accounts)]
pub struct StakeTransfer<'info> {
    /// The caller moving tokens.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The ledger.
    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref(), ledger.ledger_id.to_le_bytes().as_ref()],
        bump = ledger.bump,
        has_one = stake_vault @ LedgerError::VaultMismatch,
        has_one = staking_mint @ LedgerError::MintMismatch
    )]
    pub ledger: Account<'info, Ledger>,

    /// The caller's balance record (created on first use).
    #[account(
        init_if_needed,
        payer = user,
        space = AccountBalance::LEN,
        seeds = [USER_BALANCE_SEED, ledger.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_balance: Account<'info, AccountBalance>,

    /// The base asset mint.
    pub staking_mint: Account<'info, Mint>,

    /// Caller's token account for the base asset.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ LedgerError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ LedgerError::NotAuthorized
    )]
    pub user_token_account: Account<'info, TokenAccount>,

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

/// Stack tokens into the ledger.
///
/// # Returns
/// The caller's new staked total
pub fn stack_handler(ctx: Context<StakeTransfer>, amount: u64) -> Result<u64> {
    let user = ctx.accounts.user.key();
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
        &ctx.accounts.user_token_account,
        &ctx.accounts.user,
        &ctx.accounts.stake_vault,
        ledger_info,
        ledger_seeds,
    );

    let ledger = &mut ctx.accounts.ledger;
    let staked = ledger
        .state
        .stack(&mut custody, &user, &mut ctx.accounts.user_balance, amount)?;
    ledger.last_updated = clock.unix_timestamp;

    emit!(Stacked {
        ledger: ledger.key(),
        user,
        amount,
        user_staked: staked,
        total_staked: ledger.state.total_pooled(),
    });

    msg!("Stacked {} tokens", amount);
    msg!("Total stacked by user: {}", staked);

    Ok(staked)
}

/// Unstack tokens from the ledger.
///
/// # Returns
/// The caller's remaining staked total
pub fn unstack_handler(ctx: Context<StakeTransfer>, amount: u64) -> Result<u64> {
    let user = ctx.accounts.user.key();
    let ledger_key = ctx.accounts.ledger.key();
    let clock = Clock::get()?;

    // A record created by this call holds nothing, so the unstack fails below
    // and the creation is rolled back with it.
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
        &ctx.accounts.user_token_account,
        &ctx.accounts.user,
        &ctx.accounts.stake_vault,
        ledger_info,
        ledger_seeds,
    );

    let ledger = &mut ctx.accounts.ledger;
    let staked = ledger
        .state
        .unstack(&mut custody, &user, &mut ctx.accounts.user_balance, amount)?;
    ledger.last_updated = clock.unix_timestamp;

    emit!(Unstacked {
        ledger: ledger.key(),
        user,
        amount,
        user_staked: staked,
        total_staked: ledger.state.total_pooled(),
    });

    msg!("Unstacked {} tokens", amount);
    msg!("Remaining stacked: {}", staked);

    Ok(staked)
}
