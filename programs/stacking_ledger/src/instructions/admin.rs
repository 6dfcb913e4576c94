//! Admin instruction handlers.
//!
//! Handles owner-only operations on a ledger.
//!
//! ## Security Guarantees
//! - Every handler goes through the ledger's owner guard before mutating
//! - PDA validation ensures the correct ledger

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::{OwnerChanged, StackCapUpdated, StrategyUpdated};
use crate::state::{Ledger, Strategy};

/// Accounts required for owner operations.
///
/// The signer is checked against the ledger owner by the accounting layer,
/// so a non-owner fails with `NotAuthorized` before any state changes.
#[derive(Accounts)]
pub struct LedgerAdmin<'info> {
    /// The acting authority.
    pub authority: Signer<'info>,

    /// The ledger to modify.
    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref(), ledger.ledger_id.to_le_bytes().as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,
}

fn emit_strategy(ledger: Pubkey, strategy: &Strategy) {
    emit!(StrategyUpdated {
        ledger,
        strategy_id: strategy.id,
        allocation: strategy.allocation,
        active: strategy.active,
    });
}

/// Create or overwrite a strategy. New strategies start active.
pub fn set_strategy_handler(ctx: Context<LedgerAdmin>, strategy_id: u64, allocation: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let ledger = &mut ctx.accounts.ledger;
    let clock = Clock::get()?;

    let strategy = ledger.state.set_strategy(&authority, strategy_id, allocation)?;
    ledger.last_updated = clock.unix_timestamp;
    emit_strategy(ledger.key(), &strategy);

    msg!("Strategy {} set: allocation={}", strategy_id, allocation);
    msg!("Admin: {}", authority);

    Ok(())
}

/// Stop a strategy from accepting deposits. Withdrawals are unaffected.
pub fn pause_strategy_handler(ctx: Context<LedgerAdmin>, strategy_id: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let ledger = &mut ctx.accounts.ledger;
    let clock = Clock::get()?;

    let strategy = ledger.state.pause_strategy(&authority, strategy_id)?;
    ledger.last_updated = clock.unix_timestamp;
    emit_strategy(ledger.key(), &strategy);

    msg!("Strategy {} PAUSED", strategy_id);
    msg!("Admin: {}", authority);

    Ok(())
}

/// Let a paused strategy accept deposits again.
pub fn resume_strategy_handler(ctx: Context<LedgerAdmin>, strategy_id: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let ledger = &mut ctx.accounts.ledger;
    let clock = Clock::get()?;

    let strategy = ledger.state.resume_strategy(&authority, strategy_id)?;
    ledger.last_updated = clock.unix_timestamp;
    emit_strategy(ledger.key(), &strategy);

    msg!("Strategy {} RESUMED", strategy_id);
    msg!("Admin: {}", authority);

    Ok(())
}

/// Transfer ownership to a new address.
///
/// # Security
/// - Only the current owner can call this
/// - The old owner loses authority in the same instruction
/// - New owner must be a non-default pubkey
pub fn set_owner_handler(ctx: Context<LedgerAdmin>, new_owner: Pubkey) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let ledger = &mut ctx.accounts.ledger;
    let clock = Clock::get()?;

    let previous_owner = ledger.state.set_owner(&authority, new_owner)?;
    ledger.last_updated = clock.unix_timestamp;

    emit!(OwnerChanged {
        ledger: ledger.key(),
        previous_owner,
        new_owner,
    });

    msg!("Owner transferred: {} -> {}", previous_owner, new_owner);

    Ok(())
}

/// Update the per-user stacking cap (`NO_STACK_CAP` removes it).
///
/// Existing positions above a lowered cap are kept; only new stacking is
/// checked.
pub fn update_stack_cap_handler(ctx: Context<LedgerAdmin>, new_cap: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let ledger = &mut ctx.accounts.ledger;
    let clock = Clock::get()?;

    let previous_cap = ledger.state.update_stack_cap(&authority, new_cap)?;
    ledger.last_updated = clock.unix_timestamp;

    emit!(StackCapUpdated {
        ledger: ledger.key(),
        previous_cap,
        new_cap,
    });

    msg!("Stack cap updated: {} -> {}", previous_cap, new_cap);
    msg!("Admin: {}", authority);

    Ok(())
}
