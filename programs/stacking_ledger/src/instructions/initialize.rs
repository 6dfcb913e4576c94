//! Initialize instruction handler.
//!
//! Creates a ledger and the two token vaults it controls.
//!
//! ## Security Guarantees
//! - Stake and reward vaults are PDAs whose token authority is the ledger PDA
//! - Mint address is locked to ledger state permanently
//! - The signer becomes the single owner

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::accounting::LedgerState;
use crate::constants::*;
use crate::error::LedgerError;
use crate::state::{Ledger, LedgerConfig};

/// Accounts required for ledger initialization.
///
/// ## Security Notes
/// - `stake_vault` and `reward_vault` are PDAs with `ledger` as authority
/// - Seeds ensure these accounts cannot be swapped or replaced
/// - `ledger_id` lets one mint back several independent ledgers
#[derive(Accounts)]
#[instruction(ledger_id: u64)]
pub struct InitializeLedger<'info> {
    /// The initial owner of the ledger.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The ledger account to be created.
    #[account(
        init,
        payer = authority,
        space = Ledger::LEN,
        seeds = [LEDGER_SEED, staking_mint.key().as_ref(), ledger_id.to_le_bytes().as_ref()],
        bump
    )]
    pub ledger: Account<'info, Ledger>,

    /// The base asset mint.
    pub staking_mint: Account<'info, Mint>,

    /// Vault holding stacked principal.
    #[account(
        init,
        payer = authority,
        seeds = [STAKE_VAULT_SEED, ledger.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = ledger
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Vault holding converted rewards.
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, ledger.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = ledger
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for token account operations.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new ledger.
///
/// # Arguments
/// * `ctx` - InitializeLedger accounts context
/// * `ledger_id` - Distinguishes ledgers sharing a mint
/// * `stack_cap` - Per-user stacking cap, `NO_STACK_CAP` for none
pub fn initialize_handler(ctx: Context<InitializeLedger>, ledger_id: u64, stack_cap: u64) -> Result<()> {
    require!(
        ctx.accounts.stake_vault.owner == ctx.accounts.ledger.key(),
        LedgerError::InvalidVaultOwner
    );
    require!(
        ctx.accounts.reward_vault.owner == ctx.accounts.ledger.key(),
        LedgerError::InvalidVaultOwner
    );

    let owner = ctx.accounts.authority.key();
    let ledger = &mut ctx.accounts.ledger;
    let clock = Clock::get()?;

    ledger.ledger_id = ledger_id;
    ledger.staking_mint = ctx.accounts.staking_mint.key();
    ledger.stake_vault = ctx.accounts.stake_vault.key();
    ledger.reward_vault = ctx.accounts.reward_vault.key();
    ledger.state = LedgerState::new(owner, LedgerConfig::with_cap(stack_cap));
    ledger.created_at = clock.unix_timestamp;
    ledger.last_updated = clock.unix_timestamp;

    ledger.bump = ctx.bumps.ledger;
    ledger.stake_vault_bump = ctx.bumps.stake_vault;
    ledger.reward_vault_bump = ctx.bumps.reward_vault;

    msg!("Ledger {} initialized", ledger_id);
    msg!("Owner: {}", owner);
    msg!("Mint: {}, stack cap: {}", ledger.staking_mint, stack_cap);

    Ok(())
}
