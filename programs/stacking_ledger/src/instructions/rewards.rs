//! Reward instruction handlers.
//!
//! Conversion funds the reward vault, distribution credits stakers pro-rata,
//! and withdrawal pays a staker's credit out of the reward vault.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody::TokenCustody;
use crate::error::LedgerError;
use crate::events::{RewardsConverted, RewardsDistributed, RewardsWithdrawn};
use crate::instructions::admin::LedgerAdmin;
use crate::state::{AccountBalance, Ledger};

/// Accounts required to move tokens in or out of the reward vault.
#[derive(Accounts)]
pub struct RewardTransfer<'info> {
    /// The owner funding the pool.
    #[account(mut)]
    pub caller: Signer<'info>,

    /// The ledger.
    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref(), ledger.ledger_id.to_le_bytes().as_ref()],
        bump = ledger.bump,
        has_one = reward_vault @ LedgerError::VaultMismatch,
        has_one = staking_mint @ LedgerError::MintMismatch
    )]
    pub ledger: Account<'info, Ledger>,

    /// The base asset mint.
    pub staking_mint: Account<'info, Mint>,

    /// Caller's token account for the base asset.
    #[account(
        mut,
        constraint = caller_token_account.mint == staking_mint.key() @ LedgerError::MintMismatch,
        constraint = caller_token_account.owner == caller.key() @ LedgerError::NotAuthorized
    )]
    pub caller_token_account: Account<'info, TokenAccount>,

    /// Ledger's reward vault.
    #[account(
        mut,
        constraint = reward_vault.owner == ledger.key() @ LedgerError::InvalidVaultOwner
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Owner-only: move base tokens into the reward pool at 1:1.
///
/// # Returns
/// The undistributed reward pool after conversion
pub fn convert_rewards_handler(ctx: Context<RewardTransfer>, amount: u64) -> Result<u64> {
    let caller = ctx.accounts.caller.key();
    let clock = Clock::get()?;

    let staking_mint = ctx.accounts.ledger.staking_mint;
    let id_bytes = ctx.accounts.ledger.id_bytes();
    let bump = [ctx.accounts.ledger.bump];
    let ledger_seeds: &[&[u8]] = &[LEDGER_SEED, staking_mint.as_ref(), &id_bytes, &bump];
    let ledger_info = ctx.accounts.ledger.to_account_info();

    let mut custody = TokenCustody::new(
        &ctx.accounts.token_program,
        &ctx.accounts.caller_token_account,
        &ctx.accounts.caller,
        &ctx.accounts.reward_vault,
        ledger_info,
        ledger_seeds,
    );

    let ledger = &mut ctx.accounts.ledger;
    let undistributed = ledger.state.convert_rewards(&mut custody, caller, amount)?;
    ledger.last_updated = clock.unix_timestamp;

    emit!(RewardsConverted {
        ledger: ledger.key(),
        amount,
        undistributed,
    });

    msg!("Converted {} tokens into rewards", amount);
    msg!("Undistributed rewards: {}", undistributed);

    Ok(undistributed)
}

/// Owner-only: credit the reward pool to stakers in proportion to stake.
///
/// # Returns
/// The amount credited (zero when nothing is staked or pooled)
pub fn distribute_rewards_handler(ctx: Context<LedgerAdmin>) -> Result<u64> {
    let authority = ctx.accounts.authority.key();
    let ledger = &mut ctx.accounts.ledger;
    let clock = Clock::get()?;

    let distributed = ledger.state.distribute_rewards(&authority)?;
    ledger.last_updated = clock.unix_timestamp;

    let pool = ledger.state.reward_pool;
    emit!(RewardsDistributed {
        ledger: ledger.key(),
        distributed,
        undistributed: pool.undistributed,
        carry: pool.carry,
        reward_per_share: pool.reward_per_share,
        total_staked: ledger.state.total_pooled(),
    });

    msg!("Distributed {} reward tokens", distributed);
    msg!("Remainder kept in pool: {}", pool.undistributed);
    msg!("Admin: {}", authority);

    Ok(distributed)
}

/// Accounts required to pay a staker's credit out of the reward vault.
#[derive(Accounts)]
pub struct RewardWithdrawal<'info> {
    /// The staker withdrawing.
    #[account(mut)]
    pub caller: Signer<'info>,

    /// The ledger.
    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref(), ledger.ledger_id.to_le_bytes().as_ref()],
        bump = ledger.bump,
        has_one = reward_vault @ LedgerError::VaultMismatch,
        has_one = staking_mint @ LedgerError::MintMismatch
    )]
    pub ledger: Account<'info, Ledger>,

    /// The caller's balance record, omitted if the caller never stacked.
    #[account(mut)]
    pub user_balance: Option<Account<'info, AccountBalance>>,

    /// The base asset mint.
    pub staking_mint: Account<'info, Mint>,

    /// Caller's token account for the base asset.
    #[account(
        mut,
        constraint = caller_token_account.mint == staking_mint.key() @ LedgerError::MintMismatch,
        constraint = caller_token_account.owner == caller.key() @ LedgerError::NotAuthorized
    )]
    pub caller_token_account: Account<'info, TokenAccount>,

    /// Ledger's reward vault.
    #[account(
        mut,
        constraint = reward_vault.owner == ledger.key() @ LedgerError::InvalidVaultOwner
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Pay the caller's claimable rewards from the reward vault.
///
/// # Returns
/// The amount paid, zero when nothing is claimable or the caller has no
/// balance record
pub fn withdraw_rewards_handler(ctx: Context<RewardWithdrawal>) -> Result<u64> {
    let caller = ctx.accounts.caller.key();
    let ledger_key = ctx.accounts.ledger.key();
    let clock = Clock::get()?;

    if let Some(record) = ctx.accounts.user_balance.as_ref() {
        require!(
            record.belongs_to(&ledger_key, &caller),
            LedgerError::BalanceMismatch
        );
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
        &ctx.accounts.reward_vault,
        ledger_info,
        ledger_seeds,
    );

    let ledger = &mut ctx.accounts.ledger;
    let record = ctx.accounts.user_balance.as_deref_mut();
    let amount = ledger.state.withdraw_rewards(&mut custody, &caller, record)?;
    if amount > 0 {
        ledger.last_updated = clock.unix_timestamp;
        emit!(RewardsWithdrawn {
            ledger: ledger.key(),
            user: caller,
            amount,
        });
    }

    msg!("Withdrew {} reward tokens", amount);

    Ok(amount)
}
