//! # Stacking Ledger Program
//!
//! Staking and reward ledgers for a single base token. One program serves
//! three ways of using a ledger:
//!
//! - **Liquid stacking**: `stack` / `unstack` the caller's own tokens
//! - **Stacking rewards**: owner converts tokens into a reward pool and
//!   distributes it pro-rata to stackers, who then withdraw their credit
//! - **Strategy pool**: deposit on behalf of a user into an owner-managed
//!   strategy that can be paused to block new deposits
//!
//! ## Features
//! - Every operation is all-or-nothing and re-checks the ledger invariants
//! - Single-owner administration with atomic ownership transfer
//! - Optional per-user stacking cap
//! - Safe math with overflow protection
//!
//! The accounting lives in [`accounting`] and does not depend on the runtime;
//! the instruction handlers bind it to SPL token vaults.

use anchor_lang::prelude::*;

declare_id!("5tkLdgDFzAoGFS7vDEBV2JbeSE7hbDstawnfD2txEKSc");

pub mod accounting;
pub mod constants;
pub mod custody;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod testing;

use accounting::{LedgerTotals, PoolDetails, StackInfo, UserDetails};
use instructions::*;
use state::Strategy;

#[program]
pub mod stacking_ledger {
    use super::*;

    /// Creates a ledger owned by the signer.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `ledger_id` - Distinguishes ledgers that share a mint
    /// * `stack_cap` - Per-user stacking cap (0 = uncapped)
    pub fn initialize(ctx: Context<InitializeLedger>, ledger_id: u64, stack_cap: u64) -> Result<()> {
        instructions::initialize::initialize_handler(ctx, ledger_id, stack_cap)
    }

    /// Stacks the caller's tokens. Returns the caller's new staked total.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - Caller's token balance is below `amount` (`InsufficientFunds`)
    /// - The per-user cap would be exceeded (`CapExceeded`)
    pub fn stack(ctx: Context<StakeTransfer>, amount: u64) -> Result<u64> {
        instructions::stack::stack_handler(ctx, amount)
    }

    /// Unstacks the caller's tokens. Returns the caller's remaining total.
    ///
    /// # Errors
    /// Returns `InsufficientStaked` if `amount` exceeds the staked balance.
    pub fn unstack(ctx: Context<StakeTransfer>, amount: u64) -> Result<u64> {
        instructions::stack::unstack_handler(ctx, amount)
    }

    /// Deposits the caller's tokens into `user`'s position under a strategy.
    /// Anyone may fund any user; the principal belongs to `user`.
    /// Returns the user's new total.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The strategy does not exist (`StrategyNotFound`)
    /// - The strategy is paused (`StrategyInactive`)
    /// - Caller's token balance is below `amount` (`InsufficientFunds`)
    pub fn add_to_pool(
        ctx: Context<PoolTransfer>,
        amount: u64,
        user: Pubkey,
        strategy_id: u64,
    ) -> Result<u64> {
        instructions::pool::add_to_pool_handler(ctx, amount, user, strategy_id)
    }

    /// Returns pooled tokens from `user`'s position to `user`, who must be
    /// the caller. Returns the user's remaining total.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The caller is not `user` (`NotAuthorized`)
    /// - `amount` exceeds the position (`InsufficientStaked`)
    pub fn remove_from_pool(ctx: Context<PoolTransfer>, amount: u64, user: Pubkey) -> Result<u64> {
        instructions::pool::remove_from_pool_handler(ctx, amount, user)
    }

    /// Owner-only: creates or overwrites a strategy (always active after).
    pub fn set_strategy(ctx: Context<LedgerAdmin>, strategy_id: u64, allocation: u64) -> Result<()> {
        instructions::admin::set_strategy_handler(ctx, strategy_id, allocation)
    }

    /// Owner-only: blocks new deposits into a strategy.
    pub fn pause_strategy(ctx: Context<LedgerAdmin>, strategy_id: u64) -> Result<()> {
        instructions::admin::pause_strategy_handler(ctx, strategy_id)
    }

    /// Owner-only: re-opens a paused strategy.
    pub fn resume_strategy(ctx: Context<LedgerAdmin>, strategy_id: u64) -> Result<()> {
        instructions::admin::resume_strategy_handler(ctx, strategy_id)
    }

    /// Owner-only: hands ownership to `new_owner`.
    pub fn set_owner(ctx: Context<LedgerAdmin>, new_owner: Pubkey) -> Result<()> {
        instructions::admin::set_owner_handler(ctx, new_owner)
    }

    /// Owner-only: changes the per-user stacking cap.
    pub fn update_stack_cap(ctx: Context<LedgerAdmin>, new_cap: u64) -> Result<()> {
        instructions::admin::update_stack_cap_handler(ctx, new_cap)
    }

    /// Owner-only: moves tokens into the reward pool. Returns the pool size.
    pub fn convert_rewards(ctx: Context<RewardTransfer>, amount: u64) -> Result<u64> {
        instructions::rewards::convert_rewards_handler(ctx, amount)
    }

    /// Owner-only: credits the reward pool to stakers pro-rata. Returns the
    /// whole units that left the pool.
    pub fn distribute_rewards(ctx: Context<LedgerAdmin>) -> Result<u64> {
        instructions::rewards::distribute_rewards_handler(ctx)
    }

    /// Pays out the caller's claimable rewards. Returns the amount paid.
    pub fn withdraw_rewards(ctx: Context<RewardWithdrawal>) -> Result<u64> {
        instructions::rewards::withdraw_rewards_handler(ctx)
    }

    /// Returns `user`'s stacked amount.
    pub fn get_stack_info(ctx: Context<ReadBalance>, user: Pubkey) -> Result<StackInfo> {
        instructions::views::get_stack_info_handler(ctx, user)
    }

    /// Returns `user`'s staked amount and withdrawable rewards.
    pub fn get_user_details(ctx: Context<ReadBalance>, user: Pubkey) -> Result<UserDetails> {
        instructions::views::get_user_details_handler(ctx, user)
    }

    /// Returns `user`'s pooled amount and strategy.
    pub fn get_pool_details(ctx: Context<ReadBalance>, user: Pubkey) -> Result<PoolDetails> {
        instructions::views::get_pool_details_handler(ctx, user)
    }

    /// Returns the strategy with `strategy_id`, or `None` if there is none.
    pub fn get_strategy(ctx: Context<ReadLedger>, strategy_id: u64) -> Result<Option<Strategy>> {
        instructions::views::get_strategy_handler(ctx, strategy_id)
    }

    /// Returns the ledger's total staked principal.
    pub fn get_total_pooled(ctx: Context<ReadLedger>) -> Result<u64> {
        instructions::views::get_total_pooled_handler(ctx)
    }

    /// Returns total staked and converted rewards not yet withdrawn.
    pub fn get_total_stacked_and_rewards(ctx: Context<ReadLedger>) -> Result<LedgerTotals> {
        instructions::views::get_total_stacked_and_rewards_handler(ctx)
    }
}
