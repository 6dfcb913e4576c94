//! Invariant checker run on every committed ledger transition.

use anchor_lang::prelude::*;

use super::rewards::accrued;
use super::LedgerState;
use crate::constants::{MAX_STRATEGIES, REWARD_PRECISION};
use crate::error::LedgerError;
use crate::state::AccountBalance;

/// Check the ledger-wide invariants. Returns `InvariantViolation` if any is
/// broken.
pub fn check_invariants(state: &LedgerState) -> Result<()> {
    require!(
        state.access.owner != Pubkey::default(),
        LedgerError::InvariantViolation
    );
    require!(
        state.registry.len() <= MAX_STRATEGIES,
        LedgerError::InvariantViolation
    );

    // Strategy ids sorted and unique.
    let mut previous_id: Option<u64> = None;
    for strategy in state.registry.iter() {
        if let Some(previous_id) = previous_id {
            require!(previous_id < strategy.id, LedgerError::InvariantViolation);
        }
        previous_id = Some(strategy.id);
    }

    // Every converted unit is either still pooled or was handed to stakers.
    let pool = &state.reward_pool;
    let totals = &state.totals;
    require!(pool.carry < REWARD_PRECISION, LedgerError::InvariantViolation);
    let accounted = pool
        .undistributed
        .checked_add(totals.total_distributed)
        .ok_or(LedgerError::InvariantViolation)?;
    require!(
        accounted == totals.total_converted,
        LedgerError::InvariantViolation
    );
    require!(
        totals.total_withdrawn <= totals.total_distributed,
        LedgerError::InvariantViolation
    );

    Ok(())
}

/// Check one user's record against the ledger it was committed with.
pub fn check_record(state: &LedgerState, record: &AccountBalance) -> Result<()> {
    require!(record.is_open(), LedgerError::InvariantViolation);
    require!(
        record.staked <= state.totals.total_staked,
        LedgerError::InvariantViolation
    );
    require!(
        record.reward_residue < REWARD_PRECISION,
        LedgerError::InvariantViolation
    );

    // Settled against the current reward-per-share.
    let expected_debt = accrued(record.staked, state.reward_pool.reward_per_share)?;
    require!(
        record.reward_debt == expected_debt,
        LedgerError::InvariantViolation
    );

    if let Some(strategy_id) = record.strategy_id {
        require!(
            state.registry.get(strategy_id).is_some(),
            LedgerError::InvariantViolation
        );
    }

    Ok(())
}
