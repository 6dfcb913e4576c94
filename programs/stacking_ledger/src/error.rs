//! Error types for the Stacking Ledger program.
//!
//! Every failure an instruction can report is one variant of [`LedgerError`].
//! Errors are side-effect free: a failed instruction leaves the ledger exactly
//! as it found it.

use anchor_lang::prelude::*;

/// Custom error codes for the Stacking Ledger program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum LedgerError {
    // ========== Authorization Errors ==========

    /// [6000] Caller is not the ledger owner (or not the balance's user).
    #[msg("Not authorized: caller lacks the required privilege")]
    NotAuthorized,

    /// [6001] Ownership cannot be handed to the default (all-zero) key.
    #[msg("Invalid owner: new owner must not be the default pubkey")]
    InvalidOwner,

    // ========== Balance Errors ==========

    /// [6002] Stack or deposit exceeds the caller's available base asset.
    #[msg("Insufficient funds to stack this amount")]
    InsufficientFunds,

    /// [6003] Unstack or pool removal exceeds the recorded staked amount.
    #[msg("Insufficient stacked balance for this operation")]
    InsufficientStaked,

    /// [6004] A balance delta would drive a stored amount negative.
    #[msg("Balance delta would make a stored amount negative")]
    InsufficientBalance,

    /// [6005] No balance record exists for the requested user.
    #[msg("User not found in ledger")]
    UserNotFound,

    /// [6006] Amount must be non-zero.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// [6007] Stacking would exceed the ledger's per-user cap.
    #[msg("Stacking would exceed the per-user cap")]
    CapExceeded,

    // ========== Strategy Errors ==========

    /// [6008] The requested strategy is not registered.
    #[msg("Strategy not found")]
    StrategyNotFound,

    /// [6009] The requested strategy is paused and refuses deposits.
    #[msg("Strategy is inactive")]
    StrategyInactive,

    // ========== Capacity/Math Errors ==========

    /// [6010] The registry has no room for another strategy.
    #[msg("Strategy registry is full")]
    RegistryFull,

    /// [6011] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6012] A state transition broke a ledger invariant.
    #[msg("Ledger invariant violated")]
    InvariantViolation,

    // ========== Account Validation Errors ==========

    /// [6013] Token account or mint does not match the ledger's base mint.
    #[msg("Token mint mismatch - wrong token for this ledger")]
    MintMismatch,

    /// [6014] The vault passed does not match the ledger's vault.
    #[msg("Vault address mismatch")]
    VaultMismatch,

    /// [6015] Vault authority is not the ledger PDA.
    #[msg("Vault owner must be the ledger PDA")]
    InvalidVaultOwner,

    /// [6016] The balance account passed belongs to another user or ledger.
    #[msg("Balance account does not match this user and ledger")]
    BalanceMismatch,
}
