//! Base-asset movement between a caller and the ledger's vaults.
//!
//! Accounting code only sees the [`Custody`] trait. On chain it is backed by
//! SPL token transfers against a PDA-owned vault.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

/// Asset-transfer primitive bound to one caller and one custody vault.
pub trait Custody {
    /// Base-asset balance the caller can move into custody.
    fn available(&self) -> u64;

    /// Moves `amount` from the caller into custody.
    fn receive(&mut self, amount: u64) -> Result<()>;

    /// Pays `amount` out of custody to the caller.
    fn release(&mut self, amount: u64) -> Result<()>;
}

/// [`Custody`] over an SPL token vault whose authority is the ledger PDA.
pub struct TokenCustody<'a, 'info> {
    token_program: &'a Program<'info, Token>,
    holder: &'a Account<'info, TokenAccount>,
    holder_authority: &'a Signer<'info>,
    vault: &'a Account<'info, TokenAccount>,
    ledger: AccountInfo<'info>,
    ledger_seeds: &'a [&'a [u8]],
}

impl<'a, 'info> TokenCustody<'a, 'info> {
    pub fn new(
        token_program: &'a Program<'info, Token>,
        holder: &'a Account<'info, TokenAccount>,
        holder_authority: &'a Signer<'info>,
        vault: &'a Account<'info, TokenAccount>,
        ledger: AccountInfo<'info>,
        ledger_seeds: &'a [&'a [u8]],
    ) -> Self {
        Self {
            token_program,
            holder,
            holder_authority,
            vault,
            ledger,
            ledger_seeds,
        }
    }
}

impl<'a, 'info> Custody for TokenCustody<'a, 'info> {
    fn available(&self) -> u64 {
        self.holder.amount
    }

    fn receive(&mut self, amount: u64) -> Result<()> {
        let cpi_accounts = Transfer {
            from: self.holder.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.holder_authority.to_account_info(),
        };
        let cpi_program = self.token_program.to_account_info();
        let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
        token::transfer(cpi_ctx, amount)
    }

    fn release(&mut self, amount: u64) -> Result<()> {
        let signer_seeds = &[self.ledger_seeds];
        let cpi_accounts = Transfer {
            from: self.vault.to_account_info(),
            to: self.holder.to_account_info(),
            authority: self.ledger.clone(),
        };
        let cpi_program = self.token_program.to_account_info();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, amount)
    }
}
