use anchor_lang::prelude::*;

use crate::error::LedgerError;

/// Single-owner authorization for privileged ledger operations.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessControl {
    pub owner: Pubkey,
}

impl AccessControl {
    pub const LEN: usize = 32;

    pub fn new(owner: Pubkey) -> Self {
        Self { owner }
    }

    /// Guard placed first in every privileged operation.
    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, LedgerError::NotAuthorized);
        Ok(())
    }

    /// Hands ownership to `new_owner`, returning the previous owner.
    pub fn transfer(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        self.require_owner(caller)?;
        require!(new_owner != Pubkey::default(), LedgerError::InvalidOwner);

        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_moves_authority_in_one_step() {
        let old = Pubkey::new_from_array([1; 32]);
        let new = Pubkey::new_from_array([2; 32]);
        let mut access = AccessControl::new(old);

        assert_eq!(access.transfer(&old, new).unwrap(), old);
        assert!(access.require_owner(&new).is_ok());
        assert_eq!(
            access.require_owner(&old).unwrap_err(),
            LedgerError::NotAuthorized.into()
        );
    }

    #[test]
    fn non_owner_cannot_transfer() {
        let owner = Pubkey::new_from_array([1; 32]);
        let intruder = Pubkey::new_from_array([3; 32]);
        let mut access = AccessControl::new(owner);

        assert_eq!(
            access.transfer(&intruder, intruder).unwrap_err(),
            LedgerError::NotAuthorized.into()
        );
        assert_eq!(access.owner, owner);
    }

    #[test]
    fn default_key_is_rejected() {
        let owner = Pubkey::new_from_array([1; 32]);
        let mut access = AccessControl::new(owner);

        assert_eq!(
            access.transfer(&owner, Pubkey::default()).unwrap_err(),
            LedgerError::InvalidOwner.into()
        );
        assert_eq!(access.owner, owner);
    }
}
