//! Owner-only administration: strategies, ownership and configuration.

use anchor_lang::prelude::*;

use super::LedgerState;
use crate::state::Strategy;

impl LedgerState {
    pub fn set_strategy(&mut self, caller: &Pubkey, id: u64, allocation: u64) -> Result<Strategy> {
        self.access.require_owner(caller)?;
        self.transact(|draft| draft.registry.set(id, allocation))
    }

    pub fn pause_strategy(&mut self, caller: &Pubkey, id: u64) -> Result<Strategy> {
        self.access.require_owner(caller)?;
        self.transact(|draft| draft.registry.pause(id))
    }

    pub fn resume_strategy(&mut self, caller: &Pubkey, id: u64) -> Result<Strategy> {
        self.access.require_owner(caller)?;
        self.transact(|draft| draft.registry.resume(id))
    }

    /// Returns the previous owner.
    pub fn set_owner(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        self.transact(|draft| draft.access.transfer(caller, new_owner))
    }

    /// Returns the previous cap.
    pub fn update_stack_cap(&mut self, caller: &Pubkey, stack_cap: u64) -> Result<u64> {
        self.access.require_owner(caller)?;
        self.transact(|draft| {
            Ok(std::mem::replace(&mut draft.config.stack_cap, stack_cap))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::testing::{new_ledger, user, Harness, MemoryCustody, OWNER};

    #[test]
    fn owner_manages_strategies() {
        let mut ledger = new_ledger();

        let strategy = ledger.set_strategy(&OWNER, 1, 100).unwrap();
        assert!(strategy.active);

        let paused = ledger.pause_strategy(&OWNER, 1).unwrap();
        assert!(!paused.active);
        assert_eq!(paused.allocation, 100);
        assert_eq!(ledger.registry.get(1), Some(&paused));

        let resumed = ledger.resume_strategy(&OWNER, 1).unwrap();
        assert!(resumed.active);
        assert_eq!(resumed.allocation, 100);
    }

    #[test]
    fn non_owner_is_rejected_everywhere() {
        let mut ledger = new_ledger();
        ledger.set_strategy(&OWNER, 1, 100).unwrap();
        let before = ledger.clone();
        let intruder = user(2);
        let not_authorized: anchor_lang::error::Error = LedgerError::NotAuthorized.into();

        assert_eq!(ledger.set_strategy(&intruder, 1, 5).unwrap_err(), not_authorized);
        assert_eq!(ledger.pause_strategy(&intruder, 1).unwrap_err(), not_authorized);
        assert_eq!(ledger.resume_strategy(&intruder, 1).unwrap_err(), not_authorized);
        assert_eq!(ledger.set_owner(&intruder, intruder).unwrap_err(), not_authorized);
        assert_eq!(ledger.update_stack_cap(&intruder, 1).unwrap_err(), not_authorized);
        assert_eq!(ledger.distribute_rewards(&intruder).unwrap_err(), not_authorized);

        let mut custody = MemoryCustody::with_wallet(1_000);
        assert_eq!(
            ledger.convert_rewards(&mut custody, intruder, 1_000).unwrap_err(),
            not_authorized
        );

        assert_eq!(ledger, before);
    }

    #[test]
    fn pausing_unknown_strategy_fails() {
        let mut ledger = new_ledger();
        assert_eq!(
            ledger.pause_strategy(&OWNER, 1).unwrap_err(),
            LedgerError::StrategyNotFound.into()
        );
        assert_eq!(
            ledger.resume_strategy(&OWNER, 1).unwrap_err(),
            LedgerError::StrategyNotFound.into()
        );
    }

    #[test]
    fn ownership_transfer_is_atomic() {
        let mut ledger = new_ledger();
        let next = user(1);
        let third = user(3);

        assert_eq!(ledger.set_owner(&OWNER, next).unwrap(), OWNER);
        assert_eq!(ledger.owner(), next);

        // The new owner can act; the old one cannot.
        ledger.set_strategy(&next, 1, 100).unwrap();
        assert_eq!(
            ledger.set_strategy(&OWNER, 2, 100).unwrap_err(),
            LedgerError::NotAuthorized.into()
        );
        assert_eq!(
            ledger.set_owner(&third, OWNER).unwrap_err(),
            LedgerError::NotAuthorized.into()
        );
        assert_eq!(ledger.owner(), next);
    }

    #[test]
    fn stack_cap_can_be_raised() {
        let mut harness = Harness::new();
        assert_eq!(harness.ledger.update_stack_cap(&OWNER, 200).unwrap(), 0);

        let mut custody = MemoryCustody::with_wallet(1_000);
        assert_eq!(
            harness.stack(&mut custody, user(1), 201).unwrap_err(),
            LedgerError::CapExceeded.into()
        );

        assert_eq!(harness.ledger.update_stack_cap(&OWNER, 300).unwrap(), 200);
        assert_eq!(harness.stack(&mut custody, user(1), 201).unwrap(), 201);
    }
}
