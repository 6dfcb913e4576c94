use anchor_lang::prelude::*;

use crate::constants::{MAX_STRATEGIES, VEC_PREFIX_LEN};
use crate::error::LedgerError;

/// An allocation bucket pooled deposits can be routed into.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strategy {
    pub id: u64,
    pub allocation: u64,
    pub active: bool,
}

impl Strategy {
    pub const LEN: usize = 8 + 8 + 1;
}

/// Strategies keyed by id. Entries are never removed, only paused.
///
/// Owner checks happen in the ledger operations that call into the registry.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StrategyRegistry {
    strategies: Vec<Strategy>,
}

impl StrategyRegistry {
    pub const LEN: usize = VEC_PREFIX_LEN + (Strategy::LEN * MAX_STRATEGIES);

    pub fn get(&self, id: u64) -> Option<&Strategy> {
        self.position(id).ok().map(|index| &self.strategies[index])
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.iter()
    }

    /// Creates or overwrites a strategy. The result is always active.
    pub fn set(&mut self, id: u64, allocation: u64) -> Result<Strategy> {
        let strategy = Strategy {
            id,
            allocation,
            active: true,
        };
        match self.position(id) {
            Ok(index) => self.strategies[index] = strategy,
            Err(index) => {
                require!(
                    self.strategies.len() < MAX_STRATEGIES,
                    LedgerError::RegistryFull
                );
                self.strategies.insert(index, strategy);
            }
        }
        Ok(strategy)
    }

    pub fn pause(&mut self, id: u64) -> Result<Strategy> {
        self.set_active(id, false)
    }

    pub fn resume(&mut self, id: u64) -> Result<Strategy> {
        self.set_active(id, true)
    }

    /// Returns the strategy if it exists and accepts new deposits.
    pub fn require_accepting(&self, id: u64) -> Result<&Strategy> {
        let strategy = self.get(id).ok_or(LedgerError::StrategyNotFound)?;
        require!(strategy.active, LedgerError::StrategyInactive);
        Ok(strategy)
    }

    fn set_active(&mut self, id: u64, active: bool) -> Result<Strategy> {
        let index = self
            .position(id)
            .map_err(|_| LedgerError::StrategyNotFound)?;
        let strategy = &mut self.strategies[index];
        strategy.active = active;
        Ok(*strategy)
    }

    fn position(&self, id: u64) -> std::result::Result<usize, usize> {
        self.strategies.binary_search_by_key(&id, |strategy| strategy.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_defaults_to_active() {
        let mut registry = StrategyRegistry::default();
        let strategy = registry.set(1, 100).unwrap();

        assert_eq!(
            strategy,
            Strategy {
                id: 1,
                allocation: 100,
                active: true
            }
        );
        assert_eq!(registry.get(1), Some(&strategy));
    }

    #[test]
    fn pause_and_resume_keep_allocation() {
        let mut registry = StrategyRegistry::default();
        registry.set(1, 100).unwrap();

        let paused = registry.pause(1).unwrap();
        assert!(!paused.active);
        assert_eq!(paused.allocation, 100);

        let resumed = registry.resume(1).unwrap();
        assert!(resumed.active);
        assert_eq!(resumed.allocation, 100);
    }

    #[test]
    fn overwrite_reactivates() {
        let mut registry = StrategyRegistry::default();
        registry.set(2, 50).unwrap();
        registry.pause(2).unwrap();

        let strategy = registry.set(2, 75).unwrap();
        assert!(strategy.active);
        assert_eq!(strategy.allocation, 75);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing_strategy_errors() {
        let mut registry = StrategyRegistry::default();
        assert_eq!(
            registry.pause(9).unwrap_err(),
            LedgerError::StrategyNotFound.into()
        );
        assert_eq!(
            registry.resume(9).unwrap_err(),
            LedgerError::StrategyNotFound.into()
        );
        assert_eq!(
            registry.require_accepting(9).unwrap_err(),
            LedgerError::StrategyNotFound.into()
        );
    }

    #[test]
    fn lookup_of_unknown_id_is_none() {
        let mut registry = StrategyRegistry::default();
        registry.set(1, 100).unwrap();

        assert_eq!(registry.get(9).copied(), None);
        assert_eq!(registry.get(1).copied().map(|s| s.allocation), Some(100));
    }

    #[test]
    fn paused_strategy_refuses_deposits() {
        let mut registry = StrategyRegistry::default();
        registry.set(1, 100).unwrap();
        registry.pause(1).unwrap();

        assert_eq!(
            registry.require_accepting(1).unwrap_err(),
            LedgerError::StrategyInactive.into()
        );
    }

    #[test]
    fn capacity_is_enforced() {
        let mut registry = StrategyRegistry::default();
        for id in 0..MAX_STRATEGIES as u64 {
            registry.set(id, 1).unwrap();
        }

        assert_eq!(
            registry.set(MAX_STRATEGIES as u64, 1).unwrap_err(),
            LedgerError::RegistryFull.into()
        );
        // Overwriting an existing id still works at capacity.
        registry.set(0, 5).unwrap();
    }
}
