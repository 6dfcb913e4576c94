//! State structures for the Stacking Ledger program.
//!
//! The on-chain [`Ledger`] account plus the components it is made of.

pub mod access_control;
pub mod ledger;
pub mod ledger_store;
pub mod reward_pool;
pub mod strategy_registry;

pub use access_control::*;
pub use ledger::*;
pub use ledger_store::*;
pub use reward_pool::*;
pub use strategy_registry::*;
