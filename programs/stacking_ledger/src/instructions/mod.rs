//! Instruction handlers for the Stacking Ledger program.
//!
//! Each handler binds accounts to the accounting core and logs the outcome.

pub mod admin;
pub mod initialize;
pub mod pool;
pub mod rewards;
pub mod stack;
pub mod views;

pub use admin::*;
pub use initialize::*;
pub use pool::*;
pub use rewards::*;
pub use stack::*;
pub use views::*;
