use anchor_lang::prelude::*;

#[event]
pub struct Stacked {
    pub ledger: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub user_staked: u64,
    pub total_staked: u64,
}

#[event]
pub struct Unstacked {
    pub ledger: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub user_staked: u64,
    pub total_staked: u64,
}

#[event]
pub struct PoolDeposited {
    pub ledger: Pubkey,
    pub depositor: Pubkey,
    pub user: Pubkey,
    pub strategy_id: u64,
    pub amount: u64,
    pub user_staked: u64,
    pub total_staked: u64,
}

#[event]
pub struct PoolWithdrawn {
    pub ledger: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub user_staked: u64,
    pub total_staked: u64,
}

#[event]
pub struct StrategyUpdated {
    pub ledger: Pubkey,
    pub strategy_id: u64,
    pub allocation: u64,
    pub active: bool,
}

#[event]
pub struct OwnerChanged {
    pub ledger: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
pub struct StackCapUpdated {
    pub ledger: Pubkey,
    pub previous_cap: u64,
    pub new_cap: u64,
}

#[event]
pub struct RewardsConverted {
    pub ledger: Pubkey,
    pub amount: u64,
    pub undistributed: u64,
}

#[event]
pub struct RewardsDistributed {
    pub ledger: Pubkey,
    pub distributed: u64,
    pub undistributed: u64,
    pub carry: u128,
    pub reward_per_share: u128,
    pub total_staked: u64,
}

#[event]
pub struct RewardsWithdrawn {
    pub ledger: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
}
