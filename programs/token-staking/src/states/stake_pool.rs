use anchor_lang::prelude::*;

use crate::MAX_REWARD_POOLS;

//
// ──────────────────────────────────────────────────────────────────────────────
// StakePool Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive a stake pool.
///
/// Full seeds: `[nonce (u8), stake_mint, authority, STAKE_POOL_SEED]`.
pub const STAKE_POOL_SEED: &str = "stakePool";

/// Seed of the token vault holding all staked tokens: `[pool, VAULT_SEED]`.
pub const VAULT_SEED: &str = "vault";

/// Seed of the mint issuing stake-representation tokens: `[pool, STAKE_MINT_SEED]`.
pub const STAKE_MINT_SEED: &str = "stakeMint";

/// Seed of a reward vault: `[pool, reward_mint, REWARD_VAULT_SEED]`.
pub const REWARD_VAULT_SEED: &str = "rewardVault";

/// Reward accounting for one reward mint of a pool.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct RewardPool {
    /// Token account holding undistributed rewards. Default key when unused.
    pub reward_vault: Pubkey,

    /// Accumulated rewards per unit of effective stake.
    pub rewards_per_effective_stake: u128,

    /// Reward vault balance at the last accrual.
    pub last_amount: u64,
}

/// A staking pool for one stake mint, created by `authority`.
#[account]
#[derive(Default, Debug)]
pub struct StakePool {
    /// Pool administrator.
    pub authority: Pubkey,

    /// Sum of the effective stake of all open receipts.
    pub total_weighted_stake: u128,

    /// Token vault holding deposits.
    pub vault: Pubkey,

    /// Mint of the token that is staked.
    pub mint: Pubkey,

    /// Mint of the stake-representation token.
    pub stake_mint: Pubkey,

    pub reward_pools: [RewardPool; MAX_REWARD_POOLS],

    /// Weight applied at `min_duration`.
    pub base_weight: u64,

    /// Weight applied at `max_duration`.
    pub max_weight: u64,

    /// Minimum lockup in seconds. This is the pool's lock period.
    pub min_duration: u64,

    /// Maximum lockup in seconds.
    pub max_duration: u64,

    pub nonce: u8,
    pub bump_seed: u8,
}

impl StakePool {
    /// Serialized size of the account.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 32 * 4: four Pubkeys
    /// - 16: total_weighted_stake
    /// - (32 + 16 + 8) * MAX_REWARD_POOLS: reward pools
    /// - 8 * 4: weights and durations
    /// - 1 + 1: nonce and bump
    pub const LEN: usize = 8 + 32 * 4 + 16 + (32 + 16 + 8) * MAX_REWARD_POOLS + 8 * 4 + 1 + 1;
}
