use anchor_lang::prelude::*;

use crate::MAX_REWARD_POOLS;

//
// ──────────────────────────────────────────────────────────────────────────────
// StakeDepositReceipt Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive deposit receipts.
///
/// Full seeds: `[owner, stake_pool, index (u32 LE), STAKE_DEPOSIT_RECEIPT_SEED]`.
/// Indices are allocated per owner and pool starting at 0.
pub const STAKE_DEPOSIT_RECEIPT_SEED: &str = "stakeDepositReceipt";

/// One deposit into a stake pool.
///
/// The account is closed on withdrawal, which frees its index for reuse.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct StakeDepositReceipt {
    /// Depositor, the only key allowed to withdraw.
    pub owner: Pubkey,

    /// Account that paid rent for this receipt.
    pub payer: Pubkey,

    /// Pool this deposit belongs to.
    pub stake_pool: Pubkey,

    /// Lockup in seconds chosen at deposit time.
    pub lockup_duration: u64,

    /// Unix seconds.
    pub deposit_timestamp: i64,

    /// Raw amount with `DEPOSIT_AMOUNT_DECIMALS` decimals.
    pub deposit_amount: u64,

    /// Deposit amount scaled by the lockup weight.
    pub effective_stake: u128,

    /// Reward checkpoint per reward pool.
    pub claimed_amounts: [u128; MAX_REWARD_POOLS],
}

impl StakeDepositReceipt {
    /// Serialized size of the account.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 32 * 3: three Pubkeys
    /// - 8 * 3: lockup, timestamp, amount
    /// - 16: effective stake
    /// - 16 * MAX_REWARD_POOLS: claimed amounts
    pub const LEN: usize = 8 + 32 * 3 + 8 * 3 + 16 + 16 * MAX_REWARD_POOLS;

    /// Unix second at which the lockup ends.
    pub fn unlock_timestamp(&self) -> Option<i64> {
        i64::try_from(self.lockup_duration)
            .ok()
            .and_then(|lockup| self.deposit_timestamp.checked_add(lockup))
    }
}
