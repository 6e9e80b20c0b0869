use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use token_staking::states::StakePool;
use tracing::info;

use crate::deriver::{AddressDeriver, PoolResources};
use crate::error::{ReceiptError, ReceiptResult};
use crate::rpc::{fetch_checked, AccountLookup};
use crate::utils::{deserialize_anchor_account, ui_amount};

/// Pool-wide totals shown next to a user's receipts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PoolAggregate {
    /// Raw balance of the pool vault.
    pub total_staked: u64,
    /// Raw balance of the reward vault.
    pub total_reward: u64,
    /// Minimum lockup of the pool, in seconds.
    pub lock_period: u64,
}

impl PoolAggregate {
    pub fn ui_total_staked(&self) -> f64 {
        ui_amount(self.total_staked)
    }

    pub fn ui_total_reward(&self) -> f64 {
        ui_amount(self.total_reward)
    }
}

pub fn get_pool_aggregate<L: AccountLookup + ?Sized>(
    deriver: &AddressDeriver,
    lookup: &L,
    pool: &Pubkey,
) -> ReceiptResult<PoolAggregate> {
    let PoolResources {
        vault,
        reward_vault,
        ..
    } = deriver.pool_resources(pool)?;

    let stake_pool = fetch_checked(lookup, std::slice::from_ref(pool))?
        .pop()
        .flatten()
        .ok_or(ReceiptError::PoolNotFound(*pool))?;
    let stake_pool = deserialize_anchor_account::<StakePool>(&stake_pool).map_err(|source| {
        ReceiptError::Decode {
            what: "stake pool",
            address: *pool,
            source,
        }
    })?;

    let aggregate = PoolAggregate {
        total_staked: lookup.get_token_balance(&vault)?,
        total_reward: lookup.get_token_balance(&reward_vault)?,
        lock_period: stake_pool.min_duration,
    };
    info!(
        %pool,
        total_staked = aggregate.total_staked,
        total_reward = aggregate.total_reward,
        lock_period = aggregate.lock_period,
        "read stake pool aggregate"
    );
    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_store::{program_account, test_deriver, FakeStore};

    fn seeded() -> (AddressDeriver, FakeStore, Pubkey) {
        let deriver = test_deriver();
        let pool = deriver.stake_pool_address().unwrap();
        let resources = deriver.pool_resources(&pool).unwrap();
        let mint = deriver.deployment().stake_mint;
        let mut store = FakeStore::default();
        store.insert_stake_pool(
            pool,
            &StakePool {
                authority: deriver.deployment().pool_authority,
                vault: resources.vault,
                mint,
                stake_mint: resources.stake_mint,
                min_duration: 2_592_000,
                nonce: 1,
                ..Default::default()
            },
        );
        store.insert_token_account(resources.vault, mint, 1_234_500_000_000);
        store.insert_token_account(resources.reward_vault, mint, 50_000_000);
        (deriver, store, pool)
    }

    #[test]
    fn reads_balances_and_lock_period() {
        let (deriver, store, pool) = seeded();
        let aggregate = get_pool_aggregate(&deriver, &store, &pool).unwrap();
        assert_eq!(
            aggregate,
            PoolAggregate {
                total_staked: 1_234_500_000_000,
                total_reward: 50_000_000,
                lock_period: 2_592_000,
            }
        );
        assert_eq!(aggregate.ui_total_staked(), 12_345.0);
        assert_eq!(aggregate.ui_total_reward(), 0.5);
    }

    #[test]
    fn missing_pool_is_reported() {
        let deriver = test_deriver();
        let store = FakeStore::default();
        let pool = Pubkey::new_unique();
        let err = get_pool_aggregate(&deriver, &store, &pool).unwrap_err();
        assert!(matches!(err, ReceiptError::PoolNotFound(p) if p == pool));
    }

    #[test]
    fn missing_reward_vault_is_a_token_account_error() {
        let (deriver, mut store, pool) = seeded();
        let reward_vault = deriver.pool_resources(&pool).unwrap().reward_vault;
        store.remove(&reward_vault);
        let err = get_pool_aggregate(&deriver, &store, &pool).unwrap_err();
        assert!(matches!(
            err,
            ReceiptError::TokenAccount { address, .. } if address == reward_vault
        ));
    }

    #[test]
    fn vault_that_is_not_a_token_account_is_rejected() {
        let (deriver, mut store, pool) = seeded();
        let vault = deriver.pool_resources(&pool).unwrap().vault;
        store.insert(vault, program_account(vec![1, 2, 3]));
        let err = get_pool_aggregate(&deriver, &store, &pool).unwrap_err();
        assert!(matches!(err, ReceiptError::TokenAccount { .. }));
    }

    #[test]
    fn pool_account_with_wrong_type_is_a_decode_error() {
        let (deriver, mut store, pool) = seeded();
        store.insert(pool, program_account(vec![0u8; 16]));
        let err = get_pool_aggregate(&deriver, &store, &pool).unwrap_err();
        assert!(matches!(err, ReceiptError::Decode { what: "stake pool", .. }));
    }
}
