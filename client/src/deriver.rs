//! Deterministic program addresses for stake pools, pool resources and
//! deposit receipts.

use solana_sdk::pubkey::Pubkey;

use crate::config::StakingDeployment;
use crate::error::{ReceiptError, ReceiptResult};

/// Addresses owned by a stake pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolResources {
    pub vault: Pubkey,
    pub reward_vault: Pubkey,
    pub stake_mint: Pubkey,
}

#[derive(Clone, Debug)]
pub struct AddressDeriver {
    deployment: StakingDeployment,
}

impl AddressDeriver {
    pub fn new(deployment: StakingDeployment) -> Self {
        Self { deployment }
    }

    pub fn deployment(&self) -> &StakingDeployment {
        &self.deployment
    }

    fn find(&self, seeds: &[&[u8]], what: &'static str) -> ReceiptResult<Pubkey> {
        Pubkey::try_find_program_address(seeds, &self.deployment.program_id)
            .map(|(address, _bump)| address)
            .ok_or(ReceiptError::Derivation { what })
    }

    /// Address of the receipt at `index` for `owner` in `pool`.
    pub fn stake_receipt_address(
        &self,
        owner: &Pubkey,
        pool: &Pubkey,
        index: u32,
    ) -> ReceiptResult<Pubkey> {
        self.find(
            &[
                owner.as_ref(),
                pool.as_ref(),
                &index.to_le_bytes(),
                self.deployment.seeds.receipt.as_bytes(),
            ],
            "stake receipt",
        )
    }

    /// The configured pool: `[nonce, stake_mint, authority, "stakePool"]`.
    pub fn stake_pool_address(&self) -> ReceiptResult<Pubkey> {
        self.stake_pool_address_for(
            self.deployment.pool_nonce,
            &self.deployment.stake_mint,
            &self.deployment.pool_authority,
        )
    }

    pub fn stake_pool_address_for(
        &self,
        nonce: u8,
        stake_mint: &Pubkey,
        authority: &Pubkey,
    ) -> ReceiptResult<Pubkey> {
        self.find(
            &[
                &nonce.to_le_bytes(),
                stake_mint.as_ref(),
                authority.as_ref(),
                self.deployment.seeds.stake_pool.as_bytes(),
            ],
            "stake pool",
        )
    }

    /// Pool-scoped address: `[pool, tags...]`.
    pub fn pool_resource_address(&self, pool: &Pubkey, tags: &[&[u8]]) -> ReceiptResult<Pubkey> {
        let mut seeds: Vec<&[u8]> = Vec::with_capacity(tags.len() + 1);
        seeds.push(pool.as_ref());
        seeds.extend_from_slice(tags);
        self.find(&seeds, "pool resource")
    }

    pub fn pool_resources(&self, pool: &Pubkey) -> ReceiptResult<PoolResources> {
        let seeds = &self.deployment.seeds;
        Ok(PoolResources {
            vault: self.pool_resource_address(pool, &[seeds.vault.as_bytes()])?,
            reward_vault: self.pool_resource_address(
                pool,
                &[self.deployment.reward_mint.as_ref(), seeds.reward_vault.as_bytes()],
            )?,
            stake_mint: self.pool_resource_address(pool, &[seeds.stake_mint.as_bytes()])?,
        })
    }
}
