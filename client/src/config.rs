use anyhow::{format_err, Context, Result};
use configparser::ini::Ini;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use token_staking::states::{
    REWARD_VAULT_SEED, STAKE_DEPOSIT_RECEIPT_SEED, STAKE_MINT_SEED, STAKE_POOL_SEED, VAULT_SEED,
};

use crate::scan::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Fixed seed tags used by the staking program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedTags {
    pub receipt: String,
    pub stake_pool: String,
    pub vault: String,
    pub stake_mint: String,
    pub reward_vault: String,
}

impl Default for SeedTags {
    fn default() -> Self {
        Self {
            receipt: STAKE_DEPOSIT_RECEIPT_SEED.to_string(),
            stake_pool: STAKE_POOL_SEED.to_string(),
            vault: VAULT_SEED.to_string(),
            stake_mint: STAKE_MINT_SEED.to_string(),
            reward_vault: REWARD_VAULT_SEED.to_string(),
        }
    }
}

/// Everything that identifies one deployment of the staking program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakingDeployment {
    pub program_id: Pubkey,
    /// Token that is staked.
    pub stake_mint: Pubkey,
    /// Token paid as reward. The same as `stake_mint` unless configured.
    pub reward_mint: Pubkey,
    pub pool_authority: Pubkey,
    pub pool_nonce: u8,
    pub seeds: SeedTags,
}

impl StakingDeployment {
    pub fn new(
        program_id: Pubkey,
        stake_mint: Pubkey,
        pool_authority: Pubkey,
        pool_nonce: u8,
    ) -> Self {
        Self {
            program_id,
            stake_mint,
            reward_mint: stake_mint,
            pool_authority,
            pool_nonce,
            seeds: SeedTags::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub http_url: String,
    pub deployment: StakingDeployment,
    /// Page size for listing receipts.
    pub page_size: usize,
    /// Page size for finding the next free index.
    pub allocation_page_size: usize,
}

fn required(config: &Ini, key: &str) -> Result<String> {
    match config.get("Global", key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format_err!("{} must not be empty", key)),
    }
}

fn required_pubkey(config: &Ini, key: &str) -> Result<Pubkey> {
    let value = required(config, key)?;
    Pubkey::from_str(&value).with_context(|| format!("{} is not a valid pubkey: {}", key, value))
}

fn page_size(config: &Ini, key: &str) -> Result<usize> {
    let size = match config.get("Global", key) {
        Some(value) if !value.is_empty() => value
            .parse::<usize>()
            .with_context(|| format!("{} is not a number: {}", key, value))?,
        _ => DEFAULT_PAGE_SIZE,
    };
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(format_err!(
            "{} must be between 1 and {}, got {}",
            key,
            MAX_PAGE_SIZE,
            size
        ));
    }
    Ok(size)
}

pub fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config
        .load(client_config)
        .map_err(|e| format_err!("failed to load {}: {}", client_config, e))?;

    let http_url = required(&config, "http_url")?;
    let program_id = required_pubkey(&config, "staking_program")?;
    let stake_mint = required_pubkey(&config, "stake_mint")?;
    let pool_authority = required_pubkey(&config, "pool_authority")?;
    let pool_nonce_str = required(&config, "pool_nonce")?;
    let pool_nonce = pool_nonce_str
        .parse::<u8>()
        .with_context(|| format!("pool_nonce must fit in a u8: {}", pool_nonce_str))?;

    let mut deployment = StakingDeployment::new(program_id, stake_mint, pool_authority, pool_nonce);
    if let Some(reward_mint) = config.get("Global", "reward_mint").filter(|v| !v.is_empty()) {
        deployment.reward_mint = Pubkey::from_str(&reward_mint)
            .with_context(|| format!("reward_mint is not a valid pubkey: {}", reward_mint))?;
    }

    Ok(ClientConfig {
        http_url,
        deployment,
        page_size: page_size(&config, "page_size")?,
        allocation_page_size: page_size(&config, "allocation_page_size")?,
    })
}
