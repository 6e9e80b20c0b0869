use anchor_lang::prelude::*;

declare_id!("STAKEkKzbdeKkqzKpLkNQD3SUuLgshDKCD7U8duxAbB");

/// Number of reward pools tracked per stake pool and per receipt.
pub const MAX_REWARD_POOLS: usize = 10;

/// Deposit amounts are fixed-point integers with this many decimals.
pub const DEPOSIT_AMOUNT_DECIMALS: u8 = 8;

pub mod states;
