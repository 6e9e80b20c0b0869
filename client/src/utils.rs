use anchor_lang::AccountDeserialize;
use solana_sdk::{account::Account, pubkey::Pubkey};
use token_staking::DEPOSIT_AMOUNT_DECIMALS;

pub fn deserialize_anchor_account<T: AccountDeserialize>(
    account: &Account,
) -> anchor_lang::Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data)
}

/// Raw fixed-point deposit amount to whole tokens.
pub fn ui_amount(raw: u64) -> f64 {
    raw as f64 / 10f64.powi(DEPOSIT_AMOUNT_DECIMALS as i32)
}

/// `C3R6...cPkW`. Strings of eight characters or fewer are returned as is.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// True for a key on the ed25519 curve, i.e. a wallet rather than a PDA.
pub fn validate_address(address: &Pubkey) -> bool {
    address.is_on_curve()
}
