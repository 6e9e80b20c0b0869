use solana_client::client_error::ClientError;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{account::Account, pubkey::Pubkey};
use spl_token_2022::{extension::StateWithExtensions, state::Account as TokenAccount};

use crate::error::{ReceiptError, ReceiptResult};

/// Batched point lookups against the account store.
///
/// This is the only I/O the scanners perform. Implementations own any
/// timeout and retry policy.
pub trait AccountLookup {
    /// One entry per address, in request order. `None` means the account
    /// does not exist (never created or closed).
    fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, ClientError>;

    /// Raw token amount held by a token account (SPL Token or Token-2022).
    fn get_token_balance(&self, address: &Pubkey) -> ReceiptResult<u64> {
        let account = fetch_checked(self, std::slice::from_ref(address))?
            .pop()
            .flatten()
            .ok_or_else(|| ReceiptError::TokenAccount {
                address: *address,
                reason: "account does not exist".to_string(),
            })?;
        token_amount(address, &account.data)
    }
}

impl AccountLookup for RpcClient {
    fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, ClientError> {
        RpcClient::get_multiple_accounts(self, addresses)
    }
}

/// Runs one batched lookup and enforces the one-result-per-address contract.
pub fn fetch_checked<L: AccountLookup + ?Sized>(
    lookup: &L,
    addresses: &[Pubkey],
) -> ReceiptResult<Vec<Option<Account>>> {
    let accounts = lookup.get_multiple_accounts(addresses)?;
    if accounts.len() != addresses.len() {
        return Err(ReceiptError::LookupLength {
            expected: addresses.len(),
            actual: accounts.len(),
        });
    }
    Ok(accounts)
}

pub fn token_amount(address: &Pubkey, data: &[u8]) -> ReceiptResult<u64> {
    StateWithExtensions::<TokenAccount>::unpack(data)
        .map(|state| state.base.amount)
        .map_err(|e| ReceiptError::TokenAccount {
            address: *address,
            reason: e.to_string(),
        })
}
