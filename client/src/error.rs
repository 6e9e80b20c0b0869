use solana_client::client_error::ClientError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type ReceiptResult<T> = Result<T, ReceiptError>;

/// Failures of address derivation and receipt scanning.
///
/// None of these are retried here. Transport retries belong to the
/// [`AccountLookup`](crate::rpc::AccountLookup) implementation or the caller.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// No bump seed produced a valid off-curve address, or a seed was too long.
    #[error("no valid program address for {what} seeds")]
    Derivation { what: &'static str },

    /// Every index up to the scanner's ceiling is occupied.
    #[error("no free stake receipt index left for owner {owner} in pool {pool}")]
    Exhausted { owner: Pubkey, pool: Pubkey },

    /// An existing account does not hold the expected account type.
    #[error("account {address} ({what}) failed to decode: {source}")]
    Decode {
        what: &'static str,
        address: Pubkey,
        #[source]
        source: anchor_lang::error::Error,
    },

    #[error(transparent)]
    Lookup(#[from] ClientError),

    /// The lookup broke its contract of one result per requested address.
    #[error("lookup returned {actual} accounts for {expected} addresses")]
    LookupLength { expected: usize, actual: usize },

    #[error("page size must be between 1 and {max}, got {page_size}")]
    InvalidPageSize { page_size: usize, max: usize },

    #[error("stake pool {0} does not exist")]
    PoolNotFound(Pubkey),

    /// A pool vault is missing or is not a token account.
    #[error("token account {address} is unreadable: {reason}")]
    TokenAccount { address: Pubkey, reason: String },
}
