//! Read-only client for stake deposit receipts.
//!
//! Receipts live at program addresses derived from
//! `(owner, pool, index)`. The store cannot be queried by owner, so free
//! indices are found and receipts are listed by probing pages of derived
//! addresses with batched lookups.

pub mod allocator;
pub mod config;
pub mod deriver;
pub mod enumerator;
pub mod error;
pub mod pool;
pub mod rpc;
pub mod scan;
pub mod utils;

#[cfg(test)]
pub(crate) mod fake_store;

pub use config::{ClientConfig, SeedTags, StakingDeployment};
pub use deriver::{AddressDeriver, PoolResources};
pub use enumerator::{total_deposited, StakeReceiptEntry};
pub use error::{ReceiptError, ReceiptResult};
pub use pool::{get_pool_aggregate, PoolAggregate};
pub use rpc::AccountLookup;
pub use scan::{ReceiptScanner, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
