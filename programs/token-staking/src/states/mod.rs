pub mod stake_pool;
pub use stake_pool::*;

pub mod stake_deposit_receipt;
pub use stake_deposit_receipt::*;
