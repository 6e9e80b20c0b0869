use std::ops::ControlFlow;

use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::error::{ReceiptError, ReceiptResult};
use crate::rpc::AccountLookup;
use crate::scan::ReceiptScanner;

impl<L: AccountLookup + ?Sized> ReceiptScanner<'_, L> {
    /// Smallest index with no receipt account for `owner` in `pool`.
    ///
    /// A vacated index is reused before any higher never-used one. The answer
    /// is only valid against the snapshot that was read: creating the receipt
    /// must still fail if another deposit claims the index first.
    pub fn find_next_free_index(
        &self,
        owner: &Pubkey,
        pool: &Pubkey,
        page_size: usize,
    ) -> ReceiptResult<u32> {
        let free = self.scan_pages(owner, pool, page_size, |page| {
            Ok(match page.slots().find(|(_, _, account)| account.is_none()) {
                Some((index, _, _)) => ControlFlow::Break(index),
                None => ControlFlow::Continue(()),
            })
        })?;
        match free {
            Some(index) => {
                info!(%owner, %pool, index, "found free stake receipt index");
                Ok(index)
            }
            None => Err(ReceiptError::Exhausted {
                owner: *owner,
                pool: *pool,
            }),
        }
    }
}
