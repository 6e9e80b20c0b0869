//! Paged scan over the per-owner, per-pool receipt index space.
//!
//! Receipts can only be fetched by exact address, so the index space is
//! walked page by page: derive every address of a page, fetch them in one
//! batched lookup, then let the caller decide whether to stop. Pages are
//! strictly sequential and nothing is written, so a caller may drop the scan
//! between pages.

use std::ops::ControlFlow;

use solana_sdk::{account::Account, pubkey::Pubkey};
use tracing::debug;

use crate::deriver::AddressDeriver;
use crate::error::{ReceiptError, ReceiptResult};
use crate::rpc::{fetch_checked, AccountLookup};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// `getMultipleAccounts` accepts at most 100 addresses per request.
pub const MAX_PAGE_SIZE: usize = 100;

/// One fetched page: `accounts[i]` belongs to index `start + i`.
#[derive(Debug)]
pub struct Page {
    pub start: u32,
    pub addresses: Vec<Pubkey>,
    pub accounts: Vec<Option<Account>>,
}

impl Page {
    pub fn slots(&self) -> impl Iterator<Item = (u32, &Pubkey, Option<&Account>)> + '_ {
        self.addresses
            .iter()
            .zip(self.accounts.iter())
            .enumerate()
            .map(|(offset, (address, account))| {
                (self.start + offset as u32, address, account.as_ref())
            })
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.iter().all(Option::is_none)
    }
}

/// Scans receipt slots of one (owner, pool) pair.
pub struct ReceiptScanner<'a, L: ?Sized> {
    deriver: &'a AddressDeriver,
    lookup: &'a L,
    last_index: u32,
}

impl<'a, L: AccountLookup + ?Sized> ReceiptScanner<'a, L> {
    pub fn new(deriver: &'a AddressDeriver, lookup: &'a L) -> Self {
        Self {
            deriver,
            lookup,
            last_index: u32::MAX,
        }
    }

    /// Lowers the highest index considered. Defaults to `u32::MAX`.
    pub fn with_last_index(mut self, last_index: u32) -> Self {
        self.last_index = last_index;
        self
    }

    /// Walks pages from index 0 until `on_page` breaks.
    ///
    /// Returns `Ok(None)` if the index space ends before `on_page` breaks.
    pub fn scan_pages<T, F>(
        &self,
        owner: &Pubkey,
        pool: &Pubkey,
        page_size: usize,
        mut on_page: F,
    ) -> ReceiptResult<Option<T>>
    where
        F: FnMut(Page) -> ReceiptResult<ControlFlow<T>>,
    {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ReceiptError::InvalidPageSize {
                page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        let last_index = u64::from(self.last_index);
        let mut start = 0u64;
        while start <= last_index {
            let end = (start + page_size as u64 - 1).min(last_index);
            // start and end are both <= last_index, which fits in a u32
            let (first, last) = (start as u32, end as u32);
            let addresses = (first..=last)
                .map(|index| self.deriver.stake_receipt_address(owner, pool, index))
                .collect::<ReceiptResult<Vec<_>>>()?;
            let accounts = fetch_checked(self.lookup, &addresses)?;
            let page = Page {
                start: first,
                addresses,
                accounts,
            };
            debug!(
                %owner,
                %pool,
                first,
                last,
                occupied = page.accounts.iter().filter(|a| a.is_some()).count(),
                "scanned receipt page"
            );
            if let ControlFlow::Break(found) = on_page(page)? {
                return Ok(Some(found));
            }
            start = end + 1;
        }
        Ok(None)
    }
}
