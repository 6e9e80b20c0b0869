use std::ops::ControlFlow;

use solana_sdk::pubkey::Pubkey;
use token_staking::states::StakeDepositReceipt;
use tracing::{info, warn};

use crate::error::{ReceiptError, ReceiptResult};
use crate::rpc::AccountLookup;
use crate::scan::ReceiptScanner;
use crate::utils::{deserialize_anchor_account, ui_amount};

/// A decoded receipt together with where it lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeReceiptEntry {
    pub address: Pubkey,
    pub index: u32,
    pub receipt: StakeDepositReceipt,
}

impl StakeReceiptEntry {
    pub fn ui_deposit_amount(&self) -> f64 {
        ui_amount(self.receipt.deposit_amount)
    }
}

/// Sum of raw deposit amounts. `None` on overflow.
pub fn total_deposited(entries: &[StakeReceiptEntry]) -> Option<u64> {
    entries
        .iter()
        .try_fold(0u64, |total, entry| total.checked_add(entry.receipt.deposit_amount))
}

impl<L: AccountLookup + ?Sized> ReceiptScanner<'_, L> {
    /// All receipts of `owner` in `pool`, in index order.
    ///
    /// Scanning stops at the first page without any receipt. Receipts are
    /// assumed to be packed from index 0, so one placed after `page_size`
    /// or more consecutive empty indices is not returned.
    ///
    /// An existing account that does not decode as a receipt fails the whole
    /// listing.
    pub fn list_occupied_records(
        &self,
        owner: &Pubkey,
        pool: &Pubkey,
        page_size: usize,
    ) -> ReceiptResult<Vec<StakeReceiptEntry>> {
        let mut entries = Vec::new();
        let outcome = self.scan_pages(owner, pool, page_size, |page| {
            if page.is_empty() {
                return Ok(ControlFlow::Break(()));
            }
            for (index, address, account) in page.slots() {
                let Some(account) = account else {
                    continue;
                };
                let receipt = deserialize_anchor_account::<StakeDepositReceipt>(account)
                    .map_err(|source| ReceiptError::Decode {
                        what: "stake receipt",
                        address: *address,
                        source,
                    })?;
                entries.push(StakeReceiptEntry {
                    address: *address,
                    index,
                    receipt,
                });
            }
            Ok(ControlFlow::Continue(()))
        })?;
        if outcome.is_none() {
            warn!(%owner, %pool, "receipt scan reached the end of the index space");
        }
        info!(%owner, %pool, count = entries.len(), "listed stake receipts");
        Ok(entries)
    }
}
