//! In-memory account store for exercising scans without a validator.

use std::cell::Cell;
use std::collections::HashMap;

use anchor_lang::AccountSerialize;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_sdk::{account::Account, pubkey::Pubkey};
use spl_token::solana_program::program_pack::Pack;
use spl_token_2022::extension::{
    immutable_owner::ImmutableOwner, BaseStateWithExtensionsMut, ExtensionType,
    StateWithExtensionsMut,
};
use token_staking::states::{StakeDepositReceipt, StakePool};

use crate::config::StakingDeployment;
use crate::deriver::AddressDeriver;
use crate::rpc::AccountLookup;

pub fn test_deriver() -> AddressDeriver {
    AddressDeriver::new(StakingDeployment::new(
        token_staking::ID,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        1,
    ))
}

/// Transport failure as the RPC client would report it.
pub fn lookup_error(message: impl Into<String>) -> ClientError {
    ClientErrorKind::Custom(message.into()).into()
}

pub fn program_account(data: Vec<u8>) -> Account {
    Account {
        lamports: 1_000_000,
        data,
        owner: token_staking::ID,
        executable: false,
        rent_epoch: 0,
    }
}

#[derive(Default)]
pub struct FakeStore {
    accounts: HashMap<Pubkey, Account>,
    /// Every derived address reads as occupied.
    all_occupied: bool,
    /// Drop the last result of every batch.
    truncate: bool,
    /// Fail once this many batches have been served.
    fail_after: Option<usize>,
    calls: Cell<usize>,
    requested: Cell<usize>,
}

impl FakeStore {
    /// Number of batched lookups served.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Total addresses requested across all batches.
    pub fn requested(&self) -> usize {
        self.requested.get()
    }

    pub fn all_occupied(mut self) -> Self {
        self.all_occupied = true;
        self
    }

    pub fn truncating_results(mut self) -> Self {
        self.truncate = true;
        self
    }

    pub fn failing_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    pub fn insert(&mut self, address: Pubkey, account: Account) {
        self.accounts.insert(address, account);
    }

    pub fn remove(&mut self, address: &Pubkey) {
        self.accounts.remove(address);
    }

    pub fn receipt(owner: &Pubkey, pool: &Pubkey, deposit_amount: u64) -> StakeDepositReceipt {
        StakeDepositReceipt {
            owner: *owner,
            payer: *owner,
            stake_pool: *pool,
            lockup_duration: 86_400,
            deposit_timestamp: 1_700_000_000,
            deposit_amount,
            ..Default::default()
        }
    }

    /// Stores a receipt at `index` and returns its address.
    pub fn insert_receipt(
        &mut self,
        deriver: &AddressDeriver,
        owner: &Pubkey,
        pool: &Pubkey,
        index: u32,
        deposit_amount: u64,
    ) -> Pubkey {
        let address = deriver.stake_receipt_address(owner, pool, index).unwrap();
        let mut data = Vec::new();
        Self::receipt(owner, pool, deposit_amount)
            .try_serialize(&mut data)
            .unwrap();
        self.insert(address, program_account(data));
        address
    }

    pub fn insert_stake_pool(&mut self, address: Pubkey, pool: &StakePool) {
        let mut data = Vec::new();
        pool.try_serialize(&mut data).unwrap();
        self.insert(address, program_account(data));
    }

    pub fn insert_token_account(&mut self, address: Pubkey, mint: Pubkey, amount: u64) {
        let state = spl_token::state::Account {
            mint,
            owner: Pubkey::new_unique(),
            amount,
            state: spl_token::state::AccountState::Initialized,
            ..Default::default()
        };
        let mut data = vec![0u8; spl_token::state::Account::LEN];
        spl_token::state::Account::pack(state, &mut data).unwrap();
        self.insert(
            address,
            Account {
                lamports: 2_039_280,
                data,
                owner: spl_token::ID,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    /// Token-2022 account carrying the `ImmutableOwner` extension.
    pub fn insert_token_2022_account(&mut self, address: Pubkey, mint: Pubkey, amount: u64) {
        use spl_token_2022::state::{Account as TokenAccount, AccountState};

        let space = ExtensionType::try_calculate_account_len::<TokenAccount>(&[
            ExtensionType::ImmutableOwner,
        ])
        .unwrap();
        let mut data = vec![0u8; space];
        let mut state = StateWithExtensionsMut::<TokenAccount>::unpack_uninitialized(&mut data)
            .unwrap();
        state.init_extension::<ImmutableOwner>(true).unwrap();
        state.base = TokenAccount {
            mint,
            owner: Pubkey::new_unique(),
            amount,
            state: AccountState::Initialized,
            ..Default::default()
        };
        state.pack_base();
        state.init_account_type().unwrap();
        self.insert(
            address,
            Account {
                lamports: 2_074_080,
                data,
                owner: spl_token_2022::ID,
                executable: false,
                rent_epoch: 0,
            },
        );
    }
}

impl AccountLookup for FakeStore {
    fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, ClientError> {
        if self.fail_after.is_some_and(|limit| self.calls.get() >= limit) {
            return Err(lookup_error("connection reset"));
        }
        self.calls.set(self.calls.get() + 1);
        self.requested.set(self.requested.get() + addresses.len());
        let mut accounts: Vec<Option<Account>> = addresses
            .iter()
            .map(|address| {
                if self.all_occupied {
                    Some(program_account(Vec::new()))
                } else {
                    self.accounts.get(address).cloned()
                }
            })
            .collect();
        if self.truncate {
            accounts.pop();
        }
        Ok(accounts)
    }
}
