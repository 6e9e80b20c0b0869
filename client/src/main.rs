use anyhow::{format_err, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use solana_client::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use tracing_subscriber::EnvFilter;

use stake_receipts_client::config::load_cfg;
use stake_receipts_client::utils::{shorten_address, ui_amount, validate_address};
use stake_receipts_client::{
    get_pool_aggregate, total_deposited, AddressDeriver, ReceiptScanner, StakeReceiptEntry,
};

#[derive(Debug, Parser)]
pub struct Opts {
    /// Path of the ini config with a [Global] section.
    #[arg(long, default_value = "client_config.ini")]
    pub config: String,
    #[clap(subcommand)]
    pub command: StakeReceiptCommands,
}

#[derive(Debug, Subcommand)]
pub enum StakeReceiptCommands {
    /// Smallest unused receipt index for a new deposit.
    NextIndex {
        #[arg(long)]
        owner: Pubkey,
    },
    /// List the owner's open deposit receipts.
    Receipts {
        #[arg(long)]
        owner: Pubkey,
        #[arg(long)]
        page_size: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Pool totals and lock period.
    Pool {
        #[arg(long)]
        json: bool,
    },
    /// Address of the receipt at a given index.
    ReceiptAddress {
        #[arg(long)]
        owner: Pubkey,
        #[arg(long)]
        index: u32,
    },
}

#[derive(Serialize)]
struct ReceiptView {
    address: String,
    index: u32,
    deposit_amount: f64,
    deposit_timestamp: i64,
    lockup_duration: u64,
    unlock_timestamp: Option<i64>,
}

impl From<&StakeReceiptEntry> for ReceiptView {
    fn from(entry: &StakeReceiptEntry) -> Self {
        Self {
            address: entry.address.to_string(),
            index: entry.index,
            deposit_amount: entry.ui_deposit_amount(),
            deposit_timestamp: entry.receipt.deposit_timestamp,
            lockup_duration: entry.receipt.lockup_duration,
            unlock_timestamp: entry.receipt.unlock_timestamp(),
        }
    }
}

fn check_owner(owner: &Pubkey) {
    if !validate_address(owner) {
        tracing::warn!(%owner, "owner is not on the ed25519 curve and cannot sign deposits");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let client_config = load_cfg(&opts.config)?;
    let rpc_client = RpcClient::new(client_config.http_url.to_string());
    let deriver = AddressDeriver::new(client_config.deployment.clone());
    let pool = deriver.stake_pool_address()?;
    let scanner = ReceiptScanner::new(&deriver, &rpc_client);

    match opts.command {
        StakeReceiptCommands::NextIndex { owner } => {
            check_owner(&owner);
            let index =
                scanner.find_next_free_index(&owner, &pool, client_config.allocation_page_size)?;
            let address = deriver.stake_receipt_address(&owner, &pool, index)?;
            println!("{} {}", index, address);
        }
        StakeReceiptCommands::Receipts {
            owner,
            page_size,
            json,
        } => {
            check_owner(&owner);
            let page_size = page_size.unwrap_or(client_config.page_size);
            let entries = scanner.list_occupied_records(&owner, &pool, page_size)?;
            if json {
                let views: Vec<ReceiptView> = entries.iter().map(ReceiptView::from).collect();
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                for entry in &entries {
                    let unlock = entry
                        .receipt
                        .unlock_timestamp()
                        .map_or_else(|| "never".to_string(), |ts| ts.to_string());
                    println!(
                        "#{:<4} {}  amount: {}  deposited: {}  lockup: {}s  unlocks: {}",
                        entry.index,
                        shorten_address(&entry.address.to_string()),
                        entry.ui_deposit_amount(),
                        entry.receipt.deposit_timestamp,
                        entry.receipt.lockup_duration,
                        unlock,
                    );
                }
                let total = total_deposited(&entries)
                    .ok_or_else(|| format_err!("deposit total overflows u64"))?;
                println!(
                    "{} receipts, {} staked",
                    entries.len(),
                    ui_amount(total)
                );
            }
        }
        StakeReceiptCommands::Pool { json } => {
            let aggregate = get_pool_aggregate(&deriver, &rpc_client, &pool)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&aggregate)?);
            } else {
                println!("pool: {}", pool);
                println!("total staked: {}", aggregate.ui_total_staked());
                println!("total reward: {}", aggregate.ui_total_reward());
                println!("lock period: {}s", aggregate.lock_period);
            }
        }
        StakeReceiptCommands::ReceiptAddress { owner, index } => {
            let address = deriver.stake_receipt_address(&owner, &pool, index)?;
            println!("{}", address);
        }
    }
    Ok(())
}
