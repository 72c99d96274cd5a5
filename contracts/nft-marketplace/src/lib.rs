//! NFT Marketplace — fixed-price listings for external NEP-171 contracts.
//!
//! Sellers prepay listing storage with `storage_deposit`, approve the marketplace on the NFT
//! contract, then list (directly via `list_nft` or through `nft_approve` + `nft_on_approve`).
//! Buyers attach the price; on a successful
//! `nft_transfer` the sale proceeds are split between fee recipient, royalty recipient and seller.

use near_sdk::json_types::U128;
use near_sdk::store::{IterableMap, IterableSet, LookupMap};
use near_sdk::{env, near, AccountId, BorshStorageKey, Gas, NearToken, PanicOnDefault, Promise};

// --- Modules ---

mod admin;
pub mod constants;
mod errors;
mod events;
mod external;
pub mod fees;
mod guards;
mod internal;
mod listing;
mod purchase;
mod storage;
pub mod types;
mod views;


pub use constants::*;
pub use errors::MarketplaceError;
pub use fees::compute_fee_breakdown;
pub use types::*;

// --- Storage Keys ---

#[near]
#[derive(BorshStorageKey)]
pub enum StorageKey {
    Listings,
    BySellerId,
    BySellerIdInner { account_id_hash: Vec<u8> },
    StorageDeposits,
}

// --- Contract State ---

#[near(
    contract_state,
    contract_metadata(
        version = "0.1.0",
        standard(standard = "nep297", version = "1.0.0"),
    )
)]
#[derive(PanicOnDefault)]
pub struct Contract {
    /// From Cargo.toml.
    pub version: String,

    pub owner_id: AccountId,
    /// Receives the marketplace fee of every sale; defaults to `owner_id`.
    pub fee_recipient: AccountId,
    /// 250 = 2.5%.
    pub marketplace_fee_bps: u16,

    /// Key: "{nft_contract_id}:{token_id}".
    pub listings: IterableMap<String, Listing>,
    pub by_seller_id: LookupMap<AccountId, IterableSet<String>>,
    /// Prepaid listing storage; each active listing locks `STORAGE_PER_LISTING`.
    pub storage_deposits: LookupMap<AccountId, u128>,

    /// Sum of sale prices (yoctoNEAR) of completed purchases.
    pub total_volume: u128,
    pub total_sales: u64,
}

#[near]
impl Contract {
    #[init]
    pub fn new(owner_id: AccountId) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            fee_recipient: owner_id.clone(),
            owner_id,
            marketplace_fee_bps: DEFAULT_MARKETPLACE_FEE_BPS,
            listings: IterableMap::new(StorageKey::Listings),
            by_seller_id: LookupMap::new(StorageKey::BySellerId),
            storage_deposits: LookupMap::new(StorageKey::StorageDeposits),
            total_volume: 0,
            total_sales: 0,
        }
    }
}
