//! Simple NFT — NEP-171 core, NEP-177 contract metadata, NEP-178 approvals, NEP-181 enumeration.
//!
//! Token ids are a decimal counter. `new` mints the first `INITIAL_SUPPLY` tokens to the owner.

use near_sdk::json_types::U128;
use near_sdk::store::{IterableMap, IterableSet, LookupMap};
use near_sdk::{env, near, AccountId, BorshStorageKey, Gas, NearToken, PanicOnDefault, Promise};

mod approval;
pub mod constants;
mod errors;
mod events;
mod external;
mod guards;
mod mint;
mod transfer;
pub mod types;
mod views;

#[cfg(test)]
mod tests;

pub use constants::*;
pub use errors::NftError;
pub use types::*;

// --- Storage Keys ---

#[near]
#[derive(BorshStorageKey)]
pub enum StorageKey {
    Tokens,
    TokensPerOwner,
    TokensPerOwnerInner { account_id_hash: Vec<u8> },
}

// --- Contract State ---

#[near(
    contract_state,
    contract_metadata(
        version = "0.1.0",
        standard(standard = "nep171", version = "1.0.0"),
        standard(standard = "nep177", version = "2.0.0"),
        standard(standard = "nep178", version = "1.0.0"),
        standard(standard = "nep181", version = "1.0.0"),
        standard(standard = "nep297", version = "1.0.0"),
    )
)]
#[derive(PanicOnDefault)]
pub struct Contract {
    /// Only account allowed to mint.
    pub owner_id: AccountId,
    pub tokens: IterableMap<TokenId, TokenRecord>,
    pub tokens_per_owner: LookupMap<AccountId, IterableSet<TokenId>>,
    /// Last issued token id; the next mint uses `last_token_id + 1`.
    pub last_token_id: u64,
    /// Global approval counter, never reused.
    pub next_approval_id: u64,
    pub metadata: NftContractMetadata,
}

#[near]
impl Contract {
    #[init]
    pub fn new(owner_id: AccountId, metadata: Option<NftContractMetadata>) -> Self {
        let mut contract = Self {
            owner_id: owner_id.clone(),
            tokens: IterableMap::new(StorageKey::Tokens),
            tokens_per_owner: LookupMap::new(StorageKey::TokensPerOwner),
            last_token_id: 0,
            next_approval_id: 0,
            metadata: metadata.unwrap_or_default(),
        };

        let token_ids: Vec<TokenId> = (0..INITIAL_SUPPLY)
            .map(|_| contract.internal_mint(&owner_id))
            .collect();
        events::emit_mint(&owner_id, &token_ids);

        contract
    }

    pub fn get_contract_owner(&self) -> &AccountId {
        &self.owner_id
    }
}
