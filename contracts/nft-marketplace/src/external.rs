// `#[ext_contract]` generates helper structs that the compiler flags as dead_code
// even though they are used at runtime for cross-contract calls.
#![allow(dead_code)]

use std::collections::HashMap;

use near_sdk::{ext_contract, near, AccountId};

use crate::types::{Listing, ListingRequest};

/// The slice of a NEP-171 `Token` the marketplace reads.
#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct NftToken {
    pub token_id: String,
    pub owner_id: AccountId,
    #[serde(default)]
    pub approved_account_ids: Option<HashMap<AccountId, u64>>,
}

#[ext_contract(ext_nft)]
pub trait ExtNft {
    fn nft_token(&self, token_id: String) -> Option<NftToken>;

    fn nft_transfer(
        &mut self,
        receiver_id: AccountId,
        token_id: String,
        approval_id: Option<u64>,
        memo: Option<String>,
    );
}

#[ext_contract(ext_self)]
pub trait ExtSelf {
    fn resolve_listing(&mut self, request: ListingRequest) -> bool;

    fn resolve_purchase(&mut self, buyer_id: AccountId, listing: Listing, deposit: near_sdk::json_types::U128) -> bool;
}
