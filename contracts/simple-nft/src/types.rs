use near_sdk::{near, AccountId};
use std::collections::HashMap;

pub type TokenId = String;

/// Stored per token.
#[near(serializers = [borsh])]
#[derive(Clone)]
pub struct TokenRecord {
    pub owner_id: AccountId,
    pub approved_account_ids: HashMap<AccountId, u64>,
}

/// NEP-171 token view.
#[near(serializers = [json])]
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub token_id: TokenId,
    pub owner_id: AccountId,
    pub approved_account_ids: HashMap<AccountId, u64>,
}

/// NEP-177 contract metadata.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct NftContractMetadata {
    pub spec: String,
    pub name: String,
    pub symbol: String,
    pub icon: Option<String>,
    pub base_uri: Option<String>,
}

impl Default for NftContractMetadata {
    fn default() -> Self {
        Self {
            spec: "nft-1.0.0".to_string(),
            name: "Simple NFT".to_string(),
            symbol: "SNFT".to_string(),
            icon: None,
            base_uri: None,
        }
    }
}
