use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

/// An NFT offered for a fixed price. The marketplace holds an approval, not the token.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub seller_id: AccountId,
    pub nft_contract_id: AccountId,
    pub token_id: String,
    /// yoctoNEAR.
    pub price: U128,
    pub royalty_bps: u16,
    pub royalty_recipient: Option<AccountId>,
    /// NEP-178 approval id the marketplace presents on `nft_transfer`.
    pub approval_id: u64,
    /// Block timestamp (ns).
    pub listed_at: u64,
}

/// Listing terms carried from `list_nft` into its ownership-check callback.
#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct ListingRequest {
    pub seller_id: AccountId,
    pub nft_contract_id: AccountId,
    pub token_id: String,
    pub price: U128,
    pub royalty_bps: u16,
    pub royalty_recipient: Option<AccountId>,
}

/// `msg` accepted by `nft_on_approve`: `{"price": "1000000", "royalty_bps": 500, "royalty_recipient": "alice.near"}`.
#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct ListingMessage {
    pub price: U128,
    #[serde(default)]
    pub royalty_bps: u16,
    #[serde(default)]
    pub royalty_recipient: Option<AccountId>,
}

/// How a sale price is split.
#[near(serializers = [json])]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub marketplace_fee: U128,
    pub royalty_amount: U128,
    pub seller_amount: U128,
}

#[near(serializers = [json])]
#[derive(Clone, Debug, PartialEq)]
pub struct MarketplaceStats {
    pub total_volume: U128,
    pub total_sales: u64,
    pub marketplace_fee_bps: u16,
    pub active_listings: u32,
}
