use near_sdk::json_types::U128;
use near_sdk::AccountId;

use super::builder::EventBuilder;
use super::{CONTRACT, LISTING, SALE, STORAGE};
use crate::types::{FeeBreakdown, Listing};

// --- LISTING_UPDATE ---

pub fn emit_list(listing: &Listing) {
    EventBuilder::new(LISTING, "list", &listing.seller_id)
        .field("nft_contract_id", &listing.nft_contract_id)
        .field("token_id", listing.token_id.as_str())
        .field("price", listing.price)
        .field("royalty_bps", listing.royalty_bps)
        .field_opt("royalty_recipient", listing.royalty_recipient.as_ref())
        .field("approval_id", listing.approval_id)
        .emit();
}

pub fn emit_delist(seller_id: &AccountId, nft_contract_id: &AccountId, token_id: &str) {
    EventBuilder::new(LISTING, "delist", seller_id)
        .field("nft_contract_id", nft_contract_id)
        .field("token_id", token_id)
        .emit();
}

pub fn emit_update_price(listing: &Listing, old_price: U128) {
    EventBuilder::new(LISTING, "update_price", &listing.seller_id)
        .field("nft_contract_id", &listing.nft_contract_id)
        .field("token_id", listing.token_id.as_str())
        .field("old_price", old_price)
        .field("new_price", listing.price)
        .emit();
}

// --- SALE_UPDATE ---

pub fn emit_purchase(buyer_id: &AccountId, listing: &Listing, split: &FeeBreakdown) {
    EventBuilder::new(SALE, "purchase", buyer_id)
        .field("buyer_id", buyer_id)
        .field("seller_id", &listing.seller_id)
        .field("nft_contract_id", &listing.nft_contract_id)
        .field("token_id", listing.token_id.as_str())
        .field("price", listing.price)
        .field("marketplace_fee", split.marketplace_fee)
        .field("royalty_amount", split.royalty_amount)
        .field("seller_amount", split.seller_amount)
        .emit();
}

pub fn emit_purchase_failed(buyer_id: &AccountId, listing: &Listing, reason: &str) {
    EventBuilder::new(SALE, "purchase_failed", buyer_id)
        .field("buyer_id", buyer_id)
        .field("seller_id", &listing.seller_id)
        .field("nft_contract_id", &listing.nft_contract_id)
        .field("token_id", listing.token_id.as_str())
        .field("price", listing.price)
        .field("reason", reason)
        .emit();
}

// --- CONTRACT_UPDATE ---

pub fn emit_fee_updated(owner_id: &AccountId, old_fee_bps: u16, new_fee_bps: u16) {
    EventBuilder::new(CONTRACT, "fee_updated", owner_id)
        .field("old_fee_bps", old_fee_bps)
        .field("new_fee_bps", new_fee_bps)
        .emit();
}

pub fn emit_fee_recipient_changed(owner_id: &AccountId, old: &AccountId, new: &AccountId) {
    EventBuilder::new(CONTRACT, "fee_recipient_changed", owner_id)
        .field("old_recipient", old)
        .field("new_recipient", new)
        .emit();
}

pub fn emit_owner_transferred(old_owner: &AccountId, new_owner: &AccountId) {
    EventBuilder::new(CONTRACT, "owner_transferred", old_owner)
        .field("old_owner", old_owner)
        .field("new_owner", new_owner)
        .emit();
}

// --- STORAGE_UPDATE ---

pub fn emit_storage_deposit(account_id: &AccountId, amount: u128, new_balance: u128) {
    EventBuilder::new(STORAGE, "storage_deposit", account_id)
        .field("amount", U128(amount))
        .field("new_balance", U128(new_balance))
        .emit();
}

pub fn emit_storage_withdraw(account_id: &AccountId, amount: u128, new_balance: u128) {
    EventBuilder::new(STORAGE, "storage_withdraw", account_id)
        .field("amount", U128(amount))
        .field("new_balance", U128(new_balance))
        .emit();
}
