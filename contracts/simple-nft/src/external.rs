// `#[ext_contract]` helper structs are only referenced at runtime.
#![allow(dead_code)]

use near_sdk::{AccountId, ext_contract};

/// NEP-178 approval receiver (the marketplace implements this).
#[ext_contract(ext_approval_receiver)]
pub trait ExtApprovalReceiver {
    fn nft_on_approve(&mut self, token_id: String, owner_id: AccountId, approval_id: u64, msg: String);
}
