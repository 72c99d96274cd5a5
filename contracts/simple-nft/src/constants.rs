use near_sdk::NearToken;

/// Tokens minted to the owner by `new`.
pub const INITIAL_SUPPLY: u64 = 3;

pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

/// Gas handed to `nft_on_approve` receivers (TGas).
pub const DEFAULT_ON_APPROVE_GAS: u64 = 50;

pub const DEFAULT_PAGE_LIMIT: u32 = 50;
pub const MAX_PAGE_LIMIT: u32 = 100;
