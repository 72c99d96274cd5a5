//! Marketplace-wide constants.

use near_sdk::NearToken;

/// Default marketplace fee in basis points (250 = 2.5%).
pub const DEFAULT_MARKETPLACE_FEE_BPS: u16 = 250;

/// Upper bound accepted by `set_marketplace_fee` (10%).
pub const MAX_MARKETPLACE_FEE_BPS: u16 = 1_000;

/// Upper bound for a listing's royalty (10%).
pub const MAX_ROYALTY_BPS: u16 = 1_000;

/// Basis points denominator (10,000 = 100%)
pub const BASIS_POINTS: u16 = 10_000;

pub const MAX_TOKEN_ID_LEN: usize = 256;

/// ":" is not a valid character in NEAR account IDs, so listing ids cannot collide.
pub const DELIMITER: &str = ":";

/// Storage deposit locked per active listing (0.01 NEAR).
pub const STORAGE_PER_LISTING: u128 = 10_000_000_000_000_000_000_000;

pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

/// Upper bound on the `nft_token` view payload read in callbacks.
pub const MAX_TOKEN_VIEW_LEN: usize = 16_384;

// Gas constants (TGas)
pub const NFT_TOKEN_VIEW_GAS: u64 = 10;
pub const RESOLVE_LISTING_GAS: u64 = 20;
pub const NFT_TRANSFER_GAS: u64 = 30;
pub const RESOLVE_PURCHASE_GAS: u64 = 40;

pub const DEFAULT_PAGE_LIMIT: u32 = 50;
pub const MAX_PAGE_LIMIT: u32 = 100;
