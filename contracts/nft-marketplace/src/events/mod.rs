//! NEP-297 JSON events: `EVENT_JSON:{"standard":"nft_marketplace","version":"1.0.0","event":...}`.

mod builder;
mod market;
mod types;

pub use market::*;

pub(crate) const STANDARD: &str = "nft_marketplace";
pub(crate) const VERSION: &str = "1.0.0";
pub(crate) const PREFIX: &str = "EVENT_JSON:";

pub(crate) const LISTING: &str = "LISTING_UPDATE";
pub(crate) const SALE: &str = "SALE_UPDATE";
pub(crate) const CONTRACT: &str = "CONTRACT_UPDATE";
pub(crate) const STORAGE: &str = "STORAGE_UPDATE";
