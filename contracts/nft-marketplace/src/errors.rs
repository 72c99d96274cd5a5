//! Typed error handling for the marketplace contract.
//!
//! `#[derive(near_sdk::FunctionError)]` enables `#[handle_result]`: an `Err` makes the SDK
//! call `env::panic_str()` with the `Display` text, so callers observe e.g.
//! `Unauthorized: Only the seller can cancel the listing`.

use near_sdk_macros::NearSchema;

#[derive(NearSchema, near_sdk::FunctionError)]
#[abi(borsh, json)]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MarketplaceError {
    /// Caller lacks permission (not the token owner, seller, or contract owner).
    Unauthorized(String),
    /// Invalid parameters from the caller.
    InvalidInput(String),
    /// Requested listing or token does not exist.
    NotFound(String),
    /// Operation not allowed given current state.
    InvalidState(String),
    /// Attached deposit is wrong or too low.
    InsufficientDeposit(String),
    InternalError(String),
}

impl std::fmt::Display for MarketplaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Self::InsufficientDeposit(msg) => write!(f, "Insufficient deposit: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

// ── Factory helpers for common errors ────────────────────────────────────────

impl MarketplaceError {
    pub fn listing_not_found() -> Self {
        Self::NotFound("No listing found".into())
    }
    pub fn token_not_found() -> Self {
        Self::NotFound("Token not found on NFT contract".into())
    }
    pub fn only_owner(what: &str) -> Self {
        Self::Unauthorized(format!("Only {} can perform this action", what))
    }
}
