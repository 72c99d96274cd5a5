//! # nft-market
//!
//! Builds, signs and broadcasts transactions against the `simple-nft` and
//! `nft-marketplace` contracts, and deploys both to sub-accounts of the signer.
//!
//! ## Quick Start
//! ```bash
//! export MARKETPLACE_ACCOUNT_ID=alice.testnet
//! export PRIVATE_KEY=ed25519:...
//! nft-market deploy
//! nft-market mint bob.testnet
//! nft-market list 4 1000000
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod deploy;
mod error;
pub mod keys;
pub mod rpc;
pub mod signer;

pub use client::{MarketplaceClient, MarketplaceStats, TxReceipt};
pub use config::Config;
pub use error::Error;
