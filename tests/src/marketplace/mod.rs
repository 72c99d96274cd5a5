// =============================================================================
// NFT Marketplace Integration Tests
// =============================================================================
// Sandbox tests for simple-nft + nft-marketplace. Build both contracts first
// (`cargo near build` in each contract directory) or point
// SIMPLE_NFT_WASM_PATH / NFT_MARKETPLACE_WASM_PATH at the artifacts.

pub mod helpers;

#[cfg(test)]
pub mod test_nft;
#[cfg(test)]
pub mod test_listing;
#[cfg(test)]
pub mod test_purchase;
