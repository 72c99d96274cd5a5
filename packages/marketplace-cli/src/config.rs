//! CLI configuration: optional `marketplace.toml`, then `MARKETPLACE_*` env vars.

use near_primitives::types::AccountId;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// "testnet" or "mainnet"; picks RPC and explorer defaults.
    #[serde(default = "defaults::network")]
    pub network: String,

    /// Unset: resolved from `network` after loading.
    #[serde(default)]
    pub rpc_url: Option<String>,

    #[serde(default)]
    pub fallback_rpc_url: Option<String>,

    #[serde(default)]
    pub explorer_url: Option<String>,

    /// Signer account. Required with `PRIVATE_KEY`; otherwise read from the key file.
    #[serde(default)]
    pub account_id: Option<String>,

    /// near-cli credentials file. Defaults to `~/.near-credentials/<network>/<account>.json`.
    #[serde(default)]
    pub keys_path: Option<String>,

    /// Defaults to `simple-nft.<account>`.
    #[serde(default)]
    pub nft_contract_id: Option<String>,

    /// Defaults to `nft-marketplace.<account>`.
    #[serde(default)]
    pub marketplace_contract_id: Option<String>,

    #[serde(default = "defaults::gas_tgas")]
    pub gas_tgas: u64,

    /// Pause between the two contract deployments.
    #[serde(default = "defaults::deploy_delay_secs")]
    pub deploy_delay_secs: u64,

    /// Initial balance given to each contract account on deploy.
    #[serde(default = "defaults::deploy_balance_near")]
    pub deploy_balance_near: u64,

    #[serde(default = "defaults::nft_wasm_path")]
    pub nft_wasm_path: String,

    #[serde(default = "defaults::marketplace_wasm_path")]
    pub marketplace_wasm_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: defaults::network(),
            rpc_url: None,
            fallback_rpc_url: None,
            explorer_url: None,
            account_id: None,
            keys_path: None,
            nft_contract_id: None,
            marketplace_contract_id: None,
            gas_tgas: defaults::gas_tgas(),
            deploy_delay_secs: defaults::deploy_delay_secs(),
            deploy_balance_near: defaults::deploy_balance_near(),
            nft_wasm_path: defaults::nft_wasm_path(),
            marketplace_wasm_path: defaults::marketplace_wasm_path(),
        }
    }
}

pub const NFT_CONTRACT_PREFIX: &str = "simple-nft";
pub const MARKETPLACE_CONTRACT_PREFIX: &str = "nft-marketplace";

impl Config {
    /// Layers `marketplace.toml` (if present) and `MARKETPLACE_*` env vars over the defaults.
    pub fn load() -> Result<Self, crate::Error> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("marketplace").required(false))
            .add_source(config::Environment::with_prefix("MARKETPLACE"));
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, crate::Error> {
        let config: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        Ok(config.with_network_defaults())
    }

    /// Fills unset endpoints from the loaded `network`.
    pub fn with_network_defaults(mut self) -> Self {
        let mainnet = self.is_mainnet();
        self.rpc_url
            .get_or_insert_with(|| defaults::rpc_url(mainnet).into());
        self.fallback_rpc_url
            .get_or_insert_with(|| defaults::fallback_rpc_url(mainnet).into());
        self.explorer_url
            .get_or_insert_with(|| defaults::explorer_url(mainnet).into());
        self
    }

    pub fn is_mainnet(&self) -> bool {
        self.network.contains("mainnet")
    }

    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or(defaults::rpc_url(self.is_mainnet()))
    }

    pub fn fallback_rpc_url(&self) -> &str {
        self.fallback_rpc_url
            .as_deref()
            .unwrap_or(defaults::fallback_rpc_url(self.is_mainnet()))
    }

    pub fn explorer_url(&self) -> &str {
        self.explorer_url
            .as_deref()
            .unwrap_or(defaults::explorer_url(self.is_mainnet()))
    }

    pub fn nft_contract(&self, signer: &AccountId) -> Result<AccountId, crate::Error> {
        contract_account(self.nft_contract_id.as_deref(), NFT_CONTRACT_PREFIX, signer)
    }

    pub fn marketplace_contract(&self, signer: &AccountId) -> Result<AccountId, crate::Error> {
        contract_account(
            self.marketplace_contract_id.as_deref(),
            MARKETPLACE_CONTRACT_PREFIX,
            signer,
        )
    }

    /// Marketplace account without a signing key: `marketplace_contract_id`, else
    /// `nft-marketplace.<account_id>`. Used by read-only commands.
    pub fn configured_marketplace_contract(&self) -> Result<AccountId, crate::Error> {
        if let Some(id) = self.marketplace_contract_id.as_deref() {
            return parse_contract_id(id);
        }
        let account_id = self.account_id.as_deref().ok_or_else(|| {
            crate::Error::Config(
                "Set MARKETPLACE_MARKETPLACE_CONTRACT_ID or MARKETPLACE_ACCOUNT_ID".into(),
            )
        })?;
        parse_contract_id(&format!("{MARKETPLACE_CONTRACT_PREFIX}.{account_id}"))
    }

    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/txns/{tx_hash}", self.explorer_url().trim_end_matches('/'))
    }

    pub fn account_url(&self, account_id: &AccountId) -> String {
        format!(
            "{}/address/{account_id}",
            self.explorer_url().trim_end_matches('/')
        )
    }
}

fn contract_account(
    configured: Option<&str>,
    prefix: &str,
    signer: &AccountId,
) -> Result<AccountId, crate::Error> {
    match configured {
        Some(id) => parse_contract_id(id),
        None => parse_contract_id(&format!("{prefix}.{signer}")),
    }
}

fn parse_contract_id(id: &str) -> Result<AccountId, crate::Error> {
    id.parse()
        .map_err(|e| crate::Error::Config(format!("Invalid contract account '{id}': {e}")))
}

mod defaults {
    pub fn network() -> String {
        std::env::var("NEAR_NETWORK").unwrap_or_else(|_| "testnet".into())
    }

    pub fn rpc_url(mainnet: bool) -> &'static str {
        if mainnet {
            "https://rpc.mainnet.near.org"
        } else {
            "https://rpc.testnet.near.org"
        }
    }

    pub fn fallback_rpc_url(mainnet: bool) -> &'static str {
        if mainnet {
            "https://free.rpc.fastnear.com"
        } else {
            "https://test.rpc.fastnear.com"
        }
    }

    pub fn explorer_url(mainnet: bool) -> &'static str {
        if mainnet {
            "https://nearblocks.io"
        } else {
            "https://testnet.nearblocks.io"
        }
    }

    pub fn gas_tgas() -> u64 {
        150
    }

    pub fn deploy_delay_secs() -> u64 {
        5
    }

    pub fn deploy_balance_near() -> u64 {
        5
    }

    pub fn nft_wasm_path() -> String {
        "target/near/simple_nft/simple_nft.wasm".into()
    }

    pub fn marketplace_wasm_path() -> String {
        "target/near/nft_marketplace/nft_marketplace.wasm".into()
    }
}
