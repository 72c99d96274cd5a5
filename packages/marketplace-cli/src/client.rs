//! Marketplace operations: build actions, sign, broadcast, report.

use std::sync::atomic::{AtomicU64, Ordering};

use near_gas::NearGas;
use near_primitives::hash::CryptoHash;
use near_primitives::transaction::Action;
use near_primitives::types::AccountId;
use near_primitives::views::FinalExecutionStatus;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::actions::{self, args};
use crate::config::Config;
use crate::rpc::RpcClient;
use crate::signer::TxSigner;

/// Result of a submitted transaction.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub tx_hash: CryptoHash,
    pub explorer_url: String,
    /// `None` when sent without waiting for execution.
    pub return_value: Option<Value>,
}

/// `get_stats` view.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MarketplaceStats {
    #[serde(deserialize_with = "u128_from_str")]
    pub total_volume: u128,
    pub total_sales: u64,
    pub marketplace_fee_bps: u16,
    pub active_listings: u32,
}

/// `get_listing` view (the fields the CLI reads).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ListingView {
    pub seller_id: AccountId,
    pub token_id: String,
    #[serde(deserialize_with = "u128_from_str")]
    pub price: u128,
    pub royalty_bps: u16,
}

/// Transactions another call depends on are always awaited, even with `--no-wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Prerequisite,
    Final,
}

fn u128_from_str<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

pub struct MarketplaceClient {
    config: Config,
    rpc: RpcClient,
    signer: TxSigner,
    nft_contract: AccountId,
    marketplace_contract: AccountId,
    /// Wait for the final execution outcome (default) or return once broadcast.
    wait: bool,
    last_nonce: AtomicU64,
}

impl MarketplaceClient {
    pub fn new(config: Config, signer: TxSigner, wait: bool) -> Result<Self, crate::Error> {
        let account_id = signer.account_id();
        let nft_contract = config.nft_contract(&account_id)?;
        let marketplace_contract = config.marketplace_contract(&account_id)?;
        info!(
            signer = %account_id,
            nft = %nft_contract,
            marketplace = %marketplace_contract,
            network = %config.network,
            "Marketplace client ready"
        );
        Ok(Self {
            rpc: RpcClient::new(config.rpc_url(), config.fallback_rpc_url()),
            config,
            signer,
            nft_contract,
            marketplace_contract,
            wait,
            last_nonce: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn signer(&self) -> &TxSigner {
        &self.signer
    }

    pub fn nft_contract(&self) -> &AccountId {
        &self.nft_contract
    }

    pub fn marketplace_contract(&self) -> &AccountId {
        &self.marketplace_contract
    }

    fn gas(&self) -> NearGas {
        NearGas::from_tgas(self.config.gas_tgas)
    }

    // --- Operations ---

    pub async fn mint(&self, recipient: &AccountId) -> Result<TxReceipt, crate::Error> {
        info!(recipient = %recipient, "Minting NFT");
        self.submit(&self.nft_contract, vec![actions::mint(recipient, self.gas())])
            .await
    }

    /// Tops up listing storage if needed, approves the marketplace on the NFT contract,
    /// then lists the token. A non-zero royalty is paid to the signer.
    pub async fn list(
        &self,
        token_id: &str,
        price: u128,
        royalty_bps: u16,
    ) -> Result<TxReceipt, crate::Error> {
        if price == 0 {
            return Err(crate::Error::InvalidArgument("price must be greater than 0".into()));
        }
        let signer_id = self.signer.account_id();
        check_not_listed_by(token_id, &signer_id, self.listing(token_id).await?.as_ref())?;
        info!(token_id, price, royalty_bps, "Listing NFT");

        self.ensure_listing_storage(&signer_id).await?;

        let approve = self
            .submit_step(
                &self.nft_contract,
                vec![actions::nft_approve(token_id, &self.marketplace_contract, self.gas())],
                Step::Prerequisite,
            )
            .await?;
        info!(tx_hash = %approve.tx_hash, "Marketplace approved");

        let royalty_recipient = (royalty_bps > 0).then_some(&signer_id);
        self.submit(
            &self.marketplace_contract,
            vec![actions::list_nft(
                &self.nft_contract,
                token_id,
                price,
                royalty_bps,
                royalty_recipient,
                self.gas(),
            )],
        )
        .await
    }

    pub async fn update_price(&self, token_id: &str, price: u128) -> Result<TxReceipt, crate::Error> {
        if price == 0 {
            return Err(crate::Error::InvalidArgument("price must be greater than 0".into()));
        }
        info!(token_id, price, "Updating listing price");
        self.submit(
            &self.marketplace_contract,
            vec![actions::update_price(&self.nft_contract, token_id, price, self.gas())],
        )
        .await
    }

    /// Deposits the shortfall when the unlocked storage balance cannot cover one more listing.
    async fn ensure_listing_storage(&self, account_id: &AccountId) -> Result<(), crate::Error> {
        let available = self
            .view_u128("storage_available", &args::account(account_id.as_str()))
            .await?;
        let minimum = self
            .view_u128("storage_minimum_balance", &serde_json::json!({}))
            .await?;
        if available >= minimum {
            return Ok(());
        }
        let shortfall = minimum - available;
        info!(amount = shortfall, "Depositing listing storage");
        self.submit_step(
            &self.marketplace_contract,
            vec![actions::storage_deposit(shortfall, self.gas())],
            Step::Prerequisite,
        )
        .await?;
        Ok(())
    }

    /// Reads the listing price and attaches it.
    pub async fn buy(&self, token_id: &str, seller: &AccountId) -> Result<TxReceipt, crate::Error> {
        let listing = self.listing(token_id).await?.ok_or_else(|| {
            crate::Error::InvalidArgument(format!("token {token_id} is not listed"))
        })?;
        if &listing.seller_id != seller {
            return Err(crate::Error::InvalidArgument(format!(
                "token {token_id} is listed by {}, not {seller}",
                listing.seller_id
            )));
        }
        info!(token_id, seller = %seller, price = listing.price, "Buying NFT");
        self.submit(
            &self.marketplace_contract,
            vec![actions::buy_nft(
                &self.nft_contract,
                token_id,
                seller,
                listing.price,
                self.gas(),
            )],
        )
        .await
    }

    pub async fn cancel(&self, token_id: &str) -> Result<TxReceipt, crate::Error> {
        info!(token_id, "Canceling listing");
        self.submit(
            &self.marketplace_contract,
            vec![actions::cancel_listing(&self.nft_contract, token_id, self.gas())],
        )
        .await
    }

    /// Owner only.
    pub async fn set_fee(&self, fee_bps: u16) -> Result<TxReceipt, crate::Error> {
        info!(fee_bps, "Setting marketplace fee");
        self.submit(
            &self.marketplace_contract,
            vec![actions::set_marketplace_fee(fee_bps, self.gas())],
        )
        .await
    }

    pub async fn listing(&self, token_id: &str) -> Result<Option<ListingView>, crate::Error> {
        self.view(
            &self.marketplace_contract,
            "get_listing",
            &args::listing_key(self.nft_contract.as_str(), token_id),
        )
        .await
    }

    // --- Plumbing ---

    pub async fn view<T: serde::de::DeserializeOwned>(
        &self,
        contract_id: &AccountId,
        method_name: &str,
        args: &Value,
    ) -> Result<T, crate::Error> {
        view_json(&self.rpc, contract_id, method_name, args).await
    }

    /// Marketplace view returning a `U128` string.
    async fn view_u128(&self, method_name: &str, args: &Value) -> Result<u128, crate::Error> {
        let value: String = self.view(&self.marketplace_contract, method_name, args).await?;
        value
            .parse()
            .map_err(|e| crate::Error::Rpc(format!("{method_name}: unexpected result: {e}")))
    }

    /// Signs `actions` for `receiver_id` and broadcasts them.
    pub async fn submit(
        &self,
        receiver_id: &AccountId,
        actions: Vec<Action>,
    ) -> Result<TxReceipt, crate::Error> {
        self.submit_step(receiver_id, actions, Step::Final).await
    }

    fn waits_for(&self, step: Step) -> bool {
        step == Step::Prerequisite || self.wait
    }

    async fn submit_step(
        &self,
        receiver_id: &AccountId,
        actions: Vec<Action>,
        step: Step,
    ) -> Result<TxReceipt, crate::Error> {
        let account_id = self.signer.account_id();
        let public_key = self.signer.public_key();
        let access_key = self.rpc.query_access_key(&account_id, &public_key).await?;
        let nonce = self.next_nonce(access_key.nonce);
        let block_hash = self.rpc.latest_block_hash().await?;

        let signed_tx = self
            .signer
            .sign_transaction(nonce, receiver_id, block_hash, actions);
        let tx_hash = signed_tx.get_hash();

        if !self.waits_for(step) {
            let tx_hash = self.rpc.send_tx_async(signed_tx).await?;
            info!(tx_hash = %tx_hash, receiver = %receiver_id, "TX submitted (async)");
            return Ok(self.receipt(tx_hash, None));
        }

        let outcome = self.rpc.send_signed_tx(signed_tx).await?;
        match outcome.status {
            FinalExecutionStatus::SuccessValue(bytes) => {
                info!(tx_hash = %tx_hash, receiver = %receiver_id, "TX succeeded");
                let value = serde_json::from_slice(&bytes).ok();
                Ok(self.receipt(tx_hash, value))
            }
            FinalExecutionStatus::Failure(e) => {
                warn!(tx_hash = %tx_hash, error = ?e, "TX failed");
                Err(crate::Error::TxFailed {
                    tx_hash: tx_hash.to_string(),
                    reason: format!("{e:?}"),
                })
            }
            FinalExecutionStatus::NotStarted | FinalExecutionStatus::Started => {
                Ok(self.receipt(tx_hash, None))
            }
        }
    }

    /// Chain nonce + 1, never reusing one this client already signed with.
    fn next_nonce(&self, chain_nonce: u64) -> u64 {
        let candidate = chain_nonce + 1;
        let previous = self.last_nonce.fetch_max(candidate, Ordering::SeqCst);
        if previous >= candidate {
            self.last_nonce.fetch_add(1, Ordering::SeqCst) + 1
        } else {
            candidate
        }
    }

    fn receipt(&self, tx_hash: CryptoHash, return_value: Option<Value>) -> TxReceipt {
        TxReceipt {
            explorer_url: self.config.tx_url(&tx_hash.to_string()),
            tx_hash,
            return_value,
        }
    }
}

/// Reads `get_stats` without a signing key; the marketplace comes from configuration.
pub async fn fetch_stats(config: &Config) -> Result<(AccountId, MarketplaceStats), crate::Error> {
    let marketplace = config.configured_marketplace_contract()?;
    let rpc = RpcClient::new(config.rpc_url(), config.fallback_rpc_url());
    let stats = view_json(&rpc, &marketplace, "get_stats", &serde_json::json!({})).await?;
    Ok((marketplace, stats))
}

async fn view_json<T: serde::de::DeserializeOwned>(
    rpc: &RpcClient,
    contract_id: &AccountId,
    method_name: &str,
    args: &Value,
) -> Result<T, crate::Error> {
    let bytes = rpc.view_function(contract_id, method_name, args).await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| crate::Error::Rpc(format!("{method_name}: unexpected result: {e}")))
}

/// Repricing an existing listing goes through `update_price`, not a second approval.
fn check_not_listed_by(
    token_id: &str,
    signer_id: &AccountId,
    existing: Option<&ListingView>,
) -> Result<(), crate::Error> {
    match existing {
        Some(listing) if &listing.seller_id == signer_id => {
            Err(crate::Error::InvalidArgument(format!(
                "token {token_id} is already listed for {} yoctoNEAR; use `nft-market update-price {token_id} <price>`",
                listing.price
            )))
        }
        _ => Ok(()),
    }
}
