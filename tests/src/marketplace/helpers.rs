// =============================================================================
// Marketplace Integration Test Helpers
// =============================================================================
// Every test gets a fresh sandbox with both contracts deployed by `owner`
// (who therefore also holds tokens "1".."3"), plus a `seller` and a `buyer`.
// `owner` and `seller` have prepaid marketplace storage; `buyer` has not.
// Call arguments come from the CLI's `actions::args` builders so the sandbox
// exercises exactly what the CLI sends.

use anyhow::Result;
use near_workspaces::network::Sandbox;
use near_workspaces::result::ExecutionFinalResult;
use near_workspaces::types::{Gas as NearGas, NearToken};
use near_workspaces::{Account, Contract, Worker};
use nft_market_cli::actions::args;
use serde::Deserialize;
use serde_json::json;

use crate::utils::{get_wasm_path, setup_sandbox};

// =============================================================================
// Constants
// =============================================================================

pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

/// Covers one approval entry on the NFT contract; the change is refunded.
pub const APPROVE_DEPOSIT: NearToken = NearToken::from_millinear(10);

/// Marketplace storage for five listings.
pub const STORAGE_DEPOSIT: NearToken = NearToken::from_millinear(50);

/// Generous bound on the gas a single call burns, for balance assertions.
pub const GAS_TOLERANCE: u128 = 50_000_000_000_000_000_000_000;

/// Sale price used across the suite, in yoctoNEAR.
pub const PRICE: u128 = 1_000_000;

/// Enough for `buy_nft` → `nft_transfer` → `resolve_purchase`.
pub const BUY_GAS: NearGas = NearGas::from_tgas(150);

pub const LIST_GAS: NearGas = NearGas::from_tgas(100);

// =============================================================================
// View Structs
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub seller_id: String,
    pub nft_contract_id: String,
    pub token_id: String,
    pub price: String,
    pub royalty_bps: u16,
    pub royalty_recipient: Option<String>,
    pub approval_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stats {
    pub total_volume: String,
    pub total_sales: u64,
    pub marketplace_fee_bps: u16,
    pub active_listings: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeeBreakdown {
    pub marketplace_fee: String,
    pub royalty_amount: String,
    pub seller_amount: String,
}

// =============================================================================
// Setup
// =============================================================================

pub struct Env {
    pub worker: Worker<Sandbox>,
    pub owner: Account,
    pub seller: Account,
    pub buyer: Account,
    pub nft: Contract,
    pub market: Contract,
}

async fn deploy(worker: &Worker<Sandbox>, owner: &Account, name: &str) -> Result<Contract> {
    let wasm = std::fs::read(get_wasm_path(name))?;
    let contract = worker.dev_deploy(&wasm).await?;
    owner
        .call(contract.id(), "new")
        .args_json(args::init(owner.id().as_str()))
        .transact()
        .await?
        .into_result()?;
    Ok(contract)
}

pub async fn setup() -> Result<Env> {
    let worker = setup_sandbox().await?;
    let owner = worker.dev_create_account().await?;
    let seller = worker.dev_create_account().await?;
    let buyer = worker.dev_create_account().await?;
    let nft = deploy(&worker, &owner, "simple-nft").await?;
    let market = deploy(&worker, &owner, "nft-marketplace").await?;
    let env = Env {
        worker,
        owner,
        seller,
        buyer,
        nft,
        market,
    };
    storage_deposit(&env, &env.owner).await?;
    storage_deposit(&env, &env.seller).await?;
    Ok(env)
}

// =============================================================================
// NFT contract calls
// =============================================================================

/// Owner mints to `recipient`; returns the new token id.
pub async fn mint(env: &Env, recipient: &Account) -> Result<String> {
    let token_id: String = env
        .owner
        .call(env.nft.id(), "mint")
        .args_json(args::mint(recipient.id().as_str()))
        .transact()
        .await?
        .into_result()?
        .json()?;
    Ok(token_id)
}

pub async fn approve_market(env: &Env, owner: &Account, token_id: &str) -> Result<()> {
    owner
        .call(env.nft.id(), "nft_approve")
        .args_json(args::nft_approve(token_id, env.market.id().as_str(), None))
        .deposit(APPROVE_DEPOSIT)
        .transact()
        .await?
        .into_result()?;
    Ok(())
}

pub async fn nft_owner(env: &Env, token_id: &str) -> Result<Option<String>> {
    Ok(env
        .nft
        .view("get_owner")
        .args_json(json!({ "token_id": token_id }))
        .await?
        .json()?)
}

// =============================================================================
// Marketplace calls
// =============================================================================

pub async fn list(
    env: &Env,
    seller: &Account,
    token_id: &str,
    price: u128,
    royalty_bps: u16,
    royalty_recipient: Option<&Account>,
) -> Result<ExecutionFinalResult> {
    Ok(seller
        .call(env.market.id(), "list_nft")
        .args_json(args::list_nft(
            env.nft.id().as_str(),
            token_id,
            price,
            royalty_bps,
            royalty_recipient.map(|a| a.id().as_str()),
        ))
        .deposit(ONE_YOCTO)
        .gas(LIST_GAS)
        .transact()
        .await?)
}

pub async fn storage_deposit(env: &Env, account: &Account) -> Result<()> {
    account
        .call(env.market.id(), "storage_deposit")
        .args_json(args::storage_deposit(None))
        .deposit(STORAGE_DEPOSIT)
        .transact()
        .await?
        .into_result()?;
    Ok(())
}

/// Mint to the seller, approve the marketplace and list at `PRICE`.
pub async fn mint_and_list(env: &Env) -> Result<String> {
    let token_id = mint(env, &env.seller).await?;
    approve_market(env, &env.seller, &token_id).await?;
    list(env, &env.seller, &token_id, PRICE, 0, None)
        .await?
        .into_result()?;
    Ok(token_id)
}

pub async fn buy(
    env: &Env,
    buyer: &Account,
    token_id: &str,
    seller: &Account,
    deposit: u128,
) -> Result<ExecutionFinalResult> {
    Ok(buyer
        .call(env.market.id(), "buy_nft")
        .args_json(args::buy_nft(
            env.nft.id().as_str(),
            token_id,
            seller.id().as_str(),
        ))
        .deposit(NearToken::from_yoctonear(deposit))
        .gas(BUY_GAS)
        .transact()
        .await?)
}

pub async fn cancel(env: &Env, caller: &Account, token_id: &str) -> Result<ExecutionFinalResult> {
    Ok(caller
        .call(env.market.id(), "cancel_listing")
        .args_json(args::listing_key(env.nft.id().as_str(), token_id))
        .deposit(ONE_YOCTO)
        .transact()
        .await?)
}

pub async fn set_fee(env: &Env, caller: &Account, fee_bps: u16) -> Result<ExecutionFinalResult> {
    Ok(caller
        .call(env.market.id(), "set_marketplace_fee")
        .args_json(args::set_marketplace_fee(fee_bps))
        .deposit(ONE_YOCTO)
        .transact()
        .await?)
}

// =============================================================================
// Marketplace views
// =============================================================================

pub async fn get_listing(env: &Env, token_id: &str) -> Result<Option<Listing>> {
    Ok(env
        .market
        .view("get_listing")
        .args_json(args::listing_key(env.nft.id().as_str(), token_id))
        .await?
        .json()?)
}

pub async fn get_stats(env: &Env) -> Result<Stats> {
    Ok(env.market.view("get_stats").await?.json()?)
}

pub async fn balance(account: &Account) -> Result<u128> {
    Ok(account.view_account().await?.balance.as_yoctonear())
}

/// What the NFT contract returns to the seller when a sale clears the marketplace approval:
/// the approval entry's bytes (borsh account id plus u64 id) at 10^19 yoctoNEAR each.
pub fn approval_storage_refund(env: &Env) -> u128 {
    (env.market.id().as_str().len() as u128 + 4 + 8) * 10_000_000_000_000_000_000
}

/// Debug text of every failed receipt, for asserting on error kinds.
pub fn failure_text(result: &ExecutionFinalResult) -> String {
    format!("{:?}", result.failures())
}
