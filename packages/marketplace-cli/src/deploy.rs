//! Deploys `simple-nft` and then `nft-marketplace` to sub-accounts of the signer.

use std::path::Path;
use std::time::Duration;

use near_gas::NearGas;
use near_primitives::types::AccountId;
use tracing::info;

use crate::actions::{self, args, YOCTO_PER_NEAR};
use crate::client::{MarketplaceClient, TxReceipt};

#[derive(Debug)]
pub struct DeployReport {
    pub nft_contract: AccountId,
    pub nft_tx: TxReceipt,
    pub marketplace_contract: AccountId,
    pub marketplace_tx: TxReceipt,
}

pub async fn deploy_contracts(client: &MarketplaceClient) -> Result<DeployReport, crate::Error> {
    let config = client.config();
    let owner = client.signer().account_id();
    let balance = u128::from(config.deploy_balance_near) * YOCTO_PER_NEAR;
    let gas = NearGas::from_tgas(config.gas_tgas);

    let nft_code = read_wasm(&config.nft_wasm_path)?;
    let marketplace_code = read_wasm(&config.marketplace_wasm_path)?;

    let nft_contract = client.nft_contract().clone();
    check_sub_account(&nft_contract, &owner)?;
    info!(account = %nft_contract, bytes = nft_code.len(), "Deploying NFT contract");
    let nft_tx = client
        .submit(
            &nft_contract,
            actions::create_and_deploy(
                nft_code,
                balance,
                client.signer().public_key(),
                &args::init(owner.as_str()),
                gas,
            ),
        )
        .await?;
    info!(tx_hash = %nft_tx.tx_hash, "NFT contract deployed");

    info!(secs = config.deploy_delay_secs, "Waiting before deploying marketplace");
    tokio::time::sleep(Duration::from_secs(config.deploy_delay_secs)).await;

    let marketplace_contract = client.marketplace_contract().clone();
    check_sub_account(&marketplace_contract, &owner)?;
    info!(account = %marketplace_contract, bytes = marketplace_code.len(), "Deploying marketplace contract");
    let marketplace_tx = client
        .submit(
            &marketplace_contract,
            actions::create_and_deploy(
                marketplace_code,
                balance,
                client.signer().public_key(),
                &args::init(owner.as_str()),
                gas,
            ),
        )
        .await?;
    info!(tx_hash = %marketplace_tx.tx_hash, "Marketplace contract deployed");

    Ok(DeployReport {
        nft_contract,
        nft_tx,
        marketplace_contract,
        marketplace_tx,
    })
}

fn read_wasm(path: &str) -> Result<Vec<u8>, crate::Error> {
    if !Path::new(path).exists() {
        return Err(crate::Error::Config(format!(
            "Contract WASM not found at {path}; build the contracts first"
        )));
    }
    Ok(std::fs::read(path)?)
}

/// `CreateAccount` only works for direct sub-accounts of the signer.
fn check_sub_account(contract: &AccountId, owner: &AccountId) -> Result<(), crate::Error> {
    if contract.get_parent_account_id().map(|p| p.as_str()) != Some(owner.as_str()) {
        return Err(crate::Error::Config(format!(
            "{contract} is not a sub-account of {owner}; unset the contract id to deploy"
        )));
    }
    Ok(())
}
