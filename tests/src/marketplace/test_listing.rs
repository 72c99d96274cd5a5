// =============================================================================
// Listing lifecycle: list, duplicate, re-approval, storage, approve-and-list, cancel
// =============================================================================

use anyhow::Result;
use near_workspaces::types::Gas as NearGas;
use nft_market_cli::actions::args;

use super::helpers::*;

#[tokio::test]
async fn test_marketplace_defaults() -> Result<()> {
    let env = setup().await?;

    let fee: u16 = env.market.view("get_marketplace_fee").await?.json()?;
    assert_eq!(fee, 250);
    let stats = get_stats(&env).await?;
    assert_eq!(stats.total_volume, "0");
    assert_eq!(stats.total_sales, 0);
    assert_eq!(stats.active_listings, 0);
    Ok(())
}

#[tokio::test]
async fn test_list_nft() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    let listing = get_listing(&env, &token_id).await?.expect("listing stored");
    assert_eq!(listing.seller_id, env.seller.id().to_string());
    assert_eq!(listing.nft_contract_id, env.nft.id().to_string());
    assert_eq!(listing.price, PRICE.to_string());
    assert_eq!(listing.royalty_bps, 0);
    assert_eq!(listing.royalty_recipient, None);
    assert_eq!(get_stats(&env).await?.active_listings, 1);
    Ok(())
}

#[tokio::test]
async fn test_list_without_ownership_fails() -> Result<()> {
    let env = setup().await?;
    let token_id = mint(&env, &env.seller).await?;

    // Owner of the NFT contract, but not of this token.
    let result = list(&env, &env.owner, &token_id, PRICE, 0, None).await?;
    assert!(result.is_failure());
    assert!(failure_text(&result).contains("Unauthorized"));
    assert!(get_listing(&env, &token_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_list_without_approval_fails() -> Result<()> {
    let env = setup().await?;
    let token_id = mint(&env, &env.seller).await?;

    let result = list(&env, &env.seller, &token_id, PRICE, 0, None).await?;
    assert!(result.is_failure());
    assert!(failure_text(&result).contains("not approved"));
    Ok(())
}

#[tokio::test]
async fn test_list_missing_token_fails() -> Result<()> {
    let env = setup().await?;

    let result = list(&env, &env.seller, "999", PRICE, 0, None).await?;
    assert!(result.is_failure());
    assert!(failure_text(&result).contains("Not found"));
    Ok(())
}

#[tokio::test]
async fn test_list_without_storage_deposit_fails() -> Result<()> {
    let env = setup().await?;
    let token_id = mint(&env, &env.buyer).await?;
    approve_market(&env, &env.buyer, &token_id).await?;

    let result = list(&env, &env.buyer, &token_id, PRICE, 0, None).await?;
    assert!(result.is_failure());
    assert!(failure_text(&result).contains("storage_deposit"));
    assert!(get_listing(&env, &token_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_listing_rejected() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    let result = list(&env, &env.seller, &token_id, PRICE * 2, 0, None).await?;
    assert!(result.is_failure());
    assert!(failure_text(&result).contains("already listed"));
    let listing = get_listing(&env, &token_id).await?.expect("listing kept");
    assert_eq!(listing.price, PRICE.to_string());
    Ok(())
}

#[tokio::test]
async fn test_approve_with_msg_lists_in_one_call() -> Result<()> {
    let env = setup().await?;
    let token_id = mint(&env, &env.seller).await?;

    env.seller
        .call(env.nft.id(), "nft_approve")
        .args_json(args::nft_approve(
            &token_id,
            env.market.id().as_str(),
            Some(args::listing_msg(PRICE, 0, None)),
        ))
        .deposit(APPROVE_DEPOSIT)
        .gas(NearGas::from_tgas(100))
        .transact()
        .await?
        .into_result()?;

    let listing = get_listing(&env, &token_id).await?.expect("listed via nft_on_approve");
    assert_eq!(listing.seller_id, env.seller.id().to_string());
    assert_eq!(listing.price, PRICE.to_string());
    Ok(())
}

#[tokio::test]
async fn test_seller_cancels_listing() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    let canceled: bool = cancel(&env, &env.seller, &token_id)
        .await?
        .into_result()?
        .json()?;
    assert!(canceled);
    assert!(get_listing(&env, &token_id).await?.is_none());
    assert_eq!(get_stats(&env).await?.active_listings, 0);
    Ok(())
}

#[tokio::test]
async fn test_cancel_by_non_seller_fails() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    let result = cancel(&env, &env.buyer, &token_id).await?;
    assert!(result.is_failure());
    assert!(failure_text(&result).contains("Unauthorized"));
    assert!(get_listing(&env, &token_id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_seller_updates_price() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    env.seller
        .call(env.market.id(), "update_price")
        .args_json(args::update_price(env.nft.id().as_str(), &token_id, PRICE * 3))
        .deposit(ONE_YOCTO)
        .transact()
        .await?
        .into_result()?;

    let listing = get_listing(&env, &token_id).await?.expect("listing kept");
    assert_eq!(listing.price, (PRICE * 3).to_string());
    Ok(())
}

#[tokio::test]
async fn test_relist_after_reapproval_stays_buyable() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;
    let first = get_listing(&env, &token_id).await?.expect("listed");

    // A second approval replaces the marketplace's approval id on the NFT contract.
    approve_market(&env, &env.seller, &token_id).await?;
    list(&env, &env.seller, &token_id, PRICE * 2, 0, None)
        .await?
        .into_result()?;

    let listing = get_listing(&env, &token_id).await?.expect("refreshed");
    assert!(listing.approval_id > first.approval_id);
    assert_eq!(listing.price, (PRICE * 2).to_string());
    assert_eq!(get_stats(&env).await?.active_listings, 1);

    let bought: bool = buy(&env, &env.buyer, &token_id, &env.seller, PRICE * 2)
        .await?
        .into_result()?
        .json()?;
    assert!(bought);
    assert_eq!(
        nft_owner(&env, &token_id).await?,
        Some(env.buyer.id().to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_reapprove_with_msg_refreshes_listing() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    env.seller
        .call(env.nft.id(), "nft_approve")
        .args_json(args::nft_approve(
            &token_id,
            env.market.id().as_str(),
            Some(args::listing_msg(PRICE * 3, 0, None)),
        ))
        .deposit(APPROVE_DEPOSIT)
        .gas(NearGas::from_tgas(100))
        .transact()
        .await?
        .into_result()?;
    let listing = get_listing(&env, &token_id).await?.expect("refreshed");
    assert_eq!(listing.price, (PRICE * 3).to_string());

    let bought: bool = buy(&env, &env.buyer, &token_id, &env.seller, PRICE * 3)
        .await?
        .into_result()?
        .json()?;
    assert!(bought);
    Ok(())
}
