// =============================================================================
// Purchases: ownership transfer, fee and royalty payouts, statistics, refunds
// =============================================================================

use anyhow::Result;
use serde_json::json;

use super::helpers::*;

const ONE_NEAR: u128 = 1_000_000_000_000_000_000_000_000;

#[tokio::test]
async fn test_buy_transfers_token_and_removes_listing() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    let bought: bool = buy(&env, &env.buyer, &token_id, &env.seller, PRICE)
        .await?
        .into_result()?
        .json()?;
    assert!(bought);
    assert_eq!(
        nft_owner(&env, &token_id).await?,
        Some(env.buyer.id().to_string())
    );
    assert!(get_listing(&env, &token_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_fee_split_paid_out() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    let fees: FeeBreakdown = env
        .market
        .view("calculate_fees")
        .args_json(json!({ "price": PRICE.to_string() }))
        .await?
        .json()?;
    assert_eq!(fees.marketplace_fee, "25000");
    assert_eq!(fees.seller_amount, "975000");

    let owner_before = balance(&env.owner).await?;
    let seller_before = balance(&env.seller).await?;
    buy(&env, &env.buyer, &token_id, &env.seller, PRICE)
        .await?
        .into_result()?;

    assert_eq!(balance(&env.owner).await? - owner_before, 25_000);
    assert_eq!(
        balance(&env.seller).await? - seller_before,
        975_000 + approval_storage_refund(&env)
    );
    Ok(())
}

#[tokio::test]
async fn test_royalty_paid_to_recipient() -> Result<()> {
    let env = setup().await?;
    let artist = env.worker.dev_create_account().await?;
    let token_id = mint(&env, &env.seller).await?;
    approve_market(&env, &env.seller, &token_id).await?;
    list(&env, &env.seller, &token_id, PRICE, 500, Some(&artist))
        .await?
        .into_result()?;

    let artist_before = balance(&artist).await?;
    let seller_before = balance(&env.seller).await?;
    buy(&env, &env.buyer, &token_id, &env.seller, PRICE)
        .await?
        .into_result()?;

    assert_eq!(balance(&artist).await? - artist_before, 50_000);
    assert_eq!(
        balance(&env.seller).await? - seller_before,
        925_000 + approval_storage_refund(&env)
    );
    Ok(())
}

#[tokio::test]
async fn test_stats_track_completed_sales() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;
    buy(&env, &env.buyer, &token_id, &env.seller, PRICE)
        .await?
        .into_result()?;

    let stats = get_stats(&env).await?;
    assert_eq!(stats.total_volume, "1000000");
    assert_eq!(stats.total_sales, 1);
    assert_eq!(stats.active_listings, 0);

    let sales: u64 = env.market.view("get_total_sales").await?.json()?;
    assert_eq!(sales, 1);
    Ok(())
}

#[tokio::test]
async fn test_underpayment_rejected() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    let result = buy(&env, &env.buyer, &token_id, &env.seller, PRICE - 1).await?;
    assert!(result.is_failure());
    assert!(failure_text(&result).contains("Insufficient deposit"));
    assert!(get_listing(&env, &token_id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_buy_from_wrong_seller_rejected() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    let result = buy(&env, &env.buyer, &token_id, &env.owner, PRICE).await?;
    assert!(result.is_failure());
    assert!(failure_text(&result).contains("No listing found"));
    Ok(())
}

#[tokio::test]
async fn test_overpayment_refunded() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    let before = balance(&env.buyer).await?;
    let bought: bool = buy(&env, &env.buyer, &token_id, &env.seller, ONE_NEAR)
        .await?
        .into_result()?
        .json()?;
    assert!(bought);

    // Without the refund the buyer would be a whole NEAR poorer.
    let spent = before.saturating_sub(balance(&env.buyer).await?);
    assert!(spent >= PRICE);
    assert!(spent < PRICE + GAS_TOLERANCE, "spent {spent}");
    Ok(())
}

#[tokio::test]
async fn test_failed_transfer_refunds_buyer() -> Result<()> {
    let env = setup().await?;
    let token_id = mint_and_list(&env).await?;

    // Seller moves the token elsewhere, which clears the marketplace approval.
    env.seller
        .call(env.nft.id(), "nft_transfer")
        .args_json(json!({ "receiver_id": env.owner.id(), "token_id": token_id }))
        .deposit(ONE_YOCTO)
        .transact()
        .await?
        .into_result()?;

    let before = balance(&env.buyer).await?;
    let bought: bool = buy(&env, &env.buyer, &token_id, &env.seller, ONE_NEAR)
        .await?
        .into_result()?
        .json()?;
    assert!(!bought);
    let spent = before.saturating_sub(balance(&env.buyer).await?);
    assert!(spent < GAS_TOLERANCE, "spent {spent}");
    assert_eq!(
        nft_owner(&env, &token_id).await?,
        Some(env.owner.id().to_string())
    );
    assert!(get_listing(&env, &token_id).await?.is_none());
    assert_eq!(get_stats(&env).await?.total_sales, 0);
    Ok(())
}
