// =============================================================================
// simple-nft: initial supply and minting
// =============================================================================

use anyhow::Result;
use serde_json::json;

use super::helpers::*;

#[tokio::test]
async fn test_initial_supply_belongs_to_deployer() -> Result<()> {
    let env = setup().await?;

    let last: u64 = env.nft.view("get_last_token_id").await?.json()?;
    assert_eq!(last, 3);
    for id in ["1", "2", "3"] {
        assert_eq!(nft_owner(&env, id).await?, Some(env.owner.id().to_string()));
    }
    Ok(())
}

#[tokio::test]
async fn test_mint_returns_next_id_and_sets_owner() -> Result<()> {
    let env = setup().await?;

    let token_id = mint(&env, &env.seller).await?;
    assert_eq!(token_id, "4");
    assert_eq!(
        nft_owner(&env, &token_id).await?,
        Some(env.seller.id().to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_only_contract_owner_can_mint() -> Result<()> {
    let env = setup().await?;

    let result = env
        .seller
        .call(env.nft.id(), "mint")
        .args_json(json!({ "recipient_id": env.seller.id() }))
        .transact()
        .await?;
    assert!(result.is_failure());
    assert!(failure_text(&result).contains("Unauthorized"));

    let last: u64 = env.nft.view("get_last_token_id").await?.json()?;
    assert_eq!(last, 3);
    Ok(())
}
