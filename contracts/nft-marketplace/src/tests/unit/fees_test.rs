use crate::tests::test_utils::*;
use crate::*;
use near_sdk::testing_env;

#[test]
fn default_fee_splits_two_and_a_half_percent() {
    let split = compute_fee_breakdown(1_000_000, DEFAULT_MARKETPLACE_FEE_BPS, 0).unwrap();
    assert_eq!(split.marketplace_fee.0, 25_000);
    assert_eq!(split.royalty_amount.0, 0);
    assert_eq!(split.seller_amount.0, 975_000);
}

#[test]
fn royalty_comes_out_of_seller_share() {
    let split = compute_fee_breakdown(1_000_000, 250, 500).unwrap();
    assert_eq!(split.marketplace_fee.0, 25_000);
    assert_eq!(split.royalty_amount.0, 50_000);
    assert_eq!(split.seller_amount.0, 925_000);
}

#[test]
fn shares_round_down() {
    let split = compute_fee_breakdown(999, 250, 0).unwrap();
    assert_eq!(split.marketplace_fee.0, 24);
    assert_eq!(split.seller_amount.0, 975);
}

#[test]
fn large_prices_do_not_overflow() {
    let price = u128::MAX / 2;
    let split = compute_fee_breakdown(price, 1_000, 1_000).unwrap();
    assert_eq!(
        split.marketplace_fee.0 + split.royalty_amount.0 + split.seller_amount.0,
        price
    );
}

#[test]
fn shares_above_one_hundred_percent_rejected() {
    let err = compute_fee_breakdown(1_000, 6_000, 5_000).unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidInput(_)));
}

#[test]
fn calculate_fees_tracks_current_fee() {
    let mut contract = new_contract();
    let split = contract.calculate_fees(U128(1_000_000), None).unwrap();
    assert_eq!(split.marketplace_fee.0, 25_000);

    testing_env!(context_with_deposit(owner(), 1).build());
    contract.set_marketplace_fee(300).unwrap();

    let split = contract.calculate_fees(U128(1_000_000), Some(100)).unwrap();
    assert_eq!(split.marketplace_fee.0, 30_000);
    assert_eq!(split.royalty_amount.0, 10_000);
    assert_eq!(split.seller_amount.0, 960_000);
}
