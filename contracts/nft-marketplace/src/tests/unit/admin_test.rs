use crate::tests::test_utils::*;
use crate::*;
use near_sdk::testing_env;

#[test]
fn owner_sets_marketplace_fee() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(owner(), 1).build());

    assert_eq!(contract.set_marketplace_fee(300).unwrap(), 300);
    assert_eq!(contract.get_marketplace_fee(), 300);

    let events = event_logs();
    assert_eq!(events[0]["event"], "CONTRACT_UPDATE");
    assert_eq!(events[0]["data"][0]["operation"], "fee_updated");
    assert_eq!(events[0]["data"][0]["old_fee_bps"], 250);
    assert_eq!(events[0]["data"][0]["new_fee_bps"], 300);
}

#[test]
fn non_owner_cannot_set_fee() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(seller(), 1).build());

    let err = contract.set_marketplace_fee(300).unwrap_err();
    assert!(matches!(err, MarketplaceError::Unauthorized(_)));
    assert_eq!(contract.get_marketplace_fee(), DEFAULT_MARKETPLACE_FEE_BPS);
}

#[test]
fn fee_above_cap_rejected() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(owner(), 1).build());

    assert_eq!(contract.set_marketplace_fee(MAX_MARKETPLACE_FEE_BPS).unwrap(), 1_000);
    let err = contract.set_marketplace_fee(MAX_MARKETPLACE_FEE_BPS + 1).unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidInput(_)));
}

#[test]
fn set_fee_requires_one_yocto() {
    let mut contract = new_contract();
    testing_env!(context(owner()).build());

    let err = contract.set_marketplace_fee(300).unwrap_err();
    assert!(matches!(err, MarketplaceError::InsufficientDeposit(_)));
}

#[test]
fn fee_recipient_defaults_to_owner_and_can_change() {
    let mut contract = new_contract();
    assert_eq!(contract.get_fee_recipient(), owner());

    testing_env!(context_with_deposit(owner(), 1).build());
    contract.set_fee_recipient(artist()).unwrap();
    assert_eq!(contract.get_fee_recipient(), artist());

    testing_env!(context_with_deposit(seller(), 1).build());
    assert!(contract.set_fee_recipient(seller()).is_err());
}

#[test]
fn ownership_transfer_moves_admin_rights() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(owner(), 1).build());
    contract.transfer_ownership(seller()).unwrap();
    assert_eq!(contract.get_owner(), seller());

    let err = contract.set_marketplace_fee(100).unwrap_err();
    assert!(matches!(err, MarketplaceError::Unauthorized(_)));

    testing_env!(context_with_deposit(seller(), 1).build());
    assert_eq!(contract.set_marketplace_fee(100).unwrap(), 100);
}

#[test]
fn ownership_transfer_to_self_rejected() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(owner(), 1).build());

    let err = contract.transfer_ownership(owner()).unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidInput(_)));
}
