//! Pure builders for contract call arguments and transaction actions.
//!
//! `args::*` produce the JSON argument objects (shared with the sandbox tests);
//! the functions at module level wrap them into `Action`s with gas and deposit.

use near_crypto::PublicKey;
use near_gas::NearGas;
use near_primitives::account::AccessKey;
use near_primitives::transaction::{
    Action, AddKeyAction, CreateAccountAction, DeployContractAction, FunctionCallAction,
    TransferAction,
};
use near_primitives::types::AccountId;
use serde_json::Value;

pub const ONE_YOCTO: u128 = 1;
pub const YOCTO_PER_NEAR: u128 = 1_000_000_000_000_000_000_000_000;
/// Attached to `nft_approve`; the NFT contract keeps the approval's storage cost and refunds the rest.
pub const APPROVAL_DEPOSIT: u128 = 10_000_000_000_000_000_000_000;

/// JSON call arguments. Account ids are taken as `&str` so callers holding
/// either RPC or sandbox account types can share them.
pub mod args {
    use serde_json::{json, Value};

    pub fn mint(recipient_id: &str) -> Value {
        json!({ "recipient_id": recipient_id })
    }

    /// `msg` present makes the NFT contract call `nft_on_approve` on the marketplace.
    pub fn nft_approve(token_id: &str, account_id: &str, msg: Option<String>) -> Value {
        json!({ "token_id": token_id, "account_id": account_id, "msg": msg })
    }

    pub fn list_nft(
        nft_contract_id: &str,
        token_id: &str,
        price: u128,
        royalty_bps: u16,
        royalty_recipient: Option<&str>,
    ) -> Value {
        json!({
            "nft_contract_id": nft_contract_id,
            "token_id": token_id,
            "price": price.to_string(),
            "royalty_bps": royalty_bps,
            "royalty_recipient": royalty_recipient,
        })
    }

    /// Terms for listing through `nft_approve(.., msg)`.
    pub fn listing_msg(price: u128, royalty_bps: u16, royalty_recipient: Option<&str>) -> String {
        json!({
            "price": price.to_string(),
            "royalty_bps": royalty_bps,
            "royalty_recipient": royalty_recipient,
        })
        .to_string()
    }

    pub fn buy_nft(nft_contract_id: &str, token_id: &str, seller_id: &str) -> Value {
        json!({
            "nft_contract_id": nft_contract_id,
            "token_id": token_id,
            "seller_id": seller_id,
        })
    }

    /// Also the argument shape of `get_listing`.
    pub fn listing_key(nft_contract_id: &str, token_id: &str) -> Value {
        json!({ "nft_contract_id": nft_contract_id, "token_id": token_id })
    }

    pub fn update_price(nft_contract_id: &str, token_id: &str, price: u128) -> Value {
        json!({
            "nft_contract_id": nft_contract_id,
            "token_id": token_id,
            "price": price.to_string(),
        })
    }

    /// `storage_deposit`; `None` credits the caller.
    pub fn storage_deposit(account_id: Option<&str>) -> Value {
        json!({ "account_id": account_id })
    }

    /// Argument of `storage_balance_of` and `storage_available`.
    pub fn account(account_id: &str) -> Value {
        json!({ "account_id": account_id })
    }

    pub fn set_marketplace_fee(fee_bps: u16) -> Value {
        json!({ "fee_bps": fee_bps })
    }

    /// Init args of both contracts.
    pub fn init(owner_id: &str) -> Value {
        json!({ "owner_id": owner_id })
    }
}

pub fn function_call(method_name: &str, args: &Value, gas: NearGas, deposit: u128) -> Action {
    Action::FunctionCall(Box::new(FunctionCallAction {
        method_name: method_name.to_string(),
        args: serde_json::to_vec(args).unwrap_or_default(),
        gas: gas.as_gas(),
        deposit,
    }))
}

pub fn mint(recipient_id: &AccountId, gas: NearGas) -> Action {
    function_call("mint", &args::mint(recipient_id.as_str()), gas, 0)
}

pub fn nft_approve(token_id: &str, marketplace_id: &AccountId, gas: NearGas) -> Action {
    function_call(
        "nft_approve",
        &args::nft_approve(token_id, marketplace_id.as_str(), None),
        gas,
        APPROVAL_DEPOSIT,
    )
}

/// Prepays listing storage for the caller.
pub fn storage_deposit(amount: u128, gas: NearGas) -> Action {
    function_call("storage_deposit", &args::storage_deposit(None), gas, amount)
}

pub fn list_nft(
    nft_contract_id: &AccountId,
    token_id: &str,
    price: u128,
    royalty_bps: u16,
    royalty_recipient: Option<&AccountId>,
    gas: NearGas,
) -> Action {
    function_call(
        "list_nft",
        &args::list_nft(
            nft_contract_id.as_str(),
            token_id,
            price,
            royalty_bps,
            royalty_recipient.map(|a| a.as_str()),
        ),
        gas,
        ONE_YOCTO,
    )
}

/// Attaches `price` as the deposit.
pub fn buy_nft(
    nft_contract_id: &AccountId,
    token_id: &str,
    seller_id: &AccountId,
    price: u128,
    gas: NearGas,
) -> Action {
    function_call(
        "buy_nft",
        &args::buy_nft(nft_contract_id.as_str(), token_id, seller_id.as_str()),
        gas,
        price,
    )
}

pub fn cancel_listing(nft_contract_id: &AccountId, token_id: &str, gas: NearGas) -> Action {
    function_call(
        "cancel_listing",
        &args::listing_key(nft_contract_id.as_str(), token_id),
        gas,
        ONE_YOCTO,
    )
}

pub fn update_price(nft_contract_id: &AccountId, token_id: &str, price: u128, gas: NearGas) -> Action {
    function_call(
        "update_price",
        &args::update_price(nft_contract_id.as_str(), token_id, price),
        gas,
        ONE_YOCTO,
    )
}

pub fn set_marketplace_fee(fee_bps: u16, gas: NearGas) -> Action {
    function_call(
        "set_marketplace_fee",
        &args::set_marketplace_fee(fee_bps),
        gas,
        ONE_YOCTO,
    )
}

/// Creates a sub-account, funds it, adds the signer's key, deploys `code` and calls `new`.
pub fn create_and_deploy(
    code: Vec<u8>,
    initial_balance: u128,
    public_key: PublicKey,
    init_args: &Value,
    gas: NearGas,
) -> Vec<Action> {
    vec![
        Action::CreateAccount(CreateAccountAction {}),
        Action::Transfer(TransferAction {
            deposit: initial_balance,
        }),
        Action::AddKey(Box::new(AddKeyAction {
            public_key,
            access_key: AccessKey::full_access(),
        })),
        Action::DeployContract(DeployContractAction { code }),
        function_call("new", init_args, gas, 0),
    ]
}
