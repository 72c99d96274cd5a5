use crate::*;

pub(crate) fn hash_account_id(account_id: &AccountId) -> Vec<u8> {
    env::sha256(account_id.as_bytes())
}

pub(crate) fn check_one_yocto() -> Result<(), NftError> {
    if env::attached_deposit() != ONE_YOCTO {
        return Err(NftError::InsufficientDeposit(
            "Requires attached deposit of exactly 1 yoctoNEAR".into(),
        ));
    }
    Ok(())
}

pub(crate) fn check_at_least_one_yocto() -> Result<(), NftError> {
    if env::attached_deposit() < ONE_YOCTO {
        return Err(NftError::InsufficientDeposit(
            "Requires attached deposit of at least 1 yoctoNEAR".into(),
        ));
    }
    Ok(())
}

/// Bytes one approval adds to a `TokenRecord`: the borsh account id plus its approval id.
pub(crate) fn bytes_for_approved_account_id(account_id: &AccountId) -> u64 {
    account_id.as_str().len() as u64 + 4 + 8
}

pub(crate) fn approval_storage_cost(account_id: &AccountId) -> u128 {
    u128::from(bytes_for_approved_account_id(account_id))
        * env::storage_byte_cost().as_yoctonear()
}

pub(crate) fn refund(account_id: &AccountId, amount: u128) {
    if amount > 0 {
        let _ = Promise::new(account_id.clone()).transfer(NearToken::from_yoctonear(amount));
    }
}

/// Returns the storage of cleared approvals to the owner who paid for it.
pub(crate) fn refund_approvals<'a>(
    owner_id: &AccountId,
    approved: impl IntoIterator<Item = &'a AccountId>,
) {
    let amount = approved.into_iter().map(approval_storage_cost).sum();
    refund(owner_id, amount);
}

impl Contract {
    pub(crate) fn check_contract_owner(&self, actor_id: &AccountId) -> Result<(), NftError> {
        if actor_id != &self.owner_id {
            return Err(NftError::only_owner("contract owner"));
        }
        Ok(())
    }
}
