use crate::guards::{
    approval_storage_cost, check_at_least_one_yocto, check_one_yocto, refund, refund_approvals,
};
use crate::*;

#[near]
impl Contract {
    /// Token owner only. With `msg`, notifies `account_id` through `nft_on_approve`.
    /// A new approval must attach its storage cost; anything above that is refunded.
    #[payable]
    #[handle_result]
    pub fn nft_approve(
        &mut self,
        token_id: TokenId,
        account_id: AccountId,
        msg: Option<String>,
    ) -> Result<Option<Promise>, NftError> {
        check_at_least_one_yocto()?;

        let owner_id = env::predecessor_account_id();
        let mut token = self.owned_token(&token_id, &owner_id, "approve")?;

        let storage_cost = if token.approved_account_ids.contains_key(&account_id) {
            0
        } else {
            approval_storage_cost(&account_id)
        };
        let attached = env::attached_deposit().as_yoctonear();
        let charged = storage_cost.max(ONE_YOCTO.as_yoctonear());
        if attached < charged {
            return Err(NftError::InsufficientDeposit(format!(
                "Approval storage costs {} yoctoNEAR, attached {}",
                charged, attached
            )));
        }

        let approval_id = self.next_approval_id;
        self.next_approval_id = self
            .next_approval_id
            .checked_add(1)
            .ok_or_else(|| NftError::InternalError("Approval ID counter overflow".into()))?;
        token
            .approved_account_ids
            .insert(account_id.clone(), approval_id);
        self.tokens.insert(token_id.clone(), token);
        refund(&owner_id, attached - charged);

        Ok(msg.map(|msg| {
            external::ext_approval_receiver::ext(account_id)
                .with_static_gas(Gas::from_tgas(DEFAULT_ON_APPROVE_GAS))
                .nft_on_approve(token_id, owner_id, approval_id, msg)
        }))
    }

    #[payable]
    #[handle_result]
    pub fn nft_revoke(&mut self, token_id: TokenId, account_id: AccountId) -> Result<(), NftError> {
        check_one_yocto()?;

        let owner_id = env::predecessor_account_id();
        let mut token = self.owned_token(&token_id, &owner_id, "revoke approval")?;
        if token.approved_account_ids.remove(&account_id).is_some() {
            refund_approvals(&owner_id, [&account_id]);
            self.tokens.insert(token_id, token);
        }
        Ok(())
    }

    #[payable]
    #[handle_result]
    pub fn nft_revoke_all(&mut self, token_id: TokenId) -> Result<(), NftError> {
        check_one_yocto()?;

        let owner_id = env::predecessor_account_id();
        let mut token = self.owned_token(&token_id, &owner_id, "revoke approvals")?;
        refund_approvals(&owner_id, token.approved_account_ids.keys());
        token.approved_account_ids.clear();
        self.tokens.insert(token_id, token);
        Ok(())
    }

    pub fn nft_is_approved(
        &self,
        token_id: TokenId,
        approved_account_id: AccountId,
        approval_id: Option<u64>,
    ) -> bool {
        let Some(token) = self.tokens.get(&token_id) else {
            return false;
        };
        match (token.approved_account_ids.get(&approved_account_id), approval_id) {
            (Some(actual), Some(expected)) => *actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

impl Contract {
    fn owned_token(
        &self,
        token_id: &str,
        caller: &AccountId,
        action: &str,
    ) -> Result<TokenRecord, NftError> {
        let token = self
            .tokens
            .get(token_id)
            .ok_or_else(NftError::token_not_found)?;
        if &token.owner_id != caller {
            return Err(NftError::Unauthorized(format!(
                "Only token owner can {}",
                action
            )));
        }
        Ok(token.clone())
    }
}
