use crate::guards::{check_one_yocto, refund_approvals};
use crate::*;

#[near]
impl Contract {
    /// Owner, or an approved account (with matching `approval_id` when given).
    #[payable]
    #[handle_result]
    pub fn nft_transfer(
        &mut self,
        receiver_id: AccountId,
        token_id: TokenId,
        approval_id: Option<u64>,
        memo: Option<String>,
    ) -> Result<(), NftError> {
        check_one_yocto()?;
        let sender_id = env::predecessor_account_id();
        self.internal_transfer(&sender_id, &receiver_id, &token_id, approval_id, memo)
    }
}

impl Contract {
    pub(crate) fn internal_transfer(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        token_id: &str,
        approval_id: Option<u64>,
        memo: Option<String>,
    ) -> Result<(), NftError> {
        let mut token = self
            .tokens
            .get(token_id)
            .ok_or_else(NftError::token_not_found)?
            .clone();

        if receiver_id == &token.owner_id {
            return Err(NftError::InvalidInput(
                "Receiver is already the token owner".into(),
            ));
        }

        let authorized_id = if sender_id != &token.owner_id {
            let actual_approval_id = token
                .approved_account_ids
                .get(sender_id)
                .ok_or_else(|| NftError::Unauthorized("Sender not approved".into()))?;
            if let Some(expected) = approval_id {
                if expected != *actual_approval_id {
                    return Err(NftError::Unauthorized("Invalid approval ID".into()));
                }
            }
            Some(sender_id)
        } else {
            None
        };

        let old_owner_id = token.owner_id.clone();
        self.remove_token_from_owner(&old_owner_id, token_id);

        refund_approvals(&old_owner_id, token.approved_account_ids.keys());
        token.owner_id = receiver_id.clone();
        token.approved_account_ids.clear();
        self.tokens.insert(token_id.to_string(), token);
        self.add_token_to_owner(receiver_id, token_id);

        events::emit_transfer(
            &old_owner_id,
            receiver_id,
            token_id,
            authorized_id,
            memo.as_deref(),
        );
        Ok(())
    }
}
