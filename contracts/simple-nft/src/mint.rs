use crate::guards::hash_account_id;
use crate::*;

#[near]
impl Contract {
    /// Contract owner only. Returns the new token id.
    #[handle_result]
    pub fn mint(&mut self, recipient_id: AccountId) -> Result<TokenId, NftError> {
        self.check_contract_owner(&env::predecessor_account_id())?;

        let token_id = self.internal_mint(&recipient_id);
        events::emit_mint(&recipient_id, std::slice::from_ref(&token_id));
        Ok(token_id)
    }
}

impl Contract {
    pub(crate) fn internal_mint(&mut self, owner_id: &AccountId) -> TokenId {
        self.last_token_id += 1;
        let token_id = self.last_token_id.to_string();

        self.tokens.insert(
            token_id.clone(),
            TokenRecord {
                owner_id: owner_id.clone(),
                approved_account_ids: Default::default(),
            },
        );
        self.add_token_to_owner(owner_id, &token_id);
        token_id
    }

    pub(crate) fn add_token_to_owner(&mut self, owner_id: &AccountId, token_id: &str) {
        let mut owned = self.tokens_per_owner.remove(owner_id).unwrap_or_else(|| {
            IterableSet::new(StorageKey::TokensPerOwnerInner {
                account_id_hash: hash_account_id(owner_id),
            })
        });
        owned.insert(token_id.to_string());
        self.tokens_per_owner.insert(owner_id.clone(), owned);
    }

    pub(crate) fn remove_token_from_owner(&mut self, owner_id: &AccountId, token_id: &str) {
        if let Some(mut owned) = self.tokens_per_owner.remove(owner_id) {
            owned.remove(token_id);
            if !owned.is_empty() {
                self.tokens_per_owner.insert(owner_id.clone(), owned);
            }
        }
    }
}
