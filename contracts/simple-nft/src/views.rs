use crate::*;

#[near]
impl Contract {
    pub fn get_owner(&self, token_id: TokenId) -> Option<AccountId> {
        self.tokens.get(&token_id).map(|t| t.owner_id.clone())
    }

    pub fn get_last_token_id(&self) -> u64 {
        self.last_token_id
    }

    pub fn nft_token(&self, token_id: TokenId) -> Option<Token> {
        self.tokens.get(&token_id).map(|record| Token {
            token_id: token_id.clone(),
            owner_id: record.owner_id.clone(),
            approved_account_ids: record.approved_account_ids.clone(),
        })
    }

    pub fn nft_metadata(&self) -> NftContractMetadata {
        self.metadata.clone()
    }

    pub fn nft_total_supply(&self) -> U128 {
        U128(self.tokens.len() as u128)
    }

    pub fn nft_supply_for_owner(&self, account_id: AccountId) -> U128 {
        U128(
            self.tokens_per_owner
                .get(&account_id)
                .map_or(0, |owned| owned.len() as u128),
        )
    }

    pub fn nft_tokens(&self, from_index: Option<U128>, limit: Option<u32>) -> Vec<Token> {
        let (start, limit) = page_bounds(from_index, limit);
        self.tokens
            .keys()
            .skip(start)
            .take(limit)
            .filter_map(|id| self.nft_token(id.clone()))
            .collect()
    }

    pub fn nft_tokens_for_owner(
        &self,
        account_id: AccountId,
        from_index: Option<U128>,
        limit: Option<u32>,
    ) -> Vec<Token> {
        let Some(owned) = self.tokens_per_owner.get(&account_id) else {
            return vec![];
        };
        let (start, limit) = page_bounds(from_index, limit);
        owned
            .iter()
            .skip(start)
            .take(limit)
            .filter_map(|id| self.nft_token(id.clone()))
            .collect()
    }
}

fn page_bounds(from_index: Option<U128>, limit: Option<u32>) -> (usize, usize) {
    let start = from_index.map_or(0, |i| i.0 as usize);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT) as usize;
    (start, limit)
}
