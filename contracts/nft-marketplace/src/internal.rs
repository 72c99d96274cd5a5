// Internal helpers shared by listing, purchase and views.

use crate::external::NftToken;
use crate::guards::hash_account_id;
use crate::*;

pub(crate) fn make_listing_id(nft_contract_id: &AccountId, token_id: &str) -> String {
    format!("{}{}{}", nft_contract_id, DELIMITER, token_id)
}

/// Checks listing terms and returns the royalty recipient to store
/// (`None` when the royalty is zero).
pub(crate) fn validate_terms(
    token_id: &str,
    price: U128,
    royalty_bps: u16,
    royalty_recipient: Option<AccountId>,
) -> Result<Option<AccountId>, MarketplaceError> {
    if token_id.is_empty() || token_id.len() > MAX_TOKEN_ID_LEN {
        return Err(MarketplaceError::InvalidInput(format!(
            "Token ID must be 1-{} characters",
            MAX_TOKEN_ID_LEN
        )));
    }
    if price.0 == 0 {
        return Err(MarketplaceError::InvalidInput(
            "Price must be greater than 0".into(),
        ));
    }
    if royalty_bps > MAX_ROYALTY_BPS {
        return Err(MarketplaceError::InvalidInput(format!(
            "Royalty cannot exceed {} bps",
            MAX_ROYALTY_BPS
        )));
    }
    if royalty_bps == 0 {
        return Ok(None);
    }
    match royalty_recipient {
        Some(recipient) => Ok(Some(recipient)),
        None => Err(MarketplaceError::InvalidInput(
            "Royalty recipient required when royalty_bps > 0".into(),
        )),
    }
}

impl Contract {
    /// Fails if `seller_id` already listed this token under the same approval. A new
    /// approval id means the token was re-approved, which invalidates the stored one, so
    /// the listing is refreshed instead. A listing left by a previous owner never blocks.
    pub(crate) fn check_not_listed(
        &self,
        listing_id: &str,
        seller_id: &AccountId,
        approval_id: u64,
    ) -> Result<(), MarketplaceError> {
        match self.listings.get(listing_id) {
            Some(existing)
                if &existing.seller_id == seller_id && existing.approval_id == approval_id =>
            {
                Err(MarketplaceError::InvalidState(
                    "Token is already listed".into(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Turns the `nft_token` answer into a listing, or explains why it cannot be listed.
    pub(crate) fn listing_from_token(
        &self,
        request: ListingRequest,
        token: Option<NftToken>,
    ) -> Result<Listing, MarketplaceError> {
        let token = token.ok_or_else(MarketplaceError::token_not_found)?;
        if token.owner_id != request.seller_id {
            return Err(MarketplaceError::Unauthorized(
                "Only the token owner can list it".into(),
            ));
        }
        let marketplace_id = env::current_account_id();
        let approval_id = token
            .approved_account_ids
            .as_ref()
            .and_then(|approvals| approvals.get(&marketplace_id).copied())
            .ok_or_else(|| {
                MarketplaceError::InvalidState(
                    "Marketplace is not approved for this token".into(),
                )
            })?;

        let listing_id = make_listing_id(&request.nft_contract_id, &request.token_id);
        self.check_not_listed(&listing_id, &request.seller_id, approval_id)?;

        Ok(Listing {
            seller_id: request.seller_id,
            nft_contract_id: request.nft_contract_id,
            token_id: request.token_id,
            price: request.price,
            royalty_bps: request.royalty_bps,
            royalty_recipient: request.royalty_recipient,
            approval_id,
            listed_at: env::block_timestamp(),
        })
    }

    /// Stores `listing`, replacing whatever was listed under the same id. Checked against the
    /// seller's storage deposit before anything is written.
    pub(crate) fn internal_add_listing(&mut self, listing: Listing) -> Result<(), MarketplaceError> {
        let listing_id = make_listing_id(&listing.nft_contract_id, &listing.token_id);
        self.check_listing_storage(&listing.seller_id, &listing_id)?;

        if let Some(previous) = self.listings.get(&listing_id).cloned() {
            self.internal_remove_listing(&previous.nft_contract_id, &previous.token_id);
            if previous.seller_id != listing.seller_id {
                events::emit_delist(
                    &previous.seller_id,
                    &previous.nft_contract_id,
                    &previous.token_id,
                );
            }
        }

        self.listings.insert(listing_id.clone(), listing.clone());

        let mut by_seller = self
            .by_seller_id
            .remove(&listing.seller_id)
            .unwrap_or_else(|| {
                IterableSet::new(StorageKey::BySellerIdInner {
                    account_id_hash: hash_account_id(&listing.seller_id),
                })
            });
        by_seller.insert(listing_id);
        self.by_seller_id.insert(listing.seller_id.clone(), by_seller);

        events::emit_list(&listing);
        Ok(())
    }

    pub(crate) fn internal_remove_listing(
        &mut self,
        nft_contract_id: &AccountId,
        token_id: &str,
    ) -> Option<Listing> {
        let listing_id = make_listing_id(nft_contract_id, token_id);
        let listing = self.listings.remove(&listing_id)?;

        if let Some(mut by_seller) = self.by_seller_id.remove(&listing.seller_id) {
            by_seller.remove(&listing_id);
            if !by_seller.is_empty() {
                self.by_seller_id.insert(listing.seller_id.clone(), by_seller);
            }
        }

        Some(listing)
    }

    /// The listing for `(nft_contract_id, token_id)` if it belongs to `seller_id`.
    pub(crate) fn seller_listing(
        &self,
        nft_contract_id: &AccountId,
        token_id: &str,
        seller_id: &AccountId,
    ) -> Result<Listing, MarketplaceError> {
        let listing_id = make_listing_id(nft_contract_id, token_id);
        match self.listings.get(&listing_id) {
            Some(listing) if &listing.seller_id == seller_id => Ok(listing.clone()),
            Some(_) => Err(MarketplaceError::Unauthorized(
                "Only the seller can modify the listing".into(),
            )),
            None => Err(MarketplaceError::listing_not_found()),
        }
    }
}
