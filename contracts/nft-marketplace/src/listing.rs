//! Creating, repricing and withdrawing listings.

use crate::external::*;
use crate::guards::check_one_yocto;
use crate::internal::*;
use crate::*;

#[near]
impl Contract {
    /// Lists a token the caller owns and has approved the marketplace for.
    /// Ownership and approval are read from the NFT contract before the listing is stored.
    /// Listing again after re-approving refreshes the stored approval and terms.
    #[payable]
    #[handle_result]
    pub fn list_nft(
        &mut self,
        nft_contract_id: AccountId,
        token_id: String,
        price: U128,
        royalty_bps: Option<u16>,
        royalty_recipient: Option<AccountId>,
    ) -> Result<Promise, MarketplaceError> {
        check_one_yocto()?;
        let seller_id = env::predecessor_account_id();
        let royalty_bps = royalty_bps.unwrap_or(0);
        let royalty_recipient = validate_terms(&token_id, price, royalty_bps, royalty_recipient)?;
        self.check_listing_storage(&seller_id, &make_listing_id(&nft_contract_id, &token_id))?;

        let request = ListingRequest {
            seller_id,
            nft_contract_id: nft_contract_id.clone(),
            token_id: token_id.clone(),
            price,
            royalty_bps,
            royalty_recipient,
        };

        Ok(ext_nft::ext(nft_contract_id)
            .with_static_gas(Gas::from_tgas(NFT_TOKEN_VIEW_GAS))
            .nft_token(token_id)
            .then(
                ext_self::ext(env::current_account_id())
                    .with_static_gas(Gas::from_tgas(RESOLVE_LISTING_GAS))
                    .resolve_listing(request),
            ))
    }

    #[private]
    #[handle_result]
    pub fn resolve_listing(&mut self, request: ListingRequest) -> Result<bool, MarketplaceError> {
        let token = match env::promise_result_checked(0, MAX_TOKEN_VIEW_LEN) {
            Ok(value) => near_sdk::serde_json::from_slice::<Option<NftToken>>(&value).map_err(
                |_| MarketplaceError::InternalError("Could not parse nft_token response".into()),
            )?,
            Err(_) => {
                return Err(MarketplaceError::InternalError(
                    "nft_token call failed".into(),
                ));
            }
        };
        let listing = self.listing_from_token(request, token)?;
        self.internal_add_listing(listing)?;
        Ok(true)
    }

    /// NEP-178 receiver: `nft_approve(token_id, marketplace, msg)` lists in one transaction.
    /// `msg` is `{"price": "<yocto>", "royalty_bps": n, "royalty_recipient": "<account>"}`.
    /// Re-approving a listed token replaces its listing with the new approval and terms.
    #[handle_result]
    pub fn nft_on_approve(
        &mut self,
        token_id: String,
        owner_id: AccountId,
        approval_id: u64,
        msg: String,
    ) -> Result<(), MarketplaceError> {
        let nft_contract_id = env::predecessor_account_id();
        if env::signer_account_id() != owner_id {
            return Err(MarketplaceError::Unauthorized(
                "Approval must be signed by the token owner".into(),
            ));
        }
        let terms: ListingMessage = near_sdk::serde_json::from_str(&msg)
            .map_err(|e| MarketplaceError::InvalidInput(format!("Invalid listing msg: {e}")))?;
        let royalty_recipient =
            validate_terms(&token_id, terms.price, terms.royalty_bps, terms.royalty_recipient)?;
        self.check_not_listed(
            &make_listing_id(&nft_contract_id, &token_id),
            &owner_id,
            approval_id,
        )?;

        self.internal_add_listing(Listing {
            seller_id: owner_id,
            nft_contract_id,
            token_id,
            price: terms.price,
            royalty_bps: terms.royalty_bps,
            royalty_recipient,
            approval_id,
            listed_at: env::block_timestamp(),
        })
    }

    #[payable]
    #[handle_result]
    pub fn cancel_listing(
        &mut self,
        nft_contract_id: AccountId,
        token_id: String,
    ) -> Result<bool, MarketplaceError> {
        check_one_yocto()?;
        let caller = env::predecessor_account_id();
        self.seller_listing(&nft_contract_id, &token_id, &caller)
            .map_err(|e| match e {
                MarketplaceError::Unauthorized(_) => MarketplaceError::Unauthorized(
                    "Only the seller can cancel the listing".into(),
                ),
                other => other,
            })?;

        self.internal_remove_listing(&nft_contract_id, &token_id);
        events::emit_delist(&caller, &nft_contract_id, &token_id);
        Ok(true)
    }

    #[payable]
    #[handle_result]
    pub fn update_price(
        &mut self,
        nft_contract_id: AccountId,
        token_id: String,
        price: U128,
    ) -> Result<(), MarketplaceError> {
        check_one_yocto()?;
        if price.0 == 0 {
            return Err(MarketplaceError::InvalidInput(
                "Price must be greater than 0".into(),
            ));
        }
        let caller = env::predecessor_account_id();
        let mut listing = self.seller_listing(&nft_contract_id, &token_id, &caller)?;
        let old_price = listing.price;
        listing.price = price;

        self.listings
            .insert(make_listing_id(&nft_contract_id, &token_id), listing.clone());
        events::emit_update_price(&listing, old_price);
        Ok(())
    }
}
