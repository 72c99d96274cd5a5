//! Buying a listed token.

use crate::external::*;
use crate::fees::transfer_if_positive;
use crate::internal::*;
use crate::*;

#[near]
impl Contract {
    /// Attach at least the listing price. The excess is refunded once the transfer settles.
    #[payable]
    #[handle_result]
    pub fn buy_nft(
        &mut self,
        nft_contract_id: AccountId,
        token_id: String,
        seller_id: AccountId,
    ) -> Result<Promise, MarketplaceError> {
        let buyer_id = env::predecessor_account_id();
        let listing_id = make_listing_id(&nft_contract_id, &token_id);
        let listing = match self.listings.get(&listing_id) {
            Some(listing) if listing.seller_id == seller_id => listing.clone(),
            _ => return Err(MarketplaceError::listing_not_found()),
        };
        if buyer_id == listing.seller_id {
            return Err(MarketplaceError::InvalidInput(
                "Seller cannot buy their own listing".into(),
            ));
        }
        let deposit = env::attached_deposit().as_yoctonear();
        if deposit < listing.price.0 {
            return Err(MarketplaceError::InsufficientDeposit(format!(
                "Attached {} yoctoNEAR, price is {}",
                deposit, listing.price.0
            )));
        }

        // Removed up front so a second buyer cannot race the pending transfer.
        self.internal_remove_listing(&nft_contract_id, &token_id);

        Ok(ext_nft::ext(nft_contract_id)
            .with_attached_deposit(ONE_YOCTO)
            .with_static_gas(Gas::from_tgas(NFT_TRANSFER_GAS))
            .nft_transfer(
                buyer_id.clone(),
                token_id,
                Some(listing.approval_id),
                Some(format!("Sold on {}", env::current_account_id())),
            )
            .then(
                ext_self::ext(env::current_account_id())
                    .with_static_gas(Gas::from_tgas(RESOLVE_PURCHASE_GAS))
                    .resolve_purchase(buyer_id, listing, U128(deposit)),
            ))
    }

    /// Must not panic: the buyer's deposit is either paid out or refunded here.
    #[private]
    pub fn resolve_purchase(&mut self, buyer_id: AccountId, listing: Listing, deposit: U128) -> bool {
        if env::promise_result_checked(0, 64).is_err() {
            transfer_if_positive(&buyer_id, deposit.0);
            events::emit_purchase_failed(&buyer_id, &listing, "nft_transfer failed");
            return false;
        }

        self.internal_settle_purchase(&buyer_id, &listing, deposit.0);
        true
    }
}

impl Contract {
    /// Pays out a sale whose token transfer succeeded and records it in the stats.
    pub(crate) fn internal_settle_purchase(
        &mut self,
        buyer_id: &AccountId,
        listing: &Listing,
        deposit: u128,
    ) -> FeeBreakdown {
        let price = listing.price.0;
        // Fee and royalty are each capped at 10%, so the split cannot fail.
        let split = compute_fee_breakdown(price, self.marketplace_fee_bps, listing.royalty_bps)
            .unwrap_or(FeeBreakdown {
                marketplace_fee: U128(0),
                royalty_amount: U128(0),
                seller_amount: U128(price),
            });

        self.distribute_sale_proceeds(listing, &split);
        transfer_if_positive(buyer_id, deposit.saturating_sub(price));

        self.total_volume = self.total_volume.saturating_add(price);
        self.total_sales += 1;

        events::emit_purchase(buyer_id, listing, &split);
        split
    }
}
