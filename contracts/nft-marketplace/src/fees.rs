//! Sale price split and payment routing.

use crate::*;
use primitive_types::U256;

fn bps_of(amount: u128, bps: u16) -> u128 {
    (U256::from(amount) * U256::from(bps) / U256::from(BASIS_POINTS)).as_u128()
}

/// Floor-rounded split: `fee = price * fee_bps / 10_000`, `royalty = price * royalty_bps / 10_000`,
/// seller receives the rest. Fails if the two shares exceed 100%.
pub fn compute_fee_breakdown(
    price: u128,
    fee_bps: u16,
    royalty_bps: u16,
) -> Result<FeeBreakdown, MarketplaceError> {
    if fee_bps as u32 + royalty_bps as u32 > BASIS_POINTS as u32 {
        return Err(MarketplaceError::InvalidInput(
            "Fee and royalty exceed 100%".into(),
        ));
    }
    let marketplace_fee = bps_of(price, fee_bps);
    let royalty_amount = bps_of(price, royalty_bps);
    let seller_amount = price
        .checked_sub(marketplace_fee + royalty_amount)
        .ok_or_else(|| MarketplaceError::InternalError("Fee split underflow".into()))?;
    Ok(FeeBreakdown {
        marketplace_fee: U128(marketplace_fee),
        royalty_amount: U128(royalty_amount),
        seller_amount: U128(seller_amount),
    })
}

#[near]
impl Contract {
    /// Split of `price` at the current marketplace fee, with an optional royalty.
    #[handle_result]
    pub fn calculate_fees(
        &self,
        price: U128,
        royalty_bps: Option<u16>,
    ) -> Result<FeeBreakdown, MarketplaceError> {
        compute_fee_breakdown(price.0, self.marketplace_fee_bps, royalty_bps.unwrap_or(0))
    }
}

impl Contract {
    /// Pays out a completed sale. A royalty share with no recipient goes to the seller.
    pub(crate) fn distribute_sale_proceeds(
        &self,
        listing: &Listing,
        split: &FeeBreakdown,
    ) {
        transfer_if_positive(&self.fee_recipient, split.marketplace_fee.0);

        match &listing.royalty_recipient {
            Some(recipient) => {
                transfer_if_positive(recipient, split.royalty_amount.0);
                transfer_if_positive(&listing.seller_id, split.seller_amount.0);
            }
            None => transfer_if_positive(
                &listing.seller_id,
                split.seller_amount.0 + split.royalty_amount.0,
            ),
        }
    }
}

pub(crate) fn transfer_if_positive(receiver: &AccountId, amount: u128) {
    if amount > 0 {
        let _ = Promise::new(receiver.clone()).transfer(NearToken::from_yoctonear(amount));
    }
}
