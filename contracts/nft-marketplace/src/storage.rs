//! Prepaid listing storage. Every active listing locks `STORAGE_PER_LISTING` of its seller's
//! balance; the rest can be withdrawn.

use crate::fees::transfer_if_positive;
use crate::guards::check_one_yocto;
use crate::*;

#[near]
impl Contract {
    /// Credits the attached deposit to `account_id` (the caller by default).
    #[payable]
    #[handle_result]
    pub fn storage_deposit(&mut self, account_id: Option<AccountId>) -> Result<U128, MarketplaceError> {
        let account_id = account_id.unwrap_or_else(env::predecessor_account_id);
        let deposit = env::attached_deposit().as_yoctonear();
        if deposit == 0 {
            return Err(MarketplaceError::InsufficientDeposit(
                "Requires attached deposit of at least 1 yoctoNEAR".into(),
            ));
        }

        let new_balance = self.internal_storage_balance_of(&account_id) + deposit;
        self.storage_deposits.insert(account_id.clone(), new_balance);
        events::emit_storage_deposit(&account_id, deposit, new_balance);
        Ok(U128(new_balance))
    }

    /// Withdraws everything not locked by active listings. Returns the amount sent.
    #[payable]
    #[handle_result]
    pub fn storage_withdraw(&mut self) -> Result<U128, MarketplaceError> {
        check_one_yocto()?;
        let account_id = env::predecessor_account_id();
        let balance = self.internal_storage_balance_of(&account_id);
        let locked = self.storage_locked(&account_id);
        let available = balance.saturating_sub(locked);
        if available == 0 {
            return Err(MarketplaceError::InvalidState(
                "No storage available to withdraw".into(),
            ));
        }

        let new_balance = balance - available;
        if new_balance == 0 {
            self.storage_deposits.remove(&account_id);
        } else {
            self.storage_deposits.insert(account_id.clone(), new_balance);
        }
        transfer_if_positive(&account_id, available);
        events::emit_storage_withdraw(&account_id, available, new_balance);
        Ok(U128(available))
    }

    pub fn storage_balance_of(&self, account_id: AccountId) -> U128 {
        U128(self.internal_storage_balance_of(&account_id))
    }

    /// Balance not locked by active listings.
    pub fn storage_available(&self, account_id: AccountId) -> U128 {
        U128(
            self.internal_storage_balance_of(&account_id)
                .saturating_sub(self.storage_locked(&account_id)),
        )
    }

    /// Deposit needed for one listing.
    pub fn storage_minimum_balance(&self) -> U128 {
        U128(STORAGE_PER_LISTING)
    }
}

impl Contract {
    pub(crate) fn internal_storage_balance_of(&self, account_id: &AccountId) -> u128 {
        self.storage_deposits.get(account_id).copied().unwrap_or(0)
    }

    pub(crate) fn listing_count_of(&self, seller_id: &AccountId) -> u32 {
        self.by_seller_id
            .get(seller_id)
            .map(|listings| listings.len())
            .unwrap_or(0)
    }

    fn storage_locked(&self, account_id: &AccountId) -> u128 {
        u128::from(self.listing_count_of(account_id)) * STORAGE_PER_LISTING
    }

    /// Fails unless `seller_id` has prepaid storage for its listings including `listing_id`.
    /// Replacing the seller's own listing under the same id needs no extra deposit.
    pub(crate) fn check_listing_storage(
        &self,
        seller_id: &AccountId,
        listing_id: &str,
    ) -> Result<(), MarketplaceError> {
        let replaces_own = matches!(
            self.listings.get(listing_id),
            Some(existing) if &existing.seller_id == seller_id
        );
        let listings_after = self.listing_count_of(seller_id) + u32::from(!replaces_own);
        let required = u128::from(listings_after) * STORAGE_PER_LISTING;
        let balance = self.internal_storage_balance_of(seller_id);
        if balance < required {
            return Err(MarketplaceError::InsufficientDeposit(format!(
                "Storage deposit of {} yoctoNEAR needed for {} listings, balance is {}. Call storage_deposit first",
                required, listings_after, balance
            )));
        }
        Ok(())
    }
}
