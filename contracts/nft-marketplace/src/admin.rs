use crate::guards::check_one_yocto;
use crate::*;

#[near]
impl Contract {
    /// Owner only. Returns the new fee.
    #[payable]
    #[handle_result]
    pub fn set_marketplace_fee(&mut self, fee_bps: u16) -> Result<u16, MarketplaceError> {
        check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        if fee_bps > MAX_MARKETPLACE_FEE_BPS {
            return Err(MarketplaceError::InvalidInput(format!(
                "Marketplace fee cannot exceed {} bps",
                MAX_MARKETPLACE_FEE_BPS
            )));
        }
        let old_fee_bps = self.marketplace_fee_bps;
        self.marketplace_fee_bps = fee_bps;
        events::emit_fee_updated(&self.owner_id, old_fee_bps, fee_bps);
        Ok(fee_bps)
    }

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn set_fee_recipient(&mut self, fee_recipient: AccountId) -> Result<(), MarketplaceError> {
        check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        let old = std::mem::replace(&mut self.fee_recipient, fee_recipient);
        events::emit_fee_recipient_changed(&self.owner_id, &old, &self.fee_recipient);
        Ok(())
    }

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<(), MarketplaceError> {
        check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        if new_owner == self.owner_id {
            return Err(MarketplaceError::InvalidInput(
                "New owner must differ from current owner".to_string(),
            ));
        }
        let old_owner = std::mem::replace(&mut self.owner_id, new_owner);
        events::emit_owner_transferred(&old_owner, &self.owner_id);
        Ok(())
    }
}
