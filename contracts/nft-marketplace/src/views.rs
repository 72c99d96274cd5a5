use crate::internal::make_listing_id;
use crate::*;

#[near]
impl Contract {
    pub fn get_marketplace_fee(&self) -> u16 {
        self.marketplace_fee_bps
    }

    pub fn get_total_volume(&self) -> U128 {
        U128(self.total_volume)
    }

    pub fn get_total_sales(&self) -> u64 {
        self.total_sales
    }

    pub fn get_listing(&self, nft_contract_id: AccountId, token_id: String) -> Option<Listing> {
        self.listings
            .get(&make_listing_id(&nft_contract_id, &token_id))
            .cloned()
    }

    pub fn get_listings(&self, from_index: Option<u32>, limit: Option<u32>) -> Vec<Listing> {
        let (start, limit) = page_bounds(from_index, limit);
        self.listings
            .values()
            .skip(start)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn get_listings_by_seller(
        &self,
        seller_id: AccountId,
        from_index: Option<u32>,
        limit: Option<u32>,
    ) -> Vec<Listing> {
        let Some(ids) = self.by_seller_id.get(&seller_id) else {
            return Vec::new();
        };
        let (start, limit) = page_bounds(from_index, limit);
        ids.iter()
            .skip(start)
            .take(limit)
            .filter_map(|id| self.listings.get(id).cloned())
            .collect()
    }

    pub fn get_listing_count(&self) -> u32 {
        self.listings.len()
    }

    pub fn get_stats(&self) -> MarketplaceStats {
        MarketplaceStats {
            total_volume: U128(self.total_volume),
            total_sales: self.total_sales,
            marketplace_fee_bps: self.marketplace_fee_bps,
            active_listings: self.listings.len(),
        }
    }

    pub fn get_owner(&self) -> AccountId {
        self.owner_id.clone()
    }

    pub fn get_fee_recipient(&self) -> AccountId {
        self.fee_recipient.clone()
    }

    pub fn get_version(&self) -> String {
        self.version.clone()
    }
}

fn page_bounds(from_index: Option<u32>, limit: Option<u32>) -> (usize, usize) {
    let start = from_index.unwrap_or(0) as usize;
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT) as usize;
    (start, limit)
}
