pub mod marketplace;
pub mod utils;
