
// --- Unit Tests ---
pub mod unit {
    pub mod approval_test;
    pub mod mint_test;
    pub mod transfer_test;
}
