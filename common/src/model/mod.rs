pub mod ledger;
pub mod soldier;
pub mod verdict;
pub mod violation;
