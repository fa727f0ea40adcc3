pub mod ledger;
pub mod reseller;
pub mod withdrawal;
