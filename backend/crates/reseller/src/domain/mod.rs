//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::ledger::LedgerEntry;
pub use entity::reseller::{Reseller, apply_debit};
pub use entity::withdrawal::{BankAccount, ReviewDecision, Withdrawal};
pub use repository::{ResellerRepository, WithdrawalRepository};
pub use value_object::referral_code::ReferralCode;
pub use value_object::transaction_kind::TransactionKind;
pub use value_object::withdrawal_status::WithdrawalStatus;
