pub mod referral_code;
pub mod transaction_kind;
pub mod withdrawal_status;
