use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Ledger row kind, stored as its text code in `reseller_transactions.kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[display("commission")]
    Commission,
    #[display("withdrawal")]
    Withdrawal,
    #[display("withdrawal_refund")]
    WithdrawalRefund,
}

impl TransactionKind {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            TransactionKind::Commission => "commission",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::WithdrawalRefund => "withdrawal_refund",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "commission" => Some(TransactionKind::Commission),
            "withdrawal" => Some(TransactionKind::Withdrawal),
            "withdrawal_refund" => Some(TransactionKind::WithdrawalRefund),
            _ => None,
        }
    }
}
