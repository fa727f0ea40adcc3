use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ResellerId, ResellerTransactionId, WithdrawalId};
use rust_decimal::Decimal;

use crate::domain::value_object::transaction_kind::TransactionKind;

/// One balance movement. Debits carry a negative `amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub transaction_id: ResellerTransactionId,
    pub reseller_id: ResellerId,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub order_id: Option<OrderId>,
    pub withdrawal_id: Option<WithdrawalId>,
    pub balance_after: Decimal,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    fn new(reseller_id: ResellerId, kind: TransactionKind, amount: Decimal, balance_after: Decimal) -> Self {
        Self {
            transaction_id: ResellerTransactionId::new(),
            reseller_id,
            kind,
            amount,
            order_id: None,
            withdrawal_id: None,
            balance_after,
            created_at: Utc::now(),
        }
    }

    pub fn commission(
        reseller_id: ResellerId,
        order_id: OrderId,
        amount: Decimal,
        balance_after: Decimal,
    ) -> Self {
        Self {
            order_id: Some(order_id),
            ..Self::new(reseller_id, TransactionKind::Commission, amount, balance_after)
        }
    }

    pub fn withdrawal(
        reseller_id: ResellerId,
        withdrawal_id: WithdrawalId,
        amount: Decimal,
        balance_after: Decimal,
    ) -> Self {
        Self {
            withdrawal_id: Some(withdrawal_id),
            ..Self::new(reseller_id, TransactionKind::Withdrawal, -amount, balance_after)
        }
    }

    pub fn refund(
        reseller_id: ResellerId,
        withdrawal_id: WithdrawalId,
        amount: Decimal,
        balance_after: Decimal,
    ) -> Self {
        Self {
            withdrawal_id: Some(withdrawal_id),
            ..Self::new(reseller_id, TransactionKind::WithdrawalRefund, amount, balance_after)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdrawal_is_negative() {
        let entry = LedgerEntry::withdrawal(
            ResellerId::new(),
            WithdrawalId::new(),
            Decimal::new(50_000, 0),
            Decimal::new(10_000, 0),
        );
        assert_eq!(entry.amount, Decimal::new(-50_000, 0));
        assert_eq!(entry.kind, TransactionKind::Withdrawal);
        assert!(entry.order_id.is_none());
    }
}
