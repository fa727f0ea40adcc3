use chrono::{DateTime, Utc};
use kernel::id::{ResellerId, WithdrawalId};
use rust_decimal::Decimal;

use crate::domain::value_object::withdrawal_status::WithdrawalStatus;
use crate::error::{ResellerError, ResellerResult};

/// Payout destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub withdrawal_id: WithdrawalId,
    pub reseller_id: ResellerId,
    pub amount: Decimal,
    pub bank: BankAccount,
    pub status: WithdrawalStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Admin decision on a pending withdrawal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject { note: String },
}

impl Withdrawal {
    pub fn new(reseller_id: ResellerId, amount: Decimal, bank: BankAccount) -> Self {
        Self {
            withdrawal_id: WithdrawalId::new(),
            reseller_id,
            amount,
            bank,
            status: WithdrawalStatus::Pending,
            note: None,
            created_at: Utc::now(),
            reviewed_at: None,
        }
    }

    /// Pending only. Returns the amount to refund, if any.
    pub fn review(&mut self, decision: ReviewDecision) -> ResellerResult<Option<Decimal>> {
        if self.status != WithdrawalStatus::Pending {
            return Err(ResellerError::NotPending);
        }
        self.reviewed_at = Some(Utc::now());
        match decision {
            ReviewDecision::Approve => {
                self.status = WithdrawalStatus::Approved;
                Ok(None)
            }
            ReviewDecision::Reject { note } => {
                self.status = WithdrawalStatus::Rejected;
                self.note = Some(note);
                Ok(Some(self.amount))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn withdrawal() -> Withdrawal {
        Withdrawal::new(
            ResellerId::new(),
            Decimal::new(75_000, 0),
            BankAccount {
                bank_name: "BCA".into(),
                account_number: "1234567890".into(),
                account_holder: "Sari".into(),
            },
        )
    }

    #[test]
    fn test_approve_once() {
        let mut w = withdrawal();
        assert_eq!(w.review(ReviewDecision::Approve).unwrap(), None);
        assert_eq!(w.status, WithdrawalStatus::Approved);
        assert!(w.reviewed_at.is_some());
        assert!(matches!(
            w.review(ReviewDecision::Approve),
            Err(ResellerError::NotPending)
        ));
    }

    #[test]
    fn test_reject_refunds() {
        let mut w = withdrawal();
        let refund = w
            .review(ReviewDecision::Reject {
                note: "Account name mismatch".into(),
            })
            .unwrap();
        assert_eq!(refund, Some(Decimal::new(75_000, 0)));
        assert_eq!(w.status, WithdrawalStatus::Rejected);
        assert_eq!(w.note.as_deref(), Some("Account name mismatch"));
    }
}
