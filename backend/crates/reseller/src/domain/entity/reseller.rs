use chrono::{DateTime, Utc};
use kernel::id::{ResellerId, UserId};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::value_object::referral_code::ReferralCode;
use crate::error::{ResellerError, ResellerResult};

/// Reseller profile with its withdrawable balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reseller {
    pub reseller_id: ResellerId,
    pub user_id: UserId,
    pub referral_code: String,
    /// Fraction of the order subtotal, e.g. `0.05`
    pub commission_rate: Decimal,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Reseller {
    pub fn new(user_id: UserId, referral_code: ReferralCode, commission_rate: Decimal) -> Self {
        Self {
            reseller_id: ResellerId::new(),
            user_id,
            referral_code: referral_code.into_inner(),
            commission_rate,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// `round(subtotal * rate, 2)`, half away from zero
    pub fn commission_for(&self, subtotal: Decimal) -> Decimal {
        (subtotal * self.commission_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Balance after taking `amount`; never negative
pub fn apply_debit(balance: Decimal, amount: Decimal) -> ResellerResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(ResellerError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }
    if amount > balance {
        return Err(ResellerError::InsufficientBalance { available: balance });
    }
    Ok(balance - amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_commission_rounding() {
        let reseller = Reseller::new(UserId::new(), ReferralCode::generate(8), dec("0.05"));
        assert_eq!(reseller.commission_for(dec("100000")), dec("5000.00"));
        assert_eq!(reseller.commission_for(dec("10.10")), dec("0.51"));
        assert_eq!(reseller.commission_for(dec("0.10")), dec("0.01"));
        assert_eq!(reseller.commission_for(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(reseller.balance, Decimal::ZERO);
    }

    #[test]
    fn test_apply_debit() {
        assert_eq!(apply_debit(dec("100"), dec("40")).unwrap(), dec("60"));
        assert_eq!(apply_debit(dec("100"), dec("100")).unwrap(), Decimal::ZERO);
        assert!(matches!(
            apply_debit(dec("100"), dec("100.01")),
            Err(ResellerError::InsufficientBalance { .. })
        ));
        assert!(matches!(
            apply_debit(dec("100"), dec("-1")),
            Err(ResellerError::Validation(_))
        ));
    }
}
