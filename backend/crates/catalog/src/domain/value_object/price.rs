use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Largest value a `NUMERIC(14,2)` column holds
const MAX_PRICE: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Positive money amount with at most two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: Decimal) -> CatalogResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(CatalogError::Validation(
                "Price must be greater than zero".to_string(),
            ));
        }
        if amount.normalize().scale() > 2 {
            return Err(CatalogError::Validation(
                "Price must have at most two decimal places".to_string(),
            ));
        }
        if amount > MAX_PRICE {
            return Err(CatalogError::Validation("Price is too large".to_string()));
        }
        Ok(Self(amount))
    }

    /// Values read back from the database already passed `new`
    pub fn from_db(amount: Decimal) -> Self {
        Self(amount)
    }

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_price_accepts_positive_two_places() {
        assert_eq!(Price::new(dec("149000.50")).unwrap().amount(), dec("149000.50"));
        assert!(Price::new(dec("0.01")).is_ok());
        assert!(Price::new(dec("10.500")).is_ok());
    }

    #[test]
    fn test_price_rejects_zero_negative_and_fractions() {
        assert!(Price::new(Decimal::ZERO).is_err());
        assert!(Price::new(dec("-5")).is_err());
        assert!(Price::new(dec("1.005")).is_err());
    }

    #[test]
    fn test_price_upper_bound() {
        assert!(Price::new(dec("999999999999.99")).is_ok());
        assert!(Price::new(dec("1000000000000")).is_err());
    }
}
