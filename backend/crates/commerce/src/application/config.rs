//! Application Configuration

use platform::crypto::constant_time_eq;
use rust_decimal::Decimal;

use crate::domain::entity::order::ShippingPolicy;

/// Commerce application configuration
#[derive(Debug, Clone)]
pub struct CommerceConfig {
    pub shipping: ShippingPolicy,
    /// ISO 4217 code sent to the payment provider
    pub currency: String,
    /// Shared secret the provider sends in `x-callback-token`
    pub callback_token: String,
    /// Upper bound on a single cart line
    pub max_line_quantity: i32,
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            shipping: ShippingPolicy {
                flat_fee: Decimal::new(15_000, 0),
                free_threshold: Decimal::new(500_000, 0),
            },
            currency: "IDR".to_string(),
            callback_token: String::new(),
            max_line_quantity: 99,
        }
    }
}

impl CommerceConfig {
    pub fn development() -> Self {
        Self {
            callback_token: "dev-callback-token".to_string(),
            ..Default::default()
        }
    }

    pub fn with_callback_token(mut self, callback_token: impl Into<String>) -> Self {
        self.callback_token = callback_token.into();
        self
    }

    /// An unset token rejects every webhook
    pub fn accepts_callback_token(&self, presented: &str) -> bool {
        !self.callback_token.is_empty()
            && constant_time_eq(self.callback_token.as_bytes(), presented.as_bytes())
    }
}
