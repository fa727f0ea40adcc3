use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{CommerceError, CommerceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EWalletChannel {
    #[display("OVO")]
    Ovo,
    #[display("DANA")]
    Dana,
    #[display("SHOPEEPAY")]
    ShopeePay,
    #[display("LINKAJA")]
    LinkAja,
}

/// How the buyer pays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PaymentMethod {
    /// Tokenized card from the provider's client library
    Card { token_id: String },
    #[serde(rename = "ewallet")]
    EWallet {
        channel: EWalletChannel,
        mobile_number: Option<String>,
    },
}

impl PaymentMethod {
    /// Text stored in `orders.payment_method`
    pub fn code(&self) -> String {
        match self {
            PaymentMethod::Card { .. } => "card".to_string(),
            PaymentMethod::EWallet { channel, .. } => channel.to_string().to_lowercase(),
        }
    }

    pub fn validate(&self) -> CommerceResult<()> {
        match self {
            PaymentMethod::Card { token_id } if token_id.trim().is_empty() => Err(
                CommerceError::Validation("Card token is required".to_string()),
            ),
            PaymentMethod::EWallet {
                channel: EWalletChannel::Ovo,
                mobile_number,
            } => match mobile_number.as_deref().map(str::trim) {
                Some(number) if platform::validation::validate_phone(number).is_ok() => Ok(()),
                _ => Err(CommerceError::Validation(
                    "OVO payments need a valid mobile number".to_string(),
                )),
            },
            _ => Ok(()),
        }
    }
}

/// Provider-side payment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[display("PENDING")]
    Pending,
    #[display("SUCCEEDED")]
    Succeeded,
    #[display("FAILED")]
    Failed,
    #[display("EXPIRED")]
    Expired,
}

impl PaymentStatus {
    /// Order status this payment outcome moves the order to
    pub fn order_status(&self) -> Option<OrderStatus> {
        match self {
            PaymentStatus::Pending => None,
            PaymentStatus::Succeeded => Some(OrderStatus::Paid),
            PaymentStatus::Failed => Some(OrderStatus::Cancelled),
            PaymentStatus::Expired => Some(OrderStatus::Expired),
        }
    }
}
