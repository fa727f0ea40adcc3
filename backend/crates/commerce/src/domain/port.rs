//! Outbound ports

use kernel::id::{OrderId, ResellerId, UserId};
use rust_decimal::Decimal;

use crate::domain::value_object::payment::{PaymentMethod, PaymentStatus};
use crate::error::CommerceResult;

/// Payment intent to create at the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Our order code, echoed back by webhooks as `referenceId`
    pub reference_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub method: PaymentMethod,
    pub customer_email: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Provider-side payment id
    pub reference: String,
    pub status: PaymentStatus,
    /// Redirect or deeplink for e-wallet / 3DS approval
    pub action_url: Option<String>,
}

#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    async fn create_payment(&self, request: &PaymentRequest) -> CommerceResult<PaymentIntent>;
}

/// Reseller behind a referral code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Referrer {
    pub reseller_id: ResellerId,
    pub user_id: UserId,
}

/// Referral codes and commission (implemented over the reseller context)
#[trait_variant::make(ReferralProgram: Send)]
pub trait LocalReferralProgram {
    async fn referrer_for_code(&self, code: &str) -> CommerceResult<Option<Referrer>>;

    /// Credit commission for a paid order. Repeats for the same order are no-ops.
    async fn credit_commission(
        &self,
        reseller_id: &ResellerId,
        order_id: &OrderId,
        subtotal: Decimal,
    ) -> CommerceResult<()>;
}
