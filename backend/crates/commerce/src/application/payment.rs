//! Payment webhook and payment status

use std::sync::Arc;

use crate::application::config::CommerceConfig;
use crate::application::orders::settle;
use crate::domain::entity::order::Order;
use crate::domain::port::ReferralProgram;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::payment::PaymentStatus;
use crate::error::{CommerceError, CommerceResult};

/// Provider callback after the shared token has been read from the headers
#[derive(Debug, Clone)]
pub struct PaymentCallback {
    /// Our order code
    pub reference_id: String,
    /// Provider payment id
    pub payment_id: String,
    pub status: PaymentStatus,
}

pub struct PaymentWebhookUseCase<R, P>
where
    R: OrderRepository,
    P: ReferralProgram,
{
    repo: Arc<R>,
    referrals: Arc<P>,
    config: Arc<CommerceConfig>,
}

impl<R, P> PaymentWebhookUseCase<R, P>
where
    R: OrderRepository,
    P: ReferralProgram,
{
    pub fn new(repo: Arc<R>, referrals: Arc<P>, config: Arc<CommerceConfig>) -> Self {
        Self {
            repo,
            referrals,
            config,
        }
    }

    /// Apply a provider callback. Replays of an applied outcome succeed
    /// and only retry an outstanding commission credit.
    pub async fn handle(
        &self,
        callback_token: Option<&str>,
        callback: PaymentCallback,
    ) -> CommerceResult<Order> {
        let accepted = callback_token.is_some_and(|t| self.config.accepts_callback_token(t));
        if !accepted {
            return Err(CommerceError::InvalidCallbackToken);
        }

        let order = self
            .repo
            .find_by_code(&callback.reference_id)
            .await?
            .ok_or(CommerceError::OrderNotFound)?;

        let same_payment = order
            .payment_reference
            .as_deref()
            .is_none_or(|r| r == callback.payment_id);
        if !same_payment {
            tracing::warn!(
                order_code = %order.order_code,
                payment_id = %callback.payment_id,
                "Webhook for a payment this order does not reference"
            );
            return Err(CommerceError::OrderNotFound);
        }

        let Some(next) = callback.status.order_status() else {
            tracing::debug!(order_code = %order.order_code, "Payment still pending");
            return Ok(order);
        };

        let (order, change) = self
            .repo
            .change_status(&order.order_code, next, None, true)
            .await?;
        settle(self.referrals.as_ref(), &order, change).await?;
        Ok(order)
    }
}
