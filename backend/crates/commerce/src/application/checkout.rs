//! Checkout: cart -> order -> payment intent

use std::sync::Arc;

use auth::CartOwner;
use chrono::Utc;
use kernel::id::{AddressId, ResellerId};

use crate::application::config::CommerceConfig;
use crate::domain::entity::order::{Order, OrderDraft, ShippingAddress};
use crate::domain::port::{PaymentGateway, PaymentRequest, ReferralProgram};
use crate::domain::repository::{AddressBook, OrderRepository};
use crate::domain::value_object::order_code::OrderCode;
use crate::domain::value_object::order_status::OrderStatus;
use crate::domain::value_object::payment::PaymentMethod;
use crate::error::{CommerceError, CommerceResult};

#[derive(Debug, Clone)]
pub enum AddressChoice {
    Saved(AddressId),
    Inline(ShippingAddress),
}

#[derive(Debug, Clone)]
pub struct CheckoutInput {
    pub address: AddressChoice,
    pub email: Option<String>,
    pub payment_method: PaymentMethod,
    pub reseller_code: Option<String>,
}

pub struct CheckoutUseCase<R, G, P>
where
    R: OrderRepository + AddressBook,
    G: PaymentGateway,
    P: ReferralProgram,
{
    repo: Arc<R>,
    gateway: Arc<G>,
    referrals: Arc<P>,
    config: Arc<CommerceConfig>,
}

impl<R, G, P> CheckoutUseCase<R, G, P>
where
    R: OrderRepository + AddressBook,
    G: PaymentGateway,
    P: ReferralProgram,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>, referrals: Arc<P>, config: Arc<CommerceConfig>) -> Self {
        Self {
            repo,
            gateway,
            referrals,
            config,
        }
    }

    pub async fn execute(&self, owner: CartOwner, input: CheckoutInput) -> CommerceResult<Order> {
        input.payment_method.validate()?;

        let guest_email = match owner {
            CartOwner::User(_) => None,
            CartOwner::Guest(_) => Some(
                input
                    .email
                    .as_deref()
                    .map(|e| e.trim().to_lowercase())
                    .filter(|e| !e.is_empty())
                    .ok_or_else(|| {
                        CommerceError::Validation("Guests must provide an email".to_string())
                    })?,
            ),
        };
        let shipping = self.shipping_address(&owner, input.address).await?;
        let reseller_id = self
            .referrer(&owner, input.reseller_code.as_deref())
            .await?;

        let draft = OrderDraft {
            order_code: OrderCode::generate(Utc::now()),
            owner,
            guest_email: guest_email.clone(),
            reseller_id,
            shipping,
            payment_method: input.payment_method.code(),
            policy: self.config.shipping,
        };
        let mut order = self.repo.place_order(draft).await?;

        tracing::info!(
            order_code = %order.order_code,
            total = %order.total,
            items = order.items.len(),
            "Order placed"
        );

        let request = PaymentRequest {
            reference_id: order.order_code.clone(),
            amount: order.total,
            currency: self.config.currency.clone(),
            method: input.payment_method,
            customer_email: guest_email.or(input.email),
            description: format!("Order {}", order.order_code),
        };

        let intent = match self.gateway.create_payment(&request).await {
            Ok(intent) => intent,
            Err(e) => {
                tracing::warn!(
                    order_code = %order.order_code,
                    error = %e,
                    "Payment creation failed, cancelling order"
                );
                self.abandon(&order).await;
                return Err(match e {
                    CommerceError::PaymentGateway(_) => e,
                    other => CommerceError::PaymentGateway(other.to_string()),
                });
            }
        };

        if let Err(e) = self
            .repo
            .attach_payment(&order, &intent.reference, intent.action_url.as_deref())
            .await
        {
            tracing::error!(
                order_code = %order.order_code,
                payment_id = %intent.reference,
                error = %e,
                "Could not record payment, cancelling order"
            );
            self.abandon(&order).await;
            return Err(e);
        }

        order.payment_reference = Some(intent.reference);
        order.payment_action_url = intent.action_url;
        Ok(order)
    }

    /// Cancel an order whose payment never got attached, releasing its stock
    async fn abandon(&self, order: &Order) {
        if let Err(e) = self
            .repo
            .change_status(&order.order_code, OrderStatus::Cancelled, None, true)
            .await
        {
            tracing::error!(
                order_code = %order.order_code,
                error = %e,
                "Failed to cancel unpaid order"
            );
        }
    }

    async fn shipping_address(
        &self,
        owner: &CartOwner,
        choice: AddressChoice,
    ) -> CommerceResult<ShippingAddress> {
        match (owner, choice) {
            (_, AddressChoice::Inline(address)) => Ok(address),
            (CartOwner::User(user_id), AddressChoice::Saved(address_id)) => self
                .repo
                .find_address(user_id, &address_id)
                .await?
                .ok_or(CommerceError::AddressNotFound),
            (CartOwner::Guest(_), AddressChoice::Saved(_)) => Err(CommerceError::Validation(
                "Guests must provide a shipping address".to_string(),
            )),
        }
    }

    /// Blank codes are ignored; unknown codes and self-referrals are rejected
    async fn referrer(
        &self,
        owner: &CartOwner,
        code: Option<&str>,
    ) -> CommerceResult<Option<ResellerId>> {
        let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(None);
        };
        let referrer = self
            .referrals
            .referrer_for_code(code)
            .await?
            .ok_or(CommerceError::InvalidReferralCode)?;
        if owner.user_id() == Some(referrer.user_id) {
            return Err(CommerceError::InvalidReferralCode);
        }
        Ok(Some(referrer.reseller_id))
    }
}
