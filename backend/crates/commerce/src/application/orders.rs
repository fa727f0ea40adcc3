//! Order queries, tracking and status changes

use std::sync::Arc;

use auth::{CartOwner, CurrentUser};
use kernel::id::UserId;
use kernel::pagination::{Page, PageParams};

use crate::domain::entity::order::{Order, StatusChange};
use crate::domain::port::ReferralProgram;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::order_code::OrderCode;
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{CommerceError, CommerceResult};

pub struct OrderUseCase<R, P>
where
    R: OrderRepository,
    P: ReferralProgram,
{
    repo: Arc<R>,
    referrals: Arc<P>,
}

impl<R, P> OrderUseCase<R, P>
where
    R: OrderRepository,
    P: ReferralProgram,
{
    pub fn new(repo: Arc<R>, referrals: Arc<P>) -> Self {
        Self { repo, referrals }
    }

    pub async fn mine(&self, user_id: &UserId, params: &PageParams) -> CommerceResult<Page<Order>> {
        self.repo.orders_of(user_id, params).await
    }

    /// Owner or admin; anyone else gets `OrderNotFound`
    pub async fn detail(&self, user: &CurrentUser, code: &str) -> CommerceResult<Order> {
        let order = self.find(code).await?;
        if user.is_admin() || order.user_id == Some(user.user_id) {
            Ok(order)
        } else {
            Err(CommerceError::OrderNotFound)
        }
    }

    /// Order visible to the cart owner (user or guest session)
    pub async fn owned(&self, owner: &CartOwner, code: &str) -> CommerceResult<Order> {
        let order = self.find(code).await?;
        if order.belongs_to(owner) {
            Ok(order)
        } else {
            Err(CommerceError::OrderNotFound)
        }
    }

    /// Public tracking; a wrong email looks like a missing order
    pub async fn track(&self, code: &str, email: &str) -> CommerceResult<Order> {
        self.repo
            .find_for_tracking(&OrderCode::normalize(code), email.trim())
            .await?
            .ok_or(CommerceError::OrderNotFound)
    }

    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        params: &PageParams,
    ) -> CommerceResult<Page<Order>> {
        self.repo.list_orders(status, params).await
    }

    /// Admin status change
    pub async fn set_status(
        &self,
        code: &str,
        next: OrderStatus,
        tracking_number: Option<String>,
    ) -> CommerceResult<Order> {
        let (order, change) = self
            .repo
            .change_status(&OrderCode::normalize(code), next, tracking_number, false)
            .await?;
        settle(self.referrals.as_ref(), &order, change).await?;
        Ok(order)
    }

    /// Cancellation by the buyer before payment
    pub async fn cancel(&self, owner: &CartOwner, code: &str) -> CommerceResult<Order> {
        let order = self.owned(owner, code).await?;
        if order.status != OrderStatus::PendingPayment {
            return Err(CommerceError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Cancelled,
            });
        }
        let (order, change) = self
            .repo
            .change_status(&order.order_code, OrderStatus::Cancelled, None, false)
            .await?;
        settle(self.referrals.as_ref(), &order, change).await?;
        Ok(order)
    }

    async fn find(&self, code: &str) -> CommerceResult<Order> {
        self.repo
            .find_by_code(&OrderCode::normalize(code))
            .await?
            .ok_or(CommerceError::OrderNotFound)
    }
}

/// Follow-up after a committed status change.
///
/// A paid referred order is credited on every pass, replays included.
/// Credits are idempotent per order. A failed credit returns
/// `CommissionPending`, and the next webhook or status change retries it.
pub(crate) async fn settle<P>(referrals: &P, order: &Order, change: StatusChange) -> CommerceResult<()>
where
    P: ReferralProgram,
{
    match change {
        StatusChange::Unchanged => {
            tracing::debug!(order_code = %order.order_code, status = %order.status, "Status unchanged");
        }
        StatusChange::Applied { restock } => {
            tracing::info!(
                order_code = %order.order_code,
                status = %order.status,
                restocked = restock,
                "Order status changed"
            );
        }
    }

    if !order.status.earns_commission() {
        return Ok(());
    }
    let Some(reseller_id) = order.reseller_id else {
        return Ok(());
    };
    referrals
        .credit_commission(&reseller_id, &order.order_id, order.subtotal)
        .await
        .map_err(|e| {
            tracing::error!(
                order_code = %order.order_code,
                reseller_id = %reseller_id,
                error = %e,
                "Commission credit failed"
            );
            CommerceError::CommissionPending {
                order_code: order.order_code.clone(),
            }
        })
}
