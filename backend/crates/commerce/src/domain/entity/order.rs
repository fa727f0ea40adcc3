use auth::CartOwner;
use chrono::{DateTime, Utc};
use kernel::id::{GuestSessionId, OrderId, ResellerId, SizeId, TeamId, UserId, VariantId};
use rust_decimal::Decimal;

use crate::domain::entity::cart::CartLine;
use crate::domain::value_object::order_code::OrderCode;
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{CommerceError, CommerceResult};

/// Address copied onto the order at checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub recipient: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub province: String,
    pub postal_code: String,
}

/// Flat shipping fee, waived at or above a subtotal threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    pub flat_fee: Decimal,
    pub free_threshold: Decimal,
}

impl ShippingPolicy {
    pub fn fee_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_threshold {
            Decimal::ZERO
        } else {
            self.flat_fee
        }
    }
}

/// Price and names snapshotted at checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub team_id: TeamId,
    pub variant_id: VariantId,
    pub size_id: SizeId,
    pub product_name: String,
    pub variant_name: String,
    pub size_label: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub order_code: String,
    pub user_id: Option<UserId>,
    pub guest_session_id: Option<GuestSessionId>,
    pub guest_email: Option<String>,
    pub reseller_id: Option<ResellerId>,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub total: Decimal,
    pub shipping: ShippingAddress,
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub payment_action_url: Option<String>,
    pub tracking_number: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Outcome of a status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Applied { restock: bool },
    /// Order was already in the requested status
    Unchanged,
}

impl Order {
    pub fn belongs_to(&self, owner: &CartOwner) -> bool {
        match owner {
            CartOwner::User(user_id) => self.user_id == Some(*user_id),
            CartOwner::Guest(session) => self.guest_session_id == Some(*session),
        }
    }

    /// Move to `next` following the status machine.
    ///
    /// `tolerate_same` turns a repeat of the current status into
    /// `StatusChange::Unchanged` instead of a conflict.
    pub fn change_status(
        &mut self,
        next: OrderStatus,
        tracking_number: Option<String>,
        tolerate_same: bool,
    ) -> CommerceResult<StatusChange> {
        if tolerate_same && self.status == next {
            return Ok(StatusChange::Unchanged);
        }
        if !self.status.can_transition_to(next) {
            return Err(CommerceError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        let now = Utc::now();
        if next == OrderStatus::Shipped {
            let tracking = tracking_number
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    CommerceError::Validation(
                        "A tracking number is required to ship an order".to_string(),
                    )
                })?;
            self.tracking_number = Some(tracking);
        }
        if next == OrderStatus::Paid {
            self.paid_at = Some(now);
        }

        self.status = next;
        self.updated_at = now;
        Ok(StatusChange::Applied {
            restock: next.restocks(),
        })
    }
}

/// Everything checkout knows before the cart is locked
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub order_code: OrderCode,
    pub owner: CartOwner,
    pub guest_email: Option<String>,
    pub reseller_id: Option<ResellerId>,
    pub shipping: ShippingAddress,
    pub payment_method: String,
    pub policy: ShippingPolicy,
}

impl OrderDraft {
    /// Price the locked cart lines into a `pending_payment` order.
    /// Fails on an empty cart or any line short of stock.
    pub fn into_order(self, lines: &[CartLine]) -> CommerceResult<Order> {
        if lines.is_empty() {
            return Err(CommerceError::CartEmpty);
        }
        for line in lines {
            if !line.is_active {
                return Err(CommerceError::OutOfStock {
                    item: line.display_name(),
                });
            }
            if line.stock < line.quantity {
                return Err(CommerceError::InsufficientStock {
                    item: line.display_name(),
                    available: line.stock,
                });
            }
        }

        let items: Vec<OrderItem> = lines
            .iter()
            .map(|l| OrderItem {
                team_id: l.team_id,
                variant_id: l.variant_id,
                size_id: l.size_id,
                product_name: l.product_name.clone(),
                variant_name: l.variant_name.clone(),
                size_label: l.size_label.clone(),
                unit_price: l.unit_price,
                quantity: l.quantity,
            })
            .collect();
        let subtotal: Decimal = items.iter().map(OrderItem::line_total).sum();
        let shipping_fee = self.policy.fee_for(subtotal);
        let now = Utc::now();

        let (user_id, guest_session_id) = match self.owner {
            CartOwner::User(id) => (Some(id), None),
            CartOwner::Guest(session) => (None, Some(session)),
        };

        Ok(Order {
            order_id: OrderId::new(),
            order_code: self.order_code.into_inner(),
            user_id,
            guest_session_id,
            guest_email: self.guest_email,
            reseller_id: self.reseller_id,
            status: OrderStatus::PendingPayment,
            subtotal,
            shipping_fee,
            total: subtotal + shipping_fee,
            shipping: self.shipping,
            payment_method: self.payment_method,
            payment_reference: None,
            payment_action_url: None,
            tracking_number: None,
            items,
            created_at: now,
            updated_at: now,
            paid_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::ProductId;

    fn policy() -> ShippingPolicy {
        ShippingPolicy {
            flat_fee: Decimal::new(15_000, 0),
            free_threshold: Decimal::new(500_000, 0),
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            recipient: "Dewi".into(),
            phone: "081234567890".into(),
            line1: "Jl. Merdeka 10".into(),
            line2: None,
            city: "Bandung".into(),
            province: "Jawa Barat".into(),
            postal_code: "40111".into(),
        }
    }

    fn draft(owner: CartOwner) -> OrderDraft {
        OrderDraft {
            order_code: OrderCode::generate(Utc::now()),
            owner,
            guest_email: None,
            reseller_id: None,
            shipping: address(),
            payment_method: "card".into(),
            policy: policy(),
        }
    }

    fn line(price: i64, quantity: i32, stock: i32) -> CartLine {
        CartLine {
            variant_id: VariantId::new(),
            size_id: SizeId::new(),
            product_id: ProductId::new(),
            team_id: TeamId::new(),
            product_name: "Kain Tenun".into(),
            product_slug: "kain-tenun".into(),
            variant_name: "Merah".into(),
            size_label: "All".into(),
            unit_price: Decimal::new(price, 0),
            quantity,
            stock,
            is_active: true,
        }
    }

    #[test]
    fn test_shipping_threshold() {
        assert_eq!(policy().fee_for(Decimal::new(499_999, 0)), Decimal::new(15_000, 0));
        assert_eq!(policy().fee_for(Decimal::new(500_000, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_into_order_totals() {
        let user_id = UserId::new();
        let order = draft(CartOwner::User(user_id))
            .into_order(&[line(100_000, 2, 5), line(50_000, 1, 1)])
            .unwrap();
        assert_eq!(order.subtotal, Decimal::new(250_000, 0));
        assert_eq!(order.shipping_fee, Decimal::new(15_000, 0));
        assert_eq!(order.total, Decimal::new(265_000, 0));
        assert_eq!(order.status, OrderStatus::PendingPayment);
        assert!(order.belongs_to(&CartOwner::User(user_id)));
        assert!(!order.belongs_to(&CartOwner::Guest(GuestSessionId::new())));
    }

    #[test]
    fn test_into_order_rejects() {
        let owner = CartOwner::Guest(GuestSessionId::new());
        assert!(matches!(
            draft(owner).into_order(&[]),
            Err(CommerceError::CartEmpty)
        ));
        assert!(matches!(
            draft(owner).into_order(&[line(10_000, 3, 2)]),
            Err(CommerceError::InsufficientStock { available: 2, .. })
        ));
    }

    #[test]
    fn test_change_status() {
        let mut order = draft(CartOwner::User(UserId::new()))
            .into_order(&[line(10_000, 1, 1)])
            .unwrap();

        assert_eq!(
            order.change_status(OrderStatus::Paid, None, false).unwrap(),
            StatusChange::Applied { restock: false }
        );
        assert!(order.paid_at.is_some());
        assert_eq!(
            order.change_status(OrderStatus::Paid, None, true).unwrap(),
            StatusChange::Unchanged
        );
        assert!(matches!(
            order.change_status(OrderStatus::Paid, None, false),
            Err(CommerceError::InvalidTransition { .. })
        ));

        order
            .change_status(OrderStatus::Processing, None, false)
            .unwrap();
        assert!(matches!(
            order.change_status(OrderStatus::Shipped, Some("  ".into()), false),
            Err(CommerceError::Validation(_))
        ));
        order
            .change_status(OrderStatus::Shipped, Some("JNE123".into()), false)
            .unwrap();
        assert_eq!(order.tracking_number.as_deref(), Some("JNE123"));
        assert!(matches!(
            order.change_status(OrderStatus::Refunded, None, false),
            Err(CommerceError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_cancel_restocks() {
        let mut order = draft(CartOwner::User(UserId::new()))
            .into_order(&[line(10_000, 1, 1)])
            .unwrap();
        assert_eq!(
            order
                .change_status(OrderStatus::Cancelled, None, false)
                .unwrap(),
            StatusChange::Applied { restock: true }
        );
    }
}
