use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Order lifecycle, stored as its text code in `orders.status`
///
/// ```text
/// pending_payment -> paid | cancelled | expired
/// paid            -> processing | refunded
/// processing      -> shipped | refunded
/// shipped         -> delivered
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    #[display("pending_payment")]
    PendingPayment,
    #[display("paid")]
    Paid,
    #[display("processing")]
    Processing,
    #[display("shipped")]
    Shipped,
    #[display("delivered")]
    Delivered,
    #[display("cancelled")]
    Cancelled,
    #[display("expired")]
    Expired,
    #[display("refunded")]
    Refunded,
}

impl OrderStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "pending_payment",
            OrderStatus::Paid => "paid",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Expired => "expired",
            OrderStatus::Refunded => "refunded",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending_payment" => Some(OrderStatus::PendingPayment),
            "paid" => Some(OrderStatus::Paid),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            "expired" => Some(OrderStatus::Expired),
            "refunded" => Some(OrderStatus::Refunded),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (PendingPayment, Paid | Cancelled | Expired)
                | (Paid, Processing | Refunded)
                | (Processing, Shipped | Refunded)
                | (Shipped, Delivered)
        )
    }

    /// Payment received and not refunded; a referred order owes commission
    pub fn earns_commission(&self) -> bool {
        matches!(
            self,
            OrderStatus::Paid
                | OrderStatus::Processing
                | OrderStatus::Shipped
                | OrderStatus::Delivered
        )
    }

    /// Entering this status puts the items back in stock
    pub fn restocks(&self) -> bool {
        matches!(
            self,
            OrderStatus::Cancelled | OrderStatus::Expired | OrderStatus::Refunded
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered
                | OrderStatus::Cancelled
                | OrderStatus::Expired
                | OrderStatus::Refunded
        )
    }

    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::PendingPayment,
        OrderStatus::Paid,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Expired,
        OrderStatus::Refunded,
    ];
}
