//! Domain Layer

pub mod entity;
pub mod port;
pub mod repository;
pub mod value_object;

pub use entity::cart::{CartItem, CartLine, CartView, SizeStock, capped_quantity, merge_lines};
pub use entity::order::{
    Order, OrderDraft, OrderItem, ShippingAddress, ShippingPolicy, StatusChange,
};
pub use port::{PaymentGateway, PaymentIntent, PaymentRequest, ReferralProgram, Referrer};
pub use repository::{AddressBook, CartRepository, OrderRepository};
pub use value_object::order_code::OrderCode;
pub use value_object::order_status::OrderStatus;
pub use value_object::payment::{EWalletChannel, PaymentMethod, PaymentStatus};
