//! Application Layer

pub mod cart;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod payment;

pub use cart::{CartMergeService, CartUseCase};
pub use checkout::{AddressChoice, CheckoutInput, CheckoutUseCase};
pub use config::CommerceConfig;
pub use orders::OrderUseCase;
pub use payment::{PaymentCallback, PaymentWebhookUseCase};
