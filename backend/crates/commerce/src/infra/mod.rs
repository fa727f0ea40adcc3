//! Infrastructure Layer

pub mod payment;
pub mod postgres;
pub mod referral;

pub use payment::{HttpPaymentGateway, PaymentGatewayConfig};
pub use postgres::PgCommerceRepository;
pub use referral::ResellerReferralProgram;
