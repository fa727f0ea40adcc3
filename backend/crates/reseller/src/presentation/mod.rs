//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ResellerAppState;
pub use router::{
    reseller_router, reseller_router_generic, withdraw_router, withdraw_router_generic,
};
