//! Application Layer

pub mod commission;
pub mod config;
pub mod profile;
pub mod withdrawal;

pub use commission::CommissionUseCase;
pub use config::ResellerConfig;
pub use profile::{RegisterResellerUseCase, ResellerProfileUseCase};
pub use withdrawal::{WithdrawalInput, WithdrawalUseCase};
