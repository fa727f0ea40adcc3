pub mod order_code;
pub mod order_status;
pub mod payment;
