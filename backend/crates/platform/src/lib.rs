//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, constant-time compare)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management and client identification
//! - Signed auth / checkout tokens (JWT)
//! - Request body validation
//! - Rate limiting infrastructure (Redis and in-memory stores)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod jwt;
pub mod password;
pub mod rate_limit;
pub mod validation;
