//! User Entity
//!
//! Credentials and global role. Profile editing lives in the account crate.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, user_password::UserPassword, user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, lowercased
    pub email: Email,
    pub password_hash: UserPassword,
    pub full_name: String,
    pub phone: Option<String>,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New customer account
    pub fn new(
        email: Email,
        password_hash: UserPassword,
        full_name: String,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            full_name,
            phone,
            user_role: UserRole::Customer,
            created_at: now,
            updated_at: now,
        }
    }
}
