//! Profile Entity
//!
//! The editable view of a `users` row. Credentials stay in the auth crate.

use auth::UserRole;
use chrono::{DateTime, Utc};
use kernel::id::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Apply a partial update. Blank names are ignored; an empty phone clears it.
    pub fn apply_update(&mut self, full_name: Option<String>, phone: Option<String>) -> bool {
        let mut changed = false;

        let name = full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty() && *n != self.full_name);
        if let Some(name) = name {
            self.full_name = name;
            changed = true;
        }

        if let Some(phone) = phone {
            let phone = Some(phone.trim().to_string()).filter(|p| !p.is_empty());
            if phone != self.phone {
                self.phone = phone;
                changed = true;
            }
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}
