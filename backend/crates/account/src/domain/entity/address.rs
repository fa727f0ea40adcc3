//! Address Entity
//!
//! Shipping addresses. A user has at most one default address; the first
//! address saved becomes the default.

use chrono::{DateTime, Utc};
use kernel::id::{AddressId, UserId};

/// Address fields as submitted by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDraft {
    pub recipient: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub province: String,
    pub postal_code: String,
}

impl AddressDraft {
    /// Trim every field and drop an empty second line
    pub fn normalized(self) -> Self {
        Self {
            recipient: self.recipient.trim().to_string(),
            phone: self.phone.trim().to_string(),
            line1: self.line1.trim().to_string(),
            line2: self
                .line2
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
            city: self.city.trim().to_string(),
            province: self.province.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub address_id: AddressId,
    pub user_id: UserId,
    pub recipient: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl Address {
    pub fn new(user_id: UserId, draft: AddressDraft) -> Self {
        let draft = draft.normalized();
        Self {
            address_id: AddressId::new(),
            user_id,
            recipient: draft.recipient,
            phone: draft.phone,
            line1: draft.line1,
            line2: draft.line2,
            city: draft.city,
            province: draft.province,
            postal_code: draft.postal_code,
            is_default: false,
            created_at: Utc::now(),
        }
    }

    /// Replace the editable fields; id, owner and default flag are kept
    pub fn apply(&mut self, draft: AddressDraft) {
        let draft = draft.normalized();
        self.recipient = draft.recipient;
        self.phone = draft.phone;
        self.line1 = draft.line1;
        self.line2 = draft.line2;
        self.city = draft.city;
        self.province = draft.province;
        self.postal_code = draft.postal_code;
    }

    /// Whether a new address becomes the default
    pub fn becomes_default(existing_count: i64, requested: bool) -> bool {
        existing_count == 0 || requested
    }

    /// Address to promote after the default one is deleted: the newest remaining
    pub fn successor(remaining: &[Address]) -> Option<&Address> {
        remaining.iter().max_by_key(|a| a.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft() -> AddressDraft {
        AddressDraft {
            recipient: " Dewi ".to_string(),
            phone: "+62811111111".to_string(),
            line1: "Jl. Merdeka 1".to_string(),
            line2: Some("  ".to_string()),
            city: "Bandung".to_string(),
            province: "Jawa Barat".to_string(),
            postal_code: "40111".to_string(),
        }
    }

    #[test]
    fn test_new_normalizes() {
        let address = Address::new(UserId::new(), draft());
        assert_eq!(address.recipient, "Dewi");
        assert!(address.line2.is_none());
        assert!(!address.is_default);
    }

    #[test]
    fn test_first_address_becomes_default() {
        assert!(Address::becomes_default(0, false));
        assert!(Address::becomes_default(3, true));
        assert!(!Address::becomes_default(3, false));
    }

    #[test]
    fn test_successor_is_newest() {
        let user = UserId::new();
        let mut older = Address::new(user, draft());
        older.created_at -= Duration::days(2);
        let newer = Address::new(user, draft());

        let remaining = vec![older, newer.clone()];
        assert_eq!(
            Address::successor(&remaining).map(|a| a.address_id),
            Some(newer.address_id)
        );
        assert!(Address::successor(&[]).is_none());
    }
}
