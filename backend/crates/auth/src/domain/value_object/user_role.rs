use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Global role, stored as its text code in `users.user_role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    #[display("customer")]
    Customer,
    #[display("reseller")]
    Reseller,
    #[display("admin")]
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Customer, UserRole::Reseller, UserRole::Admin];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Customer => "customer",
            Reseller => "reseller",
            Admin => "admin",
        }
    }

    /// `None` for unknown codes; callers decide whether that is a 400 or a 401
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "customer" => Some(Customer),
            "reseller" => Some(Reseller),
            "admin" => Some(Admin),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    #[inline]
    pub const fn is_reseller(&self) -> bool {
        matches!(self, UserRole::Reseller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("customer"), Some(UserRole::Customer));
        assert_eq!(UserRole::from_code("reseller"), Some(UserRole::Reseller));
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("super_admin"), None);
        assert_eq!(UserRole::from_code("Admin"), None);
    }

    #[test]
    fn test_user_role_display_matches_code() {
        for role in UserRole::ALL {
            assert_eq!(role.to_string(), role.code());
            assert_eq!(UserRole::from_code(role.code()), Some(role));
        }
    }

    #[test]
    fn test_user_role_serde() {
        assert_eq!(serde_json::to_string(&UserRole::Reseller).unwrap(), "\"reseller\"");
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert!(role.is_admin());
    }
}
