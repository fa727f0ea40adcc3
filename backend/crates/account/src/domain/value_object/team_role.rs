//! Team Role Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Role of a user inside one team
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    #[display("owner")]
    Owner,
    #[display("admin")]
    Admin,
    #[display("member")]
    Member,
}

impl TeamRole {
    pub const ALL: [TeamRole; 3] = [TeamRole::Owner, TeamRole::Admin, TeamRole::Member];

    pub fn code(&self) -> &'static str {
        match self {
            TeamRole::Owner => "owner",
            TeamRole::Admin => "admin",
            TeamRole::Member => "member",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }

    /// May add, remove and re-role members, and edit team products
    pub fn can_manage(&self) -> bool {
        matches!(self, TeamRole::Owner | TeamRole::Admin)
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, TeamRole::Owner)
    }
}
