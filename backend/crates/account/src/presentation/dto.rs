//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::pagination::PageParams;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entity::address::{Address, AddressDraft};
use crate::domain::entity::profile::Profile;
use crate::domain::entity::team::{TeamMember, TeamMembership};
use crate::domain::value_object::team_role::TeamRole;

/// Phone, or an empty string to clear it
fn validate_phone_or_empty(phone: &str) -> Result<(), validator::ValidationError> {
    if phone.is_empty() {
        Ok(())
    } else {
        platform::validation::validate_phone(phone)
    }
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            user_id: p.user_id.to_string(),
            email: p.email,
            full_name: p.full_name,
            phone: p.phone,
            role: p.user_role.code().to_string(),
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 120))]
    pub full_name: Option<String>,
    #[validate(custom(function = "validate_phone_or_empty"))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, max = 256))]
    pub current_password: String,
    #[validate(length(min = 1, max = 256))]
    pub new_password: String,
}

// ============================================================================
// Addresses
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 120))]
    pub recipient: String,
    #[validate(custom(function = "platform::validation::validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1, max = 255))]
    pub line1: String,
    #[validate(length(max = 255))]
    pub line2: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[validate(length(min = 1, max = 120))]
    pub province: String,
    #[validate(length(min = 3, max = 10))]
    pub postal_code: String,
    /// Only honoured on create
    #[serde(default)]
    pub is_default: bool,
}

impl AddressRequest {
    pub fn into_draft(self) -> (AddressDraft, bool) {
        (
            AddressDraft {
                recipient: self.recipient,
                phone: self.phone,
                line1: self.line1,
                line2: self.line2,
                city: self.city,
                province: self.province,
                postal_code: self.postal_code,
            },
            self.is_default,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub address_id: String,
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

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        Self {
            address_id: a.address_id.to_string(),
            recipient: a.recipient,
            phone: a.phone,
            line1: a.line1,
            line2: a.line2,
            city: a.city,
            province: a.province,
            postal_code: a.postal_code,
            is_default: a.is_default,
            created_at: a.created_at,
        }
    }
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub q: Option<String>,
}

impl UserListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleRequest {
    #[validate(length(min = 1, max = 32))]
    pub role: String,
}

// ============================================================================
// Teams
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(
        length(min = 1, max = 64),
        custom(function = "platform::validation::validate_slug")
    )]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub team_id: String,
    pub name: String,
    pub slug: String,
    pub role: TeamRole,
    pub created_at: DateTime<Utc>,
}

impl From<TeamMembership> for TeamResponse {
    fn from(m: TeamMembership) -> Self {
        Self {
            team_id: m.team.team_id.to_string(),
            name: m.team.name,
            slug: m.team.slug,
            role: m.role,
            created_at: m.team.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[validate(email)]
    pub email: String,
    pub role: TeamRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberRoleRequest {
    pub role: TeamRole,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub role: TeamRole,
}

impl From<TeamMember> for MemberResponse {
    fn from(m: TeamMember) -> Self {
        Self {
            user_id: m.user_id.to_string(),
            email: m.email,
            full_name: m.full_name,
            role: m.team_role,
        }
    }
}
