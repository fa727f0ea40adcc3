//! Team Entity
//!
//! Teams own products. Membership rules:
//! - owner/admin manage members
//! - only an owner grants `owner` or touches another owner
//! - the last owner can be neither removed nor demoted

use chrono::{DateTime, Utc};
use kernel::id::{TeamId, UserId};

use crate::domain::value_object::team_role::TeamRole;
use crate::error::{AccountError, AccountResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            team_id: TeamId::new(),
            name: name.trim().to_string(),
            slug,
            created_at: Utc::now(),
        }
    }
}

/// A team as seen by one of its members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMembership {
    pub team: Team,
    pub role: TeamRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub team_id: TeamId,
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
    pub team_role: TeamRole,
}

/// Check that `actor` may give `target` the role `next` (`None` = remove)
pub fn ensure_can_change(
    actor: TeamRole,
    target_current: Option<TeamRole>,
    next: Option<TeamRole>,
) -> AccountResult<()> {
    if !actor.can_manage() {
        return Err(AccountError::Forbidden);
    }
    let touches_owner = target_current.is_some_and(|r| r.is_owner())
        || next.is_some_and(|r| r.is_owner());
    if touches_owner && !actor.is_owner() {
        return Err(AccountError::Forbidden);
    }
    Ok(())
}

/// Reject a change that would leave the team without an owner
pub fn ensure_owner_remains(
    owner_count: i64,
    target_current: TeamRole,
    next: Option<TeamRole>,
) -> AccountResult<()> {
    let loses_owner = target_current.is_owner() && !next.is_some_and(|r| r.is_owner());
    if loses_owner && owner_count <= 1 {
        return Err(AccountError::LastOwner);
    }
    Ok(())
}
