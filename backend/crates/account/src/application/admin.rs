//! Admin User Management Use Case

use std::sync::Arc;

use auth::UserRole;
use kernel::id::UserId;
use kernel::pagination::{Page, PageParams};

use crate::domain::entity::profile::Profile;
use crate::domain::repository::ProfileRepository;
use crate::error::{AccountError, AccountResult};

pub struct AdminUsersUseCase<R>
where
    R: ProfileRepository,
{
    repo: Arc<R>,
}

impl<R> AdminUsersUseCase<R>
where
    R: ProfileRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        query: Option<&str>,
        params: &PageParams,
    ) -> AccountResult<Page<Profile>> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        self.repo.list_profiles(query, params).await
    }

    /// Change a user's global role. The new role applies from their next login.
    pub async fn change_role(
        &self,
        actor: &UserId,
        target: &UserId,
        role_code: &str,
    ) -> AccountResult<Profile> {
        let role = UserRole::from_code(role_code)
            .ok_or_else(|| AccountError::InvalidRole(role_code.to_string()))?;

        if actor == target && !role.is_admin() {
            return Err(AccountError::SelfDemotion);
        }

        if !self.repo.update_role(target, role).await? {
            return Err(AccountError::UserNotFound);
        }

        tracing::info!(actor = %actor, target = %target, role = %role, "User role changed");

        self.repo
            .find_profile(target)
            .await?
            .ok_or(AccountError::UserNotFound)
    }
}
