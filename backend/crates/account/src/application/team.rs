//! Team Use Case

use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::{TeamId, UserId};

use crate::domain::entity::team::{Team, TeamMember, TeamMembership, ensure_can_change};
use crate::domain::repository::{ProfileRepository, TeamRepository};
use crate::domain::value_object::team_role::TeamRole;
use crate::error::{AccountError, AccountResult};

pub struct TeamUseCase<R>
where
    R: TeamRepository + ProfileRepository,
{
    repo: Arc<R>,
}

impl<R> TeamUseCase<R>
where
    R: TeamRepository + ProfileRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        owner: &UserId,
        name: String,
        slug: String,
    ) -> AccountResult<TeamMembership> {
        let team = Team::new(name, slug);
        self.repo.create_team(&team, owner).await?;

        tracing::info!(team_id = %team.team_id, slug = %team.slug, owner = %owner, "Team created");

        Ok(TeamMembership {
            team,
            role: TeamRole::Owner,
        })
    }

    pub async fn list_mine(&self, user_id: &UserId) -> AccountResult<Vec<TeamMembership>> {
        self.repo.teams_of(user_id).await
    }

    /// Members are visible to any member of the team and to global admins
    pub async fn members(
        &self,
        actor: &CurrentUser,
        team_id: &TeamId,
    ) -> AccountResult<Vec<TeamMember>> {
        self.actor_role(actor, team_id).await?;
        self.repo.list_members(team_id).await
    }

    pub async fn add_member(
        &self,
        actor: &CurrentUser,
        team_id: &TeamId,
        email: &str,
        role: TeamRole,
    ) -> AccountResult<TeamMember> {
        let actor_role = self.actor_role(actor, team_id).await?;
        ensure_can_change(actor_role, None, Some(role))?;

        let email = email.trim().to_lowercase();
        let profile = self
            .repo
            .find_profile_by_email(&email)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        self.repo.add_member(team_id, &profile.user_id, role).await?;

        tracing::info!(
            team_id = %team_id,
            user_id = %profile.user_id,
            role = %role,
            "Team member added"
        );

        Ok(TeamMember {
            team_id: *team_id,
            user_id: profile.user_id,
            email: profile.email,
            full_name: profile.full_name,
            team_role: role,
        })
    }

    pub async fn change_member_role(
        &self,
        actor: &CurrentUser,
        team_id: &TeamId,
        user_id: &UserId,
        role: TeamRole,
    ) -> AccountResult<()> {
        let actor_role = self.actor_role(actor, team_id).await?;
        let current = self
            .repo
            .member_role(team_id, user_id)
            .await?
            .ok_or(AccountError::MemberNotFound)?;
        ensure_can_change(actor_role, Some(current), Some(role))?;

        self.repo.set_member_role(team_id, user_id, role).await?;
        tracing::info!(team_id = %team_id, user_id = %user_id, role = %role, "Team role changed");
        Ok(())
    }

    pub async fn remove_member(
        &self,
        actor: &CurrentUser,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> AccountResult<()> {
        let actor_role = self.actor_role(actor, team_id).await?;
        let current = self
            .repo
            .member_role(team_id, user_id)
            .await?
            .ok_or(AccountError::MemberNotFound)?;

        // Leaving a team needs no management rights
        if &actor.user_id != user_id {
            ensure_can_change(actor_role, Some(current), None)?;
        }

        self.repo.remove_member(team_id, user_id).await?;
        tracing::info!(team_id = %team_id, user_id = %user_id, "Team member removed");
        Ok(())
    }

    /// Caller's role in the team. Global admins act as owners.
    /// Non-members get `TeamNotFound` so team ids do not leak.
    async fn actor_role(&self, actor: &CurrentUser, team_id: &TeamId) -> AccountResult<TeamRole> {
        if actor.is_admin() {
            return if self.repo.team_exists(team_id).await? {
                Ok(TeamRole::Owner)
            } else {
                Err(AccountError::TeamNotFound)
            };
        }

        self.repo
            .member_role(team_id, &actor.user_id)
            .await?
            .ok_or(AccountError::TeamNotFound)
    }
}
