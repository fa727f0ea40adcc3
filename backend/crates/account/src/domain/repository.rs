//! Repository Traits

use auth::UserRole;
use auth::domain::value_object::user_password::UserPassword;
use kernel::id::{AddressId, TeamId, UserId};
use kernel::pagination::{Page, PageParams};

use crate::domain::entity::address::Address;
use crate::domain::entity::profile::Profile;
use crate::domain::entity::team::{Team, TeamMember, TeamMembership};
use crate::domain::value_object::team_role::TeamRole;
use crate::error::AccountResult;

#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    async fn find_profile(&self, user_id: &UserId) -> AccountResult<Option<Profile>>;

    async fn find_profile_by_email(&self, email: &str) -> AccountResult<Option<Profile>>;

    /// Persist name and phone
    async fn save_profile(&self, profile: &Profile) -> AccountResult<()>;

    async fn password_hash(&self, user_id: &UserId) -> AccountResult<Option<UserPassword>>;

    async fn update_password(&self, user_id: &UserId, hash: &UserPassword) -> AccountResult<()>;

    /// Newest first; `query` matches email or name, case-insensitive
    async fn list_profiles(
        &self,
        query: Option<&str>,
        params: &PageParams,
    ) -> AccountResult<Page<Profile>>;

    /// Returns `false` when the user does not exist
    async fn update_role(&self, user_id: &UserId, role: UserRole) -> AccountResult<bool>;
}

/// Address book. Every mutation keeps at most one default per user.
#[trait_variant::make(AddressRepository: Send)]
pub trait LocalAddressRepository {
    /// Default first, then newest first
    async fn list_addresses(&self, user_id: &UserId) -> AccountResult<Vec<Address>>;

    async fn find_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
    ) -> AccountResult<Option<Address>>;

    /// Insert; the stored default flag follows `Address::becomes_default`
    async fn insert_address(&self, address: &Address, make_default: bool)
    -> AccountResult<Address>;

    /// Update the editable fields; `false` when not found
    async fn update_address(&self, address: &Address) -> AccountResult<bool>;

    /// Delete and promote a successor if the default was removed; `false` when not found
    async fn delete_address(&self, user_id: &UserId, address_id: &AddressId)
    -> AccountResult<bool>;

    /// Make the address the only default; `false` when not found
    async fn set_default_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
    ) -> AccountResult<bool>;
}

#[trait_variant::make(TeamRepository: Send)]
pub trait LocalTeamRepository {
    /// Insert the team with `owner` as its first owner. Duplicate slug: `SlugTaken`.
    async fn create_team(&self, team: &Team, owner: &UserId) -> AccountResult<()>;

    async fn teams_of(&self, user_id: &UserId) -> AccountResult<Vec<TeamMembership>>;

    async fn member_role(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> AccountResult<Option<TeamRole>>;

    async fn team_exists(&self, team_id: &TeamId) -> AccountResult<bool>;

    async fn list_members(&self, team_id: &TeamId) -> AccountResult<Vec<TeamMember>>;

    /// Duplicate membership: `AlreadyMember`
    async fn add_member(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
        role: TeamRole,
    ) -> AccountResult<()>;

    /// Serialized per team; `LastOwner` when the team would lose its last owner
    async fn set_member_role(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
        role: TeamRole,
    ) -> AccountResult<()>;

    /// Serialized per team; `LastOwner` when the team would lose its last owner
    async fn remove_member(&self, team_id: &TeamId, user_id: &UserId) -> AccountResult<()>;
}
