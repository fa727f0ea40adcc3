//! HTTP Handlers

use std::sync::Arc;

use auth::{AdminUser, CurrentUser};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::{AddressId, TeamId, UserId};
use platform::validation::ValidatedJson;

use crate::application::config::AccountConfig;
use crate::application::{
    AddressBookUseCase, AdminUsersUseCase, ChangePasswordUseCase, ProfileUseCase, TeamUseCase,
};
use crate::domain::repository::{AddressRepository, ProfileRepository, TeamRepository};
use crate::error::AccountResult;
use crate::presentation::dto::*;

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/v1/user/me
pub async fn get_me<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let profile = ProfileUseCase::new(state.repo.clone())
        .get(&user.user_id)
        .await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// PATCH /api/v1/user/me
pub async fn update_me<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let profile = ProfileUseCase::new(state.repo.clone())
        .update(&user.user_id, req.full_name, req.phone)
        .await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// POST /api/v1/user/me/password
pub async fn change_password<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    ChangePasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&user.user_id, req.current_password, req.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Addresses
// ============================================================================

fn address_book<R>(state: &AccountAppState<R>) -> AddressBookUseCase<R>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    AddressBookUseCase::new(state.repo.clone(), state.config.clone())
}

/// GET /api/v1/user/addresses
pub async fn list_addresses<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let addresses = address_book(&state).list(&user.user_id).await?;
    Ok(Json(
        addresses
            .into_iter()
            .map(AddressResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// POST /api/v1/user/addresses
pub async fn create_address<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<AddressRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let (draft, make_default) = req.into_draft();
    let address = address_book(&state)
        .create(&user.user_id, draft, make_default)
        .await?;
    Ok((StatusCode::CREATED, Json(AddressResponse::from(address))))
}

/// PUT /api/v1/user/addresses/{id}
pub async fn update_address<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    Path(address_id): Path<AddressId>,
    ValidatedJson(req): ValidatedJson<AddressRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let (draft, _) = req.into_draft();
    let address = address_book(&state)
        .update(&user.user_id, &address_id, draft)
        .await?;
    Ok(Json(AddressResponse::from(address)))
}

/// DELETE /api/v1/user/addresses/{id}
pub async fn delete_address<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    Path(address_id): Path<AddressId>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    address_book(&state)
        .delete(&user.user_id, &address_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/user/addresses/{id}/default
pub async fn set_default_address<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    Path(address_id): Path<AddressId>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let address = address_book(&state)
        .set_default(&user.user_id, &address_id)
        .await?;
    Ok(Json(AddressResponse::from(address)))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/v1/user?page&perPage&q
pub async fn list_users<R>(
    State(state): State<AccountAppState<R>>,
    _admin: AdminUser,
    Query(query): Query<UserListQuery>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let page = AdminUsersUseCase::new(state.repo.clone())
        .list(query.q.as_deref(), &query.page_params())
        .await?;
    Ok(Json(page.map(ProfileResponse::from)))
}

/// PATCH /api/v1/user/{id}/role
pub async fn change_role<R>(
    State(state): State<AccountAppState<R>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<UserId>,
    ValidatedJson(req): ValidatedJson<ChangeRoleRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let profile = AdminUsersUseCase::new(state.repo.clone())
        .change_role(&admin.user_id, &user_id, req.role.trim())
        .await?;
    Ok(Json(ProfileResponse::from(profile)))
}

// ============================================================================
// Teams
// ============================================================================

/// POST /api/v1/user/teams
pub async fn create_team<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateTeamRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let membership = TeamUseCase::new(state.repo.clone())
        .create(&user.user_id, req.name, req.slug)
        .await?;
    Ok((StatusCode::CREATED, Json(TeamResponse::from(membership))))
}

/// GET /api/v1/user/teams
pub async fn list_teams<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let teams = TeamUseCase::new(state.repo.clone())
        .list_mine(&user.user_id)
        .await?;
    Ok(Json(
        teams.into_iter().map(TeamResponse::from).collect::<Vec<_>>(),
    ))
}

/// GET /api/v1/user/teams/{id}/members
pub async fn list_members<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    Path(team_id): Path<TeamId>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let members = TeamUseCase::new(state.repo.clone())
        .members(&user, &team_id)
        .await?;
    Ok(Json(
        members
            .into_iter()
            .map(MemberResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// POST /api/v1/user/teams/{id}/members
pub async fn add_member<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    Path(team_id): Path<TeamId>,
    ValidatedJson(req): ValidatedJson<AddMemberRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let member = TeamUseCase::new(state.repo.clone())
        .add_member(&user, &team_id, &req.email, req.role)
        .await?;
    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

/// PATCH /api/v1/user/teams/{id}/members/{userId}
pub async fn change_member_role<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    Path((team_id, member_id)): Path<(TeamId, UserId)>,
    ValidatedJson(req): ValidatedJson<MemberRoleRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    TeamUseCase::new(state.repo.clone())
        .change_member_role(&user, &team_id, &member_id, req.role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/user/teams/{id}/members/{userId}
pub async fn remove_member<R>(
    State(state): State<AccountAppState<R>>,
    user: CurrentUser,
    Path((team_id, member_id)): Path<(TeamId, UserId)>,
) -> AccountResult<impl IntoResponse>
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    TeamUseCase::new(state.repo.clone())
        .remove_member(&user, &team_id, &member_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
