//! HTTP Handlers

use std::sync::Arc;

use auth::{AdminUser, CurrentUser};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use kernel::id::WithdrawalId;
use platform::cookie::set_cookie_header;
use platform::jwt::TokenService;
use platform::validation::ValidatedJson;

use crate::application::config::ResellerConfig;
use crate::application::{RegisterResellerUseCase, ResellerProfileUseCase, WithdrawalUseCase};
use crate::domain::repository::{ResellerRepository, WithdrawalRepository};
use crate::error::{ResellerError, ResellerResult};
use crate::presentation::dto::*;

/// Shared state for reseller and withdrawal handlers
#[derive(Clone)]
pub struct ResellerAppState<R>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ResellerConfig>,
}

impl<R> ResellerAppState<R>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    fn withdrawals(&self) -> WithdrawalUseCase<R> {
        WithdrawalUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Profile
// ============================================================================

/// POST /api/v1/reseller/register
///
/// Re-issues `auth_token` so the reseller role applies without a new login.
pub async fn register<R>(
    State(state): State<ResellerAppState<R>>,
    Extension(tokens): Extension<Arc<TokenService>>,
    user: CurrentUser,
) -> ResellerResult<impl IntoResponse>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    let reseller = RegisterResellerUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&user)
        .await?;

    let issued = tokens
        .issue_auth_token(user.user_id.into_uuid(), "reseller")
        .map_err(|e| ResellerError::Internal(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        set_cookie_header(&state.config.auth_cookie, &issued.token),
    );

    Ok((
        StatusCode::CREATED,
        headers,
        Json(ResellerResponse::from(reseller)),
    ))
}

/// GET /api/v1/reseller/me
pub async fn me<R>(
    State(state): State<ResellerAppState<R>>,
    user: CurrentUser,
) -> ResellerResult<impl IntoResponse>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    let reseller = ResellerProfileUseCase::new(state.repo.clone())
        .me(&user.user_id)
        .await?;
    Ok(Json(ResellerResponse::from(reseller)))
}

/// GET /api/v1/reseller/transactions
pub async fn transactions<R>(
    State(state): State<ResellerAppState<R>>,
    user: CurrentUser,
    Query(query): Query<TransactionListQuery>,
) -> ResellerResult<impl IntoResponse>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    let page = ResellerProfileUseCase::new(state.repo.clone())
        .transactions(&user.user_id, &query.page_params())
        .await?;
    Ok(Json(page.map(LedgerEntryResponse::from)))
}

// ============================================================================
// Withdrawals
// ============================================================================

/// POST /api/v1/withdraw
pub async fn create_withdrawal<R>(
    State(state): State<ResellerAppState<R>>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<WithdrawalRequest>,
) -> ResellerResult<impl IntoResponse>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    let (withdrawal, balance_after) = state
        .withdrawals()
        .request(&user.user_id, req.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(WithdrawalCreatedResponse {
            withdrawal: WithdrawalResponse::from(withdrawal),
            balance_after,
        }),
    ))
}

/// GET /api/v1/withdraw
pub async fn my_withdrawals<R>(
    State(state): State<ResellerAppState<R>>,
    user: CurrentUser,
) -> ResellerResult<impl IntoResponse>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    let withdrawals = state.withdrawals().mine(&user.user_id).await?;
    Ok(Json(
        withdrawals
            .into_iter()
            .map(WithdrawalResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/v1/withdraw/admin
pub async fn admin_list<R>(
    State(state): State<ResellerAppState<R>>,
    _admin: AdminUser,
    Query(query): Query<WithdrawalListQuery>,
) -> ResellerResult<impl IntoResponse>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    let page = state
        .withdrawals()
        .list(query.status, &query.page_params())
        .await?;
    Ok(Json(page.map(WithdrawalResponse::from)))
}

/// POST /api/v1/withdraw/{id}/approve
pub async fn approve<R>(
    State(state): State<ResellerAppState<R>>,
    _admin: AdminUser,
    Path(withdrawal_id): Path<WithdrawalId>,
) -> ResellerResult<impl IntoResponse>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    let withdrawal = state.withdrawals().approve(&withdrawal_id).await?;
    Ok(Json(WithdrawalResponse::from(withdrawal)))
}

/// POST /api/v1/withdraw/{id}/reject
pub async fn reject<R>(
    State(state): State<ResellerAppState<R>>,
    _admin: AdminUser,
    Path(withdrawal_id): Path<WithdrawalId>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> ResellerResult<impl IntoResponse>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    let withdrawal = state
        .withdrawals()
        .reject(&withdrawal_id, req.note)
        .await?;
    Ok(Json(WithdrawalResponse::from(withdrawal)))
}
