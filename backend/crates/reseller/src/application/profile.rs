//! Registration and the reseller's own view

use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::UserId;
use kernel::pagination::{Page, PageParams};

use crate::application::config::ResellerConfig;
use crate::domain::entity::ledger::LedgerEntry;
use crate::domain::entity::reseller::Reseller;
use crate::domain::repository::ResellerRepository;
use crate::domain::value_object::referral_code::ReferralCode;
use crate::error::{ResellerError, ResellerResult};

const MAX_CODE_ATTEMPTS: usize = 5;

pub struct RegisterResellerUseCase<R>
where
    R: ResellerRepository,
{
    repo: Arc<R>,
    config: Arc<ResellerConfig>,
}

impl<R> RegisterResellerUseCase<R>
where
    R: ResellerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ResellerConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, user: &CurrentUser) -> ResellerResult<Reseller> {
        if user.is_admin() {
            return Err(ResellerError::NotEligible);
        }
        if self.repo.find_by_user(&user.user_id).await?.is_some() {
            return Err(ResellerError::AlreadyReseller);
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let reseller = Reseller::new(
                user.user_id,
                ReferralCode::generate(self.config.referral_code_len),
                self.config.default_commission_rate,
            );
            match self.repo.create_reseller(&reseller).await {
                Ok(()) => {
                    tracing::info!(
                        user_id = %user.user_id,
                        reseller_id = %reseller.reseller_id,
                        "Reseller registered"
                    );
                    return Ok(reseller);
                }
                Err(ResellerError::ReferralCodeCollision) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(ResellerError::ReferralCodeCollision)
    }
}

pub struct ResellerProfileUseCase<R>
where
    R: ResellerRepository,
{
    repo: Arc<R>,
}

impl<R> ResellerProfileUseCase<R>
where
    R: ResellerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn me(&self, user_id: &UserId) -> ResellerResult<Reseller> {
        self.repo
            .find_by_user(user_id)
            .await?
            .ok_or(ResellerError::NotReseller)
    }

    pub async fn transactions(
        &self,
        user_id: &UserId,
        params: &PageParams,
    ) -> ResellerResult<Page<LedgerEntry>> {
        let reseller = self.me(user_id).await?;
        self.repo
            .list_transactions(&reseller.reseller_id, params)
            .await
    }
}
