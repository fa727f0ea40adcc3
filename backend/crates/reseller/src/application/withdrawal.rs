//! Withdrawals and their admin review

use std::sync::Arc;

use kernel::id::{UserId, WithdrawalId};
use kernel::pagination::{Page, PageParams};
use rust_decimal::Decimal;

use crate::application::config::ResellerConfig;
use crate::domain::entity::withdrawal::{BankAccount, ReviewDecision, Withdrawal};
use crate::domain::repository::{ResellerRepository, WithdrawalRepository};
use crate::domain::value_object::withdrawal_status::WithdrawalStatus;
use crate::error::{ResellerError, ResellerResult};

#[derive(Debug, Clone)]
pub struct WithdrawalInput {
    pub amount: Decimal,
    pub bank: BankAccount,
}

pub struct WithdrawalUseCase<R>
where
    R: ResellerRepository + WithdrawalRepository,
{
    repo: Arc<R>,
    config: Arc<ResellerConfig>,
}

impl<R> WithdrawalUseCase<R>
where
    R: ResellerRepository + WithdrawalRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ResellerConfig>) -> Self {
        Self { repo, config }
    }

    /// Returns the withdrawal and the balance left after it
    pub async fn request(
        &self,
        user_id: &UserId,
        input: WithdrawalInput,
    ) -> ResellerResult<(Withdrawal, Decimal)> {
        if input.amount <= Decimal::ZERO {
            return Err(ResellerError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }
        if input.amount.normalize().scale() > 2 {
            return Err(ResellerError::Validation(
                "Amount must have at most two decimal places".to_string(),
            ));
        }
        if input.amount < self.config.min_withdrawal {
            return Err(ResellerError::BelowMinimum {
                minimum: self.config.min_withdrawal,
            });
        }

        let reseller = self
            .repo
            .find_by_user(user_id)
            .await?
            .ok_or(ResellerError::NotReseller)?;

        let withdrawal = Withdrawal::new(reseller.reseller_id, input.amount, input.bank);
        let balance_after = self.repo.create_withdrawal(&withdrawal).await?;

        tracing::info!(
            reseller_id = %reseller.reseller_id,
            withdrawal_id = %withdrawal.withdrawal_id,
            amount = %withdrawal.amount,
            balance_after = %balance_after,
            "Withdrawal requested"
        );
        Ok((withdrawal, balance_after))
    }

    pub async fn mine(&self, user_id: &UserId) -> ResellerResult<Vec<Withdrawal>> {
        let reseller = self
            .repo
            .find_by_user(user_id)
            .await?
            .ok_or(ResellerError::NotReseller)?;
        self.repo.withdrawals_of(&reseller.reseller_id).await
    }

    pub async fn list(
        &self,
        status: Option<WithdrawalStatus>,
        params: &PageParams,
    ) -> ResellerResult<Page<Withdrawal>> {
        self.repo.list_withdrawals(status, params).await
    }

    pub async fn approve(&self, withdrawal_id: &WithdrawalId) -> ResellerResult<Withdrawal> {
        let withdrawal = self
            .repo
            .review_withdrawal(withdrawal_id, ReviewDecision::Approve)
            .await?;
        tracing::info!(withdrawal_id = %withdrawal_id, "Withdrawal approved");
        Ok(withdrawal)
    }

    pub async fn reject(
        &self,
        withdrawal_id: &WithdrawalId,
        note: String,
    ) -> ResellerResult<Withdrawal> {
        let note = note.trim().to_string();
        if note.is_empty() {
            return Err(ResellerError::Validation(
                "A rejection note is required".to_string(),
            ));
        }
        let withdrawal = self
            .repo
            .review_withdrawal(withdrawal_id, ReviewDecision::Reject { note })
            .await?;
        tracing::info!(
            withdrawal_id = %withdrawal_id,
            amount = %withdrawal.amount,
            "Withdrawal rejected and refunded"
        );
        Ok(withdrawal)
    }
}
