//! Commission credit, called when an order becomes paid

use std::sync::Arc;

use kernel::id::{OrderId, ResellerId};
use rust_decimal::Decimal;

use crate::domain::entity::ledger::LedgerEntry;
use crate::domain::entity::reseller::Reseller;
use crate::domain::repository::ResellerRepository;
use crate::domain::value_object::referral_code::ReferralCode;
use crate::error::{ResellerError, ResellerResult};

pub struct CommissionUseCase<R>
where
    R: ResellerRepository,
{
    repo: Arc<R>,
}

impl<R> CommissionUseCase<R>
where
    R: ResellerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Reseller behind a referral code typed at checkout
    pub async fn reseller_by_code(&self, code: &str) -> ResellerResult<Option<Reseller>> {
        match ReferralCode::parse(code) {
            Some(code) => self.repo.find_by_code(code.as_str()).await,
            None => Ok(None),
        }
    }

    /// Credit the commission for a paid order. At most once per order;
    /// a repeat returns `None`.
    pub async fn credit(
        &self,
        reseller_id: &ResellerId,
        order_id: &OrderId,
        subtotal: Decimal,
    ) -> ResellerResult<Option<LedgerEntry>> {
        let reseller = self
            .repo
            .find_by_id(reseller_id)
            .await?
            .ok_or(ResellerError::NotReseller)?;

        let amount = reseller.commission_for(subtotal);
        if amount <= Decimal::ZERO {
            return Ok(None);
        }

        let entry = self
            .repo
            .credit_commission(reseller_id, order_id, amount)
            .await?;

        match &entry {
            Some(e) => tracing::info!(
                reseller_id = %reseller_id,
                order_id = %order_id,
                amount = %amount,
                balance_after = %e.balance_after,
                "Commission credited"
            ),
            None => tracing::debug!(order_id = %order_id, "Commission already credited"),
        }
        Ok(entry)
    }
}
