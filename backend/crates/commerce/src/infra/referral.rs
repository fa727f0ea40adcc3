//! Referral program over the reseller context

use std::sync::Arc;

use kernel::id::{OrderId, ResellerId};
use reseller::CommissionUseCase;
use reseller::domain::repository::ResellerRepository;
use reseller::error::ResellerError;
use rust_decimal::Decimal;

use crate::domain::port::{ReferralProgram, Referrer};
use crate::error::{CommerceError, CommerceResult};

pub struct ResellerReferralProgram<R>
where
    R: ResellerRepository,
{
    commission: CommissionUseCase<R>,
}

impl<R> ResellerReferralProgram<R>
where
    R: ResellerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            commission: CommissionUseCase::new(repo),
        }
    }
}

impl<R> ReferralProgram for ResellerReferralProgram<R>
where
    R: ResellerRepository + Send + Sync,
{
    async fn referrer_for_code(&self, code: &str) -> CommerceResult<Option<Referrer>> {
        let reseller = self
            .commission
            .reseller_by_code(code)
            .await
            .map_err(into_commerce)?;
        Ok(reseller.map(|r| Referrer {
            reseller_id: r.reseller_id,
            user_id: r.user_id,
        }))
    }

    async fn credit_commission(
        &self,
        reseller_id: &ResellerId,
        order_id: &OrderId,
        subtotal: Decimal,
    ) -> CommerceResult<()> {
        self.commission
            .credit(reseller_id, order_id, subtotal)
            .await
            .map_err(into_commerce)?;
        Ok(())
    }
}

fn into_commerce(err: ResellerError) -> CommerceError {
    match err {
        ResellerError::Database(e) => CommerceError::Database(e),
        other => CommerceError::Internal(other.to_string()),
    }
}
