//! Repository Traits
//!
//! Every balance mutation runs in one transaction holding the reseller row lock.

use kernel::id::{OrderId, ResellerId, UserId, WithdrawalId};
use kernel::pagination::{Page, PageParams};
use rust_decimal::Decimal;

use crate::domain::entity::ledger::LedgerEntry;
use crate::domain::entity::reseller::Reseller;
use crate::domain::entity::withdrawal::{ReviewDecision, Withdrawal};
use crate::domain::value_object::withdrawal_status::WithdrawalStatus;
use crate::error::ResellerResult;

#[trait_variant::make(ResellerRepository: Send)]
pub trait LocalResellerRepository {
    async fn find_by_id(&self, reseller_id: &ResellerId) -> ResellerResult<Option<Reseller>>;

    async fn find_by_user(&self, user_id: &UserId) -> ResellerResult<Option<Reseller>>;

    async fn find_by_code(&self, code: &str) -> ResellerResult<Option<Reseller>>;

    /// Insert the profile and promote a customer to the reseller role.
    /// Existing profile: `AlreadyReseller`; code clash: `ReferralCodeCollision`.
    async fn create_reseller(&self, reseller: &Reseller) -> ResellerResult<()>;

    /// Newest first
    async fn list_transactions(
        &self,
        reseller_id: &ResellerId,
        params: &PageParams,
    ) -> ResellerResult<Page<LedgerEntry>>;

    /// Credit `amount` for `order_id`. `None` when that order was already credited.
    async fn credit_commission(
        &self,
        reseller_id: &ResellerId,
        order_id: &OrderId,
        amount: Decimal,
    ) -> ResellerResult<Option<LedgerEntry>>;
}

#[trait_variant::make(WithdrawalRepository: Send)]
pub trait LocalWithdrawalRepository {
    /// Debit the balance and record the withdrawal with its ledger row.
    /// Returns the balance after the debit; `InsufficientBalance` otherwise.
    async fn create_withdrawal(&self, withdrawal: &Withdrawal) -> ResellerResult<Decimal>;

    /// Newest first
    async fn withdrawals_of(&self, reseller_id: &ResellerId) -> ResellerResult<Vec<Withdrawal>>;

    /// Oldest first so the review queue drains in order
    async fn list_withdrawals(
        &self,
        status: Option<WithdrawalStatus>,
        params: &PageParams,
    ) -> ResellerResult<Page<Withdrawal>>;

    /// Apply the decision under the withdrawal row lock; rejection refunds the balance
    async fn review_withdrawal(
        &self,
        withdrawal_id: &WithdrawalId,
        decision: ReviewDecision,
    ) -> ResellerResult<Withdrawal>;
}
