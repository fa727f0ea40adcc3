//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ResellerId, ResellerTransactionId, UserId, WithdrawalId};
use kernel::pagination::{Page, PageParams};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::ledger::LedgerEntry;
use crate::domain::entity::reseller::{Reseller, apply_debit};
use crate::domain::entity::withdrawal::{BankAccount, ReviewDecision, Withdrawal};
use crate::domain::repository::{ResellerRepository, WithdrawalRepository};
use crate::domain::value_object::transaction_kind::TransactionKind;
use crate::domain::value_object::withdrawal_status::WithdrawalStatus;
use crate::error::{ResellerError, ResellerResult};

/// PostgreSQL-backed reseller repository
#[derive(Clone)]
pub struct PgResellerRepository {
    pool: PgPool,
}

impl PgResellerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const RESELLER_COLUMNS: &str = r#"
    reseller_id,
    user_id,
    referral_code,
    commission_rate,
    balance,
    created_at
"#;

const LEDGER_COLUMNS: &str = r#"
    transaction_id,
    reseller_id,
    kind,
    amount,
    order_id,
    withdrawal_id,
    balance_after,
    created_at
"#;

const WITHDRAWAL_COLUMNS: &str = r#"
    withdrawal_id,
    reseller_id,
    amount,
    bank_name,
    account_number,
    account_holder,
    status,
    note,
    created_at,
    reviewed_at
"#;

// ============================================================================
// Balance helpers (inside a transaction)
// ============================================================================

impl PgResellerRepository {
    /// Row lock on the reseller; serializes every balance change
    async fn lock_balance(
        tx: &mut Transaction<'_, Postgres>,
        reseller_id: &ResellerId,
    ) -> ResellerResult<Decimal> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT balance FROM resellers WHERE reseller_id = $1 FOR UPDATE",
        )
        .bind(reseller_id.as_uuid())
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(ResellerError::NotReseller)
    }

    async fn set_balance(
        tx: &mut Transaction<'_, Postgres>,
        reseller_id: &ResellerId,
        balance: Decimal,
    ) -> ResellerResult<()> {
        sqlx::query("UPDATE resellers SET balance = $2 WHERE reseller_id = $1")
            .bind(reseller_id.as_uuid())
            .bind(balance)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// `false` when the row hit the at-most-once commission constraint
    async fn insert_entry(
        tx: &mut Transaction<'_, Postgres>,
        entry: &LedgerEntry,
    ) -> ResellerResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO reseller_transactions (
                transaction_id, reseller_id, kind, amount, order_id,
                withdrawal_id, balance_after, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (order_id, kind) DO NOTHING
            "#,
        )
        .bind(entry.transaction_id.as_uuid())
        .bind(entry.reseller_id.as_uuid())
        .bind(entry.kind.code())
        .bind(entry.amount)
        .bind(entry.order_id.map(|o| o.into_uuid()))
        .bind(entry.withdrawal_id.map(|w| w.into_uuid()))
        .bind(entry.balance_after)
        .bind(entry.created_at)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Reseller Repository Implementation
// ============================================================================

impl ResellerRepository for PgResellerRepository {
    async fn find_by_id(&self, reseller_id: &ResellerId) -> ResellerResult<Option<Reseller>> {
        let row = sqlx::query_as::<_, ResellerRow>(&format!(
            "SELECT {} FROM resellers WHERE reseller_id = $1",
            RESELLER_COLUMNS
        ))
        .bind(reseller_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ResellerRow::into_reseller))
    }

    async fn find_by_user(&self, user_id: &UserId) -> ResellerResult<Option<Reseller>> {
        let row = sqlx::query_as::<_, ResellerRow>(&format!(
            "SELECT {} FROM resellers WHERE user_id = $1",
            RESELLER_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ResellerRow::into_reseller))
    }

    async fn find_by_code(&self, code: &str) -> ResellerResult<Option<Reseller>> {
        let row = sqlx::query_as::<_, ResellerRow>(&format!(
            "SELECT {} FROM resellers WHERE referral_code = $1",
            RESELLER_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ResellerRow::into_reseller))
    }

    async fn create_reseller(&self, reseller: &Reseller) -> ResellerResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO resellers (
                reseller_id, user_id, referral_code, commission_rate, balance, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(reseller.reseller_id.as_uuid())
        .bind(reseller.user_id.as_uuid())
        .bind(&reseller.referral_code)
        .bind(reseller.commission_rate)
        .bind(reseller.balance)
        .bind(reseller.created_at)
        .execute(&mut *tx)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(if db.constraint() == Some("resellers_referral_code_key") {
                    ResellerError::ReferralCodeCollision
                } else {
                    ResellerError::AlreadyReseller
                });
            }
            Err(e) => return Err(e.into()),
        }

        // Admins keep their role
        sqlx::query(
            r#"
            UPDATE users SET user_role = 'reseller', updated_at = now()
            WHERE user_id = $1 AND user_role = 'customer'
            "#,
        )
        .bind(reseller.user_id.as_uuid())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_transactions(
        &self,
        reseller_id: &ResellerId,
        params: &PageParams,
    ) -> ResellerResult<Page<LedgerEntry>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reseller_transactions WHERE reseller_id = $1",
        )
        .bind(reseller_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, LedgerRow>(&format!(
            r#"
            SELECT {} FROM reseller_transactions
            WHERE reseller_id = $1
            ORDER BY created_at DESC, transaction_id
            LIMIT $2 OFFSET $3
            "#,
            LEDGER_COLUMNS
        ))
        .bind(reseller_id.as_uuid())
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(LedgerRow::into_entry)
            .collect::<ResellerResult<Vec<_>>>()?;
        Ok(Page::new(items, params, total))
    }

    async fn credit_commission(
        &self,
        reseller_id: &ResellerId,
        order_id: &OrderId,
        amount: Decimal,
    ) -> ResellerResult<Option<LedgerEntry>> {
        let mut tx = self.pool.begin().await?;

        let balance = Self::lock_balance(&mut tx, reseller_id).await?;
        let entry = LedgerEntry::commission(*reseller_id, *order_id, amount, balance + amount);

        if !Self::insert_entry(&mut tx, &entry).await? {
            tx.rollback().await?;
            return Ok(None);
        }
        Self::set_balance(&mut tx, reseller_id, entry.balance_after).await?;

        tx.commit().await?;
        Ok(Some(entry))
    }
}

// ============================================================================
// Withdrawal Repository Implementation
// ============================================================================

impl WithdrawalRepository for PgResellerRepository {
    async fn create_withdrawal(&self, withdrawal: &Withdrawal) -> ResellerResult<Decimal> {
        let mut tx = self.pool.begin().await?;

        let balance = Self::lock_balance(&mut tx, &withdrawal.reseller_id).await?;
        let balance_after = apply_debit(balance, withdrawal.amount)?;
        Self::set_balance(&mut tx, &withdrawal.reseller_id, balance_after).await?;

        sqlx::query(
            r#"
            INSERT INTO withdrawals (
                withdrawal_id, reseller_id, amount, bank_name, account_number,
                account_holder, status, note, created_at, reviewed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(withdrawal.withdrawal_id.as_uuid())
        .bind(withdrawal.reseller_id.as_uuid())
        .bind(withdrawal.amount)
        .bind(&withdrawal.bank.bank_name)
        .bind(&withdrawal.bank.account_number)
        .bind(&withdrawal.bank.account_holder)
        .bind(withdrawal.status.code())
        .bind(&withdrawal.note)
        .bind(withdrawal.created_at)
        .bind(withdrawal.reviewed_at)
        .execute(&mut *tx)
        .await?;

        let entry = LedgerEntry::withdrawal(
            withdrawal.reseller_id,
            withdrawal.withdrawal_id,
            withdrawal.amount,
            balance_after,
        );
        Self::insert_entry(&mut tx, &entry).await?;

        tx.commit().await?;
        Ok(balance_after)
    }

    async fn withdrawals_of(&self, reseller_id: &ResellerId) -> ResellerResult<Vec<Withdrawal>> {
        let rows = sqlx::query_as::<_, WithdrawalRow>(&format!(
            "SELECT {} FROM withdrawals WHERE reseller_id = $1 ORDER BY created_at DESC",
            WITHDRAWAL_COLUMNS
        ))
        .bind(reseller_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WithdrawalRow::into_withdrawal).collect()
    }

    async fn list_withdrawals(
        &self,
        status: Option<WithdrawalStatus>,
        params: &PageParams,
    ) -> ResellerResult<Page<Withdrawal>> {
        let status = status.map(|s| s.code());

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM withdrawals WHERE $1::text IS NULL OR status = $1",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, WithdrawalRow>(&format!(
            r#"
            SELECT {} FROM withdrawals
            WHERE $1::text IS NULL OR status = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#,
            WITHDRAWAL_COLUMNS
        ))
        .bind(status)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(WithdrawalRow::into_withdrawal)
            .collect::<ResellerResult<Vec<_>>>()?;
        Ok(Page::new(items, params, total))
    }

    async fn review_withdrawal(
        &self,
        withdrawal_id: &WithdrawalId,
        decision: ReviewDecision,
    ) -> ResellerResult<Withdrawal> {
        let mut tx = self.pool.begin().await?;

        let mut withdrawal = sqlx::query_as::<_, WithdrawalRow>(&format!(
            "SELECT {} FROM withdrawals WHERE withdrawal_id = $1 FOR UPDATE",
            WITHDRAWAL_COLUMNS
        ))
        .bind(withdrawal_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ResellerError::WithdrawalNotFound)?
        .into_withdrawal()?;

        let refund = withdrawal.review(decision)?;

        sqlx::query(
            "UPDATE withdrawals SET status = $2, note = $3, reviewed_at = $4 WHERE withdrawal_id = $1",
        )
        .bind(withdrawal_id.as_uuid())
        .bind(withdrawal.status.code())
        .bind(&withdrawal.note)
        .bind(withdrawal.reviewed_at)
        .execute(&mut *tx)
        .await?;

        if let Some(amount) = refund {
            let balance = Self::lock_balance(&mut tx, &withdrawal.reseller_id).await?;
            let entry = LedgerEntry::refund(
                withdrawal.reseller_id,
                withdrawal.withdrawal_id,
                amount,
                balance + amount,
            );
            Self::set_balance(&mut tx, &withdrawal.reseller_id, entry.balance_after).await?;
            Self::insert_entry(&mut tx, &entry).await?;
        }

        tx.commit().await?;
        Ok(withdrawal)
    }
}

// ============================================================================
// Rows
// ============================================================================

#[derive(sqlx::FromRow)]
struct ResellerRow {
    reseller_id: Uuid,
    user_id: Uuid,
    referral_code: String,
    commission_rate: Decimal,
    balance: Decimal,
    created_at: DateTime<Utc>,
}

impl ResellerRow {
    fn into_reseller(self) -> Reseller {
        Reseller {
            reseller_id: ResellerId::from_uuid(self.reseller_id),
            user_id: UserId::from_uuid(self.user_id),
            referral_code: self.referral_code,
            commission_rate: self.commission_rate,
            balance: self.balance,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LedgerRow {
    transaction_id: Uuid,
    reseller_id: Uuid,
    kind: String,
    amount: Decimal,
    order_id: Option<Uuid>,
    withdrawal_id: Option<Uuid>,
    balance_after: Decimal,
    created_at: DateTime<Utc>,
}

impl LedgerRow {
    fn into_entry(self) -> ResellerResult<LedgerEntry> {
        let kind = TransactionKind::from_code(&self.kind).ok_or_else(|| {
            ResellerError::Internal(format!("Unknown transaction kind in database: {}", self.kind))
        })?;
        Ok(LedgerEntry {
            transaction_id: ResellerTransactionId::from_uuid(self.transaction_id),
            reseller_id: ResellerId::from_uuid(self.reseller_id),
            kind,
            amount: self.amount,
            order_id: self.order_id.map(OrderId::from_uuid),
            withdrawal_id: self.withdrawal_id.map(WithdrawalId::from_uuid),
            balance_after: self.balance_after,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WithdrawalRow {
    withdrawal_id: Uuid,
    reseller_id: Uuid,
    amount: Decimal,
    bank_name: String,
    account_number: String,
    account_holder: String,
    status: String,
    note: Option<String>,
    created_at: DateTime<Utc>,
    reviewed_at: Option<DateTime<Utc>>,
}

impl WithdrawalRow {
    fn into_withdrawal(self) -> ResellerResult<Withdrawal> {
        let status = WithdrawalStatus::from_code(&self.status).ok_or_else(|| {
            ResellerError::Internal(format!("Unknown withdrawal status in database: {}", self.status))
        })?;
        Ok(Withdrawal {
            withdrawal_id: WithdrawalId::from_uuid(self.withdrawal_id),
            reseller_id: ResellerId::from_uuid(self.reseller_id),
            amount: self.amount,
            bank: BankAccount {
                bank_name: self.bank_name,
                account_number: self.account_number,
                account_holder: self.account_holder,
            },
            status,
            note: self.note,
            created_at: self.created_at,
            reviewed_at: self.reviewed_at,
        })
    }
}
