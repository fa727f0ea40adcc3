//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::pagination::PageParams;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::withdrawal::WithdrawalInput;
use crate::domain::entity::ledger::LedgerEntry;
use crate::domain::entity::reseller::Reseller;
use crate::domain::entity::withdrawal::{BankAccount, Withdrawal};
use crate::domain::value_object::transaction_kind::TransactionKind;
use crate::domain::value_object::withdrawal_status::WithdrawalStatus;

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResellerResponse {
    pub reseller_id: String,
    pub user_id: String,
    pub referral_code: String,
    pub commission_rate: Decimal,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Reseller> for ResellerResponse {
    fn from(r: Reseller) -> Self {
        Self {
            reseller_id: r.reseller_id.to_string(),
            user_id: r.user_id.to_string(),
            referral_code: r.referral_code,
            commission_rate: r.commission_rate,
            balance: r.balance,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl TransactionListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResponse {
    pub transaction_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub order_id: Option<String>,
    pub withdrawal_id: Option<String>,
    pub balance_after: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(e: LedgerEntry) -> Self {
        Self {
            transaction_id: e.transaction_id.to_string(),
            kind: e.kind,
            amount: e.amount,
            order_id: e.order_id.map(|o| o.to_string()),
            withdrawal_id: e.withdrawal_id.map(|w| w.to_string()),
            balance_after: e.balance_after,
            created_at: e.created_at,
        }
    }
}

// ============================================================================
// Withdrawals
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    pub amount: Decimal,
    #[validate(length(min = 1, max = 100))]
    pub bank_name: String,
    #[validate(length(min = 4, max = 34))]
    pub account_number: String,
    #[validate(length(min = 1, max = 200))]
    pub account_holder: String,
}

impl From<WithdrawalRequest> for WithdrawalInput {
    fn from(req: WithdrawalRequest) -> Self {
        Self {
            amount: req.amount,
            bank: BankAccount {
                bank_name: req.bank_name.trim().to_string(),
                account_number: req.account_number.trim().to_string(),
                account_holder: req.account_holder.trim().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResponse {
    pub withdrawal_id: String,
    pub reseller_id: String,
    pub amount: Decimal,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
    pub status: WithdrawalStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<Withdrawal> for WithdrawalResponse {
    fn from(w: Withdrawal) -> Self {
        Self {
            withdrawal_id: w.withdrawal_id.to_string(),
            reseller_id: w.reseller_id.to_string(),
            amount: w.amount,
            bank_name: w.bank.bank_name,
            account_number: w.bank.account_number,
            account_holder: w.bank.account_holder,
            status: w.status,
            note: w.note,
            created_at: w.created_at,
            reviewed_at: w.reviewed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalCreatedResponse {
    #[serde(flatten)]
    pub withdrawal: WithdrawalResponse,
    pub balance_after: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<WithdrawalStatus>,
}

impl WithdrawalListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectRequest {
    #[validate(length(min = 1, max = 500))]
    pub note: String,
}
