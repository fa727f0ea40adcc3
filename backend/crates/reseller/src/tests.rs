//! Unit tests for Reseller crate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use kernel::id::{OrderId, ResellerId, UserId, WithdrawalId};
    use kernel::pagination::{Page, PageParams, paginate};
    use rust_decimal::Decimal;

    use crate::domain::entity::ledger::LedgerEntry;
    use crate::domain::entity::reseller::{Reseller, apply_debit};
    use crate::domain::entity::withdrawal::{BankAccount, ReviewDecision, Withdrawal};
    use crate::domain::repository::{ResellerRepository, WithdrawalRepository};
    use crate::domain::value_object::referral_code::ReferralCode;
    use crate::domain::value_object::transaction_kind::TransactionKind;
    use crate::domain::value_object::withdrawal_status::WithdrawalStatus;
    use crate::error::{ResellerError, ResellerResult};

    #[derive(Default)]
    pub struct State {
        pub resellers: Vec<Reseller>,
        pub ledger: Vec<LedgerEntry>,
        pub withdrawals: Vec<Withdrawal>,
        /// Users whose role was switched to reseller
        pub promoted: Vec<UserId>,
        /// Forced referral code clashes before inserts succeed
        pub collisions: usize,
    }

    /// In-memory repository. One mutex guard per call stands in for the row lock.
    #[derive(Clone, Default)]
    pub struct MemoryResellerRepository {
        pub state: Arc<Mutex<State>>,
    }

    impl MemoryResellerRepository {
        pub fn add_reseller(&self, user_id: UserId, balance: Decimal) -> Reseller {
            let mut reseller =
                Reseller::new(user_id, ReferralCode::generate(8), Decimal::new(5, 2));
            reseller.balance = balance;
            self.state.lock().unwrap().resellers.push(reseller.clone());
            reseller
        }

        pub fn balance_of(&self, reseller_id: &ResellerId) -> Decimal {
            self.state
                .lock()
                .unwrap()
                .resellers
                .iter()
                .find(|r| &r.reseller_id == reseller_id)
                .map(|r| r.balance)
                .unwrap_or_default()
        }

        pub fn ledger_of(&self, reseller_id: &ResellerId) -> Vec<LedgerEntry> {
            self.state
                .lock()
                .unwrap()
                .ledger
                .iter()
                .filter(|e| &e.reseller_id == reseller_id)
                .cloned()
                .collect()
        }
    }

    pub fn bank() -> BankAccount {
        BankAccount {
            bank_name: "BCA".into(),
            account_number: "1234567890".into(),
            account_holder: "Sari Wulandari".into(),
        }
    }

    impl ResellerRepository for MemoryResellerRepository {
        async fn find_by_id(&self, reseller_id: &ResellerId) -> ResellerResult<Option<Reseller>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .resellers
                .iter()
                .find(|r| &r.reseller_id == reseller_id)
                .cloned())
        }

        async fn find_by_user(&self, user_id: &UserId) -> ResellerResult<Option<Reseller>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .resellers
                .iter()
                .find(|r| &r.user_id == user_id)
                .cloned())
        }

        async fn find_by_code(&self, code: &str) -> ResellerResult<Option<Reseller>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .resellers
                .iter()
                .find(|r| r.referral_code == code)
                .cloned())
        }

        async fn create_reseller(&self, reseller: &Reseller) -> ResellerResult<()> {
            let mut state = self.state.lock().unwrap();
            if state.resellers.iter().any(|r| r.user_id == reseller.user_id) {
                return Err(ResellerError::AlreadyReseller);
            }
            if state.collisions > 0 {
                state.collisions -= 1;
                return Err(ResellerError::ReferralCodeCollision);
            }
            if state
                .resellers
                .iter()
                .any(|r| r.referral_code == reseller.referral_code)
            {
                return Err(ResellerError::ReferralCodeCollision);
            }
            state.resellers.push(reseller.clone());
            state.promoted.push(reseller.user_id);
            Ok(())
        }

        async fn list_transactions(
            &self,
            reseller_id: &ResellerId,
            params: &PageParams,
        ) -> ResellerResult<Page<LedgerEntry>> {
            let state = self.state.lock().unwrap();
            let mut rows: Vec<_> = state
                .ledger
                .iter()
                .filter(|e| &e.reseller_id == reseller_id)
                .cloned()
                .collect();
            rows.reverse();
            Ok(paginate(&rows, params))
        }

        async fn credit_commission(
            &self,
            reseller_id: &ResellerId,
            order_id: &OrderId,
            amount: Decimal,
        ) -> ResellerResult<Option<LedgerEntry>> {
            let mut state = self.state.lock().unwrap();
            if state
                .ledger
                .iter()
                .any(|e| e.order_id == Some(*order_id) && e.kind == TransactionKind::Commission)
            {
                return Ok(None);
            }
            let reseller = state
                .resellers
                .iter_mut()
                .find(|r| &r.reseller_id == reseller_id)
                .ok_or(ResellerError::NotReseller)?;
            reseller.balance += amount;
            let entry = LedgerEntry::commission(*reseller_id, *order_id, amount, reseller.balance);
            state.ledger.push(entry.clone());
            Ok(Some(entry))
        }
    }

    impl WithdrawalRepository for MemoryResellerRepository {
        async fn create_withdrawal(&self, withdrawal: &Withdrawal) -> ResellerResult<Decimal> {
            let mut state = self.state.lock().unwrap();
            let reseller = state
                .resellers
                .iter_mut()
                .find(|r| r.reseller_id == withdrawal.reseller_id)
                .ok_or(ResellerError::NotReseller)?;
            let balance_after = apply_debit(reseller.balance, withdrawal.amount)?;
            reseller.balance = balance_after;
            state.withdrawals.push(withdrawal.clone());
            state.ledger.push(LedgerEntry::withdrawal(
                withdrawal.reseller_id,
                withdrawal.withdrawal_id,
                withdrawal.amount,
                balance_after,
            ));
            Ok(balance_after)
        }

        async fn withdrawals_of(&self, reseller_id: &ResellerId) -> ResellerResult<Vec<Withdrawal>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .withdrawals
                .iter()
                .rev()
                .filter(|w| &w.reseller_id == reseller_id)
                .cloned()
                .collect())
        }

        async fn list_withdrawals(
            &self,
            status: Option<WithdrawalStatus>,
            params: &PageParams,
        ) -> ResellerResult<Page<Withdrawal>> {
            let state = self.state.lock().unwrap();
            let rows: Vec<_> = state
                .withdrawals
                .iter()
                .filter(|w| status.is_none_or(|s| w.status == s))
                .cloned()
                .collect();
            Ok(paginate(&rows, params))
        }

        async fn review_withdrawal(
            &self,
            withdrawal_id: &WithdrawalId,
            decision: ReviewDecision,
        ) -> ResellerResult<Withdrawal> {
            let mut state = self.state.lock().unwrap();
            let withdrawal = state
                .withdrawals
                .iter_mut()
                .find(|w| &w.withdrawal_id == withdrawal_id)
                .ok_or(ResellerError::WithdrawalNotFound)?;
            let refund = withdrawal.review(decision)?;
            let reviewed = withdrawal.clone();

            if let Some(amount) = refund {
                let reseller = state
                    .resellers
                    .iter_mut()
                    .find(|r| r.reseller_id == reviewed.reseller_id)
                    .ok_or(ResellerError::NotReseller)?;
                reseller.balance += amount;
                let entry = LedgerEntry::refund(
                    reviewed.reseller_id,
                    reviewed.withdrawal_id,
                    amount,
                    reseller.balance,
                );
                state.ledger.push(entry);
            }
            Ok(reviewed)
        }
    }
}

#[cfg(test)]
mod config_tests {
    use crate::application::config::ResellerConfig;
    use rust_decimal::Decimal;

    #[test]
    fn test_default_config() {
        let config = ResellerConfig::default();
        assert_eq!(config.default_commission_rate, Decimal::new(5, 2));
        assert_eq!(config.min_withdrawal, Decimal::new(50_000, 0));
        assert_eq!(config.referral_code_len, 8);
        assert!(config.auth_cookie.secure);
    }

    #[test]
    fn test_development_config() {
        let config = ResellerConfig::development();
        assert!(!config.auth_cookie.secure);
        assert_eq!(config.auth_cookie.name, "auth_token");
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use auth::{CurrentUser, UserRole};
    use kernel::id::{OrderId, UserId, WithdrawalId};
    use kernel::pagination::PageParams;
    use rust_decimal::Decimal;

    use super::support::*;
    use crate::application::config::ResellerConfig;
    use crate::application::{
        CommissionUseCase, RegisterResellerUseCase, ResellerProfileUseCase, WithdrawalInput,
        WithdrawalUseCase,
    };
    use crate::domain::value_object::transaction_kind::TransactionKind;
    use crate::domain::value_object::withdrawal_status::WithdrawalStatus;
    use crate::error::ResellerError;

    fn current(user_id: UserId, role: UserRole) -> CurrentUser {
        CurrentUser {
            user_id,
            role,
            expires_at: i64::MAX,
        }
    }

    fn withdrawals(repo: &MemoryResellerRepository) -> WithdrawalUseCase<MemoryResellerRepository> {
        WithdrawalUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(ResellerConfig::development()),
        )
    }

    fn input(amount: i64) -> WithdrawalInput {
        WithdrawalInput {
            amount: Decimal::new(amount, 0),
            bank: bank(),
        }
    }

    #[tokio::test]
    async fn test_register_customer() {
        let repo = MemoryResellerRepository::default();
        let use_case = RegisterResellerUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(ResellerConfig::development()),
        );
        let user_id = UserId::new();

        let reseller = use_case
            .execute(&current(user_id, UserRole::Customer))
            .await
            .unwrap();
        assert_eq!(reseller.referral_code.len(), 8);
        assert_eq!(reseller.balance, Decimal::ZERO);
        assert_eq!(repo.state.lock().unwrap().promoted, vec![user_id]);

        let again = use_case.execute(&current(user_id, UserRole::Reseller)).await;
        assert!(matches!(again, Err(ResellerError::AlreadyReseller)));
    }

    #[tokio::test]
    async fn test_register_retries_code_collisions() {
        let repo = MemoryResellerRepository::default();
        repo.state.lock().unwrap().collisions = 2;
        let use_case = RegisterResellerUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(ResellerConfig::development()),
        );
        assert!(
            use_case
                .execute(&current(UserId::new(), UserRole::Customer))
                .await
                .is_ok()
        );

        repo.state.lock().unwrap().collisions = 10;
        let exhausted = use_case
            .execute(&current(UserId::new(), UserRole::Customer))
            .await;
        assert!(matches!(exhausted, Err(ResellerError::ReferralCodeCollision)));
    }

    #[tokio::test]
    async fn test_admin_cannot_register() {
        let repo = MemoryResellerRepository::default();
        let use_case = RegisterResellerUseCase::new(
            Arc::new(repo),
            Arc::new(ResellerConfig::development()),
        );
        let result = use_case
            .execute(&current(UserId::new(), UserRole::Admin))
            .await;
        assert!(matches!(result, Err(ResellerError::NotEligible)));
    }

    #[tokio::test]
    async fn test_commission_credited_once() {
        let repo = MemoryResellerRepository::default();
        let reseller = repo.add_reseller(UserId::new(), Decimal::ZERO);
        let use_case = CommissionUseCase::new(Arc::new(repo.clone()));
        let order_id = OrderId::new();

        let entry = use_case
            .credit(&reseller.reseller_id, &order_id, Decimal::new(300_000, 0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.amount, Decimal::new(15_000, 0));
        assert_eq!(entry.balance_after, Decimal::new(15_000, 0));

        let repeat = use_case
            .credit(&reseller.reseller_id, &order_id, Decimal::new(300_000, 0))
            .await
            .unwrap();
        assert!(repeat.is_none());
        assert_eq!(
            repo.balance_of(&reseller.reseller_id),
            Decimal::new(15_000, 0)
        );
        assert_eq!(repo.ledger_of(&reseller.reseller_id).len(), 1);
    }

    #[tokio::test]
    async fn test_reseller_by_code_normalizes() {
        let repo = MemoryResellerRepository::default();
        let reseller = repo.add_reseller(UserId::new(), Decimal::ZERO);
        let use_case = CommissionUseCase::new(Arc::new(repo));

        let typed = format!("  {}  ", reseller.referral_code.to_lowercase());
        let found = use_case.reseller_by_code(&typed).await.unwrap().unwrap();
        assert_eq!(found.reseller_id, reseller.reseller_id);

        assert!(use_case.reseller_by_code("ZZZZZZZZ").await.unwrap().is_none());
        assert!(use_case.reseller_by_code("no").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_withdrawal_debits_balance() {
        let repo = MemoryResellerRepository::default();
        let user_id = UserId::new();
        let reseller = repo.add_reseller(user_id, Decimal::new(100_000, 0));

        let (withdrawal, balance_after) = withdrawals(&repo)
            .request(&user_id, input(60_000))
            .await
            .unwrap();
        assert_eq!(withdrawal.status, WithdrawalStatus::Pending);
        assert_eq!(balance_after, Decimal::new(40_000, 0));

        let ledger = repo.ledger_of(&reseller.reseller_id);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].kind, TransactionKind::Withdrawal);
        assert_eq!(ledger[0].amount, Decimal::new(-60_000, 0));
        assert_eq!(ledger[0].balance_after, Decimal::new(40_000, 0));
    }

    #[tokio::test]
    async fn test_withdrawal_rules() {
        let repo = MemoryResellerRepository::default();
        let user_id = UserId::new();
        let reseller = repo.add_reseller(user_id, Decimal::new(80_000, 0));
        let use_case = withdrawals(&repo);

        let below = use_case.request(&user_id, input(10_000)).await;
        assert!(matches!(below, Err(ResellerError::BelowMinimum { .. })));

        let zero = use_case.request(&user_id, input(0)).await;
        assert!(matches!(zero, Err(ResellerError::Validation(_))));

        let fractional = use_case
            .request(
                &user_id,
                WithdrawalInput {
                    amount: Decimal::new(60_000_001, 3),
                    bank: bank(),
                },
            )
            .await;
        assert!(matches!(fractional, Err(ResellerError::Validation(_))));

        let too_much = use_case.request(&user_id, input(90_000)).await;
        assert!(matches!(
            too_much,
            Err(ResellerError::InsufficientBalance { available }) if available == Decimal::new(80_000, 0)
        ));
        assert_eq!(
            repo.balance_of(&reseller.reseller_id),
            Decimal::new(80_000, 0)
        );

        let stranger = use_case.request(&UserId::new(), input(60_000)).await;
        assert!(matches!(stranger, Err(ResellerError::NotReseller)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_withdrawals_never_overdraw() {
        let repo = MemoryResellerRepository::default();
        let user_id = UserId::new();
        let reseller = repo.add_reseller(user_id, Decimal::new(200_000, 0));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let use_case = withdrawals(&repo);
                tokio::spawn(async move { use_case.request(&user_id, input(60_000)).await })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(ResellerError::InsufficientBalance { .. }) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(succeeded, 3);
        assert_eq!(
            repo.balance_of(&reseller.reseller_id),
            Decimal::new(20_000, 0)
        );
        assert!(
            repo.ledger_of(&reseller.reseller_id)
                .iter()
                .all(|e| e.balance_after >= Decimal::ZERO)
        );
    }

    #[tokio::test]
    async fn test_reject_refunds_once() {
        let repo = MemoryResellerRepository::default();
        let user_id = UserId::new();
        let reseller = repo.add_reseller(user_id, Decimal::new(100_000, 0));
        let use_case = withdrawals(&repo);

        let (withdrawal, _) = use_case.request(&user_id, input(70_000)).await.unwrap();

        let empty_note = use_case
            .reject(&withdrawal.withdrawal_id, "   ".to_string())
            .await;
        assert!(matches!(empty_note, Err(ResellerError::Validation(_))));

        let rejected = use_case
            .reject(&withdrawal.withdrawal_id, "Account name mismatch".to_string())
            .await
            .unwrap();
        assert_eq!(rejected.status, WithdrawalStatus::Rejected);
        assert_eq!(
            repo.balance_of(&reseller.reseller_id),
            Decimal::new(100_000, 0)
        );

        let again = use_case.approve(&withdrawal.withdrawal_id).await;
        assert!(matches!(again, Err(ResellerError::NotPending)));

        let kinds: Vec<_> = repo
            .ledger_of(&reseller.reseller_id)
            .iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![TransactionKind::Withdrawal, TransactionKind::WithdrawalRefund]
        );
    }

    #[tokio::test]
    async fn test_approve_keeps_debit() {
        let repo = MemoryResellerRepository::default();
        let user_id = UserId::new();
        let reseller = repo.add_reseller(user_id, Decimal::new(100_000, 0));
        let use_case = withdrawals(&repo);

        let (withdrawal, _) = use_case.request(&user_id, input(50_000)).await.unwrap();
        let approved = use_case.approve(&withdrawal.withdrawal_id).await.unwrap();
        assert_eq!(approved.status, WithdrawalStatus::Approved);
        assert_eq!(
            repo.balance_of(&reseller.reseller_id),
            Decimal::new(50_000, 0)
        );

        let missing = use_case.approve(&WithdrawalId::new()).await;
        assert!(matches!(missing, Err(ResellerError::WithdrawalNotFound)));

        let pending = use_case
            .list(Some(WithdrawalStatus::Pending), &PageParams::default())
            .await
            .unwrap();
        assert_eq!(pending.total, 0);
        assert_eq!(use_case.mine(&user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_transactions_newest_first() {
        let repo = MemoryResellerRepository::default();
        let user_id = UserId::new();
        let reseller = repo.add_reseller(user_id, Decimal::ZERO);
        let commission = CommissionUseCase::new(Arc::new(repo.clone()));
        for subtotal in [100_000, 200_000] {
            commission
                .credit(&reseller.reseller_id, &OrderId::new(), Decimal::new(subtotal, 0))
                .await
                .unwrap();
        }

        let page = ResellerProfileUseCase::new(Arc::new(repo))
            .transactions(&user_id, &PageParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].amount, Decimal::new(10_000, 0));
        assert_eq!(page.items[0].balance_after, Decimal::new(15_000, 0));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use auth::UserRole;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::{Extension, Router};
    use http_body_util::BodyExt;
    use kernel::id::UserId;
    use platform::jwt::{TokenConfig, TokenService};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::config::ResellerConfig;
    use crate::presentation::router::{reseller_router_generic, withdraw_router_generic};

    struct Fixture {
        reseller_app: Router,
        withdraw_app: Router,
        repo: MemoryResellerRepository,
        tokens: Arc<TokenService>,
    }

    fn fixture() -> Fixture {
        let repo = MemoryResellerRepository::default();
        let tokens = Arc::new(TokenService::new(TokenConfig::with_random_secret()));
        let reseller_app = reseller_router_generic(repo.clone(), ResellerConfig::development())
            .layer(Extension(tokens.clone()));
        let withdraw_app = withdraw_router_generic(repo.clone(), ResellerConfig::development())
            .layer(Extension(tokens.clone()));
        Fixture {
            reseller_app,
            withdraw_app,
            repo,
            tokens,
        }
    }

    impl Fixture {
        fn cookie_for(&self, user_id: UserId, role: UserRole) -> String {
            let token = self
                .tokens
                .issue_auth_token(user_id.into_uuid(), role.code())
                .unwrap();
            format!("auth_token={}", token.token)
        }
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn withdraw_request(cookie: &str, amount: &str) -> Request<Body> {
        Request::post("/")
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(
                r#"{{"amount":"{}","bankName":"BCA","accountNumber":"1234567890","accountHolder":"Sari"}}"#,
                amount
            )))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_reissues_cookie() {
        let f = fixture();
        let user_id = UserId::new();
        let cookie = f.cookie_for(user_id, UserRole::Customer);

        let response = f
            .reseller_app
            .clone()
            .oneshot(
                Request::post("/register")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let token = set_cookie
            .strip_prefix("auth_token=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        let claims = f.tokens.verify_auth_token(token).unwrap();
        assert_eq!(claims.role, "reseller");
        assert_eq!(claims.user_id, user_id.into_uuid());

        let body = json(response).await;
        assert_eq!(body["userId"], user_id.to_string());
        assert_eq!(body["balance"], "0");

        let duplicate = f
            .reseller_app
            .oneshot(
                Request::post("/register")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_me_requires_profile() {
        let f = fixture();
        let anonymous = f
            .reseller_app
            .clone()
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let cookie = f.cookie_for(UserId::new(), UserRole::Customer);
        let missing = f
            .reseller_app
            .oneshot(
                Request::get("/me")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_withdraw_status_codes() {
        let f = fixture();
        let user_id = UserId::new();
        f.repo.add_reseller(user_id, Decimal::new(100_000, 0));
        let cookie = f.cookie_for(user_id, UserRole::Reseller);

        let below = f
            .withdraw_app
            .clone()
            .oneshot(withdraw_request(&cookie, "1000"))
            .await
            .unwrap();
        assert_eq!(below.status(), StatusCode::BAD_REQUEST);

        let too_much = f
            .withdraw_app
            .clone()
            .oneshot(withdraw_request(&cookie, "150000"))
            .await
            .unwrap();
        assert_eq!(too_much.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let created = f
            .withdraw_app
            .clone()
            .oneshot(withdraw_request(&cookie, "60000"))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = json(created).await;
        assert_eq!(body["status"], "pending");
        assert_eq!(body["balanceAfter"], "40000");

        let mine = f
            .withdraw_app
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(mine.status(), StatusCode::OK);
        assert_eq!(json(mine).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_review() {
        let f = fixture();
        let user_id = UserId::new();
        f.repo.add_reseller(user_id, Decimal::new(100_000, 0));
        let reseller_cookie = f.cookie_for(user_id, UserRole::Reseller);
        let admin_cookie = f.cookie_for(UserId::new(), UserRole::Admin);

        let created = f
            .withdraw_app
            .clone()
            .oneshot(withdraw_request(&reseller_cookie, "50000"))
            .await
            .unwrap();
        let withdrawal_id = json(created).await["withdrawalId"]
            .as_str()
            .unwrap()
            .to_string();

        let forbidden = f
            .withdraw_app
            .clone()
            .oneshot(
                Request::get("/admin?status=pending")
                    .header(header::COOKIE, &reseller_cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let queue = f
            .withdraw_app
            .clone()
            .oneshot(
                Request::get("/admin?status=pending")
                    .header(header::COOKIE, &admin_cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(queue.status(), StatusCode::OK);
        assert_eq!(json(queue).await["total"], 1);

        let reject = |cookie: &str| {
            Request::post(format!("/{}/reject", withdrawal_id))
                .header(header::COOKIE, cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"note":"Account name mismatch"}"#))
                .unwrap()
        };

        let rejected = f
            .withdraw_app
            .clone()
            .oneshot(reject(&admin_cookie))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::OK);
        assert_eq!(json(rejected).await["status"], "rejected");

        let approve_after = f
            .withdraw_app
            .oneshot(
                Request::post(format!("/{}/approve", withdrawal_id))
                    .header(header::COOKIE, &admin_cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(approve_after.status(), StatusCode::CONFLICT);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use rust_decimal::Decimal;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(ResellerError, StatusCode)> = vec![
            (ResellerError::NotReseller, StatusCode::NOT_FOUND),
            (ResellerError::WithdrawalNotFound, StatusCode::NOT_FOUND),
            (ResellerError::AlreadyReseller, StatusCode::CONFLICT),
            (ResellerError::NotPending, StatusCode::CONFLICT),
            (ResellerError::NotEligible, StatusCode::FORBIDDEN),
            (
                ResellerError::InsufficientBalance {
                    available: Decimal::ZERO,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ResellerError::BelowMinimum {
                    minimum: Decimal::new(50_000, 0),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ResellerError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ResellerError::ReferralCodeCollision,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ResellerError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }
}
