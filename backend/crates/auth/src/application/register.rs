//! Register Use Case
//!
//! Creates a customer account, signs it in and adopts the guest cart.

use std::sync::Arc;

use kernel::id::GuestSessionId;
use platform::crypto::log_tag;
use platform::jwt::TokenService;

use crate::application::config::AuthConfig;
use crate::application::session::{AuthOutput, build_output, merge_guest_cart};
use crate::domain::entity::user::User;
use crate::domain::port::CartMerger;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    /// From a valid `checkout_token` cookie
    pub guest_session_id: Option<GuestSessionId>,
}

/// Register use case
pub struct RegisterUseCase<R, M>
where
    R: UserRepository,
    M: CartMerger,
{
    repo: Arc<R>,
    merger: Arc<M>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R, M> RegisterUseCase<R, M>
where
    R: UserRepository,
    M: CartMerger,
{
    pub fn new(
        repo: Arc<R>,
        merger: Arc<M>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            merger,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthOutput> {
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let full_name = input.full_name.trim().to_string();
        let user = User::new(email, password_hash, full_name, input.phone);

        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email_tag = %log_tag(user.email.as_str()),
            "User registered"
        );

        let merged = merge_guest_cart(self.merger.as_ref(), input.guest_session_id, user.user_id).await;

        build_output(
            &self.tokens,
            &user,
            merged,
            input.guest_session_id.is_some(),
        )
    }
}
