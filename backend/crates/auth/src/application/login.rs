//! Login Use Case

use std::sync::Arc;

use kernel::id::GuestSessionId;
use platform::crypto::log_tag;
use platform::jwt::TokenService;

use crate::application::config::AuthConfig;
use crate::application::session::{AuthOutput, build_output, merge_guest_cart};
use crate::domain::port::CartMerger;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub guest_session_id: Option<GuestSessionId>,
}

pub struct LoginUseCase<R, M>
where
    R: UserRepository,
    M: CartMerger,
{
    repo: Arc<R>,
    merger: Arc<M>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R, M> LoginUseCase<R, M>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        // Malformed and unknown emails look the same as a wrong password
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password = RawPassword::submitted(input.password);

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            tracing::info!(email_tag = %log_tag(email.as_str()), "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let merged = merge_guest_cart(self.merger.as_ref(), input.guest_session_id, user.user_id).await;

        tracing::info!(user_id = %user.user_id, role = %user.user_role, "User logged in");

        build_output(
            &self.tokens,
            &user,
            merged,
            input.guest_session_id.is_some(),
        )
    }
}
