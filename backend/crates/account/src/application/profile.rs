//! Profile Use Cases

use std::sync::Arc;

use auth::domain::value_object::user_password::{RawPassword, UserPassword};
use kernel::id::UserId;

use crate::application::config::AccountConfig;
use crate::domain::entity::profile::Profile;
use crate::domain::repository::ProfileRepository;
use crate::error::{AccountError, AccountResult};

pub struct ProfileUseCase<R>
where
    R: ProfileRepository,
{
    repo: Arc<R>,
}

impl<R> ProfileUseCase<R>
where
    R: ProfileRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, user_id: &UserId) -> AccountResult<Profile> {
        self.repo
            .find_profile(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    pub async fn update(
        &self,
        user_id: &UserId,
        full_name: Option<String>,
        phone: Option<String>,
    ) -> AccountResult<Profile> {
        let mut profile = self.get(user_id).await?;

        if profile.apply_update(full_name, phone) {
            self.repo.save_profile(&profile).await?;
            tracing::info!(user_id = %user_id, "Profile updated");
        }

        Ok(profile)
    }
}

pub struct ChangePasswordUseCase<R>
where
    R: ProfileRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: ProfileRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    /// Verify the current password, then store a hash of the new one
    pub async fn execute(
        &self,
        user_id: &UserId,
        current_password: String,
        new_password: String,
    ) -> AccountResult<()> {
        let stored = self
            .repo
            .password_hash(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let current = RawPassword::submitted(current_password);
        if !stored.verify(&current, self.config.pepper()) {
            return Err(AccountError::WrongPassword);
        }

        let next = RawPassword::new(new_password)?;
        let hash = UserPassword::from_raw(&next, self.config.pepper())?;
        self.repo.update_password(user_id, &hash).await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
