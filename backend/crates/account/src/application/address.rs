//! Address Book Use Case

use std::sync::Arc;

use kernel::id::{AddressId, UserId};

use crate::application::config::AccountConfig;
use crate::domain::entity::address::{Address, AddressDraft};
use crate::domain::repository::AddressRepository;
use crate::error::{AccountError, AccountResult};

pub struct AddressBookUseCase<R>
where
    R: AddressRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> AddressBookUseCase<R>
where
    R: AddressRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn list(&self, user_id: &UserId) -> AccountResult<Vec<Address>> {
        self.repo.list_addresses(user_id).await
    }

    pub async fn get(&self, user_id: &UserId, address_id: &AddressId) -> AccountResult<Address> {
        self.repo
            .find_address(user_id, address_id)
            .await?
            .ok_or(AccountError::AddressNotFound)
    }

    pub async fn create(
        &self,
        user_id: &UserId,
        draft: AddressDraft,
        make_default: bool,
    ) -> AccountResult<Address> {
        let existing = self.repo.list_addresses(user_id).await?;
        if existing.len() >= self.config.max_addresses {
            return Err(AccountError::Validation(format!(
                "At most {} addresses can be saved",
                self.config.max_addresses
            )));
        }

        let address = Address::new(*user_id, draft);
        let saved = self.repo.insert_address(&address, make_default).await?;

        tracing::info!(
            user_id = %user_id,
            address_id = %saved.address_id,
            is_default = saved.is_default,
            "Address created"
        );
        Ok(saved)
    }

    pub async fn update(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
        draft: AddressDraft,
    ) -> AccountResult<Address> {
        let mut address = self.get(user_id, address_id).await?;
        address.apply(draft);

        if !self.repo.update_address(&address).await? {
            return Err(AccountError::AddressNotFound);
        }
        Ok(address)
    }

    pub async fn delete(&self, user_id: &UserId, address_id: &AddressId) -> AccountResult<()> {
        if !self.repo.delete_address(user_id, address_id).await? {
            return Err(AccountError::AddressNotFound);
        }
        tracing::info!(user_id = %user_id, address_id = %address_id, "Address deleted");
        Ok(())
    }

    pub async fn set_default(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
    ) -> AccountResult<Address> {
        if !self.repo.set_default_address(user_id, address_id).await? {
            return Err(AccountError::AddressNotFound);
        }
        self.get(user_id, address_id).await
    }
}
