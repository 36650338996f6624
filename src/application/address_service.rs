use std::sync::Arc;

use log::*;

use crate::domain::address::{Address, NewAddress};
use crate::domain::errors::DomainError;
use crate::domain::ports::AddressRepository;

pub type DynAddressRepository = Arc<dyn AddressRepository>;

#[derive(Clone)]
pub struct AddressService {
    repo: DynAddressRepository,
}

impl AddressService {
    pub fn new(repo: DynAddressRepository) -> Self {
        Self { repo }
    }

    pub fn create_address(&self, user_id: i32, address: NewAddress) -> Result<Address, DomainError> {
        address.validate()?;
        let saved = self.repo.create(user_id, address)?;
        info!("Saved {} address {} for user {}", saved.address_type, saved.id, user_id);
        Ok(saved)
    }

    pub fn list_addresses(&self, user_id: i32) -> Result<Vec<Address>, DomainError> {
        self.repo.list_for_user(user_id)
    }
}
