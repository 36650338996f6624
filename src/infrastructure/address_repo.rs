use diesel::prelude::*;

use crate::domain::address::{Address, NewAddress};
use crate::domain::errors::DomainError;
use crate::domain::ports::AddressRepository;
use crate::schema::addresses;

use super::models::{AddressRow, NewAddressRow};
use super::DieselRepository;

impl AddressRepository for DieselRepository {
    fn create(&self, user_id: i32, address: NewAddress) -> Result<Address, DomainError> {
        let mut conn = self.pool.get()?;

        let row: AddressRow = diesel::insert_into(addresses::table)
            .values(&NewAddressRow::new(user_id, address))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)?;

        row.try_into()
    }

    fn list_for_user(&self, user_id: i32) -> Result<Vec<Address>, DomainError> {
        let mut conn = self.pool.get()?;

        addresses::table
            .filter(addresses::user_id.eq(user_id))
            .order(addresses::id.asc())
            .select(AddressRow::as_select())
            .load::<AddressRow>(&mut conn)?
            .into_iter()
            .map(Address::try_from)
            .collect()
    }
}
