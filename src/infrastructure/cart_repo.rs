use diesel::prelude::*;

use crate::domain::cart::{CartItem, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::carts;

use super::models::{CartRow, NewCartRow};
use super::DieselRepository;

impl CartRepository for DieselRepository {
    fn add_item(&self, user_id: i32, item: NewCartItem) -> Result<CartItem, DomainError> {
        let mut conn = self.pool.get()?;

        let row: CartRow = diesel::insert_into(carts::table)
            .values(&NewCartRow::new(user_id, item))
            .returning(CartRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn list_items(&self, user_id: i32) -> Result<Vec<CartItem>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<CartRow> = carts::table
            .filter(carts::user_id.eq(user_id))
            .order(carts::id.asc())
            .select(CartRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    fn remove_item(&self, user_id: i32, cart_item_id: i32) -> Result<CartItem, DomainError> {
        let mut conn = self.pool.get()?;

        // Scoped to the owner: another user's item reads as missing.
        let row = diesel::delete(
            carts::table
                .filter(carts::id.eq(cart_item_id))
                .filter(carts::user_id.eq(user_id)),
        )
        .returning(CartRow::as_returning())
        .get_result::<CartRow>(&mut conn)
        .optional()?;

        row.map(CartItem::from).ok_or(DomainError::CartItemNotFound)
    }
}
