use crate::db::{DbConnection, RepositoryError};
use crate::models::catalog::{
    Branch, Cafeteria, CafeteriaView, MenuCategory, MenuCategoryView, MenuItem, MenuItemView,
    NewCafeteriaRow, NewMenuCategoryRow, NewMenuItemRow,
};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use log::{error, warn};
use rust_decimal::Decimal;
use std::str::FromStr;

fn parse_rate(raw: &str, context: &str) -> Decimal {
    Decimal::from_str(raw).unwrap_or_else(|e| {
        warn!("{}: unreadable stored amount '{}': {}", context, raw, e);
        Decimal::ZERO
    })
}

#[derive(Clone)]
pub struct CatalogOperations {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl CatalogOperations {
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>) -> Self {
        Self { pool }
    }

    pub fn create_branch(&self, branch_name: &str) -> Result<i32, RepositoryError> {
        if branch_name.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Branch name is required".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_branch: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::branches::dsl::*;

        diesel::insert_into(branches)
            .values(name.eq(branch_name))
            .returning(id)
            .get_result(conn.connection())
            .map_err(|e| {
                error!("create_branch: error inserting '{}': {}", branch_name, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn list_branches(&self) -> Result<Vec<Branch>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_branches: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::branches::dsl::*;

        branches
            .order_by(id.asc())
            .select(Branch::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!("list_branches: error fetching branches: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn branch_id_by_name(&self, branch_name: &str) -> Result<Option<i32>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::branches::dsl::*;

        branches
            .filter(name.eq(branch_name))
            .select(id)
            .first(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)
    }

    pub fn create_cafeteria(
        &self,
        cafeteria_branch_id: i32,
        cafeteria_name: &str,
        cafeteria_image_url: Option<String>,
    ) -> Result<i32, RepositoryError> {
        if cafeteria_name.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Cafeteria name is required".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_cafeteria: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{branches, cafeterias};

        let branch_exists = branches::table
            .find(cafeteria_branch_id)
            .select(branches::id)
            .first::<i32>(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)?;
        if branch_exists.is_none() {
            return Err(RepositoryError::ReferenceNotFound(format!(
                "branch {}",
                cafeteria_branch_id
            )));
        }

        let new_row = NewCafeteriaRow {
            branch_id: cafeteria_branch_id,
            name: cafeteria_name.to_string(),
            image_url: cafeteria_image_url,
        };

        diesel::insert_into(cafeterias::table)
            .values(&new_row)
            .returning(cafeterias::id)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_cafeteria: error inserting '{}': {}",
                    cafeteria_name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn list_cafeterias(&self) -> Result<Vec<CafeteriaView>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_cafeterias: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::cafeterias::dsl::*;

        let rows = cafeterias
            .order_by(id.asc())
            .select(Cafeteria::as_select())
            .load::<Cafeteria>(conn.connection())
            .map_err(|e| {
                error!("list_cafeterias: error fetching cafeterias: {}", e);
                RepositoryError::DatabaseError(e)
            })?;
        Ok(rows.into_iter().map(CafeteriaView::from).collect())
    }

    pub fn update_cafeteria(
        &self,
        cafeteria_id_val: i32,
        new_branch_id: i32,
        new_name: &str,
        new_image_url: Option<String>,
    ) -> Result<(), RepositoryError> {
        if new_name.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Name and branchId are required".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_cafeteria: failed to acquire DB connection for {}: {}",
                cafeteria_id_val, e
            );
            e
        })?;

        use crate::db::schema::cafeterias::dsl::*;

        let affected = diesel::update(cafeterias.filter(id.eq(cafeteria_id_val)))
            .set((
                name.eq(new_name),
                image_url.eq(new_image_url),
                branch_id.eq(new_branch_id),
            ))
            .execute(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "cafeterias: {}",
                cafeteria_id_val
            )));
        }
        Ok(())
    }

    /// Remove a cafeteria together with everything hanging off it. One
    /// transaction: either the cafeteria and all its menu rows go, or
    /// nothing does.
    pub fn delete_cafeteria(&self, cafeteria_id_val: i32) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "delete_cafeteria: failed to acquire DB connection for {}: {}",
                cafeteria_id_val, e
            );
            e
        })?;

        conn.connection().immediate_transaction(|conn| {
            use crate::db::schema::{cafeterias, menu_categories, menu_items};

            diesel::delete(menu_items::table.filter(menu_items::cafeteria_id.eq(cafeteria_id_val)))
                .execute(conn)?;
            diesel::delete(
                menu_categories::table.filter(menu_categories::cafeteria_id.eq(cafeteria_id_val)),
            )
            .execute(conn)?;
            let affected =
                diesel::delete(cafeterias::table.filter(cafeterias::id.eq(cafeteria_id_val)))
                    .execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound(format!(
                    "cafeterias: {}",
                    cafeteria_id_val
                )));
            }
            Ok(())
        })
    }

    pub fn create_menu_category(
        &self,
        category_cafeteria_id: i32,
        category_name: &str,
        category_key: &str,
        category_image: Option<String>,
    ) -> Result<i32, RepositoryError> {
        if category_name.trim().is_empty() || category_key.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Name, key, and cafeteriaId are required".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "create_menu_category: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        use crate::db::schema::{cafeterias, menu_categories};

        let cafeteria_exists = cafeterias::table
            .find(category_cafeteria_id)
            .select(cafeterias::id)
            .first::<i32>(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)?;
        if cafeteria_exists.is_none() {
            return Err(RepositoryError::ReferenceNotFound(format!(
                "cafeteria {}",
                category_cafeteria_id
            )));
        }

        let new_row = NewMenuCategoryRow {
            cafeteria_id: category_cafeteria_id,
            name: category_name.to_string(),
            key: category_key.to_string(),
            image: category_image,
        };

        diesel::insert_into(menu_categories::table)
            .values(&new_row)
            .returning(menu_categories::id)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_menu_category: error inserting '{}': {}",
                    category_name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn list_menu_categories(
        &self,
        search_cafeteria_id: i32,
    ) -> Result<Vec<MenuCategoryView>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_menu_categories: failed to acquire DB connection for cafeteria {}: {}",
                search_cafeteria_id, e
            );
            e
        })?;

        use crate::db::schema::menu_categories::dsl::*;

        let rows = menu_categories
            .filter(cafeteria_id.eq(search_cafeteria_id))
            .order_by(id.asc())
            .select(MenuCategory::as_select())
            .load::<MenuCategory>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_menu_categories: error fetching categories for cafeteria {}: {}",
                    search_cafeteria_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        Ok(rows.into_iter().map(MenuCategoryView::from).collect())
    }

    pub fn create_menu_item(
        &self,
        new_item: NewMenuItemRow,
    ) -> Result<i32, RepositoryError> {
        if new_item.name.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Name, price, categoryId, and cafeteriaId are required".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_menu_item: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{cafeterias, menu_categories, menu_items};

        let category_exists = menu_categories::table
            .find(new_item.category_id)
            .select(menu_categories::id)
            .first::<i32>(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)?;
        if category_exists.is_none() {
            return Err(RepositoryError::ReferenceNotFound(format!(
                "menu category {}",
                new_item.category_id
            )));
        }
        let cafeteria_exists = cafeterias::table
            .find(new_item.cafeteria_id)
            .select(cafeterias::id)
            .first::<i32>(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)?;
        if cafeteria_exists.is_none() {
            return Err(RepositoryError::ReferenceNotFound(format!(
                "cafeteria {}",
                new_item.cafeteria_id
            )));
        }

        diesel::insert_into(menu_items::table)
            .values(&new_item)
            .returning(menu_items::id)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_menu_item: error inserting '{}': {}",
                    new_item.name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn list_menu_items(
        &self,
        search_cafeteria_id: i32,
    ) -> Result<Vec<MenuItemView>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_menu_items: failed to acquire DB connection for cafeteria {}: {}",
                search_cafeteria_id, e
            );
            e
        })?;

        use crate::db::schema::{menu_categories, menu_items};

        let rows = menu_items::table
            .left_join(menu_categories::table)
            .filter(menu_items::cafeteria_id.eq(search_cafeteria_id))
            .order_by(menu_items::id.asc())
            .select((MenuItem::as_select(), menu_categories::key.nullable()))
            .load::<(MenuItem, Option<String>)>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_menu_items: error fetching menu items for cafeteria {}: {}",
                    search_cafeteria_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(item, category_key)| MenuItemView {
                price: parse_rate(&item.price, "menu item price"),
                cgst: parse_rate(&item.cgst_rate, "menu item cgst"),
                sgst: parse_rate(&item.sgst_rate, "menu item sgst"),
                id: item.id,
                category_id: item.category_id,
                category_key,
                cafeteria_id: item.cafeteria_id,
                name: item.name,
                description: item.description,
                image_url: item.image_url,
            })
            .collect())
    }

    pub fn update_menu_item(
        &self,
        item_id_val: i32,
        changed: NewMenuItemRow,
    ) -> Result<(), RepositoryError> {
        if changed.name.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Name, price, categoryId, and cafeteriaId are required".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_menu_item: failed to acquire DB connection for {}: {}",
                item_id_val, e
            );
            e
        })?;

        use crate::db::schema::menu_items::dsl::*;

        let affected = diesel::update(menu_items.filter(id.eq(item_id_val)))
            .set((
                name.eq(&changed.name),
                description.eq(&changed.description),
                price.eq(&changed.price),
                image_url.eq(&changed.image_url),
                category_id.eq(changed.category_id),
                cafeteria_id.eq(changed.cafeteria_id),
                cgst_rate.eq(&changed.cgst_rate),
                sgst_rate.eq(&changed.sgst_rate),
            ))
            .execute(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "menu_items: {}",
                item_id_val
            )));
        }
        Ok(())
    }

    pub fn delete_menu_item(&self, item_id_val: i32) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "delete_menu_item: failed to acquire DB connection for {}: {}",
                item_id_val, e
            );
            e
        })?;

        use crate::db::schema::menu_items::dsl::*;

        let affected = diesel::delete(menu_items.filter(id.eq(item_id_val)))
            .execute(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "menu_items: {}",
                item_id_val
            )));
        }
        Ok(())
    }
}
