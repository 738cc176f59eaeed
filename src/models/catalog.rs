use diesel::{Identifiable, Insertable, Queryable, Selectable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, ToSchema)]
#[diesel(table_name = crate::db::schema::branches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Branch {
    pub id: i32,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(table_name = crate::db::schema::cafeterias)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Cafeteria {
    pub id: i32,
    pub branch_id: i32,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::cafeterias)]
pub struct NewCafeteriaRow {
    pub branch_id: i32,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(table_name = crate::db::schema::menu_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MenuCategory {
    pub id: i32,
    pub cafeteria_id: i32,
    pub name: String,
    pub key: String,
    pub image: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::menu_categories)]
pub struct NewMenuCategoryRow {
    pub cafeteria_id: i32,
    pub name: String,
    pub key: String,
    pub image: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(table_name = crate::db::schema::menu_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MenuItem {
    pub id: i32,
    pub category_id: i32,
    pub cafeteria_id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub cgst_rate: String,
    pub sgst_rate: String,
    pub image_url: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::menu_items)]
pub struct NewMenuItemRow {
    pub category_id: i32,
    pub cafeteria_id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub cgst_rate: String,
    pub sgst_rate: String,
    pub image_url: Option<String>,
}

/// camelCase views for the catalog endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CafeteriaView {
    pub id: i32,
    pub branch_id: i32,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<Cafeteria> for CafeteriaView {
    fn from(row: Cafeteria) -> Self {
        CafeteriaView {
            id: row.id,
            branch_id: row.branch_id,
            name: row.name,
            image_url: row.image_url,
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategoryView {
    pub id: i32,
    pub cafeteria_id: i32,
    pub name: String,
    pub key: String,
    pub image: Option<String>,
}

impl From<MenuCategory> for MenuCategoryView {
    fn from(row: MenuCategory) -> Self {
        MenuCategoryView {
            id: row.id,
            cafeteria_id: row.cafeteria_id,
            name: row.name,
            key: row.key,
            image: row.image,
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    pub id: i32,
    pub category_id: i32,
    pub category_key: Option<String>,
    pub cafeteria_id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub image_url: Option<String>,
}
