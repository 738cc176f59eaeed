use crate::models::catalog::{Branch, CafeteriaView, MenuCategoryView, MenuItemView};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct NewBranchRequest {
    pub name: String,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCafeteriaRequest {
    pub branch_id: i32,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuCategoryRequest {
    pub cafeteria_id: i32,
    pub name: String,
    pub key: String,
    pub image: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItemRequest {
    pub category_id: i32,
    pub cafeteria_id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub cgst: Decimal,
    #[serde(default)]
    pub sgst: Decimal,
    pub image_url: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CafeteriaQuery {
    pub cafeteria_id: i32,
}

#[derive(Serialize, ToSchema)]
pub struct BranchesResponse {
    pub success: bool,
    pub branches: Vec<Branch>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i32,
}

#[derive(Serialize, ToSchema)]
pub struct CafeteriasResponse {
    pub success: bool,
    pub cafeterias: Vec<CafeteriaView>,
}

#[derive(Serialize, ToSchema)]
pub struct MenuCategoriesResponse {
    pub success: bool,
    pub categories: Vec<MenuCategoryView>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemsResponse {
    pub success: bool,
    pub menu_items: Vec<MenuItemView>,
}
