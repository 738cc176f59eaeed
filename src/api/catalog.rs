use crate::api::errors::error_response;
use crate::auth::{AdminPrincipal, PrincipalExtractor};
use crate::db::CatalogOperations;
use crate::enums::catalog::{
    BranchesResponse, CafeteriaQuery, CafeteriasResponse, CreatedResponse, MenuCategoriesResponse,
    MenuItemsResponse, NewBranchRequest, NewCafeteriaRequest, NewMenuCategoryRequest,
    NewMenuItemRequest,
};
use crate::enums::ApiMessage;
use crate::models::catalog::NewMenuItemRow;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

fn item_row_from_request(req: NewMenuItemRequest) -> NewMenuItemRow {
    NewMenuItemRow {
        category_id: req.category_id,
        cafeteria_id: req.cafeteria_id,
        name: req.name,
        description: req.description,
        price: req.price.to_string(),
        cgst_rate: req.cgst.to_string(),
        sgst_rate: req.sgst.to_string(),
        image_url: req.image_url,
    }
}

#[utoipa::path(
    get,
    tag = "Catalog",
    path = "/menu/branches",
    responses((status = 200, description = "All branches", body = BranchesResponse)),
    summary = "List branches"
)]
#[get("/branches")]
pub(super) async fn get_branches(
    catalog_ops: web::Data<CatalogOperations>,
    _principal: PrincipalExtractor,
) -> impl Responder {
    match catalog_ops.list_branches() {
        Ok(branches) => HttpResponse::Ok().json(BranchesResponse {
            success: true,
            branches,
        }),
        Err(e) => error_response("get_branches", e),
    }
}

#[utoipa::path(
    post,
    tag = "Catalog",
    path = "/menu/branches",
    request_body = NewBranchRequest,
    responses(
        (status = 201, description = "Branch created", body = CreatedResponse),
        (status = 400, description = "Missing name", body = ApiMessage),
    ),
    summary = "Create a branch"
)]
#[post("/branches")]
pub(super) async fn create_branch(
    catalog_ops: web::Data<CatalogOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<NewBranchRequest>,
) -> impl Responder {
    match catalog_ops.create_branch(&req_data.name) {
        Ok(new_id) => {
            info!("create_branch: created '{}'", req_data.name);
            HttpResponse::Created().json(CreatedResponse {
                success: true,
                id: new_id,
            })
        }
        Err(e) => error_response("create_branch", e),
    }
}

#[utoipa::path(
    get,
    tag = "Catalog",
    path = "/menu/cafeterias",
    responses((status = 200, description = "All cafeterias", body = CafeteriasResponse)),
    summary = "List cafeterias"
)]
#[get("/cafeterias")]
pub(super) async fn get_cafeterias(
    catalog_ops: web::Data<CatalogOperations>,
    _principal: PrincipalExtractor,
) -> impl Responder {
    match catalog_ops.list_cafeterias() {
        Ok(cafeterias) => HttpResponse::Ok().json(CafeteriasResponse {
            success: true,
            cafeterias,
        }),
        Err(e) => error_response("get_cafeterias", e),
    }
}

#[utoipa::path(
    post,
    tag = "Catalog",
    path = "/menu/cafeterias",
    request_body = NewCafeteriaRequest,
    responses(
        (status = 201, description = "Cafeteria created", body = CreatedResponse),
        (status = 400, description = "Unknown branch", body = ApiMessage),
    ),
    summary = "Create a cafeteria"
)]
#[post("/cafeterias")]
pub(super) async fn create_cafeteria(
    catalog_ops: web::Data<CatalogOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<NewCafeteriaRequest>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    match catalog_ops.create_cafeteria(req_data.branch_id, &req_data.name, req_data.image_url) {
        Ok(new_id) => {
            info!("create_cafeteria: created '{}'", req_data.name);
            HttpResponse::Created().json(CreatedResponse {
                success: true,
                id: new_id,
            })
        }
        Err(e) => error_response("create_cafeteria", e),
    }
}

#[utoipa::path(
    put,
    tag = "Catalog",
    path = "/menu/cafeterias/{id}",
    params(("id", description = "Cafeteria id")),
    request_body = NewCafeteriaRequest,
    responses(
        (status = 200, description = "Cafeteria updated", body = ApiMessage),
        (status = 404, description = "No such cafeteria", body = ApiMessage),
    ),
    summary = "Update a cafeteria"
)]
#[put("/cafeterias/{id}")]
pub(super) async fn update_cafeteria(
    catalog_ops: web::Data<CatalogOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
    req_data: web::Json<NewCafeteriaRequest>,
) -> impl Responder {
    let cafeteria_id = path.into_inner().0;
    let req_data = req_data.into_inner();
    match catalog_ops.update_cafeteria(
        cafeteria_id,
        req_data.branch_id,
        &req_data.name,
        req_data.image_url,
    ) {
        Ok(()) => HttpResponse::Ok().json(ApiMessage::ok("Cafeteria updated")),
        Err(e) => error_response("update_cafeteria", e),
    }
}

#[utoipa::path(
    delete,
    tag = "Catalog",
    path = "/menu/cafeterias/{id}",
    params(("id", description = "Cafeteria id")),
    responses(
        (status = 200, description = "Cafeteria and its menu removed", body = ApiMessage),
        (status = 404, description = "No such cafeteria", body = ApiMessage),
    ),
    summary = "Delete a cafeteria and everything under it"
)]
#[delete("/cafeterias/{id}")]
pub(super) async fn delete_cafeteria(
    catalog_ops: web::Data<CatalogOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let cafeteria_id = path.into_inner().0;
    match catalog_ops.delete_cafeteria(cafeteria_id) {
        Ok(()) => {
            info!("delete_cafeteria: removed cafeteria {}", cafeteria_id);
            HttpResponse::Ok().json(ApiMessage::ok("Cafeteria deleted"))
        }
        Err(e) => error_response("delete_cafeteria", e),
    }
}

#[utoipa::path(
    get,
    tag = "Catalog",
    path = "/menu/menu-categories",
    params(("cafeteriaId" = i32, Query, description = "Cafeteria to list categories for")),
    responses((status = 200, description = "Categories for the cafeteria", body = MenuCategoriesResponse)),
    summary = "List menu categories of a cafeteria"
)]
#[get("/menu-categories")]
pub(super) async fn get_menu_categories(
    catalog_ops: web::Data<CatalogOperations>,
    _principal: PrincipalExtractor,
    query: web::Query<CafeteriaQuery>,
) -> impl Responder {
    match catalog_ops.list_menu_categories(query.cafeteria_id) {
        Ok(categories) => HttpResponse::Ok().json(MenuCategoriesResponse {
            success: true,
            categories,
        }),
        Err(e) => error_response("get_menu_categories", e),
    }
}

#[utoipa::path(
    post,
    tag = "Catalog",
    path = "/menu/menu-categories",
    request_body = NewMenuCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CreatedResponse),
        (status = 400, description = "Unknown cafeteria", body = ApiMessage),
    ),
    summary = "Create a menu category"
)]
#[post("/menu-categories")]
pub(super) async fn create_menu_category(
    catalog_ops: web::Data<CatalogOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<NewMenuCategoryRequest>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    match catalog_ops.create_menu_category(
        req_data.cafeteria_id,
        &req_data.name,
        &req_data.key,
        req_data.image,
    ) {
        Ok(new_id) => {
            info!("create_menu_category: created '{}'", req_data.name);
            HttpResponse::Created().json(CreatedResponse {
                success: true,
                id: new_id,
            })
        }
        Err(e) => error_response("create_menu_category", e),
    }
}

#[utoipa::path(
    get,
    tag = "Catalog",
    path = "/menu/menu-items",
    params(("cafeteriaId" = i32, Query, description = "Cafeteria to list items for")),
    responses((status = 200, description = "Menu items for the cafeteria", body = MenuItemsResponse)),
    summary = "List menu items of a cafeteria"
)]
#[get("/menu-items")]
pub(super) async fn get_menu_items(
    catalog_ops: web::Data<CatalogOperations>,
    _principal: PrincipalExtractor,
    query: web::Query<CafeteriaQuery>,
) -> impl Responder {
    match catalog_ops.list_menu_items(query.cafeteria_id) {
        Ok(menu_items) => HttpResponse::Ok().json(MenuItemsResponse {
            success: true,
            menu_items,
        }),
        Err(e) => error_response("get_menu_items", e),
    }
}

#[utoipa::path(
    post,
    tag = "Catalog",
    path = "/menu/menu-items",
    request_body = NewMenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = CreatedResponse),
        (status = 400, description = "Unknown category or cafeteria", body = ApiMessage),
    ),
    summary = "Create a menu item"
)]
#[post("/menu-items")]
pub(super) async fn create_menu_item(
    catalog_ops: web::Data<CatalogOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<NewMenuItemRequest>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    let item_name = req_data.name.clone();
    match catalog_ops.create_menu_item(item_row_from_request(req_data)) {
        Ok(new_id) => {
            info!("create_menu_item: created '{}'", item_name);
            HttpResponse::Created().json(CreatedResponse {
                success: true,
                id: new_id,
            })
        }
        Err(e) => error_response("create_menu_item", e),
    }
}

#[utoipa::path(
    put,
    tag = "Catalog",
    path = "/menu/menu-items/{id}",
    params(("id", description = "Menu item id")),
    request_body = NewMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = ApiMessage),
        (status = 404, description = "No such menu item", body = ApiMessage),
    ),
    summary = "Update a menu item"
)]
#[put("/menu-items/{id}")]
pub(super) async fn update_menu_item(
    catalog_ops: web::Data<CatalogOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
    req_data: web::Json<NewMenuItemRequest>,
) -> impl Responder {
    let item_id = path.into_inner().0;
    match catalog_ops.update_menu_item(item_id, item_row_from_request(req_data.into_inner())) {
        Ok(()) => HttpResponse::Ok().json(ApiMessage::ok("Menu item updated")),
        Err(e) => error_response("update_menu_item", e),
    }
}

#[utoipa::path(
    delete,
    tag = "Catalog",
    path = "/menu/menu-items/{id}",
    params(("id", description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item deleted", body = ApiMessage),
        (status = 404, description = "No such menu item", body = ApiMessage),
    ),
    summary = "Delete a menu item"
)]
#[delete("/menu-items/{id}")]
pub(super) async fn delete_menu_item(
    catalog_ops: web::Data<CatalogOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let item_id = path.into_inner().0;
    match catalog_ops.delete_menu_item(item_id) {
        Ok(()) => {
            info!("delete_menu_item: removed item {}", item_id);
            HttpResponse::Ok().json(ApiMessage::ok("Menu item deleted"))
        }
        Err(e) => error_response("delete_menu_item", e),
    }
}
