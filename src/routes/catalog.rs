use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, put},
};
use uuid::Uuid;

use crate::{
    dto::catalog::{CreateProductRequest, ProductList, UpdateProductRequest, VisibilityRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Product,
    response::ApiResponse,
    routes::params::{RetailCatalogQuery, TradeCatalogQuery},
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/retail", get(list_retail))
        .route("/trade", get(list_trade))
        .route("/", get(list_admin).post(create_product))
        .route("/{id}", put(update_product))
        .route("/{id}/visibility", patch(set_visibility))
}

#[utoipa::path(
    get,
    path = "/api/catalog/retail",
    params(
        ("sort" = Option<String>, Query, description = "newest | price_asc | price_desc | roast")
    ),
    responses(
        (status = 200, description = "Active roasted retail products", body = ApiResponse<ProductList>)
    ),
    tag = "Catalog"
)]
pub async fn list_retail(
    State(state): State<AppState>,
    Query(query): Query<RetailCatalogQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::list_retail(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/trade",
    params(
        ("origin" = Option<String>, Query, description = "Comma-separated origins"),
        ("species" = Option<String>, Query, description = "Comma-separated species"),
        ("grade" = Option<String>, Query, description = "Comma-separated grades"),
        ("process" = Option<String>, Query, description = "Comma-separated processes")
    ),
    responses(
        (status = 200, description = "Active green export lots", body = ApiResponse<ProductList>)
    ),
    tag = "Catalog"
)]
pub async fn list_trade(
    State(state): State<AppState>,
    Query(query): Query<TradeCatalogQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::list_trade(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (status = 200, description = "Full catalog, hidden products included (admin only)", body = ApiResponse<ProductList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_admin(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::list_admin(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/catalog",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Create product", body = ApiResponse<Product>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = catalog_service::create_product(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/catalog/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Update product", body = ApiResponse<Product>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = catalog_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/catalog/{id}/visibility",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = VisibilityRequest,
    responses(
        (status = 200, description = "Publish or hide product", body = ApiResponse<Product>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn set_visibility(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<VisibilityRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = catalog_service::set_visibility(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
