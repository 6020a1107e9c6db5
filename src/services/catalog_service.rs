use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    catalog::{self, RetailSort},
    dto::catalog::{CreateProductRequest, ProductList, UpdateProductRequest, VisibilityRequest},
    entity::products::{
        ActiveModel as ProductActive, Column as ProdCol, Entity as Products, Model as ProductModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Product, ProductKind},
    response::{ApiResponse, Meta},
    routes::params::{RetailCatalogQuery, TradeCatalogQuery},
    state::AppState,
};

/// Public B2C shop: active roasted-retail products, sorted in memory after
/// the full fetch.
pub async fn list_retail(
    state: &AppState,
    query: RetailCatalogQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let mut items = fetch_active(state, ProductKind::RoastedRetail).await?;
    catalog::sort_retail(&mut items, query.sort.unwrap_or(RetailSort::Newest));

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Retail catalog",
        ProductList { items },
        Some(meta),
    ))
}

/// Public B2B trade table: active green-export lots, facet-filtered in
/// memory and ordered by cupping score. Filtering never re-queries.
pub async fn list_trade(
    state: &AppState,
    query: TradeCatalogQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let lots = fetch_active(state, ProductKind::GreenExport).await?;
    let mut items = catalog::apply_facets(lots, &query.facet_filter());
    catalog::sort_trade(&mut items);

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Trade catalog",
        ProductList { items },
        Some(meta),
    ))
}

async fn fetch_active(state: &AppState, kind: ProductKind) -> AppResult<Vec<Product>> {
    let items = Products::find()
        .filter(ProdCol::Kind.eq(kind))
        .filter(ProdCol::IsActive.eq(true))
        .order_by_desc(ProdCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    Ok(items)
}

/// Admin view: every product, both channels, hidden ones included.
pub async fn list_admin(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    let items: Vec<Product> = Products::find()
        .order_by_desc(ProdCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Catalog",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }

    let active = ProductActive {
        id: Set(Uuid::new_v4()),
        kind: Set(payload.kind),
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        image_url: Set(payload.image_url),
        // New products go live immediately; the visibility toggle hides them.
        is_active: Set(true),
        price_kes: Set(payload.price_kes.unwrap_or(0)),
        original_price_kes: Set(payload.original_price_kes),
        retail_stock: Set(payload.retail_stock.unwrap_or(0)),
        roast_level: Set(payload.roast_level),
        species: Set(payload.species),
        region: Set(payload.region),
        grade: Set(payload.grade),
        process: Set(payload.process),
        cupping_score: Set(payload.cupping_score),
        available_bags: Set(payload.available_bags.unwrap_or(0)),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ProductActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(price_kes) = payload.price_kes {
        active.price_kes = Set(price_kes);
    }
    if let Some(original_price_kes) = payload.original_price_kes {
        active.original_price_kes = Set(Some(original_price_kes));
    }
    if let Some(retail_stock) = payload.retail_stock {
        active.retail_stock = Set(retail_stock);
    }
    if let Some(roast_level) = payload.roast_level {
        active.roast_level = Set(Some(roast_level));
    }
    if let Some(species) = payload.species {
        active.species = Set(Some(species));
    }
    if let Some(region) = payload.region {
        active.region = Set(Some(region));
    }
    if let Some(grade) = payload.grade {
        active.grade = Set(Some(grade));
    }
    if let Some(process) = payload.process {
        active.process = Set(Some(process));
    }
    if let Some(cupping_score) = payload.cupping_score {
        active.cupping_score = Set(Some(cupping_score));
    }
    if let Some(available_bags) = payload.available_bags {
        active.available_bags = Set(available_bags);
    }

    let product = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

/// The publish/hide kill switch. Products are never hard-deleted; hiding
/// them removes them from both public catalogs.
pub async fn set_visibility(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: VisibilityRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ProductActive = existing.into();
    active.is_active = Set(payload.is_active);
    let product = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_visibility",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id, "is_active": product.is_active })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        if payload.is_active { "Published" } else { "Hidden" },
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        kind: model.kind,
        name: model.name,
        description: model.description,
        image_url: model.image_url,
        is_active: model.is_active,
        price_kes: model.price_kes,
        original_price_kes: model.original_price_kes,
        retail_stock: model.retail_stock,
        roast_level: model.roast_level,
        species: model.species,
        region: model.region,
        grade: model.grade,
        process: model.process,
        cupping_score: model.cupping_score,
        available_bags: model.available_bags,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
