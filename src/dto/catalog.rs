use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Product, ProductKind};

/// Create payload for either channel. Retail fields apply to roasted_retail,
/// trade fields to green_export; the irrelevant group is simply left unset.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub kind: ProductKind,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_kes: Option<i64>,
    pub original_price_kes: Option<i64>,
    pub retail_stock: Option<i32>,
    pub roast_level: Option<String>,
    pub species: Option<String>,
    pub region: Option<String>,
    pub grade: Option<String>,
    pub process: Option<String>,
    pub cupping_score: Option<f32>,
    pub available_bags: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_kes: Option<i64>,
    pub original_price_kes: Option<i64>,
    pub retail_stock: Option<i32>,
    pub roast_level: Option<String>,
    pub species: Option<String>,
    pub region: Option<String>,
    pub grade: Option<String>,
    pub process: Option<String>,
    pub cupping_score: Option<f32>,
    pub available_bags: Option<i32>,
}

/// The publish/hide kill switch for public catalogs.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VisibilityRequest {
    pub is_active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
