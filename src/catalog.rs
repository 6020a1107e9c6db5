use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Product;

// Defaulting rules for lots recorded before the trade columns existed.
// Older rows stay visible and filterable instead of vanishing from facets.
pub const DEFAULT_ORIGIN: &str = "Kenya";
pub const DEFAULT_SPECIES: &str = "Arabica";
pub const DEFAULT_GRADE: &str = "AA";
pub const DEFAULT_PROCESS: &str = "Washed";

/// Normalized facet view of an export lot, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotFacets {
    pub origin: String,
    pub species: String,
    pub grade: String,
    pub process: String,
}

pub fn lot_facets(product: &Product) -> LotFacets {
    let or_default = |field: &Option<String>, default: &str| {
        field
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };
    LotFacets {
        origin: or_default(&product.region, DEFAULT_ORIGIN),
        species: or_default(&product.species, DEFAULT_SPECIES),
        grade: or_default(&product.grade, DEFAULT_GRADE),
        process: or_default(&product.process, DEFAULT_PROCESS),
    }
}

/// Multi-select facet filter: OR within a category, AND across categories.
/// An empty category places no constraint.
#[derive(Debug, Clone, Default)]
pub struct FacetFilter {
    pub origins: Vec<String>,
    pub species: Vec<String>,
    pub grades: Vec<String>,
    pub processes: Vec<String>,
}

impl FacetFilter {
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
            && self.species.is_empty()
            && self.grades.is_empty()
            && self.processes.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        let facets = lot_facets(product);
        let hit = |selected: &[String], value: &str| {
            selected.is_empty() || selected.iter().any(|s| s.eq_ignore_ascii_case(value))
        };
        hit(&self.origins, &facets.origin)
            && hit(&self.species, &facets.species)
            && hit(&self.grades, &facets.grade)
            && hit(&self.processes, &facets.process)
    }
}

/// Filter an already-fetched lot list in memory. Never re-queries.
pub fn apply_facets(products: Vec<Product>, filter: &FacetFilter) -> Vec<Product> {
    if filter.is_empty() {
        return products;
    }
    products
        .into_iter()
        .filter(|p| filter.matches(p))
        .collect()
}

/// Trade listing order: cupping score descending, unscored lots last.
pub fn sort_trade(products: &mut [Product]) {
    products.sort_by(|a, b| {
        let score = |p: &Product| p.cupping_score.unwrap_or(f32::MIN);
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RetailSort {
    Newest,
    PriceAsc,
    PriceDesc,
    Roast,
}

/// Fixed roast ordinal for sorting; unknown or missing levels sit with
/// Medium so incomplete rows don't float to either end.
fn roast_ordinal(level: Option<&str>) -> u8 {
    match level.map(str::trim) {
        Some(l) if l.eq_ignore_ascii_case("light") => 0,
        Some(l) if l.eq_ignore_ascii_case("dark") => 2,
        _ => 1,
    }
}

pub fn sort_retail(products: &mut [Product], sort: RetailSort) {
    match sort {
        RetailSort::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        RetailSort::PriceAsc => products.sort_by_key(|p| p.price_kes),
        RetailSort::PriceDesc => products.sort_by_key(|p| std::cmp::Reverse(p.price_kes)),
        RetailSort::Roast => {
            products.sort_by_key(|p| roast_ordinal(p.roast_level.as_deref()))
        }
    }
}
