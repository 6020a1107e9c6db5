use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalog::{FacetFilter, RetailSort};

/// Admin listing filter shared by orders and sample requests. `Active`
/// means "not yet completed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Processing,
    Completed,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ListQuery {
    pub status: Option<StatusFilter>,
    /// Case-insensitive substring search.
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RetailCatalogQuery {
    pub sort: Option<RetailSort>,
}

/// Facet selections arrive comma-separated, e.g. `?origin=Kenya,Ethiopia`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TradeCatalogQuery {
    pub origin: Option<String>,
    pub species: Option<String>,
    pub grade: Option<String>,
    pub process: Option<String>,
}

impl TradeCatalogQuery {
    pub fn facet_filter(&self) -> FacetFilter {
        let split = |raw: &Option<String>| -> Vec<String> {
            raw.as_deref()
                .unwrap_or("")
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };
        FacetFilter {
            origins: split(&self.origin),
            species: split(&self.species),
            grades: split(&self.grade),
            processes: split(&self.process),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DashboardWindow {
    Today,
    Week,
    Month,
    Year,
    Custom,
    #[default]
    All,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DashboardQuery {
    pub window: Option<DashboardWindow>,
    /// Custom window start (inclusive, from midnight).
    pub start: Option<NaiveDate>,
    /// Custom window end (inclusive, to end of day).
    pub end: Option<NaiveDate>,
}
