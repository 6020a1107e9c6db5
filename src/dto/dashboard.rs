use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusBreakdown {
    pub pending: i64,
    pub processing: i64,
    pub completed: i64,
    pub cancelled: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RevenuePoint {
    pub bucket: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TopProduct {
    pub name: String,
    pub units_sold: i64,
}

/// Everything the dashboard renders, recomputed wholesale per request from
/// the fetched snapshot.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardMetrics {
    /// Sum of order totals in the window, excluding cancelled orders.
    pub revenue: i64,
    pub active_orders: i64,
    pub b2b_leads: i64,
    pub low_stock: i64,
    pub status_breakdown: StatusBreakdown,
    pub granularity: String,
    pub revenue_trend: Vec<RevenuePoint>,
    pub top_products: Vec<TopProduct>,
}
