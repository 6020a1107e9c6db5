use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::dashboard::{DashboardMetrics, RevenuePoint, StatusBreakdown, TopProduct},
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::{Column as OrderCol, Entity as Orders},
        products::Entity as Products,
    },
    error::AppResult,
    export::{self, ReportSummary},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderItem, OrderStatus, Product, ProductKind},
    response::{ApiResponse, Meta},
    routes::params::{DashboardQuery, DashboardWindow},
    services::{catalog_service, order_service},
    state::AppState,
};

/// Retail products strictly below this stock level raise a low-stock alert.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

const TOP_PRODUCT_LIMIT: usize = 5;

/// Custom windows shorter than roughly one month chart daily, longer ones
/// monthly.
const ONE_MONTH_SECS: i64 = 2_629_800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hourly,
    Daily,
    Monthly,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

/// Resolve the requested window to concrete bounds. `end` is only bounded
/// for custom ranges; every other window runs to "now".
pub fn resolve_window(
    query: &DashboardQuery,
    now: DateTime<Utc>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let midnight = |date: chrono::NaiveDate| {
        date.and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or(now)
    };
    let end_of_day = |date: chrono::NaiveDate| {
        date.and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc())
            .unwrap_or(now)
    };

    match query.window.unwrap_or_default() {
        DashboardWindow::Today => (Some(midnight(now.date_naive())), None),
        DashboardWindow::Week => (Some(now - Duration::days(7)), None),
        DashboardWindow::Month => (
            Some(midnight(now.date_naive().with_day(1).unwrap_or(now.date_naive()))),
            None,
        ),
        DashboardWindow::Year => (
            Some(midnight(
                now.date_naive()
                    .with_ordinal(1)
                    .unwrap_or(now.date_naive()),
            )),
            None,
        ),
        DashboardWindow::Custom => (
            query.start.map(midnight),
            Some(query.end.map(end_of_day).unwrap_or(now)),
        ),
        DashboardWindow::All => (None, None),
    }
}

pub fn pick_granularity(
    window: DashboardWindow,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Granularity {
    match window {
        DashboardWindow::Today => Granularity::Hourly,
        DashboardWindow::Week | DashboardWindow::Month => Granularity::Daily,
        DashboardWindow::Custom => match start {
            Some(start) if end.unwrap_or(now) - start < Duration::seconds(ONE_MONTH_SECS) => {
                Granularity::Daily
            }
            _ => Granularity::Monthly,
        },
        DashboardWindow::Year | DashboardWindow::All => Granularity::Monthly,
    }
}

pub fn bucket_key(ts: DateTime<Utc>, granularity: Granularity) -> String {
    match granularity {
        Granularity::Hourly => format!("{}:00", ts.hour()),
        Granularity::Daily => ts.format("%b %-d").to_string(),
        Granularity::Monthly => ts.format("%b %Y").to_string(),
    }
}

/// Pure recompute over the fetched snapshot. Orders must arrive in
/// chronological order so the trend buckets come out in chart order.
pub fn compute_metrics(
    orders: &[Order],
    items: &[OrderItem],
    products: &[Product],
    b2b_leads: i64,
    granularity: Granularity,
) -> DashboardMetrics {
    let mut revenue: i64 = 0;
    let mut active_orders: i64 = 0;
    let mut breakdown = StatusBreakdown::default();
    let mut trend: Vec<(String, i64)> = Vec::new();

    for order in orders {
        if order.status != OrderStatus::Cancelled {
            revenue += order.total_amount;
        }
        if order.status.is_active() {
            active_orders += 1;
        }
        match order.status {
            OrderStatus::Pending => breakdown.pending += 1,
            OrderStatus::Processing => breakdown.processing += 1,
            OrderStatus::Completed => breakdown.completed += 1,
            OrderStatus::Cancelled => breakdown.cancelled += 1,
        }

        // The bucket exists even when everything in it was cancelled, so the
        // chart keeps its time axis intact.
        let key = bucket_key(order.created_at, granularity);
        if !trend.iter().any(|(k, _)| *k == key) {
            trend.push((key.clone(), 0));
        }
        if order.status != OrderStatus::Cancelled {
            if let Some((_, amount)) = trend.iter_mut().find(|(k, _)| *k == key) {
                *amount += order.total_amount;
            }
        }
    }

    let low_stock = products
        .iter()
        .filter(|p| p.kind == ProductKind::RoastedRetail && p.retail_stock < LOW_STOCK_THRESHOLD)
        .count() as i64;

    let mut sales: Vec<(String, i64)> = Vec::new();
    for item in items {
        let name = products
            .iter()
            .find(|p| p.id == item.product_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Unknown Item ({})", item.product_id));
        match sales.iter_mut().find(|(n, _)| *n == name) {
            Some((_, units)) => *units += i64::from(item.quantity),
            None => sales.push((name, i64::from(item.quantity))),
        }
    }
    sales.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sales.truncate(TOP_PRODUCT_LIMIT);

    DashboardMetrics {
        revenue,
        active_orders,
        b2b_leads,
        low_stock,
        status_breakdown: breakdown,
        granularity: granularity.as_str().to_string(),
        revenue_trend: trend
            .into_iter()
            .map(|(bucket, amount)| RevenuePoint { bucket, amount })
            .collect(),
        top_products: sales
            .into_iter()
            .map(|(name, units_sold)| TopProduct { name, units_sold })
            .collect(),
    }
}

pub async fn load_dashboard(
    state: &AppState,
    user: &AuthUser,
    query: DashboardQuery,
) -> AppResult<ApiResponse<DashboardMetrics>> {
    ensure_admin(user)?;
    let (metrics, _orders) = gather(state, &query, Utc::now()).await?;
    Ok(ApiResponse::success("Dashboard", metrics, Some(Meta::empty())))
}

/// The dashboard's download button: same snapshot, rendered as CSV.
pub async fn export_report(
    state: &AppState,
    user: &AuthUser,
    query: DashboardQuery,
) -> AppResult<String> {
    ensure_admin(user)?;
    let now = Utc::now();
    let (metrics, orders) = gather(state, &query, now).await?;
    let summary = ReportSummary {
        revenue: metrics.revenue,
        active_orders: metrics.active_orders,
        b2b_leads: metrics.b2b_leads,
        low_stock: metrics.low_stock,
    };
    Ok(export::orders_csv(now, &summary, &orders))
}

async fn gather(
    state: &AppState,
    query: &DashboardQuery,
    now: DateTime<Utc>,
) -> AppResult<(DashboardMetrics, Vec<Order>)> {
    let window = query.window.unwrap_or_default();
    let (start, end) = resolve_window(query, now);
    let granularity = pick_granularity(window, start, end, now);

    let mut finder = Orders::find().order_by_asc(OrderCol::CreatedAt);
    if let Some(start) = start {
        finder = finder.filter(OrderCol::CreatedAt.gte(start));
    }
    if let Some(end) = end {
        finder = finder.filter(OrderCol::CreatedAt.lte(end));
    }
    let orders: Vec<Order> = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_service::order_from_entity)
        .collect();

    // Items only for the fetched orders, so top sellers respect the window.
    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let items: Vec<OrderItem> = if order_ids.is_empty() {
        Vec::new()
    } else {
        OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(order_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(order_service::order_item_from_entity)
            .collect()
    };

    let products: Vec<Product> = Products::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(catalog_service::product_from_entity)
        .collect();

    let leads: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM sample_requests
        WHERE ($1::timestamptz IS NULL OR created_at >= $1)
          AND ($2::timestamptz IS NULL OR created_at <= $2)
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_one(&state.pool)
    .await?;

    let metrics = compute_metrics(&orders, &items, &products, leads.0, granularity);
    Ok((metrics, orders))
}
