use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use coffee_trade_api::models::{Order, OrderItem, OrderStatus, Product, ProductKind};
use coffee_trade_api::routes::params::{DashboardQuery, DashboardWindow};
use coffee_trade_api::services::dashboard_service::{
    Granularity, LOW_STOCK_THRESHOLD, bucket_key, compute_metrics, pick_granularity,
    resolve_window,
};
use uuid::Uuid;

fn order_at(total: i64, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
    Order {
        id: Uuid::new_v4(),
        customer_name: "Customer".to_string(),
        customer_phone: "+254700000001".to_string(),
        shipping_address: "Nairobi".to_string(),
        payment_reference: "QAB12CD34E".to_string(),
        total_amount: total,
        status,
        items_summary: String::new(),
        created_at,
        updated_at: created_at,
    }
}

fn item(order: &Order, product_id: Uuid, quantity: i32) -> OrderItem {
    OrderItem {
        id: Uuid::new_v4(),
        order_id: order.id,
        product_id,
        quantity,
        price_at_purchase: 50_000,
        grind_type: "Whole Bean".to_string(),
        created_at: order.created_at,
    }
}

fn retail_product(name: &str, stock: i32) -> Product {
    Product {
        id: Uuid::new_v4(),
        kind: ProductKind::RoastedRetail,
        name: name.to_string(),
        description: None,
        image_url: None,
        is_active: true,
        price_kes: 95_000,
        original_price_kes: None,
        retail_stock: stock,
        roast_level: Some("Medium".to_string()),
        species: None,
        region: None,
        grade: None,
        process: None,
        cupping_score: None,
        available_bags: 0,
        created_at: Utc::now(),
    }
}

fn ts(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

// Revenue excludes cancelled orders and matches manual recomputation.
#[test]
fn revenue_excludes_cancelled_to_the_cent() {
    let orders = vec![
        order_at(100_050, OrderStatus::Pending, ts(2026, 3, 1, 9)),
        order_at(249_925, OrderStatus::Completed, ts(2026, 3, 2, 9)),
        order_at(999_999, OrderStatus::Cancelled, ts(2026, 3, 3, 9)),
        order_at(25, OrderStatus::Processing, ts(2026, 3, 4, 9)),
    ];

    let metrics = compute_metrics(&orders, &[], &[], 0, Granularity::Monthly);
    assert_eq!(metrics.revenue, 100_050 + 249_925 + 25);
    assert_eq!(metrics.active_orders, 2);
    assert_eq!(metrics.status_breakdown.pending, 1);
    assert_eq!(metrics.status_breakdown.processing, 1);
    assert_eq!(metrics.status_breakdown.completed, 1);
    assert_eq!(metrics.status_breakdown.cancelled, 1);
}

#[test]
fn low_stock_counts_retail_products_below_threshold_only() {
    let mut export_lot = retail_product("Export Lot", 0);
    export_lot.kind = ProductKind::GreenExport;

    let products = vec![
        retail_product("Low", LOW_STOCK_THRESHOLD - 1),
        retail_product("Exactly", LOW_STOCK_THRESHOLD),
        retail_product("Plenty", 50),
        export_lot,
    ];

    let metrics = compute_metrics(&[], &[], &products, 0, Granularity::Monthly);
    assert_eq!(metrics.low_stock, 1);
}

#[test]
fn top_products_ranks_by_units_and_labels_unknown_ids() {
    let kenya = retail_product("Kenya AA", 50);
    let ethiopia = retail_product("Ethiopia Natural", 50);
    let ghost_id = Uuid::new_v4();

    let o = order_at(1, OrderStatus::Completed, ts(2026, 3, 1, 9));
    let items = vec![
        item(&o, kenya.id, 3),
        item(&o, ethiopia.id, 5),
        item(&o, kenya.id, 1),
        item(&o, ghost_id, 2),
    ];
    let products = vec![kenya, ethiopia];

    let metrics = compute_metrics(&[o], &items, &products, 0, Granularity::Monthly);
    assert_eq!(metrics.top_products.len(), 3);
    assert_eq!(metrics.top_products[0].name, "Ethiopia Natural");
    assert_eq!(metrics.top_products[0].units_sold, 5);
    assert_eq!(metrics.top_products[1].name, "Kenya AA");
    assert_eq!(metrics.top_products[1].units_sold, 4);
    assert_eq!(
        metrics.top_products[2].name,
        format!("Unknown Item ({ghost_id})")
    );
}

#[test]
fn revenue_trend_buckets_stay_chronological_and_skip_cancelled_amounts() {
    let orders = vec![
        order_at(10_000, OrderStatus::Pending, ts(2026, 3, 1, 8)),
        order_at(20_000, OrderStatus::Completed, ts(2026, 3, 1, 15)),
        order_at(40_000, OrderStatus::Cancelled, ts(2026, 3, 2, 9)),
        order_at(5_000, OrderStatus::Pending, ts(2026, 3, 3, 9)),
    ];

    let metrics = compute_metrics(&orders, &[], &[], 0, Granularity::Daily);
    let buckets: Vec<(&str, i64)> = metrics
        .revenue_trend
        .iter()
        .map(|p| (p.bucket.as_str(), p.amount))
        .collect();
    // The cancelled day keeps its bucket with zero revenue.
    assert_eq!(
        buckets,
        vec![("Mar 1", 30_000), ("Mar 2", 0), ("Mar 3", 5_000)]
    );
}

#[test]
fn bucket_keys_follow_granularity() {
    let at = ts(2026, 3, 7, 14);
    assert_eq!(bucket_key(at, Granularity::Hourly), "14:00");
    assert_eq!(bucket_key(at, Granularity::Daily), "Mar 7");
    assert_eq!(bucket_key(at, Granularity::Monthly), "Mar 2026");
}

#[test]
fn window_resolution_matches_filter_type() {
    let now = ts(2026, 3, 15, 10);

    let q = |window| DashboardQuery {
        window: Some(window),
        start: None,
        end: None,
    };

    let (start, end) = resolve_window(&q(DashboardWindow::Today), now);
    assert_eq!(start, Some(ts(2026, 3, 15, 0)));
    assert_eq!(end, None);

    let (start, _) = resolve_window(&q(DashboardWindow::Week), now);
    assert_eq!(start, Some(ts(2026, 3, 8, 10)));

    let (start, _) = resolve_window(&q(DashboardWindow::Month), now);
    assert_eq!(start, Some(ts(2026, 3, 1, 0)));

    let (start, _) = resolve_window(&q(DashboardWindow::Year), now);
    assert_eq!(start, Some(ts(2026, 1, 1, 0)));

    let (start, end) = resolve_window(&q(DashboardWindow::All), now);
    assert_eq!((start, end), (None, None));
}

#[test]
fn custom_window_is_inclusive_to_end_of_day() {
    let now = ts(2026, 3, 15, 10);
    let query = DashboardQuery {
        window: Some(DashboardWindow::Custom),
        start: NaiveDate::from_ymd_opt(2026, 3, 1),
        end: NaiveDate::from_ymd_opt(2026, 3, 10),
    };
    let (start, end) = resolve_window(&query, now);
    assert_eq!(start, Some(ts(2026, 3, 1, 0)));
    assert_eq!(
        end,
        Some(Utc.with_ymd_and_hms(2026, 3, 10, 23, 59, 59).unwrap())
    );
}

#[test]
fn granularity_picks_hourly_daily_monthly_by_window_size() {
    let now = ts(2026, 3, 15, 10);

    assert_eq!(
        pick_granularity(DashboardWindow::Today, None, None, now),
        Granularity::Hourly
    );
    assert_eq!(
        pick_granularity(DashboardWindow::Week, None, None, now),
        Granularity::Daily
    );
    assert_eq!(
        pick_granularity(DashboardWindow::Year, None, None, now),
        Granularity::Monthly
    );

    // Short custom spans chart daily, long ones monthly.
    let short = (Some(ts(2026, 3, 1, 0)), Some(ts(2026, 3, 10, 0)));
    assert_eq!(
        pick_granularity(DashboardWindow::Custom, short.0, short.1, now),
        Granularity::Daily
    );
    let long = (Some(ts(2025, 1, 1, 0)), Some(ts(2026, 3, 10, 0)));
    assert_eq!(
        pick_granularity(DashboardWindow::Custom, long.0, long.1, now),
        Granularity::Monthly
    );
}
