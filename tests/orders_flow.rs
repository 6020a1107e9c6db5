use coffee_trade_api::{
    cart::CartLine,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        orders::{CheckoutRequest, UpdateOrderStatusRequest},
        samples::{CreateSampleRequest, UpdateSampleStatusRequest},
    },
    entity::products::ActiveModel as ProductActive,
    error::AppError,
    middleware::auth::AuthUser,
    models::{OrderStatus, ProductKind, SampleStatus},
    routes::params::{DashboardQuery, ListQuery, StatusFilter},
    services::{dashboard_service, order_service, sample_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Integration flow: storefront checkout -> admin advances the order ->
// a trade buyer requests a sample -> dashboard and export see everything.
#[tokio::test]
async fn checkout_status_and_reporting_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let admin = AuthUser {
        user_id: Uuid::new_v4(),
        role: "admin".into(),
    };

    // Seed one retail coffee.
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        kind: Set(ProductKind::RoastedRetail),
        name: Set("Kenya AA".into()),
        description: Set(Some("A coffee for testing".into())),
        image_url: Set(None),
        is_active: Set(true),
        price_kes: Set(50_000),
        original_price_kes: Set(None),
        retail_stock: Set(12),
        roast_level: Set(Some("Medium".into())),
        species: Set(None),
        region: Set(None),
        grade: Set(None),
        process: Set(None),
        cupping_score: Set(None),
        available_bags: Set(0),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    // Empty carts are rejected before anything is written.
    let rejected = order_service::checkout(
        &state,
        CheckoutRequest {
            customer_name: "Alice Wanjiru".into(),
            customer_phone: "+254700000001".into(),
            shipping_address: "Moi Avenue, Nairobi".into(),
            payment_reference: "qab12cd34e".into(),
            items: vec![],
        },
    )
    .await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));

    // Checkout: 2 x KSh 500.00.
    let checkout_resp = order_service::checkout(
        &state,
        CheckoutRequest {
            customer_name: "Alice Wanjiru".into(),
            customer_phone: "+254700000001".into(),
            shipping_address: "Moi Avenue, Nairobi".into(),
            payment_reference: "qab12cd34e".into(),
            items: vec![CartLine {
                product_id: product.id,
                name: "Kenya AA".into(),
                unit_price: 50_000,
                quantity: 2,
            }],
        },
    )
    .await?;
    let placed = checkout_resp.data.expect("checkout data");
    assert_eq!(placed.order.total_amount, 100_000);
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.order.items_summary, "2 x Kenya AA");
    // Receipt codes are stored uppercase.
    assert_eq!(placed.order.payment_reference, "QAB12CD34E");
    assert_eq!(placed.items.len(), 1);
    assert_eq!(placed.items[0].quantity, 2);
    assert_eq!(placed.items[0].price_at_purchase, 50_000);

    // Admin advances through the transition table.
    let processing = order_service::update_order_status(
        &state,
        &admin,
        placed.order.id,
        UpdateOrderStatusRequest {
            status: "Processing".into(),
        },
    )
    .await?;
    assert_eq!(
        processing.data.expect("order").status,
        OrderStatus::Processing
    );

    let completed = order_service::update_order_status(
        &state,
        &admin,
        placed.order.id,
        UpdateOrderStatusRequest {
            status: "completed".into(),
        },
    )
    .await?;
    assert_eq!(completed.data.expect("order").status, OrderStatus::Completed);

    // Completed is terminal.
    let stuck = order_service::update_order_status(
        &state,
        &admin,
        placed.order.id,
        UpdateOrderStatusRequest {
            status: "processing".into(),
        },
    )
    .await;
    assert!(matches!(stuck, Err(AppError::InvalidTransition { .. })));

    // The completed filter finds it.
    let listed = order_service::list_orders(
        &state,
        &admin,
        ListQuery {
            status: Some(StatusFilter::Completed),
            q: Some("alice".into()),
        },
    )
    .await?;
    let listed = listed.data.expect("order list");
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].id, placed.order.id);

    // Trade buyer asks for a sample.
    let request = sample_service::create_sample_request(
        &state,
        CreateSampleRequest {
            product_id: None,
            coffee_name: "Gatomboya AA".into(),
            company_name: "Aromas GmbH".into(),
            contact_name: "Jo Brandt".into(),
            email: "jo@aromas.de".into(),
            courier: "DHL".into(),
            courier_account: Some("1234567".into()),
            notes: None,
        },
    )
    .await?;
    let request = request.data.expect("sample request");
    assert_eq!(request.status, SampleStatus::Pending);

    let shipped = sample_service::update_sample_status(
        &state,
        &admin,
        request.id,
        UpdateSampleStatusRequest {
            status: "shipped".into(),
        },
    )
    .await?;
    assert_eq!(shipped.data.expect("request").status, SampleStatus::Shipped);

    // Dashboard over everything: one completed order, one B2B lead.
    let dashboard =
        dashboard_service::load_dashboard(&state, &admin, DashboardQuery::default()).await?;
    let metrics = dashboard.data.expect("metrics");
    assert_eq!(metrics.revenue, 100_000);
    assert_eq!(metrics.active_orders, 0);
    assert_eq!(metrics.b2b_leads, 1);

    // Export carries the order row and the summary block.
    let csv =
        dashboard_service::export_report(&state, &admin, DashboardQuery::default()).await?;
    assert!(csv.starts_with("Report Generated,"));
    assert!(csv.contains(&placed.order.id.to_string()));
    assert!(csv.contains("\"Alice Wanjiru\""));

    Ok(())
}

// Non-admin tokens are turned away from every admin surface.
#[tokio::test]
async fn admin_surfaces_reject_plain_users() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let user = AuthUser {
        user_id: Uuid::new_v4(),
        role: "user".into(),
    };

    let listed = order_service::list_orders(&state, &user, ListQuery::default()).await;
    assert!(matches!(listed, Err(AppError::Forbidden)));

    let dashboard =
        dashboard_service::load_dashboard(&state, &user, DashboardQuery::default()).await;
    assert!(matches!(dashboard, Err(AppError::Forbidden)));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    let pool = create_pool(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, sample_requests, events, audit_logs, products CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}
