use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::CartLine,
    catalog::RetailSort,
    dto::{
        catalog::{CreateProductRequest, ProductList, UpdateProductRequest, VisibilityRequest},
        dashboard::{DashboardMetrics, RevenuePoint, StatusBreakdown, TopProduct},
        events::{CreateEventRequest, EventBoard, EventList, UpdateEventStatusRequest},
        orders::{CheckoutRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest},
        samples::{CreateSampleRequest, SampleRequestList, UpdateSampleStatusRequest},
    },
    models::{
        Event, EventStatus, Order, OrderItem, OrderStatus, Product, ProductKind, SampleRequest,
        SampleStatus,
    },
    response::{ApiResponse, Meta},
    routes::{catalog, dashboard, events, health, orders, params, samples},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalog::list_retail,
        catalog::list_trade,
        catalog::list_admin,
        catalog::create_product,
        catalog::update_product,
        catalog::set_visibility,
        orders::checkout,
        orders::list_orders,
        orders::export_report,
        orders::get_order,
        orders::update_order_status,
        orders::packing_slip,
        samples::create_sample_request,
        samples::list_sample_requests,
        samples::update_sample_status,
        events::list_events,
        events::list_events_admin,
        events::create_event,
        events::update_event_status,
        dashboard::load_dashboard
    ),
    components(
        schemas(
            Product,
            ProductKind,
            Order,
            OrderItem,
            OrderStatus,
            SampleRequest,
            SampleStatus,
            Event,
            EventStatus,
            CartLine,
            RetailSort,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            OrderList,
            OrderWithItems,
            CreateProductRequest,
            UpdateProductRequest,
            VisibilityRequest,
            ProductList,
            CreateSampleRequest,
            UpdateSampleStatusRequest,
            SampleRequestList,
            CreateEventRequest,
            UpdateEventStatusRequest,
            EventList,
            EventBoard,
            DashboardMetrics,
            StatusBreakdown,
            RevenuePoint,
            TopProduct,
            params::StatusFilter,
            params::ListQuery,
            params::RetailCatalogQuery,
            params::TradeCatalogQuery,
            params::DashboardWindow,
            params::DashboardQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<SampleRequestList>,
            ApiResponse<EventBoard>,
            ApiResponse<DashboardMetrics>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Retail and trade catalogs plus admin product management"),
        (name = "Orders", description = "Checkout and order lifecycle"),
        (name = "Samples", description = "B2B sample requests"),
        (name = "Events", description = "Public events and admin toggles"),
        (name = "Dashboard", description = "Reporting and exports"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
