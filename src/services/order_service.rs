use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    cart,
    dto::orders::{CheckoutRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest},
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    export::{self, SlipLine},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderItem, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::{ListQuery, StatusFilter},
    state::AppState,
};

/// Default grind recorded when the storefront does not offer a choice.
const DEFAULT_GRIND: &str = "Whole Bean";

pub async fn checkout(
    state: &AppState,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    // Preconditions are checked before any database work.
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }
    if payload.items.iter().any(|line| line.quantity < 1) {
        return Err(AppError::BadRequest("Cart has invalid quantity".into()));
    }
    for (field, value) in [
        ("customer_name", &payload.customer_name),
        ("customer_phone", &payload.customer_phone),
        ("shipping_address", &payload.shipping_address),
        ("payment_reference", &payload.payment_reference),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }

    let total_amount: i64 = payload.items.iter().map(|line| line.line_total()).sum();
    let items_summary = cart::items_summary(&payload.items);
    // Receipt codes are compared by staff against the provider statement,
    // which prints them uppercase.
    let payment_reference = payload.payment_reference.trim().to_uppercase();

    // Order and items land in one transaction so a failed item insert can
    // never leave an orphaned order behind.
    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_name: Set(payload.customer_name.trim().to_string()),
        customer_phone: Set(payload.customer_phone.trim().to_string()),
        shipping_address: Set(payload.shipping_address.trim().to_string()),
        payment_reference: Set(payment_reference),
        total_amount: Set(total_amount),
        status: Set(OrderStatus::Pending),
        items_summary: Set(items_summary),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut order_items: Vec<OrderItem> = Vec::new();
    for line in &payload.items {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price_at_purchase: Set(line.unit_price),
            grind_type: Set(DEFAULT_GRIND.to_string()),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        order_items.push(order_item_from_entity(item));
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "checkout",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "total_amount": order.total_amount })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order placed",
        OrderWithItems {
            order: order_from_entity(order),
            items: order_items,
        },
        Some(Meta::empty()),
    ))
}

/// Admin listing: full table newest-first, then the panel's filter applied
/// in memory.
pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: ListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;

    let orders: Vec<Order> = Orders::find()
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let filtered = filter_orders(
        orders,
        query.status.unwrap_or_default(),
        query.q.as_deref().unwrap_or(""),
    );

    let meta = Meta::total(filtered.len() as i64);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: filtered },
        Some(meta),
    ))
}

/// Panel filter: status bucket plus case-insensitive search over customer
/// name and payment reference. Pure so it is testable without a database.
pub fn filter_orders(orders: Vec<Order>, status: StatusFilter, search: &str) -> Vec<Order> {
    let needle = search.trim().to_lowercase();
    orders
        .into_iter()
        .filter(|order| {
            let keep = match status {
                StatusFilter::All => true,
                StatusFilter::Active => order.status != OrderStatus::Completed,
                StatusFilter::Processing => order.status == OrderStatus::Processing,
                StatusFilter::Completed => order.status == OrderStatus::Completed,
            };
            if !keep {
                return false;
            }
            if needle.is_empty() {
                return true;
            }
            order.customer_name.to_lowercase().contains(&needle)
                || order.payment_reference.to_lowercase().contains(&needle)
        })
        .collect()
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Order found",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Advance an order through the forward-only transition table. Unknown
/// status names are bad requests; legal names unreachable from the current
/// state are conflicts.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let next = OrderStatus::parse(&payload.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown order status: {}", payload.status)))?;

    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if !existing.status.can_become(next) {
        return Err(AppError::InvalidTransition {
            from: existing.status.as_str().into(),
            to: next.as_str().into(),
        });
    }

    let mut active: OrderActive = existing.into();
    active.status = Set(next);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": order.status.as_str() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

/// Printable packing slip for one order, with product names resolved from
/// the catalog and unknown ids kept visible rather than dropped.
pub async fn packing_slip(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<String> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items: Vec<OrderItemModel> = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?;

    let product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
    let products = Products::find()
        .filter(ProdCol::Id.is_in(product_ids))
        .all(&state.orm)
        .await?;

    let lines: Vec<SlipLine> = items
        .iter()
        .map(|item| SlipLine {
            name: products
                .iter()
                .find(|p| p.id == item.product_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Unknown Item".to_string()),
            grind_type: item.grind_type.clone(),
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase,
        })
        .collect();

    Ok(export::packing_slip_html(&order_from_entity(order), &lines))
}

pub(crate) fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        customer_name: model.customer_name,
        customer_phone: model.customer_phone,
        shipping_address: model.shipping_address,
        payment_reference: model.payment_reference,
        total_amount: model.total_amount,
        status: model.status,
        items_summary: model.items_summary,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub(crate) fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        price_at_purchase: model.price_at_purchase,
        grind_type: model.grind_type,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
