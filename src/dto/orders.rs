use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cart::CartLine;
use crate::models::{Order, OrderItem};

/// Checkout payload: contact details plus the client-held cart snapshot.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub shipping_address: String,
    /// User-typed mobile-money receipt code; verified manually by staff.
    pub payment_reference: String,
    pub items: Vec<CartLine>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
