use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Summary text used when an order would otherwise be created with an empty
/// items description.
pub const FALLBACK_SUMMARY: &str = "Standard Order (See Items)";

/// One cart line. Unique per product; `unit_price` is the KSh-cent price
/// snapshotted when the product was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub product_id: Uuid,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i32,
}

impl CartLine {
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// The client-held cart. Never touches the database: it is restored from
/// whatever the client persisted, mutated locally, and submitted wholesale
/// at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a persisted cart. Malformed or partially-invalid input never
    /// errors: garbage loads as an empty cart, duplicate product lines are
    /// merged, and non-positive quantities are dropped.
    pub fn from_json(raw: &str) -> Self {
        let parsed: Vec<CartLine> = serde_json::from_str(raw).unwrap_or_default();
        let mut cart = Self::new();
        for line in parsed {
            if line.quantity < 1 {
                continue;
            }
            match cart.find_mut(line.product_id) {
                Some(existing) => existing.quantity += line.quantity,
                None => cart.lines.push(line),
            }
        }
        cart
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.lines).unwrap_or_else(|_| "[]".to_string())
    }

    /// Add one unit of a product: increment the existing line, or append a
    /// new line with quantity 1.
    pub fn add(&mut self, product_id: Uuid, name: &str, unit_price: i64) {
        match self.find_mut(product_id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product_id,
                name: name.to_string(),
                unit_price,
                quantity: 1,
            }),
        }
    }

    /// Remove a line entirely. Returns false (without mutating) when the
    /// product is not in the cart.
    pub fn remove(&mut self, product_id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Order total in KSh cents.
    pub fn total(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Unit count across all lines, shown on the cart badge.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.quantity)).sum()
    }

    fn find_mut(&mut self, product_id: Uuid) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

/// Human-readable summary stored on the order for the admin panel, e.g.
/// `"2 x Kenya AA, 1 x Ethiopia Natural"`.
pub fn items_summary(lines: &[CartLine]) -> String {
    let summary = lines
        .iter()
        .map(|l| format!("{} x {}", l.quantity, l.name))
        .collect::<Vec<_>>()
        .join(", ");
    if summary.trim().is_empty() {
        FALLBACK_SUMMARY.to_string()
    } else {
        summary
    }
}
