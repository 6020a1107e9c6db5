use chrono::{DateTime, Utc};

use crate::models::Order;

/// Headline figures printed above the CSV rows; mirrors the dashboard tiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportSummary {
    pub revenue: i64,
    pub active_orders: i64,
    pub b2b_leads: i64,
    pub low_stock: i64,
}

/// Render KSh cents as a display amount with thousands grouping, e.g.
/// `1234550` -> `"12,345.50"`.
pub fn format_kes(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = cents / 100;
    let frac = cents % 100;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac:02}")
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Downloadable financial report: a summary block, a blank line, a header
/// row, then one row per order. Free-text fields are double-quoted with
/// embedded quotes doubled.
pub fn orders_csv(generated_at: DateTime<Utc>, summary: &ReportSummary, orders: &[Order]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Report Generated,{}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Total Revenue,KSh {}\n", format_kes(summary.revenue)));
    out.push_str(&format!("Active Orders,{}\n", summary.active_orders));
    out.push_str(&format!("B2B Leads (Count),{}\n", summary.b2b_leads));
    out.push_str(&format!("Low Stock Alerts,{}\n", summary.low_stock));
    out.push('\n');

    out.push_str(
        "Order ID,Date,Customer Name,Phone,Address,Payment Reference,Total (KSh),Status,Items Summary\n",
    );
    for order in orders {
        let row = [
            order.id.to_string(),
            order.created_at.format("%Y-%m-%d").to_string(),
            csv_quote(&order.customer_name),
            csv_quote(&order.customer_phone),
            csv_quote(&order.shipping_address),
            order.payment_reference.clone(),
            format!("{}.{:02}", order.total_amount / 100, order.total_amount % 100),
            order.status.as_str().to_string(),
            csv_quote(&order.items_summary),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// One printable line on the packing slip; the caller resolves product names.
#[derive(Debug, Clone)]
pub struct SlipLine {
    pub name: String,
    pub grind_type: String,
    pub quantity: i32,
    pub price_at_purchase: i64,
}

impl SlipLine {
    fn line_total(&self) -> i64 {
        self.price_at_purchase * i64::from(self.quantity)
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Stand-alone printable packing slip for one order. Generated on demand for
/// the browser print dialog, never persisted.
pub fn packing_slip_html(order: &Order, lines: &[SlipLine]) -> String {
    let rows = lines
        .iter()
        .map(|line| {
            format!(
                "<tr><td>{} <br><small>{}</small></td><td>{}</td><td>KSh {}</td><td>KSh {}</td></tr>",
                html_escape(&line.name),
                html_escape(&line.grind_type),
                line.quantity,
                format_kes(line.price_at_purchase),
                format_kes(line.line_total()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Packing Slip #{id}</title>
<style>
  body {{ font-family: sans-serif; padding: 2rem; color: #333; max-width: 800px; margin: 0 auto; }}
  .header {{ display: flex; justify-content: space-between; margin-bottom: 2rem; border-bottom: 2px solid #d4af37; padding-bottom: 1rem; }}
  .logo {{ font-size: 1.5rem; font-weight: bold; color: #0b2318; }}
  .ship-to {{ margin-bottom: 2rem; background: #f9f9f9; padding: 1.5rem; border-radius: 8px; }}
  table {{ width: 100%; border-collapse: collapse; margin-bottom: 2rem; }}
  th, td {{ text-align: left; padding: 0.8rem; border-bottom: 1px solid #eee; }}
  th {{ background-color: #f0f0f0; }}
  .total {{ text-align: right; font-size: 1.2rem; font-weight: bold; }}
</style>
</head>
<body>
<div class="header">
  <div class="logo">Coffee World Investments</div>
  <div>
    <p><strong>Order #{id}</strong></p>
    <p>Date: {date}</p>
    <p>Payment: {payment}</p>
  </div>
</div>
<div class="ship-to">
  <h3>Ship To:</h3>
  <p><strong>{name}</strong></p>
  <p>{phone}</p>
  <p>{address}</p>
</div>
<table>
  <thead><tr><th>Item</th><th>Quantity</th><th>Price</th><th>Total</th></tr></thead>
  <tbody>
{rows}
  </tbody>
</table>
<div class="total">Total: KSh {total}</div>
<p>Coffee World Investments Limited | Nairobi, Kenya</p>
</body>
</html>
"#,
        id = order.id,
        date = order.created_at.format("%Y-%m-%d"),
        payment = html_escape(&order.payment_reference),
        name = html_escape(&order.customer_name),
        phone = html_escape(&order.customer_phone),
        address = html_escape(&order.shipping_address),
        rows = rows,
        total = format_kes(order.total_amount),
    )
}
