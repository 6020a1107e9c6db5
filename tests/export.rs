use chrono::{TimeZone, Utc};
use coffee_trade_api::export::{ReportSummary, SlipLine, format_kes, orders_csv, packing_slip_html};
use coffee_trade_api::models::{Order, OrderStatus};
use uuid::Uuid;

fn order(name: &str, address: &str, total: i64, status: OrderStatus) -> Order {
    Order {
        id: Uuid::new_v4(),
        customer_name: name.to_string(),
        customer_phone: "+254700000001".to_string(),
        shipping_address: address.to_string(),
        payment_reference: "QAB12CD34E".to_string(),
        total_amount: total,
        status,
        items_summary: "2 x Kenya AA".to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
    }
}

#[test]
fn format_kes_groups_thousands_and_keeps_cents() {
    assert_eq!(format_kes(0), "0.00");
    assert_eq!(format_kes(5), "0.05");
    assert_eq!(format_kes(100_000), "1,000.00");
    assert_eq!(format_kes(123_456_789), "1,234,567.89");
    assert_eq!(format_kes(-95_050), "-950.50");
}

#[test]
fn csv_starts_with_summary_block_then_blank_line_then_header() {
    let generated = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
    let summary = ReportSummary {
        revenue: 100_000,
        active_orders: 2,
        b2b_leads: 3,
        low_stock: 1,
    };
    let csv = orders_csv(generated, &summary, &[order("Alice", "Nairobi", 100_000, OrderStatus::Pending)]);

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Report Generated,2026-03-15 12:00:00 UTC");
    assert_eq!(lines[1], "Total Revenue,KSh 1,000.00");
    assert_eq!(lines[2], "Active Orders,2");
    assert_eq!(lines[3], "B2B Leads (Count),3");
    assert_eq!(lines[4], "Low Stock Alerts,1");
    assert_eq!(lines[5], "");
    assert!(lines[6].starts_with("Order ID,Date,Customer Name"));
    assert_eq!(lines.len(), 8);
}

// An address like `Flat "B", Moi Ave` must survive a round trip through a
// spreadsheet import.
#[test]
fn csv_escapes_embedded_double_quotes() {
    let generated = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
    let o = order(
        "Walter \"Duke\" Otieno",
        "Flat \"B\", Moi Ave",
        50_000,
        OrderStatus::Completed,
    );
    let csv = orders_csv(generated, &ReportSummary::default(), &[o]);

    assert!(csv.contains("\"Walter \"\"Duke\"\" Otieno\""));
    assert!(csv.contains("\"Flat \"\"B\"\", Moi Ave\""));
}

#[test]
fn csv_row_carries_order_fields_in_order() {
    let generated = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
    let o = order("Alice", "Nairobi", 123_450, OrderStatus::Processing);
    let id = o.id;
    let csv = orders_csv(generated, &ReportSummary::default(), &[o]);

    let row = csv.lines().last().expect("data row");
    assert_eq!(
        row,
        format!(
            "{id},2026-03-14,\"Alice\",\"+254700000001\",\"Nairobi\",QAB12CD34E,1234.50,processing,\"2 x Kenya AA\""
        )
    );
}

#[test]
fn packing_slip_lists_lines_and_total() {
    let o = order("Alice", "Nairobi", 172_000, OrderStatus::Pending);
    let lines = vec![
        SlipLine {
            name: "Kenya AA".to_string(),
            grind_type: "Whole Bean".to_string(),
            quantity: 2,
            price_at_purchase: 50_000,
        },
        SlipLine {
            name: "Ethiopia Natural".to_string(),
            grind_type: "Espresso".to_string(),
            quantity: 1,
            price_at_purchase: 72_000,
        },
    ];

    let html = packing_slip_html(&o, &lines);
    assert!(html.contains(&format!("Packing Slip #{}", o.id)));
    assert!(html.contains("Kenya AA"));
    assert!(html.contains("Whole Bean"));
    // 2 x 500.00
    assert!(html.contains("KSh 1,000.00"));
    assert!(html.contains("Total: KSh 1,720.00"));
    assert!(html.contains("<strong>Alice</strong>"));
}

#[test]
fn packing_slip_escapes_markup_in_free_text() {
    let mut o = order("Alice", "Nairobi", 1_000, OrderStatus::Pending);
    o.customer_name = "<script>alert(1)</script>".to_string();
    let html = packing_slip_html(&o, &[]);
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}
