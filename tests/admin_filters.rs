use chrono::{NaiveDate, Utc};
use coffee_trade_api::models::{
    Event, EventStatus, Order, OrderStatus, SampleRequest, SampleStatus,
};
use coffee_trade_api::routes::params::StatusFilter;
use coffee_trade_api::services::event_service::split_events;
use coffee_trade_api::services::order_service::filter_orders;
use coffee_trade_api::services::sample_service::filter_samples;
use uuid::Uuid;

fn order(name: &str, reference: &str, status: OrderStatus) -> Order {
    Order {
        id: Uuid::new_v4(),
        customer_name: name.to_string(),
        customer_phone: "+254700000001".to_string(),
        shipping_address: "Nairobi".to_string(),
        payment_reference: reference.to_string(),
        total_amount: 100_000,
        status,
        items_summary: "1 x Kenya AA".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample(company: &str, contact: &str, email: &str, status: SampleStatus) -> SampleRequest {
    SampleRequest {
        id: Uuid::new_v4(),
        product_id: None,
        coffee_name: "Gatomboya AA".to_string(),
        company_name: company.to_string(),
        contact_name: contact.to_string(),
        email: email.to_string(),
        courier: "DHL".to_string(),
        courier_account: None,
        notes: None,
        status,
        created_at: Utc::now(),
    }
}

fn event(title: &str, date: (i32, u32, u32), status: EventStatus) -> Event {
    Event {
        id: Uuid::new_v4(),
        title: title.to_string(),
        event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        tag: None,
        location: "Nairobi".to_string(),
        description: None,
        image_url: None,
        status,
        created_at: Utc::now(),
    }
}

#[test]
fn active_filter_hides_completed_orders_only() {
    let orders = vec![
        order("Alice", "QAA1", OrderStatus::Pending),
        order("Bob", "QBB2", OrderStatus::Processing),
        order("Carol", "QCC3", OrderStatus::Completed),
    ];
    let hits = filter_orders(orders, StatusFilter::Active, "");
    let names: Vec<&str> = hits.iter().map(|o| o.customer_name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[test]
fn order_search_spans_name_and_payment_reference() {
    let orders = vec![
        order("Alice Wanjiru", "QAA1", OrderStatus::Pending),
        order("Bob", "QXY9ALICE", OrderStatus::Pending),
        order("Carol", "QCC3", OrderStatus::Pending),
    ];
    let hits = filter_orders(orders, StatusFilter::All, "alice");
    assert_eq!(hits.len(), 2);
}

#[test]
fn order_status_and_search_combine() {
    let orders = vec![
        order("Alice", "QAA1", OrderStatus::Completed),
        order("Alice", "QAA2", OrderStatus::Processing),
    ];
    let hits = filter_orders(orders, StatusFilter::Processing, "alice");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].payment_reference, "QAA2");
}

#[test]
fn sample_processing_filter_includes_shipped() {
    let requests = vec![
        sample("Aromas GmbH", "Jo", "jo@aromas.de", SampleStatus::Processing),
        sample("Bean & Co", "Sam", "sam@bean.co", SampleStatus::Shipped),
        sample("Cup Ltd", "Kim", "kim@cup.io", SampleStatus::Pending),
        sample("Dripworks", "Ada", "ada@drip.io", SampleStatus::Completed),
    ];
    let hits = filter_samples(requests, StatusFilter::Processing, "");
    assert_eq!(hits.len(), 2);
}

#[test]
fn sample_search_spans_company_contact_and_email() {
    let requests = vec![
        sample("Aromas GmbH", "Jo", "jo@aromas.de", SampleStatus::Pending),
        sample("Bean & Co", "Aroma Sam", "sam@bean.co", SampleStatus::Pending),
        sample("Cup Ltd", "Kim", "kim@aromas.de", SampleStatus::Pending),
        sample("Dripworks", "Ada", "ada@drip.io", SampleStatus::Pending),
    ];
    let hits = filter_samples(requests, StatusFilter::All, "aroma");
    assert_eq!(hits.len(), 3);
}

#[test]
fn events_split_by_status_flag_not_by_date() {
    // A past-dated event flagged upcoming stays upcoming until an admin
    // toggles it.
    let events = vec![
        event("Harvest Tour", (2026, 11, 20), EventStatus::Upcoming),
        event("Cupping Night", (2026, 9, 5), EventStatus::Upcoming),
        event("Stale But Flagged", (2020, 1, 1), EventStatus::Upcoming),
        event("Auction Recap", (2026, 2, 14), EventStatus::Past),
        event("Roast Workshop", (2025, 6, 1), EventStatus::Past),
    ];

    let (upcoming, past) = split_events(events);

    let upcoming_titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        upcoming_titles,
        vec!["Stale But Flagged", "Cupping Night", "Harvest Tour"]
    );

    let past_titles: Vec<&str> = past.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(past_titles, vec!["Auction Recap", "Roast Workshop"]);
}
