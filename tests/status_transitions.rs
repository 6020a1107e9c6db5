use coffee_trade_api::models::{EventStatus, OrderStatus, SampleStatus};

#[test]
fn order_transitions_are_forward_only() {
    use OrderStatus::*;

    assert!(Pending.can_become(Processing));
    assert!(Processing.can_become(Completed));

    // No skipping, no going back.
    assert!(!Pending.can_become(Completed));
    assert!(!Processing.can_become(Pending));
    assert!(!Completed.can_become(Pending));
    assert!(!Completed.can_become(Processing));
}

#[test]
fn completed_orders_are_terminal() {
    use OrderStatus::*;
    for next in [Pending, Processing, Completed, Cancelled] {
        assert!(!Completed.can_become(next));
    }
}

#[test]
fn cancelled_is_defined_but_unreachable() {
    use OrderStatus::*;
    // The state exists for reporting, but nothing transitions into or out of it.
    for from in [Pending, Processing, Completed, Cancelled] {
        assert!(!from.can_become(Cancelled));
        assert!(!Cancelled.can_become(from));
    }
    assert_eq!(OrderStatus::parse("cancelled"), Some(Cancelled));
}

#[test]
fn order_status_parses_case_insensitively_to_canonical_lowercase() {
    for (raw, expected) in [
        ("Pending", OrderStatus::Pending),
        ("PROCESSING", OrderStatus::Processing),
        ("  Completed ", OrderStatus::Completed),
    ] {
        let parsed = OrderStatus::parse(raw).expect("should parse");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), parsed.as_str().to_lowercase());
    }
    assert_eq!(OrderStatus::parse("dispatched"), None);
}

#[test]
fn active_means_pending_or_processing() {
    assert!(OrderStatus::Pending.is_active());
    assert!(OrderStatus::Processing.is_active());
    assert!(!OrderStatus::Completed.is_active());
    assert!(!OrderStatus::Cancelled.is_active());
}

#[test]
fn sample_transitions_treat_processing_and_shipped_as_one_stage() {
    use SampleStatus::*;

    assert!(Pending.can_become(Processing));
    assert!(Pending.can_become(Shipped));
    assert!(Processing.can_become(Completed));
    assert!(Shipped.can_become(Completed));

    assert!(!Pending.can_become(Completed));
    assert!(!Completed.can_become(Pending));
    assert!(!Completed.can_become(Shipped));

    assert!(Processing.is_in_fulfilment());
    assert!(Shipped.is_in_fulfilment());
    assert!(!Pending.is_in_fulfilment());
}

#[test]
fn sample_status_parses_shipped_synonym() {
    assert_eq!(SampleStatus::parse("Shipped"), Some(SampleStatus::Shipped));
    assert_eq!(SampleStatus::parse("shipped").map(|s| s.as_str()), Some("shipped"));
}

#[test]
fn event_status_toggles_both_ways() {
    assert_eq!(EventStatus::Upcoming.toggled(), EventStatus::Past);
    assert_eq!(EventStatus::Past.toggled(), EventStatus::Upcoming);
    assert_eq!(EventStatus::Upcoming.toggled().toggled(), EventStatus::Upcoming);

    assert_eq!(EventStatus::parse("UPCOMING"), Some(EventStatus::Upcoming));
    assert_eq!(EventStatus::parse("past"), Some(EventStatus::Past));
    assert_eq!(EventStatus::parse("ongoing"), None);
}
