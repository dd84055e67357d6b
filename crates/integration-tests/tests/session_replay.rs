//! Integration tests for scripted session replay.

#![allow(clippy::unwrap_used)]

use greenbasket_cart::script::{load_script, parse_script};
use greenbasket_cart::views::CartView;
use greenbasket_cart::{ScriptError, replay};
use greenbasket_core::Quantity;
use greenbasket_integration_tests::{builtin_session, dec, fixture};

#[test]
fn test_weekly_shop_replay() {
    let actions = load_script(&fixture("weekly_shop.yaml")).unwrap();
    let mut session = builtin_session();

    let report = replay(&mut session, &actions);

    assert_eq!(report.applied, 12);
    let failed: Vec<usize> = report.errors.iter().map(|e| e.index).collect();
    assert_eq!(failed, [11, 13]);
    assert!(report.errors[0].message.contains("Select a quantity"));
    assert_eq!(report.errors[1].message, "Product not found: 42");

    assert_eq!(report.summary.line_count, 3);
    assert_eq!(report.summary.total_item_count, Quantity::parse("3").unwrap());
    assert_eq!(report.summary.total_price, dec("192.5"));
}

#[test]
fn test_weekly_shop_cart_view() {
    let actions = load_script(&fixture("weekly_shop.yaml")).unwrap();
    let mut session = builtin_session();
    replay(&mut session, &actions);

    let view = CartView::new(session.cart(), "₹");

    let rows: Vec<(&str, &str, &str)> = view
        .items
        .iter()
        .map(|i| (i.name.as_str(), i.quantity.as_str(), i.line_total.as_str()))
        .collect();
    assert_eq!(
        rows,
        [
            ("Fresh Apples", "1", "₹120.00"),
            ("Tomatoes", "1.5", "₹60.00"),
            ("Spinach", "0.5", "₹12.50"),
        ]
    );
    assert_eq!(view.total, "₹192.50");
}

#[test]
fn test_report_serializes_to_json() {
    let actions = parse_script(r#"- { action: adjust, product: "7", delta: "2" }"#).unwrap();
    let mut session = builtin_session();
    let report = replay(&mut session, &actions);

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["applied"], 1);
    assert_eq!(json["summary"]["line_count"], 1);
    assert_eq!(json["summary"]["total_price"], "80");
    assert_eq!(json["summary"]["total_item_count"], "2");
}

#[test]
fn test_missing_script_file() {
    let result = load_script(&fixture("does_not_exist.yaml"));
    assert!(matches!(result, Err(ScriptError::Io(_))));
}

#[test]
fn test_oversized_adjustments_are_recorded_not_fatal() {
    let actions = parse_script(
        r#"
- { action: adjust, product: "7", delta: "1000000000000000000000000000" }
- { action: adjust, product: "7", delta: "1000000000000000000000000000" }
- { action: adjust, product: "7", delta: "79228162514264337593543950335" }
- { action: select, product: "10", delta: "79228162514264337593543950335" }
- { action: select, product: "10", delta: "1" }
- { action: add_selection, product: "10" }
"#,
    )
    .unwrap();
    let mut session = builtin_session();

    let report = replay(&mut session, &actions);

    assert_eq!(report.applied, 2);
    let failed: Vec<usize> = report.errors.iter().map(|e| e.index).collect();
    assert_eq!(failed, [1, 2, 4, 5]);
    assert!(
        report
            .errors
            .iter()
            .all(|e| e.message.starts_with("Quantity too large for product"))
    );
    assert_eq!(report.summary.line_count, 1);
    assert_eq!(
        report.summary.total_price,
        dec("40000000000000000000000000000")
    );
}
