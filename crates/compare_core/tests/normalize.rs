use compare_core::{normalize, CanonicalResult, ParsedPrice, PayloadShape, Platform, TaskStatus};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    compare_logging::initialize_for_tests();
}

#[test]
fn flat_shape_is_used_as_is() {
    init_logging();
    let result = normalize(&json!({"prices": {"amazon": "500", "flipkart": "N/A"}}));

    assert_eq!(result.len(), 2);
    assert_eq!(result.price(Platform::Amazon), Some(ParsedPrice::Amount(500.0)));
    assert_eq!(result.price(Platform::Flipkart), Some(ParsedPrice::Unavailable));
    assert_eq!(result.price(Platform::Myntra), None);
    assert_eq!(result.status(Platform::Amazon), Some(TaskStatus::Completed));
    assert_eq!(result.status(Platform::Flipkart), Some(TaskStatus::Completed));
}

#[test]
fn task_shape_matches_flat_shape() {
    init_logging();
    let flat = normalize(&json!({"prices": {"amazon": "500", "flipkart": "N/A"}}));
    let tasks = normalize(&json!({"tasks": {"amazon": {"price": "500"}, "flipkart": "N/A"}}));

    assert_eq!(flat, tasks);
}

#[test]
fn key_order_does_not_matter() {
    init_logging();
    let forward = normalize(&json!({"prices": {"amazon": "₹999", "myntra": "₹1,099"}}));
    let reverse = normalize(&json!({"prices": {"myntra": "₹1,099", "amazon": "₹999"}}));

    assert_eq!(forward, reverse);
    let platforms: Vec<_> = forward.prices().map(|(platform, _)| platform).collect();
    assert_eq!(platforms, vec![Platform::Amazon, Platform::Myntra]);
}

#[test]
fn prices_win_over_tasks_unless_empty() {
    init_logging();
    let payload = json!({
        "prices": {"amazon": "100"},
        "tasks": {"amazon": {"price": "200"}, "flipkart": {"price": "300"}}
    });
    let result = normalize(&payload);
    assert_eq!(result.len(), 1);
    assert_eq!(result.price(Platform::Amazon), Some(ParsedPrice::Amount(100.0)));

    let payload = json!({
        "prices": {},
        "tasks": {"amazon": {"price": "200"}}
    });
    assert_eq!(
        normalize(&payload).price(Platform::Amazon),
        Some(ParsedPrice::Amount(200.0))
    );
}

#[test]
fn missing_fields_give_empty_result() {
    init_logging();
    assert!(normalize(&json!({})).is_empty());
    assert!(normalize(&json!({"product_name": "shoes"})).is_empty());
    assert!(normalize(&json!([1, 2, 3])).is_empty());
    assert_eq!(PayloadShape::detect(&json!({"tasks": null})), PayloadShape::Empty);
}

#[test]
fn falsy_task_price_omits_platform() {
    init_logging();
    let result = normalize(&json!({
        "tasks": {
            "amazon": {"price": ""},
            "flipkart": {"price": 0},
            "myntra": {"task_id": "t-1", "status": "queued"}
        }
    }));
    assert!(result.is_empty());
}

#[test]
fn unknown_platforms_are_ignored() {
    init_logging();
    let result = normalize(&json!({"prices": {"ebay": "10", "AMAZON": "20"}}));
    assert_eq!(result.len(), 1);
    assert_eq!(result.price(Platform::Amazon), Some(ParsedPrice::Amount(20.0)));
}

#[test]
fn numeric_and_odd_flat_values() {
    init_logging();
    let result = normalize(&json!({
        "prices": {"amazon": 15999, "flipkart": null, "myntra": -5}
    }));
    assert_eq!(result.price(Platform::Amazon), Some(ParsedPrice::Amount(15_999.0)));
    assert_eq!(result.price(Platform::Flipkart), Some(ParsedPrice::Unavailable));
    assert_eq!(result.price(Platform::Myntra), Some(ParsedPrice::Unavailable));
}

#[test]
fn backend_task_failures_keep_their_status() {
    init_logging();
    let result = normalize(&json!({
        "tasks": {
            "amazon": {"price": "₹45,999"},
            "flipkart": {"error": "Failed to start task: quota exceeded"},
            "myntra": {"task_id": "t-9", "status": "timeout"}
        }
    }));

    assert_eq!(result.status(Platform::Amazon), Some(TaskStatus::Completed));
    assert_eq!(result.status(Platform::Flipkart), Some(TaskStatus::Failed));
    assert_eq!(result.status(Platform::Myntra), Some(TaskStatus::Timeout));
    assert_eq!(result.price(Platform::Flipkart), Some(ParsedPrice::Unavailable));
    assert_eq!(
        result.error(Platform::Flipkart),
        Some("Failed to start task: quota exceeded")
    );
}

#[test]
fn fill_missing_completes_every_platform() {
    let mut result: CanonicalResult = [(Platform::Flipkart, ParsedPrice::Amount(10.0))]
        .into_iter()
        .collect();
    result.fill_missing();

    assert_eq!(result.len(), Platform::ALL.len());
    for platform in Platform::ALL {
        assert_eq!(result.status(platform), Some(TaskStatus::Completed));
    }
    assert_eq!(result.price(Platform::Amazon), Some(ParsedPrice::Unavailable));
    assert_eq!(result.price(Platform::Flipkart), Some(ParsedPrice::Amount(10.0)));
}
