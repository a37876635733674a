//! Reconciles the two payload shapes the search backend may answer with.
//!
//! A payload either carries a flat `prices` object (platform -> raw price)
//! or a `tasks` object (platform -> task result). The shape is decided once
//! by [`PayloadShape::detect`]; everything downstream only sees a
//! [`CanonicalResult`].

use compare_logging::compare_debug;
use serde_json::{Map, Value};

use crate::price::parse_price;
use crate::{CanonicalResult, ParsedPrice, Platform, TaskStatus};

const PRICES_FIELD: &str = "prices";
const TASKS_FIELD: &str = "tasks";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayloadShape<'a> {
    /// Platform -> raw price, used as-is.
    Flat(&'a Map<String, Value>),
    /// Platform -> task result (object with `price`, or a bare string).
    Tasks(&'a Map<String, Value>),
    /// Neither field usable; yields an empty mapping.
    Empty,
}

impl<'a> PayloadShape<'a> {
    /// A non-empty `prices` object wins over `tasks`.
    pub fn detect(payload: &'a Value) -> Self {
        match payload.get(PRICES_FIELD).and_then(Value::as_object) {
            Some(prices) if !prices.is_empty() => return PayloadShape::Flat(prices),
            _ => {}
        }
        match payload.get(TASKS_FIELD).and_then(Value::as_object) {
            Some(tasks) => PayloadShape::Tasks(tasks),
            None => PayloadShape::Empty,
        }
    }
}

/// Product name the backend echoed back, if any.
pub fn echoed_product_name(payload: &Value) -> Option<&str> {
    payload
        .get("product_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Normalize a backend payload into one price per known platform.
///
/// Platforms the payload does not mention are left out; unknown keys are
/// ignored.
pub fn normalize(payload: &Value) -> CanonicalResult {
    let mut result = CanonicalResult::new();

    match PayloadShape::detect(payload) {
        PayloadShape::Flat(prices) => {
            for (key, raw) in prices {
                if let Some(platform) = known_platform(key) {
                    result.record_price(platform, raw_price(raw));
                }
            }
        }
        PayloadShape::Tasks(tasks) => {
            for (key, task) in tasks {
                let Some(platform) = known_platform(key) else {
                    continue;
                };
                match task_outcome(task) {
                    TaskOutcome::Priced(price) => result.record_price(platform, price),
                    TaskOutcome::Failed { status, message } => {
                        result.record_failure(platform, status, message)
                    }
                    TaskOutcome::Absent => {
                        compare_debug!("Task for {} carries no price yet", platform);
                    }
                }
            }
        }
        PayloadShape::Empty => {
            compare_debug!("Payload has neither prices nor tasks");
        }
    }

    result
}

fn known_platform(key: &str) -> Option<Platform> {
    match key.parse::<Platform>() {
        Ok(platform) => Some(platform),
        Err(err) => {
            compare_debug!("Ignoring payload entry: {}", err);
            None
        }
    }
}

/// Numbers are taken at face value; anything that is neither text nor a
/// number counts as unavailable.
fn raw_price(raw: &Value) -> ParsedPrice {
    match raw {
        Value::String(text) => parse_price(text),
        Value::Number(number) => number
            .as_f64()
            .map(ParsedPrice::from)
            .unwrap_or(ParsedPrice::Unavailable),
        _ => ParsedPrice::Unavailable,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TaskOutcome {
    Priced(ParsedPrice),
    Failed { status: TaskStatus, message: String },
    Absent,
}

fn task_outcome(task: &Value) -> TaskOutcome {
    match task {
        Value::String(text) => TaskOutcome::Priced(parse_price(text)),
        Value::Object(fields) => {
            if let Some(price) = fields.get("price").filter(|price| is_truthy(price)) {
                return TaskOutcome::Priced(raw_price(price));
            }
            if let Some(message) = fields
                .get("error")
                .and_then(Value::as_str)
                .filter(|message| !message.trim().is_empty())
            {
                return TaskOutcome::Failed {
                    status: TaskStatus::Failed,
                    message: message.to_string(),
                };
            }
            match fields.get("status").and_then(Value::as_str) {
                Some("failed") => TaskOutcome::Failed {
                    status: TaskStatus::Failed,
                    message: "Task failed".to_string(),
                },
                Some("timeout") => TaskOutcome::Failed {
                    status: TaskStatus::Timeout,
                    message: "Task timed out".to_string(),
                },
                _ => TaskOutcome::Absent,
            }
        }
        _ => TaskOutcome::Absent,
    }
}

/// Empty strings, zero, `false` and `null` do not count as a price.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
