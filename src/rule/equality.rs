//! Structural equality over JSON values.

use std::cmp::Ordering;

use serde_json::{Number, Value};

/// Returns true if `a` and `b` are structurally equal.
///
/// Arrays compare element-wise in order, objects by key set and per-key
/// value regardless of key order, numbers by numeric value (`1 == 1.0`).
/// Values of different kinds are never equal, so `1` and `"1"` differ.
///
/// ```rust
/// use checkup::rule::deep_equal;
/// use serde_json::json;
///
/// assert!(deep_equal(&json!({"a": 1, "b": [1, 2]}), &json!({"b": [1, 2.0], "a": 1})));
/// assert!(!deep_equal(&json!(1), &json!("1")));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| deep_equal(x, y)))
        }
        (a, b) => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    compare_numbers(x, y) == Some(Ordering::Equal)
}

/// Orders two JSON numbers by value.
///
/// Integers compare exactly as `i64`/`u64`; `f64` is used only when one
/// side is a float.
pub(crate) fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return Some(x.cmp(&y));
    }
    // A negative i64 against a u64 above i64::MAX.
    if x.is_i64() && y.is_u64() {
        return Some(Ordering::Less);
    }
    if x.is_u64() && y.is_i64() {
        return Some(Ordering::Greater);
    }
    x.as_f64()?.partial_cmp(&y.as_f64()?)
}
