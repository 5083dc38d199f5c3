//! Field-level diffing for audit records
//!
//! Computes which top-level fields differ between two entity snapshots, and
//! renders a short human-readable summary of those differences.

use std::collections::BTreeSet;

use serde_json::{Map, Number, Value};

use super::record::ActionType;

/// Bookkeeping fields that change on every write and are never reported
pub const EXCLUDED_FIELDS: [&str; 2] = ["updated_at", "revision"];

/// Whether `field` is volatile bookkeeping
pub fn is_excluded(field: &str) -> bool {
    EXCLUDED_FIELDS.contains(&field)
}

/// Structural equality between two JSON values
///
/// Arrays compare element by element in order; objects compare by key set and
/// per-key value, regardless of insertion order; numbers compare by numeric
/// value, so `1` and `1.0` are equal.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| structurally_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, x)| {
                    y.get(key).is_some_and(|y| structurally_equal(x, y))
                })
        }
        _ => false,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    match (x.is_f64(), y.is_f64()) {
        (false, false) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_u64().is_some() && x.as_u64() == y.as_u64(),
        },
        (true, true) => x.as_f64() == y.as_f64(),
        (true, false) => integer_equals_float(y, x.as_f64()),
        (false, true) => integer_equals_float(x, y.as_f64()),
    }
}

/// Exact comparison; a float only matches an integer it converts back to
fn integer_equals_float(integer: &Number, float: Option<f64>) -> bool {
    let Some(f) = float else {
        return false;
    };
    if !f.is_finite() || f.fract() != 0.0 {
        return false;
    }

    if let Some(i) = integer.as_i64() {
        // 2^63 saturates on cast, so require the round trip
        f >= i64::MIN as f64 && f < i64::MAX as f64 && f as i64 == i
    } else if let Some(u) = integer.as_u64() {
        f >= 0.0 && f < u64::MAX as f64 && f as u64 == u
    } else {
        false
    }
}

fn reported_keys(object: &Map<String, Value>) -> BTreeSet<String> {
    object
        .keys()
        .filter(|key| !is_excluded(key))
        .cloned()
        .collect()
}

/// Fields to report as changed for one mutation
///
/// Creates report every field of the new snapshot, deletes every field of the
/// previous one, updates only the fields whose values differ (including
/// fields present on one side only). A snapshot that is missing or not a JSON
/// object counts as fully replaced: every field of the other side is reported.
/// The result is sorted and free of duplicates.
pub fn changed_fields(
    action: ActionType,
    previous: Option<&Value>,
    new: Option<&Value>,
) -> Vec<String> {
    let previous = previous.and_then(Value::as_object);
    let new = new.and_then(Value::as_object);

    let keys = match (action, previous, new) {
        (ActionType::Update, Some(previous), Some(new)) => {
            let mut keys = reported_keys(previous);
            keys.extend(reported_keys(new));
            keys.retain(|key| match (previous.get(key), new.get(key)) {
                (Some(before), Some(after)) => !structurally_equal(before, after),
                _ => true,
            });
            keys
        }
        (ActionType::Delete, Some(previous), _) => reported_keys(previous),
        (_, _, Some(new)) => reported_keys(new),
        (_, Some(previous), None) => reported_keys(previous),
        (_, None, None) => BTreeSet::new(),
    };

    keys.into_iter().collect()
}

/// Generate a human-readable diff between two snapshots
///
/// Returns a string describing the changes in a user-friendly format.
/// Only includes top-level field changes, and skips bookkeeping fields.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if is_excluded(key) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if !structurally_equal(before_val, after_val) => {
                        changes.push(format!(
                            "{}: {} -> {}",
                            key,
                            format_value(before_val),
                            format_value(after_val)
                        ));
                    }
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !is_excluded(key) && !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ => {
            if structurally_equal(before, after) {
                None
            } else {
                Some(format!(
                    "{} -> {}",
                    format_value(before),
                    format_value(after)
                ))
            }
        }
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_reports_all_but_excluded() {
        let new = json!({"title": "X", "campus": "Online", "updated_at": "t", "revision": 3});
        let fields = changed_fields(ActionType::Create, None, Some(&new));
        assert_eq!(fields, vec!["campus", "title"]);
    }

    #[test]
    fn test_delete_reports_previous_keys() {
        let previous = json!({"title": "X", "tags": ["a", "b"]});
        let fields = changed_fields(ActionType::Delete, Some(&previous), None);

        let as_set: BTreeSet<_> = fields.iter().map(String::as_str).collect();
        assert_eq!(as_set, BTreeSet::from(["tags", "title"]));
    }

    #[test]
    fn test_update_single_field() {
        let before = json!({"title": "Old", "campus": "Online", "tags": ["a"]});
        let after = json!({"title": "New", "campus": "Online", "tags": ["a"]});
        assert_eq!(
            changed_fields(ActionType::Update, Some(&before), Some(&after)),
            vec!["title"]
        );
    }

    #[test]
    fn test_update_only_bookkeeping_is_empty() {
        let before = json!({"title": "Same", "updated_at": "2025-01-01", "revision": 1});
        let after = json!({"title": "Same", "updated_at": "2025-02-01", "revision": 2});
        assert!(changed_fields(ActionType::Update, Some(&before), Some(&after)).is_empty());
    }

    #[test]
    fn test_update_added_and_removed_keys() {
        let before = json!({"title": "Same", "room": "B-12"});
        let after = json!({"title": "Same", "capacity": 20});
        assert_eq!(
            changed_fields(ActionType::Update, Some(&before), Some(&after)),
            vec!["capacity", "room"]
        );
    }

    #[test]
    fn test_update_null_versus_missing_counts_as_change() {
        let before = json!({"title": "Same", "campus": null});
        let after = json!({"title": "Same"});
        assert_eq!(
            changed_fields(ActionType::Update, Some(&before), Some(&after)),
            vec!["campus"]
        );
    }

    #[test]
    fn test_update_nested_composites() {
        let before = json!({"schedule": {"days": ["Tue", "Thu"], "hours": 3}});
        let same = json!({"schedule": {"hours": 3, "days": ["Tue", "Thu"]}});
        let reordered = json!({"schedule": {"hours": 3, "days": ["Thu", "Tue"]}});

        assert!(changed_fields(ActionType::Update, Some(&before), Some(&same)).is_empty());
        assert_eq!(
            changed_fields(ActionType::Update, Some(&before), Some(&reordered)),
            vec!["schedule"]
        );
    }

    #[test]
    fn test_maps_built_in_different_order_are_equal() {
        let mut first = Map::new();
        first.insert("a".into(), json!(1));
        first.insert("b".into(), json!([1, 2]));

        let mut second = Map::new();
        second.insert("b".into(), json!([1, 2]));
        second.insert("a".into(), json!(1));

        assert!(structurally_equal(&Value::Object(first), &Value::Object(second)));
    }

    #[test]
    fn test_large_integer_versus_nearby_float_is_a_change() {
        let before = json!({"n": 9007199254740993_i64});
        let after = json!({"n": 9007199254740992.0});
        assert_eq!(
            changed_fields(ActionType::Update, Some(&before), Some(&after)),
            vec!["n"]
        );

        assert!(structurally_equal(
            &json!(9007199254740992_i64),
            &json!(9007199254740992.0)
        ));
        assert!(!structurally_equal(&json!(u64::MAX), &json!(u64::MAX as f64)));
        assert!(!structurally_equal(&json!(i64::MAX), &json!(i64::MAX as f64)));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(structurally_equal(&json!(1), &json!(1.0)));
        assert!(structurally_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!structurally_equal(&json!(-1), &json!(u64::MAX)));
        assert!(!structurally_equal(&json!(1), &json!("1")));
        assert!(!structurally_equal(&json!([1]), &json!({"0": 1})));
        assert!(!structurally_equal(&json!(1), &json!(1.5)));
    }

    #[test]
    fn test_malformed_previous_counts_as_full_replace() {
        let previous = json!("not an object");
        let new = json!({"title": "X", "revision": 1});
        assert_eq!(
            changed_fields(ActionType::Update, Some(&previous), Some(&new)),
            vec!["title"]
        );
        assert_eq!(
            changed_fields(ActionType::Update, None, Some(&new)),
            vec!["title"]
        );
    }

    #[test]
    fn test_malformed_new_reports_previous_keys() {
        let previous = json!({"title": "X", "tags": []});
        assert_eq!(
            changed_fields(ActionType::Update, Some(&previous), Some(&json!([1, 2]))),
            vec!["tags", "title"]
        );
    }

    #[test]
    fn test_both_malformed_is_empty() {
        assert!(changed_fields(ActionType::Update, Some(&json!(1)), Some(&json!(2))).is_empty());
        assert!(changed_fields(ActionType::Create, None, None).is_empty());
    }

    #[test]
    fn test_create_with_malformed_new_falls_back_to_previous() {
        let previous = json!({"title": "X"});
        assert_eq!(
            changed_fields(ActionType::Create, Some(&previous), Some(&json!(null))),
            vec!["title"]
        );
    }

    #[test]
    fn test_generate_diff_summary() {
        let before = json!({"title": "Old", "capacity": 10, "revision": 1});
        let after = json!({"title": "New", "capacity": 10.0, "revision": 2, "room": "B"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("title: \"Old\" -> \"New\""));
        assert!(diff.contains("room: (added) -> \"B\""));
        assert!(!diff.contains("capacity"));
        assert!(!diff.contains("revision"));
    }

    #[test]
    fn test_generate_diff_no_changes() {
        let before = json!({"title": "Same", "revision": 1});
        let after = json!({"title": "Same", "revision": 2});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_generate_diff_removed_and_truncated() {
        let long = "a".repeat(100);
        let before = json!({"description": long, "room": "B"});
        let after = json!({"description": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
        assert!(diff.contains("room: \"B\" -> (removed)"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!("test")), "\"test\"");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1, "b": 2})), "{2 fields}");
    }
}
