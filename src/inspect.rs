//! Emptiness checks
//!
//! Evaluated in order, first match wins:
//! 1. absent or `null` is empty
//! 2. booleans are never empty
//! 3. numbers are never empty, zero included
//! 4. `""`, `[]` and `{}` are empty
//! 5. live nodes answer for themselves
//! 6. lists and mappings are empty when every member is
//! 7. anything else is not empty
//!
//! Nothing here is cached: a change anywhere below a node shows up the
//! next time any ancestor is asked.

use serde_json::Value;

use crate::property::{PropertyNode, PropertyValue, PropertyView};

/// Whether plain data carries no information
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(_) | Value::Number(_) => false,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.iter().all(is_empty_value),
        Value::Object(map) => map.values().all(is_empty_value),
    }
}

/// Whether the result of a `get` carries no information
pub fn is_empty_view(view: Option<PropertyView<'_>>) -> bool {
    match view {
        None => true,
        Some(PropertyView::Value(value)) => is_empty_value(value),
        Some(PropertyView::Node(node)) => node.is_empty(None),
        Some(PropertyView::Properties(properties)) => {
            properties.iter().all(|(_, child)| child.is_empty(None))
        }
        Some(PropertyView::Items(items)) => items.iter().all(PropertyValue::is_empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert!(is_empty_value(&Value::Null));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!(true)));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(0.0)));
        assert!(is_empty_value(&json!("")));
        assert!(!is_empty_value(&json!("x")));
        assert!(!is_empty_value(&json!("0")));
    }

    #[test]
    fn test_containers_recurse() {
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(is_empty_value(&json!({"a": null, "b": "", "c": [null, {}]})));
        assert!(!is_empty_value(&json!({"a": null, "b": false})));
        assert!(!is_empty_value(&json!([null, 0])));
    }

    #[test]
    fn test_absent_view() {
        assert!(is_empty_view(None));
        assert!(!is_empty_view(Some(PropertyView::Value(&json!("x")))));
        assert!(is_empty_view(Some(PropertyView::Items(&[]))));
    }
}
