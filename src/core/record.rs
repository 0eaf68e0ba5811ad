//! Flat records and their textual rendering.

use serde_json::{Map, Value};

/// One decoded item. Key order is the order the store delivered the attributes in.
pub type Record = Map<String, Value>;

/// Every record of one export run, in scan order.
pub type ResultSet = Vec<Record>;

/// Column names for a result set: the keys of its first record, in that record's order.
///
/// Returns `None` for an empty result set.
pub fn header_of(records: &[Record]) -> Option<Vec<String>> {
    records.first().map(|first| first.keys().cloned().collect())
}

/// Render a field as cell text.
///
/// Null renders empty; arrays and objects render as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_header_from_first_record_only() {
        let records = vec![
            record(json!({"id": "1", "name": "a"})),
            record(json!({"id": "2", "name": "b", "extra": true})),
        ];
        assert_eq!(header_of(&records), Some(vec!["id".to_string(), "name".to_string()]));
    }

    #[test]
    fn test_header_of_empty() {
        assert_eq!(header_of(&[]), None);
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("plain")), "plain");
        assert_eq!(render_value(&json!(12)), "12");
        assert_eq!(render_value(&json!(0.25)), "0.25");
        assert_eq!(render_value(&json!(false)), "false");
        assert_eq!(render_value(&Value::Null), "");
        assert_eq!(render_value(&json!(["a", 1])), r#"["a",1]"#);
        assert_eq!(render_value(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }
}
