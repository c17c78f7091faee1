// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde_json::Value;

use crate::record::Record;

const RESULTS_FIELD: &str = "results";

/// Flattens whatever envelope the backend used into an ordered list of
/// records. Unknown shapes degrade to an empty list rather than an error.
pub fn normalize(payload: Option<Value>) -> Vec<Record> {
    match payload {
        Some(Value::Array(items)) => items.into_iter().map(Record::new).collect(),
        Some(Value::Object(mut map)) => match map.remove(RESULTS_FIELD) {
            Some(Value::Array(items)) => items.into_iter().map(Record::new).collect(),
            Some(other) => {
                map.insert(RESULTS_FIELD.to_owned(), other);
                vec![Record::new(Value::Object(map))]
            }
            None => vec![Record::new(Value::Object(map))],
        },
        Some(_) | None => Vec::new(),
    }
}

/// Parses a response body and normalizes it. A body that is not JSON,
/// including an empty one, is an error.
pub fn normalize_body(body: &str) -> Result<Vec<Record>, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    Ok(normalize(Some(value)))
}

#[cfg(test)]
mod tests {
    use super::{normalize, normalize_body};
    use crate::Record;
    use serde_json::json;

    fn records(values: &[serde_json::Value]) -> Vec<Record> {
        values.iter().cloned().map(Record::new).collect()
    }

    #[test]
    fn bare_array_is_returned_unchanged() {
        let a = json!({"id": 1});
        let b = json!({"id": 2});
        assert_eq!(
            normalize(Some(json!([a.clone(), b.clone()]))),
            records(&[a, b])
        );
    }

    #[test]
    fn paginated_envelope_yields_inner_results() {
        let payload = json!({"count": 2, "next": null, "results": [{"id": 1}, {"id": 2}]});
        assert_eq!(
            normalize(Some(payload)),
            records(&[json!({"id": 1}), json!({"id": 2})])
        );
    }

    #[test]
    fn single_mapping_becomes_one_record() {
        assert_eq!(normalize(Some(json!({"id": 1}))), records(&[json!({"id": 1})]));
    }

    #[test]
    fn results_that_are_not_a_list_keep_the_mapping_whole() {
        let payload = json!({"results": "pending", "id": 9});
        assert_eq!(normalize(Some(payload.clone())), records(&[payload]));
    }

    #[test]
    fn null_missing_and_scalars_become_empty() {
        assert!(normalize(None).is_empty());
        assert!(normalize(Some(json!(null))).is_empty());
        assert!(normalize(Some(json!(42))).is_empty());
        assert!(normalize(Some(json!("teams"))).is_empty());
    }

    #[test]
    fn body_parsing_rejects_blank_and_invalid_input() {
        assert!(normalize_body("").is_err());
        assert!(normalize_body("  \n ").is_err());
        assert!(normalize_body("[]").expect("empty list").is_empty());
        assert_eq!(
            normalize_body("[{\"name\":\"Falcons\"}]").expect("valid body"),
            records(&[json!({"name": "Falcons"})])
        );
        assert!(normalize_body("<html>").is_err());
    }
}
