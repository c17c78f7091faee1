// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One item of a fetched collection. The schema is owned by the backend, so
/// the record keeps the parsed JSON untouched and answers field lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Field lookup. Null counts as absent; non-mapping records have no fields.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0
            .as_object()
            .and_then(|map| map.get(field))
            .filter(|value| !value.is_null())
    }

    pub fn truthy(&self, field: &str) -> Option<&Value> {
        self.get(field).filter(|value| is_truthy(value))
    }

    /// Top-level string values in field order.
    pub fn string_values(&self) -> impl Iterator<Item = &str> {
        self.0
            .as_object()
            .into_iter()
            .flat_map(|map| map.values())
            .filter_map(Value::as_str)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a field value the way it shows up in a table cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return int.to_string();
            }
            if let Some(uint) = number.as_u64() {
                return uint.to_string();
            }
            match number.as_f64() {
                Some(float) if float.fract() == 0.0 && float.abs() < 1e15 => {
                    format!("{}", float as i64)
                }
                Some(float) => float.to_string(),
                None => number.to_string(),
            }
        }
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
