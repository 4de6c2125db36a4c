use crate::domain::error::{SuiteError, SuiteResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Dotted-path queries over a parsed JSON body.
///
/// A name segment applied to an array is projected over its elements, so
/// `data.id` on a listing yields the ids in document order. A numeric segment
/// applied to an array indexes it. Any element missing a segment fails the
/// whole query.
#[derive(Debug, Clone)]
pub struct JsonPath {
    root: Value,
}

impl JsonPath {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn get(&self, path: &str) -> SuiteResult<Value> {
        if path.is_empty() {
            return Ok(self.root.clone());
        }
        let segments: Vec<&str> = path.split('.').collect();
        select(&self.root, &segments).ok_or_else(|| SuiteError::MissingPath(path.to_string()))
    }

    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> SuiteResult<T> {
        serde_json::from_value(self.get(path)?).map_err(SuiteError::deserialization::<T>)
    }

    pub fn get_list<T: DeserializeOwned>(&self, path: &str) -> SuiteResult<Vec<T>> {
        self.get_as(path)
    }
}

fn select(value: &Value, segments: &[&str]) -> Option<Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(value.clone());
    };

    match value {
        Value::Object(map) => select(map.get(*head)?, rest),
        Value::Array(items) => match head.parse::<usize>() {
            Ok(index) => select(items.get(index)?, rest),
            Err(_) => items
                .iter()
                .map(|item| select(item, segments))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
        },
        _ => None,
    }
}
