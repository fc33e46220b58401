//! Null filtering for outbound JSON bodies.
//!
//! The API treats an explicit `null` differently from an absent field on some
//! endpoints, so request bodies never carry nulls. [`filter_nulls`] removes
//! every null-valued key, recursively, and drops nested objects that end up
//! empty because of that removal.
//!
//! Collections that were empty before filtering are kept by default; see
//! [`EmptyCollections`].
//!
//! # Example
//!
//! ```rust
//! use opp_api::rest::filter_nulls;
//! use serde_json::json;
//!
//! let body = json!({"a": 1, "b": null, "c": {"d": null, "e": 2}, "f": {"g": null}});
//! let filtered = filter_nulls(body.as_object().unwrap());
//! assert_eq!(serde_json::Value::Object(filtered), json!({"a": 1, "c": {"e": 2}}));
//! ```

use serde_json::{Map, Value};

/// What happens to objects and arrays that were already empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyCollections {
    /// Keep `{}` and `[]` that the caller sent on purpose.
    #[default]
    Preserve,
    /// Drop every key whose value is an empty object or array.
    Drop,
}

/// A configurable null filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullFilter {
    empty_collections: EmptyCollections,
}

impl NullFilter {
    /// Creates a filter that preserves intentionally-empty collections.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            empty_collections: EmptyCollections::Preserve,
        }
    }

    /// Sets the policy for collections that were empty before filtering.
    #[must_use]
    pub const fn empty_collections(mut self, policy: EmptyCollections) -> Self {
        self.empty_collections = policy;
        self
    }

    /// Returns a copy of `map` without null-valued keys.
    ///
    /// Key order is preserved.
    #[must_use]
    pub fn filter(&self, map: &Map<String, Value>) -> Map<String, Value> {
        let mut filtered = Map::with_capacity(map.len());

        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::Object(nested) => {
                    if nested.is_empty() {
                        if self.empty_collections == EmptyCollections::Preserve {
                            filtered.insert(key.clone(), Value::Object(Map::new()));
                        }
                        continue;
                    }
                    let nested = self.filter(nested);
                    if !nested.is_empty() {
                        filtered.insert(key.clone(), Value::Object(nested));
                    }
                }
                Value::Array(items) => {
                    if items.is_empty() && self.empty_collections == EmptyCollections::Drop {
                        continue;
                    }
                    filtered.insert(key.clone(), Value::Array(self.filter_items(items)));
                }
                scalar => {
                    filtered.insert(key.clone(), scalar.clone());
                }
            }
        }

        filtered
    }

    /// Filters object elements of a list; other elements pass through.
    fn filter_items(&self, items: &[Value]) -> Vec<Value> {
        items
            .iter()
            .map(|item| match item {
                Value::Object(nested) => Value::Object(self.filter(nested)),
                Value::Array(inner) => Value::Array(self.filter_items(inner)),
                other => other.clone(),
            })
            .collect()
    }
}

/// Removes null-valued keys recursively with the default policy.
#[must_use]
pub fn filter_nulls(map: &Map<String, Value>) -> Map<String, Value> {
    NullFilter::new().filter(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(value: Value) -> Value {
        Value::Object(filter_nulls(value.as_object().unwrap()))
    }

    #[test]
    fn test_removes_nulls_recursively() {
        assert_eq!(
            run(json!({"a": 1, "b": null, "c": {"d": null, "e": 2}})),
            json!({"a": 1, "c": {"e": 2}})
        );
    }

    #[test]
    fn test_collapses_objects_emptied_by_filtering() {
        assert_eq!(run(json!({"a": 1, "b": {"c": null}})), json!({"a": 1}));
        assert_eq!(
            run(json!({"a": {"b": {"c": null}}, "z": true})),
            json!({"z": true})
        );
    }

    #[test]
    fn test_is_idempotent() {
        let input = json!({
            "a": 1,
            "b": null,
            "c": {"d": null, "e": [1, null, {"f": null, "g": "x"}]},
            "h": {},
            "i": []
        });
        let once = run(input);
        let twice = run(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preserves_key_order() {
        let filtered = run(json!({"zeta": 1, "alpha": null, "mid": 2, "beta": 3}));
        let keys: Vec<&String> = filtered.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "mid", "beta"]);
    }

    #[test]
    fn test_preserves_intentionally_empty_collections() {
        assert_eq!(
            run(json!({"metadata": {}, "products": [], "x": null})),
            json!({"metadata": {}, "products": []})
        );
    }

    #[test]
    fn test_drop_policy_removes_empty_collections() {
        let filter = NullFilter::new().empty_collections(EmptyCollections::Drop);
        let input = json!({"metadata": {}, "products": [], "keep": 0});
        assert_eq!(
            Value::Object(filter.filter(input.as_object().unwrap())),
            json!({"keep": 0})
        );
    }

    #[test]
    fn test_lists_keep_scalars_and_filter_object_elements() {
        assert_eq!(
            run(json!({"products": [
                {"name": "Shirt", "ean": null, "price": 1000},
                "raw",
                null,
                7
            ]})),
            json!({"products": [{"name": "Shirt", "price": 1000}, "raw", null, 7]})
        );
    }

    #[test]
    fn test_falsy_scalars_are_kept() {
        assert_eq!(
            run(json!({"zero": 0, "no": false, "blank": ""})),
            json!({"zero": 0, "no": false, "blank": ""})
        );
    }
}
