//! Request bodies given either as typed records or as raw maps.
//!
//! Every facade method that sends a body accepts `impl Into<RequestInput<T>>`,
//! so callers can pass the typed record (preferred) or a JSON map.
//!
//! ```rust
//! use opp_api::rest::RequestInput;
//! use opp_api::rest::resources::CreateCharge;
//! use serde_json::json;
//!
//! let typed: RequestInput<CreateCharge> = CreateCharge {
//!     amount: Some(1000),
//!     ..Default::default()
//! }
//! .into();
//! let raw: RequestInput<CreateCharge> =
//!     json!({"amount": 1000, "description": null}).as_object().unwrap().clone().into();
//!
//! assert_eq!(typed.into_body().unwrap(), raw.into_body().unwrap());
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::OppError;
use crate::rest::serializer::filter_nulls;

/// A request body: a typed record or an untyped map.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestInput<T> {
    /// A typed request record.
    Typed(T),
    /// A raw JSON map.
    Raw(Map<String, Value>),
}

impl<T: Serialize> RequestInput<T> {
    /// Resolves the input to the JSON map sent on the wire.
    ///
    /// Null-valued keys are removed here, once, for both variants.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::Encode`] if the record cannot be serialized or
    /// does not serialize to a JSON object.
    pub fn into_body(self) -> Result<Map<String, Value>, OppError> {
        let map = match self {
            Self::Typed(record) => match serde_json::to_value(record).map_err(OppError::Encode)? {
                Value::Object(map) => map,
                other => {
                    return Err(OppError::Encode(serde::ser::Error::custom(format!(
                        "request body must be a JSON object, got {other}"
                    ))))
                }
            },
            Self::Raw(map) => map,
        };
        Ok(filter_nulls(&map))
    }
}

impl<T> From<Map<String, Value>> for RequestInput<T> {
    fn from(map: Map<String, Value>) -> Self {
        Self::Raw(map)
    }
}

/// Implements `From<Record> for RequestInput<Record>` for request records.
///
/// A blanket impl would overlap with the raw map conversion.
macro_rules! impl_request_input {
    ($($record:ty),+ $(,)?) => {
        $(
            impl From<$record> for $crate::rest::RequestInput<$record> {
                fn from(record: $record) -> Self {
                    Self::Typed(record)
                }
            }
        )+
    };
}

pub(crate) use impl_request_input;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize)]
    struct Sample {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        nested: Option<Nested>,
    }

    #[derive(Debug, Default, Serialize)]
    struct Nested {
        value: Option<i64>,
    }

    #[test]
    fn test_typed_input_is_filtered() {
        let input = RequestInput::Typed(Sample {
            name: Some("Shop".to_string()),
            nested: Some(Nested { value: None }),
        });
        assert_eq!(Value::Object(input.into_body().unwrap()), json!({"name": "Shop"}));
    }

    #[test]
    fn test_raw_input_is_filtered() {
        let map = json!({"name": null, "amount": 5}).as_object().unwrap().clone();
        let input: RequestInput<Sample> = map.into();
        assert_eq!(Value::Object(input.into_body().unwrap()), json!({"amount": 5}));
    }

    #[test]
    fn test_non_object_record_is_an_encode_error() {
        let input: RequestInput<Vec<i64>> = RequestInput::Typed(vec![1, 2]);
        assert!(matches!(input.into_body(), Err(OppError::Encode(_))));
    }
}
