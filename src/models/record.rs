//! Request record serialization.
//!
//! Every request model declares its wire fields explicitly and converts to a
//! JSON object through one of two policies. The policy belongs to the
//! resource facade sending the record, never to the record itself.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ElorusError, Result};

/// How a record is turned into a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationPolicy {
    /// Every declared field, nulls included.
    Full,
    /// Declared fields minus those that are null or an empty string.
    Clean,
}

/// A request model with an explicit list of wire fields.
pub trait Record: Serialize {
    /// Field names, in declaration order, exactly as sent on the wire.
    const FIELDS: &'static [&'static str];

    /// Serialize every declared field.
    ///
    /// # Errors
    ///
    /// Returns [`ElorusError::Parse`] if the record does not serialize to an
    /// object whose keys are exactly [`Record::FIELDS`].
    fn to_map(&self) -> Result<Map<String, Value>> {
        let mut serialized = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            other => {
                return Err(shape_error(format!(
                    "record serialized to {other}, expected an object"
                )))
            }
        };

        let mut map = Map::new();
        for &field in Self::FIELDS {
            let value = serialized.remove(field).ok_or_else(|| {
                shape_error(format!("declared field `{field}` was not serialized"))
            })?;
            map.insert(field.to_string(), value);
        }

        if let Some(undeclared) = serialized.keys().next() {
            return Err(shape_error(format!(
                "serialized field `{undeclared}` is not declared"
            )));
        }
        Ok(map)
    }

    /// Serialize with the given policy.
    fn to_payload(&self, policy: SerializationPolicy) -> Result<Map<String, Value>> {
        let map = self.to_map()?;
        Ok(match policy {
            SerializationPolicy::Full => map,
            SerializationPolicy::Clean => clean(map),
        })
    }
}

fn shape_error(message: String) -> ElorusError {
    ElorusError::Parse(serde::ser::Error::custom(message))
}

/// Drop entries whose value is null or an empty string.
///
/// Only top-level entries are inspected; nested records are sent as-is.
pub fn clean(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter(|(_, value)| !is_empty(value))
        .collect()
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        note: Option<String>,
        empty: String,
        flag: bool,
        zero: u32,
        list: Vec<u32>,
    }

    impl Record for Sample {
        const FIELDS: &'static [&'static str] = &["name", "note", "empty", "flag", "zero", "list"];
    }

    fn sample() -> Sample {
        Sample {
            name: "a".to_string(),
            note: None,
            empty: String::new(),
            flag: false,
            zero: 0,
            list: vec![],
        }
    }

    #[test]
    fn test_full_keeps_every_field() {
        let map = sample().to_payload(SerializationPolicy::Full).unwrap();
        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        let mut expected = Sample::FIELDS.to_vec();
        keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(map["note"], Value::Null);
    }

    #[test]
    fn test_clean_drops_null_and_empty_string_only() {
        let map = sample().to_payload(SerializationPolicy::Clean).unwrap();
        assert_eq!(
            Value::Object(map),
            json!({"name": "a", "flag": false, "zero": 0, "list": []})
        );
    }

    #[test]
    fn test_clean_is_shallow() {
        let map = json!({"outer": {"inner": null}, "gone": ""});
        let Value::Object(map) = map else { unreachable!() };
        assert_eq!(Value::Object(clean(map)), json!({"outer": {"inner": null}}));
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        #[derive(Serialize)]
        struct Scalar(u32);
        impl Record for Scalar {
            const FIELDS: &'static [&'static str] = &[];
        }

        assert!(matches!(Scalar(1).to_map(), Err(ElorusError::Parse(_))));
    }

    #[test]
    fn test_undeclared_field_is_rejected() {
        #[derive(Serialize)]
        struct Drifted {
            undeclared: u32,
        }
        impl Record for Drifted {
            const FIELDS: &'static [&'static str] = &["declared"];
        }

        let err = Drifted { undeclared: 1 }.to_map().unwrap_err();
        assert!(matches!(err, ElorusError::Parse(_)));
        assert!(err.to_string().contains("declared"), "{err}");
    }

    #[test]
    fn test_extra_serialized_field_is_rejected() {
        #[derive(Serialize)]
        struct Extra {
            declared: u32,
            extra: u32,
        }
        impl Record for Extra {
            const FIELDS: &'static [&'static str] = &["declared"];
        }

        let err = Extra {
            declared: 1,
            extra: 2,
        }
        .to_payload(SerializationPolicy::Full)
        .unwrap_err();
        assert!(err.to_string().contains("`extra` is not declared"), "{err}");
    }
}
