//! Invoice record model and payload decoding.

pub mod types;

pub use types::{CUSTOMER_NAME_KEY, Invoice, RecordFields};

use serde_json::Value;

use crate::sources::FetchError;

/// Decode a record source payload.
///
/// `null` is an absent payload (`Ok(None)`); an array of objects is a
/// collection. Anything else, including a non-object element, fails the
/// whole payload so a partial snapshot is never produced.
pub fn decode_payload(
    payload: Value,
    fields: &RecordFields,
) -> Result<Option<Vec<Invoice>>, FetchError> {
    match payload {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(Invoice::from_map(map, fields)),
                other => Err(FetchError::Decode {
                    message: format!(
                        "record at index {} is not an object (found {})",
                        index,
                        json_kind(&other)
                    ),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        other => Err(FetchError::Decode {
            message: format!("expected an array of records, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_payload_is_absent() {
        let decoded = decode_payload(Value::Null, &RecordFields::default()).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_array_payload_keeps_order() {
        let decoded = decode_payload(
            json!([{"id": "b"}, {"id": "a"}, {"id": "c"}]),
            &RecordFields::default(),
        )
        .unwrap()
        .unwrap();
        let ids: Vec<&str> = decoded.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_non_object_element_fails_whole_payload() {
        let err = decode_payload(json!([{"id": "1"}, 5]), &RecordFields::default()).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_object_payload_rejected() {
        let err = decode_payload(json!({"id": "1"}), &RecordFields::default()).unwrap_err();
        assert!(err.to_string().contains("found object"));
    }
}
