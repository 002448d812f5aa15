use std::borrow::Cow;

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Key under the customer reference object that holds the display name.
pub const CUSTOMER_NAME_KEY: &str = "name";

/// JSON key names used to extract the typed fields of an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub id: String,
    pub customer_ref: String,
    pub balance: String,
}

impl Default for RecordFields {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            customer_ref: "customerRef".to_string(),
            balance: "balance".to_string(),
        }
    }
}

/// A single invoice record as returned by the record source.
///
/// Only `id`, the customer reference and the balance are interpreted. The
/// full object is kept in `raw`, in source field order, for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    id: String,
    customer_ref: Option<Map<String, Value>>,
    balance: Option<f64>,
    raw: Map<String, Value>,
}

impl Invoice {
    /// Build an invoice from a JSON object, reading typed fields by the given key names.
    ///
    /// Never fails: a missing or malformed field degrades to its empty form.
    pub fn from_map(raw: Map<String, Value>, fields: &RecordFields) -> Self {
        let id = match raw.get(&fields.id) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        let customer_ref = match raw.get(&fields.customer_ref) {
            Some(Value::Object(map)) => Some(map.clone()),
            _ => None,
        };

        let balance = match raw.get(&fields.balance) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        Self {
            id,
            customer_ref,
            balance,
            raw,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The customer's display name.
    ///
    /// A non-empty string is used as is; a non-zero number or `true` is shown
    /// in its JSON text form. Empty strings, zero, `false`, `null`, objects
    /// and arrays count as no name.
    pub fn customer_name(&self) -> Option<Cow<'_, str>> {
        let name = self.customer_ref.as_ref()?.get(CUSTOMER_NAME_KEY)?;
        match name {
            Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => number_label(n).map(Cow::Owned),
            Value::Bool(true) => Some(Cow::Borrowed("true")),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<f64> {
        self.balance
    }

    /// Pretty-printed JSON of the full record (2-space indent, source order).
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|e| {
            tracing::warn!(
                event = "core.records.pretty_print_failed",
                id = %self.id,
                error = %e
            );
            format!("{:?}", self.raw)
        })
    }
}

/// Text form of a numeric name; zero means no name. `1.0` prints as `1`.
fn number_label(n: &Number) -> Option<String> {
    let value = n.as_f64()?;
    if value == 0.0 {
        return None;
    }
    if n.is_f64() {
        Some(value.to_string())
    } else {
        Some(n.to_string())
    }
}

impl Serialize for Invoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
