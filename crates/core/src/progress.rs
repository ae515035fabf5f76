//! Progress-map folding and denormalized field extraction.
//!
//! The `progress` map on a case is the authoritative cumulative state; the
//! denormalized scalars are a per-step projection of it. Both operations are
//! pure so the store can stay a thin transaction wrapper around them.

use serde_json::{Map, Value};

use crate::case::steps;

/// Shallow per-key replace of `step_key` in the progress map.
///
/// Only the submitted step's entry changes; payloads stored under other step
/// keys are carried over untouched. There is no deep merge within a step's
/// own payload: resubmitting a step replaces its entry wholesale.
#[must_use]
pub fn merge_progress(existing: Option<&Value>, step_key: &str, payload: &Value) -> Value {
    let mut map = match existing {
        Some(Value::Object(m)) => m.clone(),
        _ => Map::new(),
    };
    map.insert(step_key.to_owned(), payload.clone());
    Value::Object(map)
}

/// Denormalized scalar columns a single step submission can touch.
///
/// Fields the step does not carry stay `None`, which the store translates
/// into "keep the stored value" rather than nulling the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenormFields {
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub hospital_name: Option<String>,
    pub balance_amount: Option<f64>,
    pub in_collections: Option<bool>,
}

impl DenormFields {
    /// Extract the scalar columns relevant to `step_key` from its payload.
    /// Unknown step keys touch no denormalized columns.
    #[must_use]
    pub fn from_step(step_key: &str, payload: &Value) -> Self {
        let mut fields = Self::default();
        match step_key {
            steps::HOSPITAL => {
                fields.hospital_name = string_field(payload, "hospitalName");
            },
            steps::BALANCE => {
                fields.balance_amount = payload.get("balanceAmount").and_then(Value::as_f64);
                fields.in_collections = payload.get("inCollections").and_then(Value::as_bool);
            },
            steps::CONTACT => {
                fields.contact_phone = string_field(payload, "phone");
                fields.contact_email = string_field(payload, "email");
            },
            _ => {},
        }
        fields
    }
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_creates_map_when_no_existing_progress() {
        let merged = merge_progress(None, "hospital", &json!({"hospitalName": "General"}));
        assert_eq!(merged, json!({"hospital": {"hospitalName": "General"}}));
    }

    #[test]
    fn merge_keeps_other_step_keys() {
        let existing = json!({"hospital": {"hospitalName": "General"}});
        let merged = merge_progress(
            Some(&existing),
            "balance",
            &json!({"balanceAmount": 500, "inCollections": false}),
        );
        assert_eq!(
            merged,
            json!({
                "hospital": {"hospitalName": "General"},
                "balance": {"balanceAmount": 500, "inCollections": false}
            })
        );
    }

    #[test]
    fn merge_replaces_step_entry_wholesale() {
        let existing = json!({"hospital": {"hospitalName": "General", "city": "Springfield"}});
        let merged = merge_progress(Some(&existing), "hospital", &json!({"hospitalName": "Mercy"}));
        // Shallow per-key replace: "city" from the old payload is gone.
        assert_eq!(merged, json!({"hospital": {"hospitalName": "Mercy"}}));
    }

    #[test]
    fn merge_recovers_from_non_object_progress() {
        let existing = json!("corrupt");
        let merged = merge_progress(Some(&existing), "hospital", &json!({"hospitalName": "A"}));
        assert_eq!(merged, json!({"hospital": {"hospitalName": "A"}}));
    }

    #[test]
    fn hospital_step_extracts_only_hospital_name() {
        let fields =
            DenormFields::from_step("hospital", &json!({"hospitalName": " General ", "x": 1}));
        assert_eq!(fields.hospital_name.as_deref(), Some("General"));
        assert_eq!(fields.contact_email, None);
        assert_eq!(fields.balance_amount, None);
    }

    #[test]
    fn balance_step_extracts_amount_and_flag() {
        let fields = DenormFields::from_step(
            "balance",
            &json!({"balanceAmount": 500.5, "inCollections": true}),
        );
        assert_eq!(fields.balance_amount, Some(500.5));
        assert_eq!(fields.in_collections, Some(true));
        assert_eq!(fields.hospital_name, None);
    }

    #[test]
    fn contact_step_extracts_phone_and_email() {
        let fields = DenormFields::from_step(
            "contact",
            &json!({"phone": "555-0100", "email": "a@b.example"}),
        );
        assert_eq!(fields.contact_phone.as_deref(), Some("555-0100"));
        assert_eq!(fields.contact_email.as_deref(), Some("a@b.example"));
    }

    #[test]
    fn unknown_step_touches_no_columns() {
        let fields = DenormFields::from_step("some-future-step", &json!({"x": 1}));
        assert_eq!(fields, DenormFields::default());
    }

    #[test]
    fn empty_strings_are_not_extracted() {
        let fields = DenormFields::from_step("contact", &json!({"phone": "  ", "email": ""}));
        assert_eq!(fields.contact_phone, None);
        assert_eq!(fields.contact_email, None);
    }
}
