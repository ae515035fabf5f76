//! Step payload validation.
//!
//! Rule-table lookup from step key to a validation function. Unknown step
//! keys only require the payload to be a JSON object, so new widget steps
//! need no validator change. Checks run in a fixed order per step and the
//! first failure wins; the error is one human-readable string naming the
//! offending field.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::case::steps;
use crate::constants::MAX_STEP_PAYLOAD_BYTES;

type StepRule = fn(&Value) -> Result<(), String>;

/// Validate one step submission payload. Pure and deterministic; must run
/// before any store interaction.
pub fn validate_step(step_key: &str, payload: &Value) -> Result<(), String> {
    if !payload.is_object() {
        return Err(format!("stepData for '{step_key}' must be a JSON object"));
    }
    check_payload_size(payload)?;
    match rule_for(step_key) {
        Some(rule) => rule(payload),
        None => Ok(()),
    }
}

/// Whether a string looks like an email address. Intentionally loose: one
/// `@`, no whitespace, a dot in the domain part.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn check_payload_size(payload: &Value) -> Result<(), String> {
    // Value came off the wire, so serialization cannot fail; fall back to
    // zero rather than rejecting on the impossible branch.
    let size = serde_json::to_vec(payload).map(|v| v.len()).unwrap_or(0);
    if size > MAX_STEP_PAYLOAD_BYTES {
        return Err(format!(
            "stepData exceeds the {MAX_STEP_PAYLOAD_BYTES} byte limit ({size} bytes)"
        ));
    }
    Ok(())
}

fn rule_for(step_key: &str) -> Option<StepRule> {
    match step_key {
        steps::HOSPITAL => Some(validate_hospital),
        steps::BALANCE => Some(validate_balance),
        steps::CONTACT => Some(validate_contact),
        _ => None,
    }
}

fn validate_hospital(payload: &Value) -> Result<(), String> {
    require_non_empty_string(payload, "hospitalName")
}

fn validate_balance(payload: &Value) -> Result<(), String> {
    match payload.get("balanceAmount") {
        None => return Err("balanceAmount is required".to_owned()),
        Some(v) if !v.is_number() => return Err("balanceAmount must be a number".to_owned()),
        Some(_) => {},
    }
    if let Some(v) = payload.get("inCollections") {
        if !v.is_boolean() {
            return Err("inCollections must be a boolean".to_owned());
        }
    }
    Ok(())
}

fn validate_contact(payload: &Value) -> Result<(), String> {
    require_non_empty_string(payload, "phone")?;
    if let Some(v) = payload.get("email") {
        let Some(email) = v.as_str() else {
            return Err("email must be a string".to_owned());
        };
        if !is_valid_email(email) {
            return Err(format!("email '{email}' is not a valid address"));
        }
    }
    Ok(())
}

fn require_non_empty_string(payload: &Value, field: &str) -> Result<(), String> {
    match payload.get(field) {
        None => Err(format!("{field} is required")),
        Some(v) => match v.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(()),
            Some(_) => Err(format!("{field} must not be empty")),
            None => Err(format!("{field} must be a string")),
        },
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_payload() {
        let err = validate_step("hospital", &json!("not an object")).unwrap_err();
        assert!(err.contains("must be a JSON object"), "got: {err}");
        assert!(validate_step("anything", &json!(null)).is_err());
        assert!(validate_step("anything", &json!([1, 2])).is_err());
    }

    #[test]
    fn unknown_step_accepts_any_object() {
        assert!(validate_step("some-future-step", &json!({"x": 1})).is_ok());
        assert!(validate_step("some-future-step", &json!({})).is_ok());
    }

    #[test]
    fn hospital_requires_name() {
        let err = validate_step("hospital", &json!({})).unwrap_err();
        assert_eq!(err, "hospitalName is required");
        let err = validate_step("hospital", &json!({"hospitalName": "  "})).unwrap_err();
        assert_eq!(err, "hospitalName must not be empty");
        let err = validate_step("hospital", &json!({"hospitalName": 7})).unwrap_err();
        assert_eq!(err, "hospitalName must be a string");
        assert!(validate_step("hospital", &json!({"hospitalName": "General"})).is_ok());
    }

    #[test]
    fn balance_requires_numeric_amount() {
        let err = validate_step("balance", &json!({})).unwrap_err();
        assert_eq!(err, "balanceAmount is required");
        let err = validate_step("balance", &json!({"balanceAmount": "500"})).unwrap_err();
        assert_eq!(err, "balanceAmount must be a number");
        assert!(validate_step("balance", &json!({"balanceAmount": 500})).is_ok());
    }

    #[test]
    fn balance_collections_flag_must_be_boolean_when_present() {
        let err = validate_step("balance", &json!({"balanceAmount": 1, "inCollections": "yes"}))
            .unwrap_err();
        assert_eq!(err, "inCollections must be a boolean");
        assert!(
            validate_step("balance", &json!({"balanceAmount": 1, "inCollections": true})).is_ok()
        );
        // Optional: absent flag passes.
        assert!(validate_step("balance", &json!({"balanceAmount": 1})).is_ok());
    }

    #[test]
    fn contact_requires_phone_first() {
        // Fixed check order: phone is reported even when email is also bad.
        let err = validate_step("contact", &json!({"email": "nope"})).unwrap_err();
        assert_eq!(err, "phone is required");
    }

    #[test]
    fn contact_email_checked_only_when_present() {
        assert!(validate_step("contact", &json!({"phone": "555-0100"})).is_ok());
        let err = validate_step("contact", &json!({"phone": "555-0100", "email": "nope"}))
            .unwrap_err();
        assert!(err.contains("not a valid address"), "got: {err}");
        assert!(
            validate_step("contact", &json!({"phone": "555-0100", "email": "a@b.example"}))
                .is_ok()
        );
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name+tag@sub.example.co"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let big = "x".repeat(MAX_STEP_PAYLOAD_BYTES + 1);
        let err = validate_step("some-step", &json!({"blob": big})).unwrap_err();
        assert!(err.contains("byte limit"), "got: {err}");
    }
}
