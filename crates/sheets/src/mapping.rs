//! Header-row column resolution and row write planning.
//!
//! Two-step lookup: payload field → semantic column header (static table),
//! then header → current column index (read from the sheet per call). The
//! planning functions are pure so they can be tested without a network.

use std::collections::HashMap;

use serde_json::Value;

/// Semantic column headers the mirror reads and writes.
pub mod headers {
    /// Identity column; required for every mirror call.
    pub const CASE_ID: &str = "Case ID";
    pub const CURRENT_STEP: &str = "Current step";
    pub const HOSPITAL_NAME: &str = "Hospital name";
    pub const BALANCE_AMOUNT: &str = "Balance amount";
    pub const IN_COLLECTIONS: &str = "In collections";
    pub const PHONE: &str = "Phone";
    pub const EMAIL: &str = "Email";
    pub const UTM_SOURCE: &str = "UTM source";
    pub const UTM_CAMPAIGN: &str = "UTM campaign";
    pub const REFERRER: &str = "Referrer";
    pub const CREATED: &str = "Created";
    pub const LAST_INPUT: &str = "Last input";
}

/// Static field-name → column-header table. Fields with no entry are not
/// mirrored at all.
#[must_use]
pub fn field_to_header(field: &str) -> Option<&'static str> {
    match field {
        "hospitalName" => Some(headers::HOSPITAL_NAME),
        "balanceAmount" => Some(headers::BALANCE_AMOUNT),
        "inCollections" => Some(headers::IN_COLLECTIONS),
        "phone" => Some(headers::PHONE),
        "email" => Some(headers::EMAIL),
        "utmSource" => Some(headers::UTM_SOURCE),
        "utmCampaign" => Some(headers::UTM_CAMPAIGN),
        "referrer" => Some(headers::REFERRER),
        _ => None,
    }
}

/// Origin-tracking columns are written once, when the case row is created,
/// and never overwritten by later submissions.
#[must_use]
pub fn is_create_only(header: &str) -> bool {
    matches!(header, headers::UTM_SOURCE | headers::UTM_CAMPAIGN | headers::REFERRER)
}

/// Build the header-name → zero-based column index map from the sheet's
/// first row. Later duplicates of a header are ignored.
#[must_use]
pub fn header_index_map(header_row: &[String]) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (index, header) in header_row.iter().enumerate() {
        let name = header.trim();
        if !name.is_empty() {
            map.entry(name.to_owned()).or_insert(index);
        }
    }
    map
}

/// Zero-based column index → A1 column letters (0 → "A", 26 → "AA").
#[must_use]
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Render a JSON payload value as a cell string.
#[must_use]
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Plan the (header, text) cell writes for one step payload. Unmapped fields
/// are skipped; create-only headers are skipped when the row already exists.
#[must_use]
pub fn plan_step_cells(payload: &Value, row_exists: bool) -> Vec<(&'static str, String)> {
    let mut cells = Vec::new();
    if let Value::Object(map) = payload {
        for (field, value) in map {
            let Some(header) = field_to_header(field) else { continue };
            if row_exists && is_create_only(header) {
                continue;
            }
            cells.push((header, cell_text(value)));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_map_resolves_reordered_columns() {
        let row = vec![
            "Created".to_owned(),
            "Case ID".to_owned(),
            " Hospital name ".to_owned(),
            String::new(),
        ];
        let map = header_index_map(&row);
        assert_eq!(map.get(headers::CASE_ID), Some(&1));
        assert_eq!(map.get(headers::HOSPITAL_NAME), Some(&2));
        assert_eq!(map.get(headers::CREATED), Some(&0));
        assert!(!map.contains_key(""));
    }

    #[test]
    fn header_map_keeps_first_duplicate() {
        let row = vec!["Phone".to_owned(), "Phone".to_owned()];
        assert_eq!(header_index_map(&row).get(headers::PHONE), Some(&0));
    }

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(51), "AZ");
        assert_eq!(column_letter(52), "BA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn cell_text_renders_scalars() {
        assert_eq!(cell_text(&json!("General")), "General");
        assert_eq!(cell_text(&json!(500.5)), "500.5");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&json!(null)), "");
    }

    #[test]
    fn plan_skips_unmapped_fields() {
        let cells = plan_step_cells(&json!({"hospitalName": "General", "internal": "x"}), false);
        assert_eq!(cells, vec![(headers::HOSPITAL_NAME, "General".to_owned())]);
    }

    #[test]
    fn plan_includes_origin_fields_only_on_creation() {
        let payload = json!({"hospitalName": "General", "utmSource": "ads", "referrer": "r"});
        let fresh = plan_step_cells(&payload, false);
        assert!(fresh.iter().any(|(h, v)| *h == headers::UTM_SOURCE && v == "ads"));
        assert!(fresh.iter().any(|(h, _)| *h == headers::REFERRER));

        let existing = plan_step_cells(&payload, true);
        assert!(existing.iter().all(|(h, _)| !is_create_only(h)));
        assert!(existing.iter().any(|(h, _)| *h == headers::HOSPITAL_NAME));
    }

    #[test]
    fn plan_handles_non_object_payload() {
        assert!(plan_step_cells(&json!(42), false).is_empty());
    }
}
