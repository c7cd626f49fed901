//! Merge policy for the optional external structured-extraction source.
//!
//! The external payload is untrusted and best-effort: any parse failure
//! degrades silently to "no contribution", and a field is overwritten only
//! when the incoming value is non-empty. The merge is an explicit per-field
//! table rather than a generic map overlay, so guardrail-protected fields
//! cannot be blanked out by a low-confidence source.

use crate::models::LeadRecord;
use serde_json::Value;

/// Overlay a raw external payload onto the heuristic record.
///
/// Never fails: malformed or wrong-shaped payloads leave the record untouched.
pub fn merge_external(record: &mut LeadRecord, external_raw: &str) {
    let payload: Value = match serde_json::from_str(external_raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("External payload is not valid JSON, ignoring: {}", e);
            return;
        }
    };
    let Some(map) = payload.as_object() else {
        tracing::debug!("External payload is not a JSON object, ignoring");
        return;
    };

    merge_string(map.get("account_name"), &mut record.account_name);
    merge_string(map.get("industry"), &mut record.industry);
    merge_string(map.get("business_model"), &mut record.business_model);
    merge_string(map.get("use_case"), &mut record.use_case);
    merge_string(map.get("budget"), &mut record.budget);
    merge_string(map.get("timeline"), &mut record.timeline);

    merge_list(map.get("pain_points"), &mut record.pain_points);
    merge_list(map.get("must_haves"), &mut record.must_haves);
    merge_list(map.get("nice_to_haves"), &mut record.nice_to_haves);
    merge_list(map.get("stakeholders"), &mut record.stakeholders);
    merge_list(map.get("open_questions"), &mut record.open_questions);
}

/// Overwrite `target` only when the incoming value is a non-empty string.
fn merge_string(incoming: Option<&Value>, target: &mut String) {
    if let Some(Value::String(s)) = incoming {
        if !s.is_empty() {
            *target = s.clone();
        }
    }
}

/// Overwrite `target` only when the incoming value is a non-empty array of
/// strings. Non-string elements are dropped; an array that yields nothing
/// usable counts as empty.
fn merge_list(incoming: Option<&Value>, target: &mut Vec<String>) {
    if let Some(Value::Array(items)) = incoming {
        let strings: Vec<String> = items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        if !strings.is_empty() {
            *target = strings;
        }
    }
}

/// Assemble the prompt handed to the external structured-extraction provider.
pub fn build_extraction_prompt(schema_json: &str, text: &str) -> String {
    format!(
        "You are a sales ops assistant. Extract structured lead info in JSON.\n\
         Schema:\n{}\n\nText:\n{}\n\nReturn JSON only.\n",
        schema_json, text
    )
}
