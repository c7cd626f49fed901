//! CRM payload export (Salesforce-style field mapping).

use crate::config::Config;
use crate::models::{LeadRecord, ScoreResult, UNKNOWN};
use serde_json::{json, Map, Value};

/// Project (record, scores) into a Salesforce Lead upsert payload using the
/// configured mapping table. Source keys are LeadRecord field names, or the
/// synthetic keys `summary_text` / `stage` / `rating`.
pub fn salesforce_payload(record: &LeadRecord, scores: &ScoreResult, config: &Config) -> Value {
    let mapping = &config.crm_export.salesforce.lead;

    let open_questions_line = if record.open_questions.is_empty() {
        "Open questions: None".to_string()
    } else {
        format!("Open questions: {}", record.open_questions.join(", "))
    };
    let summary_text = format!(
        "Use case: {}\nPain points: {}\nMust-haves: {}\n{}",
        record.use_case,
        record.pain_points.join(", "),
        record.must_haves.join(", "),
        open_questions_line
    );

    let mut payload = Map::new();
    for (sf_field, src_key) in mapping {
        let value = match src_key.as_str() {
            "summary_text" => json!(summary_text),
            "stage" => json!(scores.stage),
            "rating" => json!(scores.rating),
            other => record_field(record, other),
        };
        payload.insert(sf_field.clone(), value);
    }

    // External id hint for upsert matching.
    payload.insert("External_Id__c".to_string(), json!(record.lead_id));

    json!({
        "object": "Lead",
        "action": "upsert",
        "payload": Value::Object(payload),
    })
}

/// Look up a LeadRecord field by its serialized name. Unrecognized source
/// keys map to the "Unknown" sentinel rather than failing the export.
fn record_field(record: &LeadRecord, key: &str) -> Value {
    match key {
        "account_name" => json!(record.account_name),
        "industry" => json!(record.industry),
        "business_model" => json!(record.business_model),
        "use_case" => json!(record.use_case),
        "pain_points" => json!(record.pain_points),
        "must_haves" => json!(record.must_haves),
        "nice_to_haves" => json!(record.nice_to_haves),
        "budget" => json!(record.budget),
        "timeline" => json!(record.timeline),
        "stakeholders" => json!(record.stakeholders),
        "open_questions" => json!(record.open_questions),
        "source" => json!(record.source),
        "lead_id" => json!(record.lead_id),
        _ => json!(UNKNOWN),
    }
}
