use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel for "field absent". Downstream logic tests equality against this
/// instead of handling `None`/empty-string separately.
pub const UNKNOWN: &str = "Unknown";

/// Structured lead profile produced by the extraction pipeline.
///
/// Every field is always populated: absent information is represented by
/// [`UNKNOWN`] or an empty list, never by omission. List-valued fields are
/// deduplicated while preserving first-occurrence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub account_name: String,
    pub industry: String,
    /// "B2B", "B2C", "Likely B2B (inferred)" or "Unknown".
    pub business_model: String,
    pub use_case: String,
    pub pain_points: Vec<String>,
    pub must_haves: Vec<String>,
    pub nice_to_haves: Vec<String>,
    pub budget: String,
    pub timeline: String,
    pub stakeholders: Vec<String>,
    pub open_questions: Vec<String>,

    // Provenance, attached by the run driver after scoring context is known.
    #[serde(default = "default_unknown")]
    pub source: String,
    #[serde(default)]
    pub pii_redacted: bool,
    #[serde(default)]
    pub raw_text_excerpt: String,
    #[serde(default)]
    pub text_hash: String,
    #[serde(default)]
    pub lead_id: String,
}

fn default_unknown() -> String {
    UNKNOWN.to_string()
}

impl LeadRecord {
    /// Fully-populated record with sentinels everywhere. The extractor starts
    /// from this and fills in what it finds.
    pub fn unknown() -> Self {
        Self {
            account_name: UNKNOWN.to_string(),
            industry: UNKNOWN.to_string(),
            business_model: UNKNOWN.to_string(),
            use_case: String::new(),
            pain_points: Vec::new(),
            must_haves: Vec::new(),
            nice_to_haves: Vec::new(),
            budget: UNKNOWN.to_string(),
            timeline: UNKNOWN.to_string(),
            stakeholders: Vec::new(),
            open_questions: Vec::new(),
            source: UNKNOWN.to_string(),
            pii_redacted: false,
            raw_text_excerpt: String::new(),
            text_hash: String::new(),
            lead_id: String::new(),
        }
    }
}

/// Fit/intent scores plus the resolved pipeline stage and CRM rating.
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub fit_score: i64,
    pub intent_score: i64,
    pub stage: String,
    /// "Hot", "Warm" or "Cold", derived from the stage name prefix.
    pub rating: String,
}

/// One append-only tracking row per pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRunRecord {
    pub run_ts: DateTime<Utc>,
    pub lead_id: String,
    pub input_source: String,
    pub account_name: String,
    pub industry: String,
    pub budget: String,
    pub timeline: String,
    pub fit_score: i64,
    pub intent_score: i64,
    pub stage: String,
    pub out_dir: String,
}

/// Append `value` unless it is already present. Keeps list fields behaving as
/// ordered sets (first-seen order preserved).
pub fn push_unique(list: &mut Vec<String>, value: impl Into<String>) {
    let value = value.into();
    if !list.iter().any(|v| v == &value) {
        list.push(value);
    }
}
