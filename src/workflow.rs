//! End-to-end run orchestration.
//!
//! One transcript in, one (record, scores, actions, email, report) out,
//! written to the output directory and optionally tracked in SQLite. Each
//! invocation is independent: the only mutable state is the LeadRecord being
//! assembled, and the only external latency is the optional extraction
//! provider call, which degrades to a no-op on any failure.

use crate::actions;
use crate::config::Config;
use crate::db_storage::RunStorage;
use crate::errors::{AppError, ResultExt};
use crate::extractor;
use crate::extractor_client::ExtractorClient;
use crate::merge::{build_extraction_prompt, merge_external};
use crate::models::{LeadRecord, LeadRunRecord, ScoreResult, UNKNOWN};
use crate::narrative;
use crate::patterns::PatternLibrary;
use crate::redact::{redact_pii, text_sha256};
use crate::scoring;
use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Per-run options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub out_dir: PathBuf,
    /// Tracking DB path; empty or absent disables tracking.
    pub db_path: Option<String>,
    pub owner: Option<String>,
    pub lang: Option<String>,
    pub source: Option<String>,
    pub lead_id: Option<String>,
    pub no_redact: bool,
    /// Input identifier recorded in history ("stdin" or the input file path).
    pub input_label: String,
}

/// Everything a run produces, returned for callers and tests; the same data
/// is written to the output directory.
#[derive(Debug)]
pub struct RunOutput {
    pub record: LeadRecord,
    pub scores: ScoreResult,
    pub actions: Vec<String>,
    pub email: String,
    pub report: String,
    pub pii_hit: bool,
}

/// Run the full pipeline for one transcript.
pub async fn run_lead_workflow(
    config: &Config,
    schema_json: &str,
    raw_text: &str,
    opts: &RunOptions,
) -> Result<RunOutput, AppError> {
    // Hash the raw text up front; the full transcript is never persisted.
    let raw_hash = text_sha256(raw_text);

    let redact = config.redact_pii && !opts.no_redact;
    let (processed_text, pii_hit) = if redact {
        redact_pii(raw_text)
    } else {
        (raw_text.to_string(), false)
    };

    let lead_id = opts
        .lead_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_lead_id);

    tracing::info!("Starting lead workflow for {}", lead_id);

    // Step 1: heuristic extraction.
    let lib = PatternLibrary::new();
    let mut record = extractor::extract(&lib, &processed_text);

    // Step 2: optional external structured extraction, merged defensively.
    let external_raw = fetch_external_payload(config, schema_json, &processed_text).await;
    merge_external(&mut record, &external_raw);

    // Step 3: provenance.
    record.lead_id = lead_id.clone();
    record.source = opts
        .source
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());
    record.pii_redacted = redact;
    record.text_hash = raw_hash;
    record.raw_text_excerpt = excerpt(&processed_text, config.max_excerpt_chars);

    // Step 4: score, plan, render.
    let scores = scoring::classify(&record, &config.scoring, &config.stage_rules);
    let action_list = actions::plan(&lib, &record, &scores);
    let owner = opts
        .owner
        .clone()
        .filter(|o| !o.is_empty())
        .unwrap_or_else(|| config.owner.clone());
    let lang = opts
        .lang
        .clone()
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| config.language.clone());
    let email = narrative::render_followup_email(&lib, &record, &scores, &owner, &lang);
    let report = narrative::build_report_md(&record, &scores, &action_list, &email);

    // Step 5: write outputs.
    write_outputs(&opts.out_dir, &record, &scores, &action_list, &email, &report)?;
    tracing::info!("Outputs saved to {}", opts.out_dir.display());

    // Step 6: optional tracking.
    if let Some(db_path) = opts.db_path.as_deref().filter(|p| !p.is_empty()) {
        let storage = RunStorage::connect(db_path).await?;
        storage
            .insert_run(&LeadRunRecord {
                run_ts: Utc::now(),
                lead_id: lead_id.clone(),
                input_source: opts.input_label.clone(),
                account_name: record.account_name.clone(),
                industry: record.industry.clone(),
                budget: record.budget.clone(),
                timeline: record.timeline.clone(),
                fit_score: scores.fit_score,
                intent_score: scores.intent_score,
                stage: scores.stage.clone(),
                out_dir: opts.out_dir.display().to_string(),
            })
            .await?;
        tracing::info!("Tracked in DB {}", db_path);
    }

    if pii_hit {
        tracing::info!("Note: PII-like strings were redacted in outputs.");
    }

    Ok(RunOutput {
        record,
        scores,
        actions: action_list,
        email,
        report,
        pii_hit,
    })
}

/// Call the external provider when configured. Malformed responses, transport
/// errors and the unconfigured case all become the empty contribution.
async fn fetch_external_payload(config: &Config, schema_json: &str, text: &str) -> String {
    let Some(url) = config.extractor_url.as_deref() else {
        return "{}".to_string();
    };

    let client = match ExtractorClient::new(url.to_string(), config.extractor_timeout_secs) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!("Extractor client unavailable, continuing heuristic-only: {}", e);
            return "{}".to_string();
        }
    };

    let prompt = build_extraction_prompt(schema_json, text);
    match client.extract_json(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("External extraction failed, continuing heuristic-only: {}", e);
            "{}".to_string()
        }
    }
}

fn generate_lead_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("LEAD-{}", hex[..8].to_uppercase())
}

/// First `max_chars` characters of the redacted text, with a truncation marker.
fn excerpt(text: &str, max_chars: usize) -> String {
    let truncated: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

fn write_outputs(
    out_dir: &Path,
    record: &LeadRecord,
    scores: &ScoreResult,
    actions: &[String],
    email: &str,
    report: &str,
) -> Result<(), AppError> {
    std::fs::create_dir_all(out_dir).context("Failed to create output directory")?;

    let fields_json = serde_json::to_string_pretty(record)?;
    std::fs::write(out_dir.join("fields.json"), fields_json).context("Failed to write fields.json")?;

    let scores_json = serde_json::to_string_pretty(scores)?;
    std::fs::write(out_dir.join("scores.json"), scores_json).context("Failed to write scores.json")?;

    std::fs::write(out_dir.join("next_actions.txt"), actions.join("\n"))
        .context("Failed to write next_actions.txt")?;
    std::fs::write(out_dir.join("follow_up_email.txt"), email)
        .context("Failed to write follow_up_email.txt")?;
    std::fs::write(out_dir.join("report.md"), report).context("Failed to write report.md")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_ids_have_fixed_shape() {
        let id = generate_lead_id();
        assert!(id.starts_with("LEAD-"));
        assert_eq!(id.len(), 13);
        assert!(id[5..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn excerpt_truncates_by_characters() {
        assert_eq!(excerpt("短文本", 10), "短文本");
        assert_eq!(excerpt("一二三四五", 3), "一二三...");
        assert_eq!(excerpt("abc", 3), "abc");
    }
}
