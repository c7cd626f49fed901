//! Fit/intent scoring and pipeline-stage resolution.

use crate::config::{ScoringWeights, StageRule};
use crate::models::{LeadRecord, ScoreResult, UNKNOWN};
use regex::Regex;

/// Stage used when no rule in the table matches.
pub const DEFAULT_STAGE: &str = "Early (Needs discovery)";

/// Must-have markers that count as an automation/tracking signal. Matched as
/// case-sensitive substrings of the joined must-have list.
const AUTOMATION_MARKERS: &[&str] = &["自动化", "tracking", "数据追踪", "workflow", "dashboard"];

/// Compute fit/intent scores and resolve stage + rating.
///
/// Two independent accumulators receive configured increments when their
/// predicates hold; both are clamped to [0,100] afterwards (increment order
/// does not matter, clamping is the only non-linearity). The stage table is
/// scanned top-to-bottom, first satisfied rule wins.
pub fn classify(record: &LeadRecord, weights: &ScoringWeights, rules: &[StageRule]) -> ScoreResult {
    let mut fit = weights.base_fit;
    let mut intent = weights.base_intent;

    let joined_must_haves = record.must_haves.join(" ");

    // Fit signals
    if !record.industry.is_empty() && record.industry != UNKNOWN {
        fit += weights.fit_industry_known;
    }
    if salesforce_marker().is_match(&joined_must_haves) {
        fit += weights.fit_crm_salesforce;
    }
    if AUTOMATION_MARKERS.iter().any(|k| joined_must_haves.contains(k)) {
        fit += weights.fit_mentions_automation_tracking;
    }

    // Intent signals
    if !record.budget.is_empty() && record.budget != UNKNOWN {
        intent += weights.intent_budget_known;
    }
    if !record.timeline.is_empty() && record.timeline != UNKNOWN {
        intent += weights.intent_timeline_known;
    }
    if record.open_questions.len() <= 1 {
        intent += weights.intent_few_open_questions;
    }

    let fit = fit.clamp(0, 100);
    let intent = intent.clamp(0, 100);

    let mut stage = DEFAULT_STAGE.to_string();
    for rule in rules {
        if fit >= rule.min_fit && intent >= rule.min_intent {
            stage = rule.name.clone();
            break;
        }
    }

    let rating = rating_for_stage(&stage);

    ScoreResult {
        fit_score: fit,
        intent_score: intent,
        stage,
        rating: rating.to_string(),
    }
}

/// Rating is a pure function of the stage name prefix. Stage tables that do
/// not follow the SQL/MQL naming convention silently degrade to "Cold".
pub fn rating_for_stage(stage: &str) -> &'static str {
    if stage.starts_with("SQL") {
        "Hot"
    } else if stage.starts_with("MQL") {
        "Warm"
    } else {
        "Cold"
    }
}

fn salesforce_marker() -> Regex {
    Regex::new(r"(?i)\bSalesforce\b").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadRecord;

    fn rules() -> Vec<StageRule> {
        vec![
            StageRule {
                name: "SQL (Ready for AE)".to_string(),
                min_fit: 65,
                min_intent: 70,
            },
            StageRule {
                name: "MQL (Nurture + discovery)".to_string(),
                min_fit: 55,
                min_intent: 55,
            },
        ]
    }

    #[test]
    fn base_scores_for_empty_record() {
        let record = LeadRecord::unknown();
        let result = classify(&record, &ScoringWeights::default(), &[]);
        // Only the few-open-questions increment fires on an empty record.
        assert_eq!(result.fit_score, 50);
        assert_eq!(result.intent_score, 60);
        assert_eq!(result.stage, DEFAULT_STAGE);
        assert_eq!(result.rating, "Cold");
    }

    #[test]
    fn all_signals_stack() {
        let mut record = LeadRecord::unknown();
        record.industry = "医疗器械".to_string();
        record.must_haves = vec!["自动化".to_string(), "Salesforce".to_string()];
        record.budget = "10万".to_string();
        record.timeline = "2周内".to_string();
        let result = classify(&record, &ScoringWeights::default(), &rules());
        assert_eq!(result.fit_score, 80);
        assert_eq!(result.intent_score, 85);
        assert_eq!(result.stage, "SQL (Ready for AE)");
        assert_eq!(result.rating, "Hot");
    }

    #[test]
    fn scores_clamp_to_bounds() {
        let mut weights = ScoringWeights::default();
        weights.base_fit = 95;
        weights.fit_industry_known = 50;
        weights.base_intent = -200;
        let mut record = LeadRecord::unknown();
        record.industry = "SaaS".to_string();
        record.open_questions = vec!["q1".to_string(), "q2".to_string()];
        let result = classify(&record, &weights, &[]);
        assert_eq!(result.fit_score, 100);
        assert_eq!(result.intent_score, 0);
    }

    #[test]
    fn automation_marker_is_case_sensitive() {
        let mut record = LeadRecord::unknown();
        record.must_haves = vec!["Workflow".to_string()];
        let result = classify(&record, &ScoringWeights::default(), &[]);
        // "Workflow" does not match the lowercase marker; no increment.
        assert_eq!(result.fit_score, 50);
    }

    #[test]
    fn first_matching_stage_rule_wins() {
        let overlapping = vec![
            StageRule {
                name: "MQL first".to_string(),
                min_fit: 0,
                min_intent: 0,
            },
            StageRule {
                name: "SQL later".to_string(),
                min_fit: 0,
                min_intent: 0,
            },
        ];
        let record = LeadRecord::unknown();
        let result = classify(&record, &ScoringWeights::default(), &overlapping);
        assert_eq!(result.stage, "MQL first");
        assert_eq!(result.rating, "Warm");
    }

    #[test]
    fn custom_stage_names_degrade_to_cold() {
        assert_eq!(rating_for_stage("SQL (Ready for AE)"), "Hot");
        assert_eq!(rating_for_stage("MQL-Discovery"), "Warm");
        assert_eq!(rating_for_stage("Qualified"), "Cold");
        assert_eq!(rating_for_stage(""), "Cold");
    }
}
