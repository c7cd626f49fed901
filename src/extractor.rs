//! Heuristic field extraction over raw transcript text.
//!
//! Deterministic, pure function of the input text and the [`PatternLibrary`]:
//! no network, no global state. Any input, including the empty string,
//! produces a fully populated [`LeadRecord`] with sentinels rather than errors.

use crate::models::{push_unique, LeadRecord, UNKNOWN};
use crate::patterns::{
    contains_keyword, find_first, PatternLibrary, FILLER_PREFIXES, LEADERSHIP_ROLES, MUST_KEYWORDS,
    NICE_KEYWORDS, ORG_SUFFIXES, PAIN_KEYWORDS, STAKEHOLDER_ROLES,
};

/// Business-model value set when the B2B inference rule fires.
pub const LIKELY_B2B: &str = "Likely B2B (inferred)";

/// Stakeholder marker that replaces raw leadership terms.
pub const REPORTING_STAKEHOLDER: &str = "领导/管理层（Reporting stakeholder）";

/// Company-name guardrail: a candidate is accepted only if it has a plausible
/// length, does not open with conversational filler, and ends with a known
/// organizational suffix. Rejection reverts the field to "Unknown", which is a
/// signal feeding the open-questions list, not an error.
pub fn looks_like_company_name(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return false;
    }
    let len = candidate.chars().count();
    if !(4..=40).contains(&len) {
        return false;
    }
    if FILLER_PREFIXES.iter().any(|p| candidate.starts_with(p)) {
        return false;
    }
    ORG_SUFFIXES.iter().any(|s| candidate.ends_with(s))
}

/// Extract a lead record from transcript text.
pub fn extract(lib: &PatternLibrary, text: &str) -> LeadRecord {
    let mut record = LeadRecord::unknown();
    let text_lower = text.to_lowercase();

    // Account name, gated by the company-name guardrail.
    if let Some(candidate) = find_first(&lib.account_name, text) {
        if looks_like_company_name(&candidate) {
            record.account_name = candidate;
        } else {
            tracing::debug!("Account candidate rejected by guardrail: {}", candidate);
        }
    }

    // Business model: explicit B2B/B2C token, else infer from the co-occurrence
    // of a leadership marker and an enterprise-process marker.
    let mut business_model_inferred = false;
    match find_first(&lib.business_model, text) {
        Some(model) => record.business_model = model,
        None => {
            if lib.leadership_term.is_match(text) && lib.enterprise_term.is_match(text) {
                record.business_model = LIKELY_B2B.to_string();
                business_model_inferred = true;
            }
        }
    }
    let business_model_unknown = record.business_model == UNKNOWN || business_model_inferred;

    if let Some(industry) = find_first(&lib.industry, text) {
        if !industry.is_empty() {
            record.industry = industry;
        }
    }

    if let Some(budget) = find_first(&lib.budget, text) {
        record.budget = budget;
    }

    // Timeline prefers explicit horizons; bare urgency phrases fall back to a
    // composite ASAP tag.
    match find_first(&lib.timeline, text) {
        Some(timeline) => record.timeline = timeline,
        None => {
            if find_first(&lib.urgency, text).is_some() {
                record.timeline = "ASAP（越快越好）".to_string();
            }
        }
    }

    // Keyword buckets: the subsequence of each vocabulary present in the text,
    // vocabulary order preserved.
    for kw in PAIN_KEYWORDS {
        if contains_keyword(&text_lower, kw) {
            push_unique(&mut record.pain_points, *kw);
        }
    }
    for kw in MUST_KEYWORDS {
        if contains_keyword(&text_lower, kw) {
            push_unique(&mut record.must_haves, *kw);
        }
    }
    for kw in NICE_KEYWORDS {
        if contains_keyword(&text_lower, kw) {
            push_unique(&mut record.nice_to_haves, *kw);
        }
    }

    // CRM-identity question: fires when the model was inferred, or when CRM is
    // a must-have with no concrete product named and no explicit negation.
    let crm_mentioned = lib.crm_token.is_match(&record.must_haves.join(" "));
    let crm_known = lib.crm_product.is_match(text);
    let crm_negated = lib.crm_negation.is_match(text);
    let crm_question_needed =
        business_model_inferred || (crm_mentioned && !crm_known && !crm_negated);

    // Stakeholders: explicit roles first, leadership vocabulary as fallback.
    for kw in STAKEHOLDER_ROLES {
        if contains_keyword(&text_lower, kw) {
            push_unique(&mut record.stakeholders, *kw);
        }
    }
    if record.stakeholders.is_empty() {
        for kw in LEADERSHIP_ROLES {
            if contains_keyword(&text_lower, kw) {
                push_unique(&mut record.stakeholders, *kw);
            }
        }
    }
    // Collapse raw leadership terms into the single normalized marker.
    if record
        .stakeholders
        .iter()
        .any(|s| lib.leadership_marker.is_match(s))
    {
        record.stakeholders.retain(|s| !lib.leadership_marker.is_match(s));
        push_unique(&mut record.stakeholders, REPORTING_STAKEHOLDER);
    }

    // Open questions, fixed order, one per failing check.
    if record.account_name == UNKNOWN {
        record.open_questions.push("Company name?（公司名称？）".to_string());
    }
    if record.industry == UNKNOWN {
        record.open_questions.push("Industry?（行业？）".to_string());
    }
    if business_model_unknown {
        record.open_questions.push("B2B or B2C?（B2B 还是 B2C？）".to_string());
    }
    if crm_question_needed {
        record
            .open_questions
            .push("Which CRM are you using?（目前用的 CRM 是什么？）".to_string());
    }
    if record.budget == UNKNOWN {
        record.open_questions.push("Budget range?（预算范围？）".to_string());
    }
    if record.timeline == UNKNOWN {
        record.open_questions.push("Target timeline?（期望上线时间？）".to_string());
    }
    if record.stakeholders.is_empty() {
        record
            .open_questions
            .push("Decision makers involved?（决策链角色？）".to_string());
    }

    // Use-case ladder: generic -> invoice-aware -> reporting-aware. The
    // reporting upgrade needs three independent markers to co-occur.
    record.use_case = "Sales workflow automation".to_string();
    if lib.invoice_term.is_match(text) {
        record.use_case = "Sales workflow + invoice checks".to_string();
    }
    if lib.meeting_summary_term.is_match(text)
        && lib.followup_reminder_term.is_match(text)
        && lib.leadership_term.is_match(text)
    {
        record.use_case =
            "Sales workflow + meeting summary + follow-up reminders + reporting".to_string();
    }

    // Placeholder entries when a bucket stayed empty, so downstream templates
    // never render a blank list where a judgement is expected.
    if record.pain_points.is_empty() {
        record.pain_points.push("Unclear pain points".to_string());
    }
    if record.must_haves.is_empty() {
        record.must_haves.push("Unclear requirements".to_string());
    }
    if record.stakeholders.is_empty() {
        record.stakeholders.push(UNKNOWN.to_string());
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib() -> PatternLibrary {
        PatternLibrary::new()
    }

    #[test]
    fn guardrail_rejects_short_and_unsuffixed_candidates() {
        assert!(!looks_like_company_name("AB"));
        assert!(!looks_like_company_name("某个不知道哪里来的很长很长很长很长很长很长很长很长很长很长很长很长很长的名字有限公司"));
        assert!(!looks_like_company_name("我们想做个东西公司"));
        assert!(!looks_like_company_name("Acme Widgets"));
        assert!(looks_like_company_name("ABC有限公司"));
        assert!(looks_like_company_name("某某科技"));
    }

    #[test]
    fn empty_input_yields_complete_record() {
        let record = extract(&lib(), "");
        assert_eq!(record.account_name, UNKNOWN);
        assert_eq!(record.business_model, UNKNOWN);
        assert_eq!(record.pain_points, vec!["Unclear pain points"]);
        assert_eq!(record.must_haves, vec!["Unclear requirements"]);
        assert_eq!(record.stakeholders, vec![UNKNOWN]);
        // Every check fails except the CRM one.
        assert_eq!(record.open_questions.len(), 6);
    }

    #[test]
    fn explicit_fields_extracted_from_labeled_transcript() {
        let text = "客户：ABC有限公司。行业：B2B 医疗器械。预算：10万。时间线：2周内。";
        let record = extract(&lib(), text);
        assert_eq!(record.account_name, "ABC有限公司");
        assert!(record.industry.contains("医疗器械"));
        assert_eq!(record.business_model, "B2B");
        assert_ne!(record.budget, UNKNOWN);
        assert!(record.timeline.contains("2周内") || record.timeline.contains("2 周内"));
    }

    #[test]
    fn rejected_account_candidate_produces_open_question() {
        let record = extract(&lib(), "客户：我们想搞个系统");
        assert_eq!(record.account_name, UNKNOWN);
        assert!(record
            .open_questions
            .iter()
            .any(|q| q.contains("Company name?")));
    }

    #[test]
    fn business_model_inferred_from_leadership_plus_enterprise_markers() {
        let text = "管理层想看数据，希望每周复盘销售流程。";
        let record = extract(&lib(), text);
        assert_eq!(record.business_model, LIKELY_B2B);
        // The inference forces the CRM-identity question even without a
        // literal CRM mention.
        assert!(record
            .open_questions
            .iter()
            .any(|q| q.contains("Which CRM are you using?")));
        // The model is still considered unresolved.
        assert!(record
            .open_questions
            .iter()
            .any(|q| q.contains("B2B or B2C?")));
    }

    #[test]
    fn bot_is_nice_to_have_only() {
        let record = extract(&lib(), "想要个 bot（非必须）");
        assert!(record.nice_to_haves.contains(&"bot".to_string()));
        assert!(!record.must_haves.contains(&"bot".to_string()));
    }

    #[test]
    fn repeated_keyword_appears_once() {
        let record = extract(&lib(), "我们需要 CRM，现有 CRM 不好用");
        let crm_count = record.must_haves.iter().filter(|m| *m == "CRM").count();
        assert_eq!(crm_count, 1);
    }

    #[test]
    fn crm_question_skipped_when_product_known() {
        let record = extract(&lib(), "客户：ABC有限公司。我们在用 Salesforce 做 CRM。");
        assert!(!record
            .open_questions
            .iter()
            .any(|q| q.contains("Which CRM")));
    }

    #[test]
    fn crm_question_skipped_when_negated() {
        let record = extract(&lib(), "我们目前没有用 CRM。");
        assert!(record.must_haves.contains(&"CRM".to_string()));
        assert!(!record
            .open_questions
            .iter()
            .any(|q| q.contains("Which CRM")));
    }

    #[test]
    fn leadership_terms_collapse_to_reporting_stakeholder() {
        let record = extract(&lib(), "到时候管理层和领导都要看。");
        assert_eq!(record.stakeholders, vec![REPORTING_STAKEHOLDER.to_string()]);
    }

    #[test]
    fn explicit_roles_survive_alongside_leadership_marker() {
        let record = extract(&lib(), "CEO 和财务会参与，管理层要周报。");
        assert!(record.stakeholders.contains(&"CEO".to_string()));
        assert!(record.stakeholders.contains(&"财务".to_string()));
        // "管理层" only matters via the leadership fallback, which is skipped
        // when explicit roles matched.
        assert!(!record.stakeholders.contains(&"管理层".to_string()));
    }

    #[test]
    fn urgency_phrase_becomes_asap_timeline() {
        let record = extract(&lib(), "这个事情越快越好");
        assert_eq!(record.timeline, "ASAP（越快越好）");
        assert!(!record
            .open_questions
            .iter()
            .any(|q| q.contains("Target timeline?")));
    }

    #[test]
    fn use_case_upgrades_to_invoice_then_reporting() {
        let invoice = extract(&lib(), "发票要能自动校验");
        assert_eq!(invoice.use_case, "Sales workflow + invoice checks");

        let reporting = extract(&lib(), "要会后总结和跟进提醒，给总监看。");
        assert_eq!(
            reporting.use_case,
            "Sales workflow + meeting summary + follow-up reminders + reporting"
        );
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "客户：ABC有限公司。CRM 数据很乱，管理层要 dashboard。预算：10万。";
        let a = extract(&lib(), text);
        let b = extract(&lib(), text);
        assert_eq!(a, b);
    }
}
