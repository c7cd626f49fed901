//! Prioritized next-action planning.

use crate::extractor::LIKELY_B2B;
use crate::models::{LeadRecord, ScoreResult};
use crate::patterns::PatternLibrary;

/// Derive the action list from the lead record and the resolved stage.
///
/// Three baseline actions are always present. Conditional actions are
/// prepended when they outrank the baseline (POC scope for SQL-stage leads,
/// CRM confirmation) or appended when they do not (invoice samples). Because
/// the POC prepend happens last, the net order when everything fires is:
/// POC, CRM confirmation, baseline x3, invoice.
pub fn plan(lib: &PatternLibrary, record: &LeadRecord, scores: &ScoreResult) -> Vec<String> {
    let mut actions = vec![
        "Confirm key stakeholders & decision process（确认决策链与对接人）".to_string(),
        "Schedule a 20-min discovery call to validate requirements（安排需求澄清电话）".to_string(),
        "Share a short workflow prototype outline + expected data fields（发送流程原型大纲与字段清单）"
            .to_string(),
    ];

    let joined_must_haves = record.must_haves.join(" ");
    if lib.crm_token.is_match(&joined_must_haves) || record.business_model == LIKELY_B2B {
        actions.insert(
            0,
            "Confirm current CRM and data sources（确认当前 CRM 与数据来源/字段）".to_string(),
        );
    }

    if lib.invoice_term.is_match(&joined_must_haves) {
        actions.push(
            "Collect 3–5 sample invoices to define validation rules（收集样例发票定义校验规则）"
                .to_string(),
        );
    }

    if scores.stage.starts_with("SQL") {
        actions.insert(
            0,
            "Propose a POC scope & timeline this week（本周给出 POC 范围与时间线）".to_string(),
        );
    }

    actions
}
