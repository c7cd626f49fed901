//! Follow-up email and report rendering.
//!
//! Both renderers are deterministic pure functions of their inputs. The email
//! comes in two language modes, "ZH" and "BILINGUAL"; any other value behaves
//! as "ZH".

use crate::actions;
use crate::models::{LeadRecord, ScoreResult};
use crate::patterns::PatternLibrary;

/// Render the follow-up email.
pub fn render_followup_email(
    lib: &PatternLibrary,
    record: &LeadRecord,
    scores: &ScoreResult,
    owner: &str,
    lang: &str,
) -> String {
    let bullets = [
        format!("行业/Industry: {}", record.industry),
        format!("业务类型/Segment: {}", record.business_model),
        format!("痛点/Pain points: {}", record.pain_points.join(", ")),
        format!("关键需求/Must-haves: {}", record.must_haves.join(", ")),
        format!(
            "可选项/Nice-to-haves: {}",
            if record.nice_to_haves.is_empty() {
                "None".to_string()
            } else {
                record.nice_to_haves.join(", ")
            }
        ),
        format!("预算/Budget: {}", record.budget),
        format!("时间线/Timeline: {}", record.timeline),
    ];

    let action_list = actions::plan(lib, record, scores);
    let top_actions: Vec<String> = action_list
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, a)| format!("{}) {}", i + 1, a))
        .collect();

    if lang.to_uppercase() == "BILINGUAL" {
        let question_lines: Vec<String> = if record.open_questions.is_empty() {
            vec!["- None for now / 暂无".to_string()]
        } else {
            record.open_questions.iter().map(|q| format!("- {}", q)).collect()
        };

        let mut body: Vec<String> = vec![
            "Subject: Follow-up on your requirements & next steps / 需求跟进与下一步建议".to_string(),
            String::new(),
            "Hi there / 你好，".to_string(),
            String::new(),
            "Thanks for sharing your context. I captured the key points below / 感谢分享需求背景，关键信息如下："
                .to_string(),
        ];
        body.extend(bullets.iter().map(|b| format!("- {}", b)));
        body.push(String::new());
        body.push("Proposed next steps / 建议下一步：".to_string());
        body.extend(top_actions);
        body.push(String::new());
        body.push("Quick questions / 需要确认的问题：".to_string());
        body.extend(question_lines);
        body.push(String::new());
        body.push("If you're available, I can share a short prototype and align on a POC plan this week.".to_string());
        body.push("如方便，我可以本周分享一个简版原型并对齐 POC 计划。".to_string());
        body.push(String::new());
        body.push(format!("Best / 谢谢，\n{}", owner));
        return body.join("\n").trim().to_string();
    }

    // Default Chinese
    let question_lines: Vec<String> = if record.open_questions.is_empty() {
        vec!["- 暂无".to_string()]
    } else {
        record.open_questions.iter().map(|q| format!("- {}", q)).collect()
    };

    let mut body: Vec<String> = vec![
        "主题：需求跟进与下一步建议".to_string(),
        String::new(),
        "你好，".to_string(),
        String::new(),
        "感谢分享需求背景。我先把关键信息整理如下：".to_string(),
    ];
    // Swap the bilingual "label: value" bullets to full-width colons.
    body.extend(bullets.iter().map(|b| match b.split_once(':') {
        Some((label, value)) => format!("- {}：{}", label, value.trim()),
        None => format!("- {}", b),
    }));
    body.push(String::new());
    body.push("建议下一步：".to_string());
    body.extend(top_actions);
    body.push(String::new());
    body.push("需要进一步确认的问题：".to_string());
    body.extend(question_lines);
    body.push(String::new());
    body.push("如果你方便，我可以本周分享一个简版 workflow 原型，并对齐 POC 范围与时间线。".to_string());
    body.push(String::new());
    body.push(format!("谢谢，\n{}", owner));
    body.join("\n").trim().to_string()
}

/// Render the Markdown run report: lead summary, score block, next actions,
/// a fenced copy of the email, and the open questions when present.
pub fn build_report_md(
    record: &LeadRecord,
    scores: &ScoreResult,
    actions: &[String],
    email: &str,
) -> String {
    let mut md: Vec<String> = Vec::new();
    md.push("# Lead Summary\n".to_string());
    md.push(format!("- **Lead ID**: {}", record.lead_id));
    md.push(format!("- **Account**: {}", record.account_name));
    md.push(format!("- **Industry**: {}", record.industry));
    md.push(format!("- **Use case**: {}", record.use_case));
    md.push(format!("- **Budget**: {}", record.budget));
    md.push(format!("- **Timeline**: {}", record.timeline));
    md.push(format!("- **Pain points**: {}", record.pain_points.join(", ")));
    md.push(format!("- **Must-haves**: {}", record.must_haves.join(", ")));
    md.push(format!("- **Stakeholders**: {}", record.stakeholders.join(", ")));
    md.push(format!("- **PII redacted**: {}", record.pii_redacted));
    md.push(format!("- **Text hash**: `{}`\n", record.text_hash));

    md.push("## Scores\n".to_string());
    md.push(format!("- **Fit score**: {}", scores.fit_score));
    md.push(format!("- **Intent score**: {}", scores.intent_score));
    md.push(format!("- **Stage**: {}", scores.stage));
    md.push(format!("- **Rating**: {}\n", scores.rating));

    md.push("## Next actions\n".to_string());
    for action in actions {
        md.push(format!("- {}", action));
    }

    md.push("\n## Follow-up email\n".to_string());
    md.push("```".to_string());
    md.push(email.to_string());
    md.push("```".to_string());

    if !record.open_questions.is_empty() {
        md.push("\n## Open questions\n".to_string());
        for q in &record.open_questions {
            md.push(format!("- {}", q));
        }
    }

    md.join("\n").trim().to_string()
}
