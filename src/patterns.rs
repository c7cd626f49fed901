//! Pattern library for the heuristic extractor.
//!
//! Pure data: ordered regex candidates per field plus keyword vocabularies.
//! Pattern order is an explicit priority (first match wins) and part of the
//! extraction contract: reordering changes results.

use regex::Regex;

/// Conversational filler openers that disqualify an account-name candidate.
pub const FILLER_PREFIXES: &[&str] = &["我们想", "想做", "搞个", "有没有", "能不能", "就是", "现在"];

/// Organizational suffixes a company-name candidate must end with.
pub const ORG_SUFFIXES: &[&str] = &[
    "有限公司",
    "股份有限公司",
    "集团",
    "科技",
    "贸易",
    "物流",
    "医疗",
    "信息",
    "网络",
    "软件",
    "咨询",
    "公司",
];

/// Pain-point vocabulary. Scan order is the output order.
pub const PAIN_KEYWORDS: &[&str] = &[
    "手动",
    "低效",
    "遗漏",
    "数据不一致",
    "分散",
    "节奏很乱",
    "未跟进",
    "不太爱填",
    "很乱",
    "manual",
    "slow",
    "漏跟进",
    "麻烦",
];

/// Must-have vocabulary.
pub const MUST_KEYWORDS: &[&str] = &[
    "自动化",
    "workflow",
    "tracking",
    "数据追踪",
    "CRM",
    "Salesforce",
    "发票",
    "invoice",
    "dashboard",
    "提醒",
    "超过48小时未跟进",
    "会后总结",
    "复盘",
    "英文",
    "email",
    "邮箱",
    "WhatsApp",
    "微信",
    "导出 Excel/CSV",
    "导出Excel/CSV",
];

/// Nice-to-have vocabulary. Disjoint from the other buckets ("bot" lives here
/// only), which is what keeps a keyword out of more than one category.
pub const NICE_KEYWORDS: &[&str] = &["同步", "集成", "导出", "Slack", "企微", "飞书", "小程序", "bot"];

/// Explicit stakeholder roles, scanned first.
pub const STAKEHOLDER_ROLES: &[&str] = &[
    "CEO",
    "CTO",
    "采购",
    "财务",
    "运营",
    "销售总监",
    "老板",
    "procurement",
    "finance",
    "ops",
    "sales",
];

/// Leadership fallback vocabulary, scanned only when no explicit role matched.
pub const LEADERSHIP_ROLES: &[&str] = &["领导", "管理层", "总监", "management", "manager", "director"];

/// Compiled pattern sets applied by the extractor. Built once per run.
pub struct PatternLibrary {
    /// "customer/company" markers, in priority order.
    pub account_name: Vec<Regex>,
    /// Explicit B2B/B2C tokens, in priority order.
    pub business_model: Vec<Regex>,
    /// Parenthetical qualifier, "we are a ... company" construction, "industry:" label.
    pub industry: Vec<Regex>,
    /// Bulleted "budget:" line, inline label, English label.
    pub budget: Vec<Regex>,
    /// Bulleted "timeline:" line, inline labels, bare horizon keywords.
    pub timeline: Vec<Regex>,
    /// Urgency phrases used as timeline fallback.
    pub urgency: Vec<Regex>,

    /// Leadership/management marker for the B2B inference rule and use-case ladder.
    pub leadership_term: Regex,
    /// Enterprise-process marker for the B2B inference rule.
    pub enterprise_term: Regex,
    /// Leadership marker used to normalize stakeholder lists.
    pub leadership_marker: Regex,

    /// Bare "CRM" token.
    pub crm_token: Regex,
    /// Concrete CRM product names.
    pub crm_product: Regex,
    /// Explicit CRM-negation phrases ("没有 CRM" and friends).
    pub crm_negation: Regex,

    /// Invoice terms for the use-case ladder and action planning.
    pub invoice_term: Regex,
    /// Meeting-summary marker for the reporting-aware use case.
    pub meeting_summary_term: Regex,
    /// Follow-up-reminder marker for the reporting-aware use case.
    pub followup_reminder_term: Regex,
}

impl PatternLibrary {
    pub fn new() -> Self {
        Self {
            account_name: compile(&[r"(?i)客户[:：]\s*([^\n（。]+)", r"(?i)Company[:：]\s*([^\n]+)"]),
            business_model: compile(&[r"(?i)\b(B2B|B2C)\b", r"(?i)（\s*(B2B|B2C)\b"]),
            industry: compile(&[
                r"(?i)（\s*(?:B2B|B2C)\s*([^\)）]+)[）\)]",
                r"(?i)我们是[^\n]*?一家([^\n，。;；]+?)(?:公司|企业|集团|机构|团队)",
                r"(?i)行业[:：]\s*([^\n]+)",
            ]),
            budget: compile(&[
                r"(?i)[-•]\s*预算[:：]\s*([^\n]+)",
                r"(?i)预算[:：]\s*([^\n]+)",
                r"(?i)budget[:：]\s*([^\n]+)",
            ]),
            timeline: compile(&[
                r"(?i)[-•]\s*时间线[:：]\s*([^\n]+)",
                r"(?i)时间线[:：]\s*([^\n]+)",
                r"(?i)timeline[:：]\s*([^\n]+)",
                r"(?i)(2\s*周内|1-2\s*个月|两周内|本月|下月|Q[1-4])",
            ]),
            urgency: compile(&[r"(?i)(越快越好|尽快|ASAP|as soon as possible)"]),
            leadership_term: rx(r"(?i)(领导|管理层|老板|总监|management|manager|director)"),
            enterprise_term: rx(r"(?i)(\bCRM\b|销售效率|流程|复盘|看数据|dashboard)"),
            leadership_marker: rx(r"(?i)(领导|管理层|management)"),
            crm_token: rx(r"(?i)\bCRM\b"),
            crm_product: rx(r"(?i)\bSalesforce\b"),
            crm_negation: rx(r"(没有|无|未用|不用|不使用).{0,6}CRM"),
            invoice_term: rx(r"(?i)发票|invoice"),
            meeting_summary_term: rx(r"会后总结"),
            followup_reminder_term: rx(r"跟进提醒"),
        }
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn rx(pattern: &str) -> Regex {
    // Patterns are compile-time literals; a failure here is a programming error.
    Regex::new(pattern).unwrap()
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| rx(p)).collect()
}

/// Scan an ordered candidate list and return the first capture, trimmed.
pub fn find_first(patterns: &[Regex], text: &str) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}

/// Case-insensitive literal substring test, matching the keyword-scan behavior
/// of the vocabularies above.
pub fn contains_keyword(text_lower: &str, keyword: &str) -> bool {
    text_lower.contains(&keyword.to_lowercase())
}
