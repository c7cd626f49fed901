use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Base values and point increments for the score classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub base_fit: i64,
    pub base_intent: i64,
    pub fit_industry_known: i64,
    pub fit_crm_salesforce: i64,
    pub fit_mentions_automation_tracking: i64,
    pub intent_budget_known: i64,
    pub intent_timeline_known: i64,
    pub intent_few_open_questions: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_fit: 50,
            base_intent: 50,
            fit_industry_known: 10,
            fit_crm_salesforce: 10,
            fit_mentions_automation_tracking: 10,
            intent_budget_known: 15,
            intent_timeline_known: 10,
            intent_few_open_questions: 10,
        }
    }
}

/// One entry of the ordered stage-rule table. The table is scanned
/// top-to-bottom and the first rule whose thresholds are both met wins, so
/// entry order is part of the configuration contract.
#[derive(Debug, Clone, Deserialize)]
pub struct StageRule {
    pub name: String,
    #[serde(default)]
    pub min_fit: i64,
    #[serde(default)]
    pub min_intent: i64,
}

/// Salesforce-style CRM export mapping: target field name -> source key.
/// Source keys are LeadRecord field names or one of the synthetic keys
/// `summary_text` / `stage` / `rating`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrmExportConfig {
    #[serde(default)]
    pub salesforce: SalesforceExportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesforceExportConfig {
    #[serde(rename = "Lead", default)]
    pub lead: BTreeMap<String, String>,
}

/// Run configuration, loaded once per invocation from a JSON file and passed
/// by reference into each component. No ambient/global config state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringWeights,
    pub stage_rules: Vec<StageRule>,
    pub owner: String,
    pub language: String,
    pub redact_pii: bool,
    pub max_excerpt_chars: usize,
    pub crm_export: CrmExportConfig,
    /// Endpoint of the optional external structured-extraction provider.
    /// When absent the pipeline runs heuristic-only.
    pub extractor_url: Option<String>,
    pub extractor_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringWeights::default(),
            stage_rules: Vec::new(),
            owner: "You".to_string(),
            language: "ZH".to_string(),
            redact_pii: true,
            max_excerpt_chars: 500,
            crm_export: CrmExportConfig::default(),
            extractor_url: None,
            extractor_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;

        if config.extractor_timeout_secs == 0 {
            anyhow::bail!("extractor_timeout_secs must be greater than zero");
        }
        if let Some(ref url) = config.extractor_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("extractor_url must start with http:// or https://");
            }
        }

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Owner: {}", config.owner);
        tracing::debug!("Language: {}", config.language);
        tracing::debug!("Stage rules: {}", config.stage_rules.len());
        if let Some(ref url) = config.extractor_url {
            tracing::info!("External extractor configured: {}", url);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.scoring.base_fit, 50);
        assert_eq!(config.scoring.intent_budget_known, 15);
        assert_eq!(config.owner, "You");
        assert_eq!(config.language, "ZH");
        assert!(config.redact_pii);
        assert_eq!(config.max_excerpt_chars, 500);
        assert!(config.stage_rules.is_empty());
        assert!(config.extractor_url.is_none());
    }

    #[test]
    fn stage_rules_keep_declaration_order() {
        let config: Config = serde_json::from_str(
            r#"{
                "stage_rules": [
                    {"name": "SQL (Ready for AE)", "min_fit": 65, "min_intent": 70},
                    {"name": "MQL (Nurture + discovery)", "min_fit": 55, "min_intent": 55}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.stage_rules[0].name, "SQL (Ready for AE)");
        assert_eq!(config.stage_rules[1].name, "MQL (Nurture + discovery)");
    }

    #[test]
    fn crm_mapping_parses() {
        let config: Config = serde_json::from_str(
            r#"{
                "crm_export": {
                    "salesforce": {
                        "Lead": {"Company": "account_name", "Rating": "rating"}
                    }
                }
            }"#,
        )
        .unwrap();
        let lead = &config.crm_export.salesforce.lead;
        assert_eq!(lead.get("Company").map(String::as_str), Some("account_name"));
        assert_eq!(lead.get("Rating").map(String::as_str), Some("rating"));
    }
}
