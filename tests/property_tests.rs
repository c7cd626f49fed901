/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use proptest::prelude::*;
use sales_workflow_agent::config::{ScoringWeights, StageRule};
use sales_workflow_agent::extractor::{self, looks_like_company_name};
use sales_workflow_agent::merge::merge_external;
use sales_workflow_agent::models::LeadRecord;
use sales_workflow_agent::patterns::PatternLibrary;
use sales_workflow_agent::redact::{redact_pii, text_sha256};
use sales_workflow_agent::scoring::classify;

// Property: extraction is total and deterministic
proptest! {
    #[test]
    fn extraction_never_panics(text in "\\PC*") {
        let lib = PatternLibrary::new();
        let _ = extractor::extract(&lib, &text);
    }

    #[test]
    fn extraction_is_deterministic(text in "\\PC{0,200}") {
        let lib = PatternLibrary::new();
        let a = extractor::extract(&lib, &text);
        let b = extractor::extract(&lib, &text);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn list_fields_are_ordered_sets(text in "\\PC{0,200}") {
        let lib = PatternLibrary::new();
        let record = extractor::extract(&lib, &text);
        for list in [&record.pain_points, &record.must_haves, &record.nice_to_haves, &record.stakeholders] {
            let mut seen = std::collections::HashSet::new();
            for item in list.iter() {
                prop_assert!(seen.insert(item.clone()), "duplicate {:?}", item);
            }
        }
    }
}

// Property: the company-name guardrail enforces its bounds
proptest! {
    #[test]
    fn guardrail_never_panics(candidate in "\\PC*") {
        let _ = looks_like_company_name(&candidate);
    }

    #[test]
    fn guardrail_rejects_out_of_range_lengths(candidate in "\\PC*") {
        let len = candidate.trim().chars().count();
        if !(4..=40).contains(&len) {
            prop_assert!(!looks_like_company_name(&candidate));
        }
    }

    #[test]
    fn suffixed_candidates_of_sane_length_pass(stem in "[a-zA-Z0-9]{0,30}") {
        // Alphanumeric stems cannot hit the filler-prefix list, and the
        // suffix keeps the length within bounds, so these always pass.
        let candidate = format!("{}有限公司", stem);
        prop_assert!(looks_like_company_name(&candidate));
    }
}

// Property: scores are clamped to [0,100] for any weights
proptest! {
    #[test]
    fn scores_stay_in_bounds(
        base_fit in -500i64..500,
        base_intent in -500i64..500,
        increment in -200i64..200,
        budget_known in proptest::bool::ANY,
        industry_known in proptest::bool::ANY,
    ) {
        let weights = ScoringWeights {
            base_fit,
            base_intent,
            fit_industry_known: increment,
            fit_crm_salesforce: increment,
            fit_mentions_automation_tracking: increment,
            intent_budget_known: increment,
            intent_timeline_known: increment,
            intent_few_open_questions: increment,
        };
        let mut record = LeadRecord::unknown();
        if budget_known {
            record.budget = "10万".to_string();
        }
        if industry_known {
            record.industry = "SaaS".to_string();
        }
        let result = classify(&record, &weights, &[]);
        prop_assert!((0..=100).contains(&result.fit_score));
        prop_assert!((0..=100).contains(&result.intent_score));
    }

    #[test]
    fn first_matching_rule_wins_regardless_of_later_rules(
        threshold in 0i64..=60,
    ) {
        let rules = vec![
            StageRule { name: "first".to_string(), min_fit: threshold, min_intent: threshold },
            StageRule { name: "second".to_string(), min_fit: 0, min_intent: 0 },
        ];
        let record = LeadRecord::unknown();
        let result = classify(&record, &ScoringWeights::default(), &rules);
        // Base scores are 50/60; whenever the first rule is satisfied it must
        // win even though the second always matches.
        if result.fit_score >= threshold && result.intent_score >= threshold {
            prop_assert_eq!(result.stage, "first");
        } else {
            prop_assert_eq!(result.stage, "second");
        }
    }
}

// Property: the external merge never panics and never empties a field
proptest! {
    #[test]
    fn merge_never_panics(raw in "\\PC*") {
        let mut record = LeadRecord::unknown();
        merge_external(&mut record, &raw);
    }

    #[test]
    fn merge_never_blanks_strings(raw in "\\PC{0,200}") {
        let lib = PatternLibrary::new();
        let mut record = extractor::extract(&lib, "客户：ABC有限公司。预算：10万");
        merge_external(&mut record, &raw);
        prop_assert!(!record.account_name.is_empty());
        prop_assert!(!record.budget.is_empty());
        prop_assert!(!record.industry.is_empty());
    }
}

// Property: redaction is total and hashing is stable
proptest! {
    #[test]
    fn redaction_never_panics(text in "\\PC*") {
        let _ = redact_pii(&text);
    }

    #[test]
    fn redacted_text_has_no_email_tokens(local in "[a-z]{1,8}", domain in "[a-z]{1,8}") {
        let text = format!("contact {}@{}.com please", local, domain);
        let (redacted, hit) = redact_pii(&text);
        prop_assert!(hit);
        prop_assert!(!redacted.contains('@'));
    }

    #[test]
    fn hash_is_64_hex_chars(text in "\\PC{0,100}") {
        let hash = text_sha256(&text);
        prop_assert_eq!(hash.len(), 64);
        prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
