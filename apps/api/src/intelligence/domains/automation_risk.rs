use crate::intelligence::composer::{Component, CompositeFormula, LevelTable, Signal, ThresholdTable};
use crate::intelligence::fields::FieldSpec;
use crate::intelligence::policy::{Domain, DomainPolicy, GenerationSettings};
use crate::intelligence::prompts::{AUTOMATION_PROMPT, AUTOMATION_ROLE};
use crate::llm_client::ModelTier;

const CONFIDENCE_CEILING: f64 = 0.85;
const RISK_CEILING: f64 = 85.0;

const ADOPTION_LABELS: &[&str] = &["slow", "moderate", "fast", "very_fast"];
const ADOPTION_LEVELS: LevelTable = &[
    ("slow", 0.2),
    ("moderate", 0.5),
    ("fast", 0.75),
    ("very_fast", 1.0),
];

/// Higher human-skill premium and augmentation potential lower the risk,
/// so both enter inverted.
const RISK_WEIGHTS: &[Component] = &[
    Component::new("task_exposure", 0.40, Signal::Field("task_automation_exposure")),
    Component::new("adoption_speed", 0.25, Signal::Level("adoption_speed", ADOPTION_LEVELS)),
    Component::new("skill_premium", 0.20, Signal::Inverted("human_skill_premium")),
    Component::new("augmentation", 0.15, Signal::Inverted("augmentation_potential")),
];

const RISK_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[
        (20.0, "minimal"),
        (40.0, "low"),
        (60.0, "moderate"),
        (80.0, "high"),
    ],
    catch_all: "critical",
};

pub static POLICY: DomainPolicy = DomainPolicy {
    domain: Domain::AutomationRisk,
    role_context: AUTOMATION_ROLE,
    prompt_template: AUTOMATION_PROMPT,
    generation: GenerationSettings {
        tier: ModelTier::Primary,
        temperature: 0.3,
        max_output_tokens: 2048,
    },
    context_max_chars: 4000,
    fields: &[
        FieldSpec::float("task_automation_exposure", 0.0, 100.0, 50.0),
        FieldSpec::float("augmentation_potential", 0.0, 100.0, 50.0),
        FieldSpec::float("human_skill_premium", 0.0, 100.0, 50.0),
        FieldSpec::one_of("adoption_speed", ADOPTION_LABELS, "moderate"),
        FieldSpec::float("timeline_earliest_years", 0.0, 30.0, 3.0),
        FieldSpec::float("timeline_likely_years", 0.0, 30.0, 5.0),
        FieldSpec::float("timeline_latest_years", 0.0, 30.0, 10.0),
        FieldSpec::ordering(&[
            "timeline_earliest_years",
            "timeline_likely_years",
            "timeline_latest_years",
        ]),
        FieldSpec::text_list("at_risk_tasks", 8),
        FieldSpec::text_list("resilient_skills", 8),
        FieldSpec::text(
            "explanation",
            "Automation exposure was estimated from the tasks typical of this role.",
        ),
        FieldSpec::float("confidence", 0.0, CONFIDENCE_CEILING, 0.0),
    ],
    composites: &[CompositeFormula {
        field: "automation_risk_score",
        scale: 100.0,
        ceiling: RISK_CEILING,
        components: RISK_WEIGHTS,
        thresholds: RISK_TIERS,
        category_field: "risk_level",
    }],
    explanation_field: "explanation",
    unavailable_message: "Automation risk analysis is temporarily unavailable. Please try again later.",
    fallback_seed: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::composer::score_record;
    use crate::intelligence::validator::validate_record;
    use serde_json::{json, Value};

    #[test]
    fn test_high_exposure_capped_at_ceiling() {
        let raw = match json!({
            "task_automation_exposure": 90,
            "adoption_speed": "very_fast",
            "human_skill_premium": 10,
            "augmentation_potential": 20,
            "risk_level": "minimal"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let record = validate_record(POLICY.domain, &raw, POLICY.fields).record;
        let score = &score_record(&record, POLICY.composites)[0];
        // 0.40·90 + 0.25·100 + 0.20·90 + 0.15·80 = 91, capped
        assert_eq!(score.value, RISK_CEILING);
        assert_eq!(score.category, "critical");
    }

    #[test]
    fn test_protective_signals_lower_risk() {
        let raw = match json!({
            "task_automation_exposure": 40,
            "adoption_speed": "slow",
            "human_skill_premium": 80,
            "augmentation_potential": 70
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let record = validate_record(POLICY.domain, &raw, POLICY.fields).record;
        let score = &score_record(&record, POLICY.composites)[0];
        // 0.40·40 + 0.25·20 + 0.20·20 + 0.15·30 = 29.5
        assert!((score.value - 29.5).abs() < 1e-9);
        assert_eq!(score.category, "low");
    }
}
