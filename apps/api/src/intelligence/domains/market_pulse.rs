use crate::intelligence::composer::{
    Component, CompositeFormula, Signal, ThresholdTable, DEMAND_LABELS, DEMAND_LEVELS,
};
use crate::intelligence::fields::FieldSpec;
use crate::intelligence::policy::{Domain, DomainPolicy, GenerationSettings};
use crate::intelligence::prompts::{MARKET_PULSE_PROMPT, MARKET_PULSE_ROLE};
use crate::llm_client::ModelTier;

const CONFIDENCE_CEILING: f64 = 0.85;
const PULSE_CEILING: f64 = 85.0;

const POSTING_TRENDS: &[&str] = &["declining", "stable", "growing", "surging"];

const PULSE_WEIGHTS: &[Component] = &[
    Component::new("demand", 0.30, Signal::Field("demand_score")),
    Component::new("compensation", 0.25, Signal::Field("compensation_score")),
    Component::new("skill_relevance", 0.25, Signal::Field("skill_relevance_score")),
    Component::new("trend", 0.20, Signal::Field("trend_score")),
];

const PULSE_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[
        (20.0, "critical"),
        (40.0, "low"),
        (60.0, "moderate"),
        (80.0, "healthy"),
    ],
    catch_all: "thriving",
};

const MOMENTUM_WEIGHTS: &[Component] = &[
    Component::new(
        "demand_intensity",
        0.60,
        Signal::Level("demand_intensity", DEMAND_LEVELS),
    ),
    Component::new("trend", 0.40, Signal::Field("trend_score")),
];

const MOMENTUM_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[(33.0, "cooling"), (66.0, "steady")],
    catch_all: "heating",
};

pub static POLICY: DomainPolicy = DomainPolicy {
    domain: Domain::MarketPulse,
    role_context: MARKET_PULSE_ROLE,
    prompt_template: MARKET_PULSE_PROMPT,
    generation: GenerationSettings {
        tier: ModelTier::Fast,
        temperature: 0.3,
        max_output_tokens: 1024,
    },
    context_max_chars: 2000,
    fields: &[
        FieldSpec::float("demand_score", 0.0, 100.0, 50.0),
        FieldSpec::float("compensation_score", 0.0, 100.0, 50.0),
        FieldSpec::float("skill_relevance_score", 0.0, 100.0, 50.0),
        FieldSpec::float("trend_score", 0.0, 100.0, 50.0),
        FieldSpec::one_of("demand_intensity", DEMAND_LABELS, "moderate"),
        FieldSpec::one_of("posting_trend", POSTING_TRENDS, "stable"),
        FieldSpec::text_list("top_hiring_sectors", 5),
        FieldSpec::text("summary", "Market signals for your role are summarized in the scores."),
        FieldSpec::float("confidence", 0.0, CONFIDENCE_CEILING, 0.0),
    ],
    composites: &[
        CompositeFormula {
            field: "market_pulse_score",
            scale: 100.0,
            ceiling: PULSE_CEILING,
            components: PULSE_WEIGHTS,
            thresholds: PULSE_TIERS,
            category_field: "market_health",
        },
        CompositeFormula {
            field: "hiring_momentum_score",
            scale: 100.0,
            ceiling: PULSE_CEILING,
            components: MOMENTUM_WEIGHTS,
            thresholds: MOMENTUM_TIERS,
            category_field: "hiring_momentum",
        },
    ],
    explanation_field: "summary",
    unavailable_message: "Market pulse data is temporarily unavailable. Please check back soon.",
    fallback_seed: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::composer::score_record;
    use crate::intelligence::validator::validate_record;
    use serde_json::{json, Value};

    #[test]
    fn test_pulse_score_and_momentum() {
        let raw = match json!({
            "demand_score": 80,
            "compensation_score": 60,
            "skill_relevance_score": 70,
            "trend_score": 50,
            "demand_intensity": "high",
            "market_pulse_score": 99
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let record = validate_record(POLICY.domain, &raw, POLICY.fields).record;
        let scores = score_record(&record, POLICY.composites);

        // 0.30·80 + 0.25·60 + 0.25·70 + 0.20·50 = 66.5
        assert!((scores[0].value - 66.5).abs() < 1e-9);
        assert_eq!(scores[0].category, "healthy");

        // 0.60·75 + 0.40·50 = 65
        assert!((scores[1].value - 65.0).abs() < 1e-9);
        assert_eq!(scores[1].category, "steady");
    }

    #[test]
    fn test_all_maximal_inputs_hit_ceiling() {
        let raw = match json!({
            "demand_score": 100,
            "compensation_score": 100,
            "skill_relevance_score": 100,
            "trend_score": 100,
            "demand_intensity": "very_high"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let record = validate_record(POLICY.domain, &raw, POLICY.fields).record;
        for score in score_record(&record, POLICY.composites) {
            assert_eq!(score.value, PULSE_CEILING);
        }
    }
}
