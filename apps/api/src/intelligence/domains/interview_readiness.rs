use crate::intelligence::composer::{Component, CompositeFormula, Signal, ThresholdTable};
use crate::intelligence::fields::{FieldSpec, StaticValue};
use crate::intelligence::policy::{Domain, DomainPolicy, GenerationSettings};
use crate::intelligence::prompts::{INTERVIEW_PROMPT, INTERVIEW_ROLE};
use crate::llm_client::ModelTier;

const CONFIDENCE_CEILING: f64 = 0.85;
const READINESS_CEILING: f64 = 85.0;

const READINESS_WEIGHTS: &[Component] = &[
    Component::new("technical", 0.35, Signal::Field("technical_score")),
    Component::new("behavioral", 0.25, Signal::Field("behavioral_score")),
    Component::new("communication", 0.20, Signal::Field("communication_score")),
    Component::new("domain_knowledge", 0.20, Signal::Field("domain_knowledge_score")),
];

const READINESS_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[(40.0, "not_ready"), (60.0, "needs_practice"), (80.0, "ready")],
    catch_all: "interview_ready",
};

pub static POLICY: DomainPolicy = DomainPolicy {
    domain: Domain::InterviewReadiness,
    role_context: INTERVIEW_ROLE,
    prompt_template: INTERVIEW_PROMPT,
    generation: GenerationSettings {
        tier: ModelTier::Fast,
        temperature: 0.5,
        max_output_tokens: 1536,
    },
    context_max_chars: 4000,
    fields: &[
        FieldSpec::text("target_role", "Target role"),
        FieldSpec::float("technical_score", 0.0, 100.0, 50.0),
        FieldSpec::float("behavioral_score", 0.0, 100.0, 50.0),
        FieldSpec::float("communication_score", 0.0, 100.0, 50.0),
        FieldSpec::float("domain_knowledge_score", 0.0, 100.0, 50.0),
        FieldSpec::text_list("weak_areas", 5),
        FieldSpec::text_list("strengths", 5),
        FieldSpec::nested(
            "practice_plan",
            &[
                ("focus_area", StaticValue::Text("Core fundamentals")),
                ("daily_minutes", StaticValue::Number(30.0)),
                ("weeks", StaticValue::Number(4.0)),
            ],
        ),
        FieldSpec::integer("mock_interviews_recommended", 0.0, 20.0, 3.0),
        FieldSpec::text("feedback", "Practice the areas with the lowest scores first."),
        FieldSpec::float("confidence", 0.0, CONFIDENCE_CEILING, 0.0),
    ],
    composites: &[CompositeFormula {
        field: "readiness_score",
        scale: 100.0,
        ceiling: READINESS_CEILING,
        components: READINESS_WEIGHTS,
        thresholds: READINESS_TIERS,
        category_field: "readiness_level",
    }],
    explanation_field: "feedback",
    unavailable_message: "Interview readiness scoring is temporarily unavailable. Please try again shortly.",
    fallback_seed: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::record::FieldValue;
    use crate::intelligence::validator::validate_record;
    use serde_json::{json, Value};

    #[test]
    fn test_malformed_practice_plan_replaced_wholesale() {
        let raw = match json!({
            "practice_plan": {"focus_area": "System design", "daily_minutes": "an hour"},
            "mock_interviews_recommended": 4.6
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let record = validate_record(POLICY.domain, &raw, POLICY.fields).record;
        let Some(FieldValue::Nested(plan)) = record.get("practice_plan") else {
            panic!("practice_plan missing");
        };
        assert_eq!(plan["focus_area"], json!("Core fundamentals"));
        assert_eq!(plan["weeks"], json!(4.0));
        assert_eq!(record.get("mock_interviews_recommended"), Some(&FieldValue::Integer(5)));
    }
}
