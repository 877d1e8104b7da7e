use crate::intelligence::composer::{
    Component, CompositeFormula, Signal, ThresholdTable, DEMAND_LABELS, DEMAND_LEVELS,
};
use crate::intelligence::fields::{FieldSpec, StaticValue};
use crate::intelligence::policy::{Domain, DomainPolicy, GenerationSettings};
use crate::intelligence::prompts::{MOBILITY_PROMPT, MOBILITY_ROLE};
use crate::llm_client::ModelTier;

const CONFIDENCE_CEILING: f64 = 0.85;
/// Readiness is on a 0–1 scale and never reported above this.
const MOBILITY_CEILING: f64 = 0.85;

const VISA_PATHWAYS: &[&str] = &[
    "skilled_worker",
    "intra_company_transfer",
    "global_talent",
    "work_permit",
    "none",
];

const READINESS_WEIGHTS: &[Component] = &[
    Component::new("credential_recognition", 0.30, Signal::Field("credential_recognition")),
    Component::new("visa_eligibility", 0.25, Signal::Field("visa_eligibility")),
    Component::new("market_demand", 0.25, Signal::Level("market_demand", DEMAND_LEVELS)),
    Component::new("financial_impact", 0.20, Signal::Field("financial_impact")),
];

const READINESS_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[(0.25, "not_ready"), (0.50, "emerging"), (0.70, "ready")],
    catch_all: "highly_ready",
};

pub static POLICY: DomainPolicy = DomainPolicy {
    domain: Domain::VisaMobility,
    role_context: MOBILITY_ROLE,
    prompt_template: MOBILITY_PROMPT,
    generation: GenerationSettings {
        tier: ModelTier::Primary,
        temperature: 0.2,
        max_output_tokens: 2048,
    },
    context_max_chars: 4000,
    fields: &[
        FieldSpec::text("target_country", "Target country"),
        FieldSpec::float("credential_recognition", 0.0, 1.0, 0.5),
        FieldSpec::float("visa_eligibility", 0.0, 1.0, 0.5),
        FieldSpec::float("financial_impact", 0.0, 1.0, 0.5),
        FieldSpec::one_of("market_demand", DEMAND_LABELS, "moderate"),
        FieldSpec::one_of("visa_pathway", VISA_PATHWAYS, "none"),
        FieldSpec::float("processing_months_min", 0.0, 60.0, 3.0),
        FieldSpec::float("processing_months_typical", 0.0, 60.0, 6.0),
        FieldSpec::float("processing_months_max", 0.0, 60.0, 12.0),
        FieldSpec::ordering(&[
            "processing_months_min",
            "processing_months_typical",
            "processing_months_max",
        ]),
        FieldSpec::float("col_adjusted_salary_delta_pct", -100.0, 300.0, 0.0),
        FieldSpec::text_list("required_documents", 10),
        FieldSpec::text(
            "summary",
            "Relocation readiness was assessed from your credentials and the target market.",
        ),
        FieldSpec::float("confidence", 0.0, CONFIDENCE_CEILING, 0.0),
    ],
    composites: &[CompositeFormula {
        field: "mobility_readiness_score",
        scale: 1.0,
        ceiling: MOBILITY_CEILING,
        components: READINESS_WEIGHTS,
        thresholds: READINESS_TIERS,
        category_field: "readiness_tier",
    }],
    explanation_field: "summary",
    unavailable_message: "Visa and mobility analysis is temporarily unavailable. Please try again later.",
    // Without a model answer nothing is known about eligibility, so the
    // fallback must not suggest the user is ready to relocate.
    fallback_seed: &[
        ("credential_recognition", StaticValue::Number(0.0)),
        ("visa_eligibility", StaticValue::Number(0.0)),
        ("financial_impact", StaticValue::Number(0.0)),
        ("market_demand", StaticValue::Text("low")),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::composer::score_record;
    use crate::intelligence::validator::validate_record;
    use serde_json::{json, Value};

    #[test]
    fn test_readiness_capped_on_unit_scale() {
        let raw = match json!({
            "credential_recognition": 1.0,
            "visa_eligibility": 1.4,
            "financial_impact": 1.0,
            "market_demand": "very_high"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let record = validate_record(POLICY.domain, &raw, POLICY.fields).record;
        assert_eq!(record.number("visa_eligibility"), Some(1.0));

        let score = &score_record(&record, POLICY.composites)[0];
        assert_eq!(score.value, MOBILITY_CEILING);
        assert_eq!(score.category, "highly_ready");
    }

    #[test]
    fn test_salary_delta_allows_negative() {
        let raw = match json!({"col_adjusted_salary_delta_pct": -35.5}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let record = validate_record(POLICY.domain, &raw, POLICY.fields).record;
        assert_eq!(record.number("col_adjusted_salary_delta_pct"), Some(-35.5));
    }
}
