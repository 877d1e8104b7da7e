use crate::intelligence::composer::{
    Component, CompositeFormula, LevelTable, Signal, ThresholdTable, DEMAND_LABELS, DEMAND_LEVELS,
};
use crate::intelligence::fields::FieldSpec;
use crate::intelligence::policy::{Domain, DomainPolicy, GenerationSettings};
use crate::intelligence::prompts::{TRANSITION_PROMPT, TRANSITION_ROLE};
use crate::llm_client::ModelTier;

const CONFIDENCE_CEILING: f64 = 0.85;
const TRANSITION_CEILING: f64 = 0.85;

const SALARY_IMPACT_LABELS: &[&str] = &[
    "significant_decrease",
    "decrease",
    "neutral",
    "increase",
    "significant_increase",
];
const SALARY_IMPACT_LEVELS: LevelTable = &[
    ("significant_decrease", 0.1),
    ("decrease", 0.3),
    ("neutral", 0.5),
    ("increase", 0.75),
    ("significant_increase", 1.0),
];

// Steeper curves make a transition less feasible.
const LEARNING_CURVE_LABELS: &[&str] = &["minimal", "moderate", "steep", "very_steep"];
const LEARNING_CURVE_LEVELS: LevelTable = &[
    ("minimal", 1.0),
    ("moderate", 0.7),
    ("steep", 0.4),
    ("very_steep", 0.15),
];

const FEASIBILITY_WEIGHTS: &[Component] = &[
    Component::new("skill_overlap", 0.35, Signal::Field("skill_overlap")),
    Component::new("market_demand", 0.25, Signal::Level("market_demand", DEMAND_LEVELS)),
    Component::new("salary_impact", 0.20, Signal::Level("salary_impact", SALARY_IMPACT_LEVELS)),
    Component::new(
        "learning_curve",
        0.20,
        Signal::Level("learning_curve", LEARNING_CURVE_LEVELS),
    ),
];

const FEASIBILITY_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[(0.30, "low"), (0.55, "moderate"), (0.75, "high")],
    catch_all: "very_high",
};

pub static POLICY: DomainPolicy = DomainPolicy {
    domain: Domain::TransitionFeasibility,
    role_context: TRANSITION_ROLE,
    prompt_template: TRANSITION_PROMPT,
    generation: GenerationSettings {
        tier: ModelTier::Primary,
        temperature: 0.4,
        max_output_tokens: 2048,
    },
    context_max_chars: 4000,
    fields: &[
        FieldSpec::text("target_role", "Target role"),
        FieldSpec::float("skill_overlap", 0.0, 1.0, 0.5),
        FieldSpec::one_of("market_demand", DEMAND_LABELS, "moderate"),
        FieldSpec::one_of("salary_impact", SALARY_IMPACT_LABELS, "neutral"),
        FieldSpec::one_of("learning_curve", LEARNING_CURVE_LABELS, "moderate"),
        FieldSpec::float("months_to_transition_optimistic", 0.0, 60.0, 6.0),
        FieldSpec::float("months_to_transition_realistic", 0.0, 60.0, 12.0),
        FieldSpec::float("months_to_transition_conservative", 0.0, 60.0, 18.0),
        FieldSpec::ordering(&[
            "months_to_transition_optimistic",
            "months_to_transition_realistic",
            "months_to_transition_conservative",
        ]),
        FieldSpec::text_list("bridge_skills", 8),
        FieldSpec::text(
            "summary",
            "Transition feasibility reflects skill overlap, demand and the learning required.",
        ),
        FieldSpec::float("confidence", 0.0, CONFIDENCE_CEILING, 0.0),
    ],
    composites: &[CompositeFormula {
        field: "feasibility_score",
        scale: 1.0,
        ceiling: TRANSITION_CEILING,
        components: FEASIBILITY_WEIGHTS,
        thresholds: FEASIBILITY_TIERS,
        category_field: "feasibility_level",
    }],
    explanation_field: "summary",
    unavailable_message: "Career transition analysis is temporarily unavailable. Please try again later.",
    fallback_seed: &[],
};
