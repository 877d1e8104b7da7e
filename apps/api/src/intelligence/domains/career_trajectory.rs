use crate::intelligence::composer::{
    Component, CompositeFormula, Signal, ThresholdTable, DEMAND_LABELS, DEMAND_LEVELS,
};
use crate::intelligence::fields::{FieldSpec, StaticValue};
use crate::intelligence::policy::{Domain, DomainPolicy, GenerationSettings};
use crate::intelligence::prompts::{TRAJECTORY_PROMPT, TRAJECTORY_ROLE};
use crate::llm_client::ModelTier;

const CONFIDENCE_CEILING: f64 = 0.85;
const TRAJECTORY_CEILING: f64 = 85.0;

const CAREER_LEVELS: &[&str] = &["entry", "mid", "senior", "staff", "principal", "executive"];
const DIRECTIONS: &[&str] = &["ascending", "plateau", "pivoting", "declining"];

/// momentum 0.35, growth velocity 0.25, skill alignment 0.20, market demand 0.20
const TRAJECTORY_WEIGHTS: &[Component] = &[
    Component::new("momentum", 0.35, Signal::Field("momentum_score")),
    Component::new("growth_velocity", 0.25, Signal::Field("growth_velocity")),
    Component::new("skill_alignment", 0.20, Signal::Field("skill_alignment")),
    Component::new("market_demand", 0.20, Signal::Level("market_demand", DEMAND_LEVELS)),
];

const TRAJECTORY_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[(25.0, "stalled"), (50.0, "steady"), (75.0, "rising")],
    catch_all: "accelerating",
};

pub static POLICY: DomainPolicy = DomainPolicy {
    domain: Domain::CareerTrajectory,
    role_context: TRAJECTORY_ROLE,
    prompt_template: TRAJECTORY_PROMPT,
    generation: GenerationSettings {
        tier: ModelTier::Primary,
        temperature: 0.4,
        max_output_tokens: 2048,
    },
    context_max_chars: 4000,
    fields: &[
        FieldSpec::one_of("current_level", CAREER_LEVELS, "mid"),
        FieldSpec::one_of("trajectory_direction", DIRECTIONS, "plateau"),
        FieldSpec::float("momentum_score", 0.0, 100.0, 50.0),
        FieldSpec::float("growth_velocity", 0.0, 100.0, 50.0),
        FieldSpec::float("skill_alignment", 0.0, 100.0, 50.0),
        FieldSpec::one_of("market_demand", DEMAND_LABELS, "moderate"),
        FieldSpec::float("years_to_next_level_optimistic", 0.0, 30.0, 2.0),
        FieldSpec::float("years_to_next_level_realistic", 0.0, 30.0, 3.0),
        FieldSpec::float("years_to_next_level_conservative", 0.0, 30.0, 5.0),
        FieldSpec::ordering(&[
            "years_to_next_level_optimistic",
            "years_to_next_level_realistic",
            "years_to_next_level_conservative",
        ]),
        FieldSpec::text("next_role_title", "Next level in your current track"),
        FieldSpec::nested(
            "next_milestone",
            &[
                ("title", StaticValue::Text("Take ownership of a larger scope")),
                ("months_out", StaticValue::Number(12.0)),
            ],
        ),
        FieldSpec::text_list("growth_levers", 5),
        FieldSpec::text(
            "summary",
            "Your trajectory scores are below; the narrative summary could not be generated.",
        ),
        FieldSpec::float("confidence", 0.0, CONFIDENCE_CEILING, 0.0),
    ],
    composites: &[CompositeFormula {
        field: "trajectory_score",
        scale: 100.0,
        ceiling: TRAJECTORY_CEILING,
        components: TRAJECTORY_WEIGHTS,
        thresholds: TRAJECTORY_TIERS,
        category_field: "trajectory_category",
    }],
    explanation_field: "summary",
    unavailable_message: "Career trajectory analysis is temporarily unavailable. Please try again in a few minutes.",
    fallback_seed: &[],
};
