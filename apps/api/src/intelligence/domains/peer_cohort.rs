use crate::intelligence::composer::{Component, CompositeFormula, Signal, ThresholdTable};
use crate::intelligence::fields::FieldSpec;
use crate::intelligence::policy::{Domain, DomainPolicy, GenerationSettings};
use crate::intelligence::prompts::{PEER_COHORT_PROMPT, PEER_COHORT_ROLE};
use crate::llm_client::ModelTier;

const CONFIDENCE_CEILING: f64 = 0.85;
const STANDING_CEILING: f64 = 85.0;
const MAX_SALARY: f64 = 5_000_000.0;

/// Smallest cohort that may be reported. Anything smaller could identify
/// individual peers.
pub const ANONYMITY_FLOOR: i64 = 10;

const STANDING_WEIGHTS: &[Component] = &[
    Component::new("salary", 0.35, Signal::Field("salary_percentile")),
    Component::new("skills", 0.35, Signal::Field("skill_percentile")),
    Component::new("progression", 0.30, Signal::Field("progression_percentile")),
];

const STANDING_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[(25.0, "lagging"), (50.0, "developing"), (75.0, "competitive")],
    catch_all: "leading",
};

pub static POLICY: DomainPolicy = DomainPolicy {
    domain: Domain::PeerCohort,
    role_context: PEER_COHORT_ROLE,
    prompt_template: PEER_COHORT_PROMPT,
    generation: GenerationSettings {
        tier: ModelTier::Primary,
        temperature: 0.3,
        max_output_tokens: 1536,
    },
    context_max_chars: 3000,
    fields: &[
        FieldSpec::cohort_floor("cohort_size", ANONYMITY_FLOOR),
        FieldSpec::float("salary_percentile", 0.0, 100.0, 50.0),
        FieldSpec::float("skill_percentile", 0.0, 100.0, 50.0),
        FieldSpec::float("progression_percentile", 0.0, 100.0, 50.0),
        FieldSpec::float("peer_salary_p25", 0.0, MAX_SALARY, 0.0),
        FieldSpec::float("peer_salary_p50", 0.0, MAX_SALARY, 0.0),
        FieldSpec::float("peer_salary_p75", 0.0, MAX_SALARY, 0.0),
        FieldSpec::ordering(&["peer_salary_p25", "peer_salary_p50", "peer_salary_p75"]),
        FieldSpec::text_list("standout_strengths", 5),
        FieldSpec::text("insight", "Your standing relative to comparable peers is shown above."),
        FieldSpec::float("confidence", 0.0, CONFIDENCE_CEILING, 0.0),
    ],
    composites: &[CompositeFormula {
        field: "peer_standing_score",
        scale: 100.0,
        ceiling: STANDING_CEILING,
        components: STANDING_WEIGHTS,
        thresholds: STANDING_TIERS,
        category_field: "standing_tier",
    }],
    explanation_field: "insight",
    unavailable_message: "Peer comparison is temporarily unavailable. Please try again shortly.",
    fallback_seed: &[],
};
