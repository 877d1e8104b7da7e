use crate::intelligence::composer::{
    Component, CompositeFormula, Signal, ThresholdTable, DEMAND_LABELS, DEMAND_LEVELS,
};
use crate::intelligence::fields::FieldSpec;
use crate::intelligence::policy::{Domain, DomainPolicy, GenerationSettings};
use crate::intelligence::prompts::{SKILL_DECAY_PROMPT, SKILL_DECAY_ROLE};
use crate::llm_client::ModelTier;

const CONFIDENCE_CEILING: f64 = 0.85;
const SKILL_HEALTH_CEILING: f64 = 85.0;

const URGENCY_LABELS: &[&str] = &["low", "moderate", "high", "critical"];

const SKILL_HEALTH_WEIGHTS: &[Component] = &[
    Component::new("relevance", 0.45, Signal::Field("current_relevance")),
    Component::new("market_demand", 0.30, Signal::Level("market_demand", DEMAND_LEVELS)),
    Component::new("durability", 0.25, Signal::Inverted("annual_decay_rate")),
];

const DECAY_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[(25.0, "obsolete"), (50.0, "decaying"), (75.0, "stable")],
    catch_all: "thriving",
};

pub static POLICY: DomainPolicy = DomainPolicy {
    domain: Domain::SkillDecay,
    role_context: SKILL_DECAY_ROLE,
    prompt_template: SKILL_DECAY_PROMPT,
    generation: GenerationSettings {
        tier: ModelTier::Fast,
        temperature: 0.3,
        max_output_tokens: 1024,
    },
    context_max_chars: 2000,
    fields: &[
        FieldSpec::text("skill_name", "Tracked skill"),
        FieldSpec::float("current_relevance", 0.0, 100.0, 50.0),
        FieldSpec::float("annual_decay_rate", 0.0, 100.0, 10.0),
        FieldSpec::float("half_life_years", 0.5, 30.0, 5.0),
        FieldSpec::one_of("market_demand", DEMAND_LABELS, "moderate"),
        FieldSpec::one_of("refresh_urgency", URGENCY_LABELS, "moderate"),
        FieldSpec::text_list("replacement_skills", 5),
        FieldSpec::text(
            "recommendation",
            "Keep this skill current with periodic hands-on practice.",
        ),
        FieldSpec::float("confidence", 0.0, CONFIDENCE_CEILING, 0.0),
    ],
    composites: &[CompositeFormula {
        field: "skill_health_score",
        scale: 100.0,
        ceiling: SKILL_HEALTH_CEILING,
        components: SKILL_HEALTH_WEIGHTS,
        thresholds: DECAY_TIERS,
        category_field: "decay_status",
    }],
    explanation_field: "recommendation",
    unavailable_message: "Skill decay tracking is temporarily unavailable. Please try again shortly.",
    fallback_seed: &[],
};
