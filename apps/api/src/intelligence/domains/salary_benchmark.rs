use crate::intelligence::composer::{
    Component, CompositeFormula, LevelTable, Signal, ThresholdTable, DEMAND_LABELS, DEMAND_LEVELS,
};
use crate::intelligence::fields::FieldSpec;
use crate::intelligence::policy::{Domain, DomainPolicy, GenerationSettings};
use crate::intelligence::prompts::{SALARY_PROMPT, SALARY_ROLE};
use crate::llm_client::ModelTier;

const CONFIDENCE_CEILING: f64 = 0.85;
const MARKET_POSITION_CEILING: f64 = 85.0;
const MAX_BENCHMARK: f64 = 5_000_000.0;
/// Benchmarks drawn from fewer comparable profiles than this are never reported.
const MIN_COMPARABLE_PROFILES: i64 = 10;

const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "CAD", "AUD", "INR", "SGD", "CHF", "JPY"];
const LEVERAGE_LABELS: &[&str] = &["low", "moderate", "high"];
const LEVERAGE_LEVELS: LevelTable = &[("low", 0.25), ("moderate", 0.5), ("high", 0.85)];

const MARKET_POSITION_WEIGHTS: &[Component] = &[
    Component::new("percentile_position", 0.50, Signal::Field("percentile_position")),
    Component::new("market_demand", 0.30, Signal::Level("market_demand", DEMAND_LEVELS)),
    Component::new(
        "negotiation_leverage",
        0.20,
        Signal::Level("negotiation_leverage", LEVERAGE_LEVELS),
    ),
];

const MARKET_POSITION_TIERS: ThresholdTable = ThresholdTable {
    tiers: &[(35.0, "below_market"), (65.0, "at_market")],
    catch_all: "above_market",
};

pub static POLICY: DomainPolicy = DomainPolicy {
    domain: Domain::SalaryBenchmark,
    role_context: SALARY_ROLE,
    prompt_template: SALARY_PROMPT,
    generation: GenerationSettings {
        tier: ModelTier::Primary,
        temperature: 0.2,
        max_output_tokens: 1536,
    },
    context_max_chars: 3000,
    fields: &[
        FieldSpec::float("benchmark_min", 0.0, MAX_BENCHMARK, 0.0),
        FieldSpec::float("benchmark_median", 0.0, MAX_BENCHMARK, 0.0),
        FieldSpec::float("benchmark_max", 0.0, MAX_BENCHMARK, 0.0),
        FieldSpec::ordering(&["benchmark_min", "benchmark_median", "benchmark_max"]),
        FieldSpec::one_of("currency", CURRENCIES, "USD"),
        FieldSpec::float("percentile_position", 0.0, 100.0, 50.0),
        FieldSpec::one_of("market_demand", DEMAND_LABELS, "moderate"),
        FieldSpec::one_of("negotiation_leverage", LEVERAGE_LABELS, "moderate"),
        FieldSpec::cohort_floor("comparable_profiles", MIN_COMPARABLE_PROFILES),
        FieldSpec::text_list("key_factors", 5),
        FieldSpec::text(
            "explanation",
            "Salary benchmark computed from comparable roles in your market.",
        ),
        FieldSpec::float("confidence", 0.0, CONFIDENCE_CEILING, 0.0),
    ],
    composites: &[CompositeFormula {
        field: "market_position_score",
        scale: 100.0,
        ceiling: MARKET_POSITION_CEILING,
        components: MARKET_POSITION_WEIGHTS,
        thresholds: MARKET_POSITION_TIERS,
        category_field: "market_position",
    }],
    explanation_field: "explanation",
    unavailable_message: "Salary benchmarking is temporarily unavailable. Please try again shortly.",
    fallback_seed: &[],
};
