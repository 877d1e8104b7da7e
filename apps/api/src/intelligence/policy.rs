//! Per-domain policy tables: field specs, composite formulas, generation
//! settings and fallback text. All of it is `'static` data; the registry
//! is built once at startup and shared read-only through `AppState`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::intelligence::composer::CompositeFormula;
use crate::intelligence::domains;
use crate::intelligence::fields::{FieldSpec, StaticValue};
use crate::llm_client::ModelTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    CareerTrajectory,
    SalaryBenchmark,
    AutomationRisk,
    SkillDecay,
    MarketPulse,
    PeerCohort,
    VisaMobility,
    InterviewReadiness,
    TransitionFeasibility,
}

impl Domain {
    pub const ALL: [Domain; 9] = [
        Domain::CareerTrajectory,
        Domain::SalaryBenchmark,
        Domain::AutomationRisk,
        Domain::SkillDecay,
        Domain::MarketPulse,
        Domain::PeerCohort,
        Domain::VisaMobility,
        Domain::InterviewReadiness,
        Domain::TransitionFeasibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::CareerTrajectory => "career_trajectory",
            Domain::SalaryBenchmark => "salary_benchmark",
            Domain::AutomationRisk => "automation_risk",
            Domain::SkillDecay => "skill_decay",
            Domain::MarketPulse => "market_pulse",
            Domain::PeerCohort => "peer_cohort",
            Domain::VisaMobility => "visa_mobility",
            Domain::InterviewReadiness => "interview_readiness",
            Domain::TransitionFeasibility => "transition_feasibility",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown insight domain '{0}'")]
pub struct UnknownDomain(pub String);

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}

/// Per-call tuning knobs passed through to the completion gateway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub tier: ModelTier,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug)]
pub struct DomainPolicy {
    pub domain: Domain,
    /// System prompt fragment describing the analyst role.
    pub role_context: &'static str,
    /// User prompt with a `{context}` placeholder.
    pub prompt_template: &'static str,
    pub generation: GenerationSettings,
    /// Per-field limit for sanitized user context.
    pub context_max_chars: usize,
    pub fields: &'static [FieldSpec],
    pub composites: &'static [CompositeFormula],
    /// Text field that carries the user-facing explanation.
    pub explanation_field: &'static str,
    /// Written into `explanation_field` when the fallback record is served.
    pub unavailable_message: &'static str,
    /// Payload validated to produce the fallback record. Fields not listed
    /// take their declared defaults.
    pub fallback_seed: &'static [(&'static str, StaticValue)],
}

impl DomainPolicy {
    #[cfg(test)]
    pub fn spec_for(&self, field: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|s| s.field() == Some(field))
    }
}

/// Immutable lookup of every domain policy.
#[derive(Debug)]
pub struct PolicyRegistry {
    policies: Vec<&'static DomainPolicy>,
}

impl PolicyRegistry {
    pub fn builtin() -> Self {
        Self {
            policies: vec![
                &domains::career_trajectory::POLICY,
                &domains::salary_benchmark::POLICY,
                &domains::automation_risk::POLICY,
                &domains::skill_decay::POLICY,
                &domains::market_pulse::POLICY,
                &domains::peer_cohort::POLICY,
                &domains::visa_mobility::POLICY,
                &domains::interview_readiness::POLICY,
                &domains::transition_feasibility::POLICY,
            ],
        }
    }

    pub fn get(&self, domain: Domain) -> Option<&'static DomainPolicy> {
        self.policies.iter().copied().find(|p| p.domain == domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static DomainPolicy> + '_ {
        self.policies.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::fallback::fallback_record;
    use crate::intelligence::fields::NumericKind;
    use crate::intelligence::invariants::check_invariants;

    fn registry() -> PolicyRegistry {
        PolicyRegistry::builtin()
    }

    fn numeric_bounds(policy: &DomainPolicy, field: &str) -> Option<(f64, f64)> {
        match policy.spec_for(field) {
            Some(FieldSpec::Numeric { min, max, .. }) => Some((*min, *max)),
            _ => None,
        }
    }

    #[test]
    fn test_domain_round_trips_through_str() {
        for domain in Domain::ALL {
            assert_eq!(domain.as_str().parse::<Domain>(), Ok(domain));
            let json = serde_json::to_value(domain).unwrap();
            assert_eq!(json, serde_json::json!(domain.as_str()));
        }
        assert!("astrology".parse::<Domain>().is_err());
    }

    #[test]
    fn test_registry_covers_every_domain_once() {
        let registry = registry();
        for domain in Domain::ALL {
            assert!(registry.get(domain).is_some(), "missing {domain}");
            assert_eq!(registry.iter().filter(|p| p.domain == domain).count(), 1);
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        for policy in registry().iter() {
            assert!(!policy.composites.is_empty(), "{} has no composite", policy.domain);
            for formula in policy.composites {
                let total: f64 = formula.components.iter().map(|c| c.weight).sum();
                assert!(
                    (total - 1.0).abs() < 1e-9,
                    "{}.{} weights sum to {total}",
                    policy.domain,
                    formula.field
                );
            }
        }
    }

    #[test]
    fn test_ceilings_strictly_below_scale() {
        for policy in registry().iter() {
            for formula in policy.composites {
                assert!(formula.ceiling > 0.0 && formula.ceiling < formula.scale);
            }
        }
    }

    #[test]
    fn test_threshold_tables_increase_within_scale() {
        for policy in registry().iter() {
            for formula in policy.composites {
                let bounds: Vec<f64> = formula.thresholds.tiers.iter().map(|(b, _)| *b).collect();
                assert!(!bounds.is_empty());
                assert!(bounds.windows(2).all(|w| w[0] < w[1]), "{}", formula.field);
                assert!(bounds.iter().all(|b| *b > 0.0 && *b < formula.ceiling));
            }
        }
    }

    #[test]
    fn test_components_read_declared_fields_on_scale() {
        for policy in registry().iter() {
            for formula in policy.composites {
                for component in formula.components {
                    let field = component.signal.field();
                    let spec = policy
                        .spec_for(field)
                        .unwrap_or_else(|| panic!("{}: undeclared {field}", policy.domain));
                    if let FieldSpec::Numeric { min, max, .. } = spec {
                        assert!(*min >= 0.0 && *max <= formula.scale, "{field} off scale");
                    }
                }
            }
        }
    }

    #[test]
    fn test_composite_outputs_are_never_declared_fields() {
        for policy in registry().iter() {
            for formula in policy.composites {
                assert!(policy.spec_for(formula.field).is_none());
                assert!(policy.spec_for(formula.category_field).is_none());
            }
        }
    }

    #[test]
    fn test_defaults_within_declared_ranges() {
        for policy in registry().iter() {
            for spec in policy.fields {
                match *spec {
                    FieldSpec::Numeric {
                        field,
                        min,
                        max,
                        default,
                        kind,
                    } => {
                        assert!(min <= default && default <= max, "{field}");
                        if kind == NumericKind::Integer {
                            assert_eq!(default.fract(), 0.0, "{field}");
                        }
                    }
                    FieldSpec::Enum {
                        field,
                        allowed,
                        default,
                    } => assert!(allowed.contains(&default), "{field}"),
                    FieldSpec::Text { fallback, .. } => assert!(!fallback.trim().is_empty()),
                    FieldSpec::CohortFloor { k, .. } => assert!(k > 0),
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_ordering_groups_share_numeric_bounds() {
        for policy in registry().iter() {
            for spec in policy.fields {
                if let FieldSpec::OrderingGroup { fields } = spec {
                    let bounds: Vec<_> = fields.iter().map(|f| numeric_bounds(policy, f)).collect();
                    assert!(bounds.iter().all(Option::is_some), "{fields:?}");
                    assert!(bounds.windows(2).all(|w| w[0] == w[1]), "{fields:?}");
                }
            }
        }
    }

    #[test]
    fn test_confidence_fields_capped_below_certainty() {
        for policy in registry().iter() {
            let (_, max) = numeric_bounds(policy, "confidence")
                .unwrap_or_else(|| panic!("{} lacks confidence", policy.domain));
            assert!(max <= 0.85, "{} confidence max {max}", policy.domain);
        }
    }

    #[test]
    fn test_explanation_field_is_text() {
        for policy in registry().iter() {
            assert!(matches!(
                policy.spec_for(policy.explanation_field),
                Some(FieldSpec::Text { .. })
            ));
            assert!(policy.unavailable_message.contains("unavailable"));
        }
    }

    #[test]
    fn test_prompt_templates_take_context() {
        for policy in registry().iter() {
            assert!(policy.prompt_template.contains("{context}"), "{}", policy.domain);
            assert!(policy.generation.max_output_tokens > 0);
            assert!((0.0..=1.0).contains(&policy.generation.temperature));
        }
    }

    #[test]
    fn test_every_fallback_satisfies_invariants() {
        for policy in registry().iter() {
            let fallback = fallback_record(policy);
            assert_eq!(check_invariants(&fallback, policy), Ok(()), "{}", policy.domain);
        }
    }
}
