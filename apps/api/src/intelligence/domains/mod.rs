// One policy table per insight domain. Each module exposes a single
// `POLICY` static; `PolicyRegistry::builtin` collects them.

pub mod automation_risk;
pub mod career_trajectory;
pub mod interview_readiness;
pub mod market_pulse;
pub mod peer_cohort;
pub mod salary_benchmark;
pub mod skill_decay;
pub mod transition_feasibility;
pub mod visa_mobility;
