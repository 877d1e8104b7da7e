// Insight prompt templates, one role context + user prompt per domain.
// `{context}` is replaced with the sanitized user context block.
// The JSON keys listed here must match the domain's field specs; anything
// else the model returns is ignored by the validator.

pub const CONFIDENCE_INSTRUCTION: &str = "\
    Report `confidence` as a number between 0 and 1 reflecting how well the \
    provided context supports your analysis. Never claim certainty.";

pub const TRAJECTORY_ROLE: &str = "\
You are a career-progression analyst. Assess where a professional stands in \
their track and how fast they are moving, using only the context provided.";

pub const TRAJECTORY_PROMPT: &str = r#"Analyze the career trajectory described below.

CONTEXT:
{context}

Return a JSON object with exactly these keys:
{
  "current_level": "entry" | "mid" | "senior" | "staff" | "principal" | "executive",
  "trajectory_direction": "ascending" | "plateau" | "pivoting" | "declining",
  "momentum_score": 0-100,
  "growth_velocity": 0-100,
  "skill_alignment": 0-100,
  "market_demand": "low" | "moderate" | "high" | "very_high",
  "years_to_next_level_optimistic": number,
  "years_to_next_level_realistic": number,
  "years_to_next_level_conservative": number,
  "next_role_title": "string",
  "next_milestone": {"title": "string", "months_out": number},
  "growth_levers": ["string"],
  "summary": "string",
  "confidence": 0-1
}"#;

pub const SALARY_ROLE: &str = "\
You are a compensation analyst. Benchmark pay for the role, level and \
location described, in the currency of that location.";

pub const SALARY_PROMPT: &str = r#"Benchmark compensation for the profile below.

CONTEXT:
{context}

Return a JSON object with exactly these keys:
{
  "benchmark_min": number,
  "benchmark_median": number,
  "benchmark_max": number,
  "currency": "USD" | "EUR" | "GBP" | "CAD" | "AUD" | "INR" | "SGD" | "CHF" | "JPY",
  "percentile_position": 0-100,
  "market_demand": "low" | "moderate" | "high" | "very_high",
  "negotiation_leverage": "low" | "moderate" | "high",
  "comparable_profiles": integer,
  "key_factors": ["string"],
  "explanation": "string",
  "confidence": 0-1
}"#;

pub const AUTOMATION_ROLE: &str = "\
You are a labor-market analyst specializing in automation and AI adoption. \
Estimate exposure of the described role's tasks to automation.";

pub const AUTOMATION_PROMPT: &str = r#"Assess automation risk for the role below.

CONTEXT:
{context}

Return a JSON object with exactly these keys:
{
  "task_automation_exposure": 0-100,
  "augmentation_potential": 0-100,
  "human_skill_premium": 0-100,
  "adoption_speed": "slow" | "moderate" | "fast" | "very_fast",
  "timeline_earliest_years": number,
  "timeline_likely_years": number,
  "timeline_latest_years": number,
  "at_risk_tasks": ["string"],
  "resilient_skills": ["string"],
  "explanation": "string",
  "confidence": 0-1
}"#;

pub const SKILL_DECAY_ROLE: &str = "\
You are a skills-market analyst. Estimate how quickly the named skill is \
losing market relevance and what should replace or refresh it.";

pub const SKILL_DECAY_PROMPT: &str = r#"Assess decay of the skill described below.

CONTEXT:
{context}

Return a JSON object with exactly these keys:
{
  "skill_name": "string",
  "current_relevance": 0-100,
  "annual_decay_rate": 0-100,
  "half_life_years": number,
  "market_demand": "low" | "moderate" | "high" | "very_high",
  "refresh_urgency": "low" | "moderate" | "high" | "critical",
  "replacement_skills": ["string"],
  "recommendation": "string",
  "confidence": 0-1
}"#;

pub const MARKET_PULSE_ROLE: &str = "\
You are a hiring-market analyst. Summarize current demand, pay and trend \
signals for the role and region described.";

pub const MARKET_PULSE_PROMPT: &str = r#"Report the market pulse for the profile below.

CONTEXT:
{context}

Return a JSON object with exactly these keys:
{
  "demand_score": 0-100,
  "compensation_score": 0-100,
  "skill_relevance_score": 0-100,
  "trend_score": 0-100,
  "demand_intensity": "low" | "moderate" | "high" | "very_high",
  "posting_trend": "declining" | "stable" | "growing" | "surging",
  "top_hiring_sectors": ["string"],
  "summary": "string",
  "confidence": 0-1
}"#;

pub const PEER_COHORT_ROLE: &str = "\
You are a peer-benchmarking analyst. Compare the profile against peers with \
similar role, seniority and region. Describe cohorts only in aggregate.";

pub const PEER_COHORT_PROMPT: &str = r#"Compare the profile below with its peer cohort.

CONTEXT:
{context}

Return a JSON object with exactly these keys:
{
  "cohort_size": integer,
  "salary_percentile": 0-100,
  "skill_percentile": 0-100,
  "progression_percentile": 0-100,
  "peer_salary_p25": number,
  "peer_salary_p50": number,
  "peer_salary_p75": number,
  "standout_strengths": ["string"],
  "insight": "string",
  "confidence": 0-1
}"#;

pub const MOBILITY_ROLE: &str = "\
You are an international mobility advisor. Assess visa options, credential \
recognition and the financial effect of relocating to the target country.";

pub const MOBILITY_PROMPT: &str = r#"Assess relocation readiness for the profile below.

CONTEXT:
{context}

Return a JSON object with exactly these keys:
{
  "target_country": "string",
  "credential_recognition": 0-1,
  "visa_eligibility": 0-1,
  "market_demand": "low" | "moderate" | "high" | "very_high",
  "financial_impact": 0-1,
  "visa_pathway": "skilled_worker" | "intra_company_transfer" | "global_talent" | "work_permit" | "none",
  "processing_months_min": number,
  "processing_months_typical": number,
  "processing_months_max": number,
  "col_adjusted_salary_delta_pct": number,
  "required_documents": ["string"],
  "summary": "string",
  "confidence": 0-1
}"#;

pub const INTERVIEW_ROLE: &str = "\
You are an interview coach. Score readiness for the target role across \
technical, behavioral, communication and domain dimensions.";

pub const INTERVIEW_PROMPT: &str = r#"Assess interview readiness for the profile below.

CONTEXT:
{context}

Return a JSON object with exactly these keys:
{
  "target_role": "string",
  "technical_score": 0-100,
  "behavioral_score": 0-100,
  "communication_score": 0-100,
  "domain_knowledge_score": 0-100,
  "weak_areas": ["string"],
  "strengths": ["string"],
  "practice_plan": {"focus_area": "string", "daily_minutes": number, "weeks": number},
  "mock_interviews_recommended": integer,
  "feedback": "string",
  "confidence": 0-1
}"#;

pub const TRANSITION_ROLE: &str = "\
You are a career-transition advisor. Assess how feasible a move from the \
current role to the target role is, given skills, market and pay.";

pub const TRANSITION_PROMPT: &str = r#"Assess the career transition described below.

CONTEXT:
{context}

Return a JSON object with exactly these keys:
{
  "target_role": "string",
  "skill_overlap": 0-1,
  "market_demand": "low" | "moderate" | "high" | "very_high",
  "salary_impact": "significant_decrease" | "decrease" | "neutral" | "increase" | "significant_increase",
  "learning_curve": "minimal" | "moderate" | "steep" | "very_steep",
  "months_to_transition_optimistic": number,
  "months_to_transition_realistic": number,
  "months_to_transition_conservative": number,
  "bridge_skills": ["string"],
  "summary": "string",
  "confidence": 0-1
}"#;
