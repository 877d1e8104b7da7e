//! Axum route handlers for the Insight API.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::intelligence::handoff::PersistableInsight;
use crate::intelligence::pipeline::run_insight;
use crate::intelligence::policy::{Domain, UnknownDomain};
use crate::llm_client::ModelTier;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    pub profile_id: Uuid,
    /// Free-text profile facts, e.g. `{"role": "...", "location": "..."}`.
    pub context: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct CompositeSummary {
    pub field: &'static str,
    pub ceiling: f64,
    pub category_field: &'static str,
    pub categories: Vec<&'static str>,
    /// Record fields the composite is computed from.
    pub inputs: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct DomainSummary {
    pub domain: Domain,
    pub tier: ModelTier,
    pub composites: Vec<CompositeSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/insights
///
/// Lists every insight domain with its composite scores and category labels.
pub async fn handle_list_domains(State(state): State<AppState>) -> Json<Vec<DomainSummary>> {
    let summaries = state
        .policies
        .iter()
        .map(|policy| DomainSummary {
            domain: policy.domain,
            tier: policy.generation.tier,
            composites: policy
                .composites
                .iter()
                .map(|formula| CompositeSummary {
                    field: formula.field,
                    ceiling: formula.ceiling,
                    category_field: formula.category_field,
                    categories: formula.thresholds.labels().collect(),
                    inputs: formula.components.iter().map(|c| c.signal.field()).collect(),
                })
                .collect(),
        })
        .collect();
    Json(summaries)
}

/// POST /api/v1/insights/:domain
///
/// Generates one insight. A gateway failure still returns 200 with the
/// fallback record (`source: "fallback"`).
pub async fn handle_generate_insight(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(request): Json<InsightRequest>,
) -> Result<Json<PersistableInsight>, AppError> {
    let domain: Domain = domain
        .parse()
        .map_err(|e: UnknownDomain| AppError::NotFound(e.to_string()))?;
    let policy = state
        .policies
        .get(domain)
        .ok_or_else(|| AppError::NotFound(format!("no policy for domain '{domain}'")))?;

    if request.context.values().all(|v| v.trim().is_empty()) {
        return Err(AppError::Validation("context cannot be empty".to_string()));
    }

    let scored = run_insight(
        state.gateway.as_ref(),
        policy,
        &request.context,
        &state.config.pipeline_settings(),
    )
    .await;

    let insight = PersistableInsight::from_scored(request.profile_id, scored, policy)?;
    Ok(Json(insight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::intelligence::fields::RawOutput;
    use crate::intelligence::policy::PolicyRegistry;
    use crate::llm_client::{CompletionGateway, CompletionRequest, GatewayError};
    use crate::routes::build_router;

    struct FixedGateway(Option<Value>);

    #[async_trait]
    impl CompletionGateway for FixedGateway {
        async fn complete(&self, _request: CompletionRequest<'_>) -> Result<RawOutput, GatewayError> {
            match &self.0 {
                Some(Value::Object(map)) => Ok(map.clone()),
                _ => Err(GatewayError::EmptyContent),
            }
        }
    }

    fn app(reply: Option<Value>) -> axum::Router {
        let state = AppState {
            gateway: Arc::new(FixedGateway(reply)),
            policies: Arc::new(PolicyRegistry::builtin()),
            config: Config::for_tests(),
        };
        build_router(state)
    }

    async fn post(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_generate_returns_scored_insight() {
        let reply = json!({
            "demand_score": 80,
            "compensation_score": 70,
            "skill_relevance_score": 60,
            "trend_score": 50,
            "confidence": 0.7,
            "summary": "Hiring is steady."
        });
        let profile_id = Uuid::new_v4();
        let (status, body) = post(
            app(Some(reply)),
            "/api/v1/insights/market_pulse",
            json!({"profile_id": profile_id, "context": {"role": "ICU nurse"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], json!("generated"));
        assert_eq!(body["profile_id"], json!(profile_id));
        let score = body["fields"]["market_pulse_score"].as_f64().unwrap();
        assert!((score - 66.5).abs() < 1e-9);
        assert_eq!(body["fields"]["market_health"], json!("healthy"));
    }

    #[tokio::test]
    async fn test_gateway_failure_still_returns_ok_with_fallback() {
        let (status, body) = post(
            app(None),
            "/api/v1/insights/visa_mobility",
            json!({"profile_id": Uuid::new_v4(), "context": {"target": "Canada"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], json!("fallback"));
        assert_eq!(body["fields"]["confidence"], json!(0.0));
        assert_eq!(body["fields"]["readiness_tier"], json!("not_ready"));
    }

    #[tokio::test]
    async fn test_unknown_domain_is_not_found() {
        let (status, body) = post(
            app(None),
            "/api/v1/insights/horoscope",
            json!({"profile_id": Uuid::new_v4(), "context": {"sign": "Leo"}}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_empty_context_is_rejected() {
        let (status, body) = post(
            app(None),
            "/api/v1/insights/skill_decay",
            json!({"profile_id": Uuid::new_v4(), "context": {"skill": "  "}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn test_list_domains() {
        let response = app(None)
            .oneshot(Request::builder().uri("/api/v1/insights").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        let domains = body.as_array().unwrap();
        assert_eq!(domains.len(), Domain::ALL.len());
        let pulse = domains
            .iter()
            .find(|d| d["domain"] == json!("market_pulse"))
            .unwrap();
        assert_eq!(pulse["composites"].as_array().unwrap().len(), 2);
        assert_eq!(
            pulse["composites"][0]["categories"],
            json!(["critical", "low", "moderate", "healthy", "thriving"])
        );
        assert_eq!(
            pulse["composites"][0]["inputs"],
            json!(["demand_score", "compensation_score", "skill_relevance_score", "trend_score"])
        );
    }
}
