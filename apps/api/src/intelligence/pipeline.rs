//! Insight Pipeline: sanitize, prompt, complete, validate, score.
//!
//! `run_insight` never fails. Any gateway error or timeout yields the
//! domain's fallback record, so callers always get a record that meets
//! every invariant.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::intelligence::composer::{discarded_composites, score_record};
use crate::intelligence::fallback::fallback_record;
use crate::intelligence::policy::DomainPolicy;
use crate::intelligence::prompts::CONFIDENCE_INSTRUCTION;
use crate::intelligence::record::{RecordSource, ScoredRecord};
use crate::intelligence::sanitizer::sanitize;
use crate::intelligence::validator::{validate_record, Validation};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, UNTRUSTED_CONTEXT_INSTRUCTION};
use crate::llm_client::{CompletionGateway, CompletionRequest, GatewayError};

const ERROR_LOG_CHARS: usize = 200;

#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    /// Upper bound on one gateway call, retries included.
    pub gateway_timeout: Duration,
    /// Global per-field cap; a policy may set a lower one.
    pub context_max_chars: usize,
}

/// Sanitizes each context entry and renders them as `key: value` lines.
pub fn render_context(
    policy: &DomainPolicy,
    context: &BTreeMap<String, String>,
    max_chars: usize,
) -> String {
    let limit = max_chars.min(policy.context_max_chars);
    context
        .iter()
        .filter_map(|(key, value)| {
            let label = format!("{}.{}", policy.domain, key);
            let (clean_key, _) = sanitize(key, 64, &label);
            let (clean_value, _) = sanitize(value, limit, &label);
            (!clean_key.is_empty() && !clean_value.is_empty())
                .then(|| format!("{clean_key}: {clean_value}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_system_prompt(policy: &DomainPolicy) -> String {
    format!(
        "{JSON_ONLY_SYSTEM}\n\n{}\n\n{UNTRUSTED_CONTEXT_INSTRUCTION}\n{CONFIDENCE_INSTRUCTION}",
        policy.role_context
    )
}

pub async fn run_insight(
    gateway: &dyn CompletionGateway,
    policy: &DomainPolicy,
    context: &BTreeMap<String, String>,
    settings: &PipelineSettings,
) -> ScoredRecord {
    let started = Instant::now();
    let prompt = policy
        .prompt_template
        .replace("{context}", &render_context(policy, context, settings.context_max_chars));
    let system = build_system_prompt(policy);

    let request = CompletionRequest {
        prompt: &prompt,
        system: &system,
        tier: policy.generation.tier,
        temperature: policy.generation.temperature,
        max_output_tokens: policy.generation.max_output_tokens,
    };

    let completion = match tokio::time::timeout(settings.gateway_timeout, gateway.complete(request)).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Timeout {
            after_secs: settings.gateway_timeout.as_secs(),
        }),
    };

    let scored = match completion {
        Ok(raw) => {
            let Validation { record, repairs } = validate_record(policy.domain, &raw, policy.fields);
            for repair in &repairs {
                debug!(domain = %policy.domain, field = repair.field, kind = ?repair.kind, "repaired field");
            }
            if !repairs.is_empty() {
                info!(domain = %policy.domain, repairs = repairs.len(), "model output repaired");
            }

            let composites = score_record(&record, policy.composites);
            for discarded in discarded_composites(&raw, &composites) {
                debug!(
                    domain = %policy.domain,
                    field = discarded.field,
                    reported = %discarded.reported,
                    recomputed = %discarded.recomputed,
                    "discarded model-reported composite"
                );
            }

            ScoredRecord {
                record,
                composites,
                source: RecordSource::Generated,
            }
        }
        Err(e) => {
            let message: String = e.to_string().chars().take(ERROR_LOG_CHARS).collect();
            warn!(
                domain = %policy.domain,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %message,
                "completion failed, serving fallback"
            );
            fallback_record(policy)
        }
    };

    info!(
        domain = %policy.domain,
        source = ?scored.source,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "insight ready"
    );
    scored
}
