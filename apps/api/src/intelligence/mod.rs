// Insight engine: per-domain policies, output validation, composite scoring.
// All LLM calls go through llm_client. Nothing here talks to a model directly.

pub mod composer;
pub mod domains;
pub mod fallback;
pub mod fields;
pub mod handlers;
pub mod handoff;
pub mod invariants;
pub mod pipeline;
pub mod policy;
pub mod prompts;
pub mod record;
pub mod sanitizer;
pub mod validator;
