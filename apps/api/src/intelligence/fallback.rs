//! Fallback Provider. The record served when the completion gateway fails.
//!
//! The fallback goes through the same validator and composer as a model
//! payload, so it has the same shape and meets the same invariants. Only
//! the explanation text differs, which keeps the difference visible to a
//! person reading the result.

use crate::intelligence::composer::score_record;
use crate::intelligence::fields::RawOutput;
use crate::intelligence::policy::DomainPolicy;
use crate::intelligence::record::{FieldValue, RecordSource, ScoredRecord};
use crate::intelligence::validator::{validate_record, Validation};

pub fn fallback_record(policy: &DomainPolicy) -> ScoredRecord {
    let seed: RawOutput = policy
        .fallback_seed
        .iter()
        .map(|(field, value)| (field.to_string(), value.to_json()))
        .collect();

    let Validation { mut record, .. } = validate_record(policy.domain, &seed, policy.fields);
    record.set(
        policy.explanation_field,
        FieldValue::Text(policy.unavailable_message.to_string()),
    );

    let composites = score_record(&record, policy.composites);
    ScoredRecord {
        record,
        composites,
        source: RecordSource::Fallback,
    }
}
