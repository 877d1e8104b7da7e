//! Persistence boundary: the flat shape a storage collaborator receives.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use crate::intelligence::invariants::{check_invariants, InvariantViolation};
use crate::intelligence::policy::{Domain, DomainPolicy};
use crate::intelligence::record::{RecordSource, ScoredRecord};

/// A scored record flattened into field → value, keyed to its owning profile.
#[derive(Debug, Clone, Serialize)]
pub struct PersistableInsight {
    pub profile_id: Uuid,
    pub domain: Domain,
    pub source: RecordSource,
    pub generated_at: DateTime<Utc>,
    pub fields: BTreeMap<&'static str, Value>,
}

impl PersistableInsight {
    /// Re-checks every invariant before flattening. A violation is a bug in
    /// the validator or composer and is never written.
    pub fn from_scored(
        profile_id: Uuid,
        scored: ScoredRecord,
        policy: &DomainPolicy,
    ) -> Result<Self, InvariantViolation> {
        if let Err(violation) = check_invariants(&scored, policy) {
            error!(
                domain = %policy.domain,
                source = ?scored.source,
                "constraint violation at persistence boundary: {violation}"
            );
            return Err(violation);
        }

        let mut fields: BTreeMap<&'static str, Value> = scored
            .record
            .fields
            .iter()
            .map(|(field, value)| (*field, value.to_json()))
            .collect();
        for composite in &scored.composites {
            fields.insert(composite.field, Value::from(composite.value));
            fields.insert(composite.category_field, Value::from(composite.category));
        }

        Ok(Self {
            profile_id,
            domain: policy.domain,
            source: scored.source,
            generated_at: Utc::now(),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::fallback::fallback_record;
    use crate::intelligence::policy::PolicyRegistry;
    use serde_json::json;

    #[test]
    fn test_flattens_fields_and_composites() {
        let policy = PolicyRegistry::builtin().get(Domain::MarketPulse).unwrap();
        let profile_id = Uuid::new_v4();
        let insight = PersistableInsight::from_scored(profile_id, fallback_record(policy), policy).unwrap();

        assert_eq!(insight.profile_id, profile_id);
        assert_eq!(insight.source, RecordSource::Fallback);
        assert!(insight.fields.contains_key("market_pulse_score"));
        assert!(insight.fields.contains_key("market_health"));
        assert_eq!(insight.fields.get("confidence"), Some(&json!(0.0)));
    }

    #[test]
    fn test_rejects_tampered_record() {
        let policy = PolicyRegistry::builtin().get(Domain::MarketPulse).unwrap();
        let mut scored = fallback_record(policy);
        scored.composites[0].value = 100.0;
        let result = PersistableInsight::from_scored(Uuid::new_v4(), scored, policy);
        assert!(matches!(result, Err(InvariantViolation::CompositeAboveCeiling { .. })));
    }

    #[test]
    fn test_serializes_flat() {
        let policy = PolicyRegistry::builtin().get(Domain::PeerCohort).unwrap();
        let insight =
            PersistableInsight::from_scored(Uuid::new_v4(), fallback_record(policy), policy).unwrap();
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["domain"], json!("peer_cohort"));
        assert_eq!(json["source"], json!("fallback"));
        assert_eq!(json["fields"]["cohort_size"], json!(10));
    }
}
