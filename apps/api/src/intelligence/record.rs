use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::intelligence::composer::CompositeScore;
use crate::intelligence::policy::Domain;

/// A field value that has passed validation. Labels always point into the
/// allowed set they were checked against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Integer(i64),
    Label(&'static str),
    Text(String),
    List(Vec<String>),
    Nested(Map<String, Value>),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Number(n) => Value::from(*n),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Label(s) => Value::from(*s),
            FieldValue::Text(s) => Value::from(s.as_str()),
            FieldValue::List(items) => Value::from(items.clone()),
            FieldValue::Nested(map) => Value::Object(map.clone()),
        }
    }
}

/// Output of the validator: every declared field present, every constraint met.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedRecord {
    pub domain: Domain,
    pub fields: BTreeMap<&'static str, FieldValue>,
}

impl ValidatedRecord {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_f64)
    }

    pub fn label(&self, field: &str) -> Option<&'static str> {
        match self.get(field) {
            Some(FieldValue::Label(label)) => Some(*label),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.get(field) {
            Some(FieldValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub(crate) fn set(&mut self, field: &'static str, value: FieldValue) {
        self.fields.insert(field, value);
    }
}

/// Whether a record came from the model or from the fallback provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Generated,
    Fallback,
}

/// A validated record together with its recomputed composites.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub record: ValidatedRecord,
    pub composites: Vec<CompositeScore>,
    pub source: RecordSource,
}

impl ScoredRecord {
    pub fn composite(&self, field: &str) -> Option<&CompositeScore> {
        self.composites.iter().find(|c| c.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_reads_as_number() {
        let mut record = ValidatedRecord::new(Domain::PeerCohort);
        record.set("cohort_size", FieldValue::Integer(12));
        assert_eq!(record.number("cohort_size"), Some(12.0));
    }

    #[test]
    fn test_typed_accessors_reject_other_variants() {
        let mut record = ValidatedRecord::new(Domain::MarketPulse);
        record.set("summary", FieldValue::Text("ok".to_string()));
        assert_eq!(record.label("summary"), None);
        assert_eq!(record.number("summary"), None);
        assert_eq!(record.text("summary"), Some("ok"));
    }

    #[test]
    fn test_field_value_serializes_untagged() {
        let value = serde_json::to_value(FieldValue::Label("healthy")).unwrap();
        assert_eq!(value, serde_json::json!("healthy"));
        let list = FieldValue::List(vec!["a".to_string()]);
        assert_eq!(list.to_json(), serde_json::json!(["a"]));
    }
}
