//! Boundary re-check of every record invariant.
//!
//! The validator and composer make these conditions hold by construction.
//! A violation here means one of them has a bug, so it is reported as a
//! hard error and never repaired.

use thiserror::Error;

use crate::intelligence::composer::categorize;
use crate::intelligence::fields::{FieldSpec, NumericKind};
use crate::intelligence::policy::{Domain, DomainPolicy};
use crate::intelligence::record::{FieldValue, ScoredRecord, ValidatedRecord};
use crate::intelligence::validator::matches_shape;

#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("record belongs to {actual}, policy to {expected}")]
    DomainMismatch { expected: Domain, actual: Domain },

    #[error("field '{0}' is missing")]
    MissingField(&'static str),

    #[error("field '{0}' has the wrong type")]
    WrongType(&'static str),

    #[error("field '{field}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("field '{field}' = '{value}' is not an allowed value")]
    NotAllowed { field: &'static str, value: String },

    #[error("text field '{0}' is blank")]
    BlankText(&'static str),

    #[error("list field '{field}' has {len} items, limit is {max_items}")]
    TooManyItems {
        field: &'static str,
        len: usize,
        max_items: usize,
    },

    #[error("nested field '{0}' does not match its shape")]
    MalformedNested(&'static str),

    #[error("ordering group {0:?} is not ascending")]
    Unordered(&'static [&'static str]),

    #[error("field '{field}' = {value} is below floor {k}")]
    BelowFloor { field: &'static str, value: i64, k: i64 },

    #[error("composite '{0}' is missing")]
    MissingComposite(&'static str),

    #[error("composite '{field}' = {value} exceeds ceiling {ceiling}")]
    CompositeAboveCeiling {
        field: &'static str,
        value: f64,
        ceiling: f64,
    },

    #[error("composite '{field}' = {value} is negative or not a number")]
    CompositeBelowZero { field: &'static str, value: f64 },

    #[error("composite '{field}' = {value} differs from recomputed {recomputed}")]
    CompositeNotRecomputed {
        field: &'static str,
        value: f64,
        recomputed: f64,
    },

    #[error("category '{field}' = '{value}' does not match score category '{expected}'")]
    CategoryMismatch {
        field: &'static str,
        value: &'static str,
        expected: &'static str,
    },
}

pub fn check_invariants(scored: &ScoredRecord, policy: &DomainPolicy) -> Result<(), InvariantViolation> {
    let record = &scored.record;
    if record.domain != policy.domain {
        return Err(InvariantViolation::DomainMismatch {
            expected: policy.domain,
            actual: record.domain,
        });
    }

    for spec in policy.fields {
        check_field(record, spec)?;
    }
    check_composites(scored, policy)
}

fn check_field(record: &ValidatedRecord, spec: &FieldSpec) -> Result<(), InvariantViolation> {
    use InvariantViolation as V;

    if let FieldSpec::OrderingGroup { fields } = *spec {
        let values = fields
            .iter()
            .map(|f| record.number(f).ok_or(V::MissingField(*f)))
            .collect::<Result<Vec<f64>, _>>()?;
        if values.windows(2).any(|w| w[0] > w[1]) {
            return Err(V::Unordered(fields));
        }
        return Ok(());
    }

    let Some(field) = spec.field() else {
        return Ok(());
    };
    let value = record.get(field).ok_or(V::MissingField(field))?;

    match (*spec, value) {
        (
            FieldSpec::Numeric {
                min, max, kind, ..
            },
            FieldValue::Number(_) | FieldValue::Integer(_),
        ) => {
            let type_ok = matches!(
                (kind, value),
                (NumericKind::Float, FieldValue::Number(_)) | (NumericKind::Integer, FieldValue::Integer(_))
            );
            if !type_ok {
                return Err(V::WrongType(field));
            }
            let n = value.as_f64().unwrap_or(f64::NAN);
            if !(min..=max).contains(&n) {
                return Err(V::OutOfRange {
                    field,
                    value: n,
                    min,
                    max,
                });
            }
        }
        (FieldSpec::Enum { allowed, .. }, FieldValue::Label(label)) => {
            if !allowed.contains(label) {
                return Err(V::NotAllowed {
                    field,
                    value: label.to_string(),
                });
            }
        }
        (FieldSpec::Text { .. }, FieldValue::Text(text)) => {
            if text.trim().is_empty() {
                return Err(V::BlankText(field));
            }
        }
        (FieldSpec::TextList { max_items, .. }, FieldValue::List(items)) => {
            if items.len() > max_items {
                return Err(V::TooManyItems {
                    field,
                    len: items.len(),
                    max_items,
                });
            }
        }
        (FieldSpec::CohortFloor { k, .. }, FieldValue::Integer(n)) => {
            if *n < k {
                return Err(V::BelowFloor { field, value: *n, k });
            }
        }
        (FieldSpec::NestedDefault { shape, .. }, FieldValue::Nested(map)) => {
            let conforms = shape
                .iter()
                .all(|(key, expected)| matches_shape(map.get(*key), expected));
            if !conforms {
                return Err(V::MalformedNested(field));
            }
        }
        _ => return Err(V::WrongType(field)),
    }
    Ok(())
}

fn check_composites(scored: &ScoredRecord, policy: &DomainPolicy) -> Result<(), InvariantViolation> {
    use InvariantViolation as V;

    for formula in policy.composites {
        let score = scored
            .composite(formula.field)
            .ok_or(V::MissingComposite(formula.field))?;

        if score.value.is_nan() || score.value < 0.0 {
            return Err(V::CompositeBelowZero {
                field: formula.field,
                value: score.value,
            });
        }
        if score.value > formula.ceiling {
            return Err(V::CompositeAboveCeiling {
                field: formula.field,
                value: score.value,
                ceiling: formula.ceiling,
            });
        }

        let recomputed = formula.evaluate(&scored.record).value;
        if (recomputed - score.value).abs() > 1e-9 {
            return Err(V::CompositeNotRecomputed {
                field: formula.field,
                value: score.value,
                recomputed,
            });
        }

        let expected = categorize(score.value, &formula.thresholds);
        if score.category != expected {
            return Err(V::CategoryMismatch {
                field: formula.category_field,
                value: score.category,
                expected,
            });
        }
    }
    Ok(())
}
