//! Declarative field constraints for model output.
//!
//! A `FieldSpec` is pure data. The validator interprets it; nothing here
//! looks at a payload.

use serde_json::{Map, Value};

/// Untyped mapping returned by the completion gateway. Nothing about its
/// keys, types or ranges is trusted.
pub type RawOutput = Map<String, Value>;

/// Declared numeric type of a field. Integer fields are rounded after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Float,
    Integer,
}

/// A compile-time value, used for nested-object shapes and fallback seeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaticValue {
    Number(f64),
    Text(&'static str),
}

impl StaticValue {
    pub fn to_json(self) -> Value {
        match self {
            StaticValue::Number(n) => Value::from(n),
            StaticValue::Text(s) => Value::from(s),
        }
    }
}

/// Key → default pairs describing the only acceptable form of a nested object.
pub type NestedShape = &'static [(&'static str, StaticValue)];

/// Constraint attached to one output field (or, for ordering groups, to a set of fields).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldSpec {
    Numeric {
        field: &'static str,
        min: f64,
        max: f64,
        default: f64,
        kind: NumericKind,
    },
    Enum {
        field: &'static str,
        allowed: &'static [&'static str],
        default: &'static str,
    },
    /// User-facing text that must never be blank.
    Text {
        field: &'static str,
        fallback: &'static str,
    },
    TextList {
        field: &'static str,
        max_items: usize,
    },
    /// K-anonymity style minimum on a reported group size.
    CohortFloor { field: &'static str, k: i64 },
    NestedDefault {
        field: &'static str,
        shape: NestedShape,
    },
    /// Numeric fields whose values must end up non-decreasing in declaration order.
    OrderingGroup { fields: &'static [&'static str] },
}

impl FieldSpec {
    pub const fn float(field: &'static str, min: f64, max: f64, default: f64) -> Self {
        FieldSpec::Numeric {
            field,
            min,
            max,
            default,
            kind: NumericKind::Float,
        }
    }

    pub const fn integer(field: &'static str, min: f64, max: f64, default: f64) -> Self {
        FieldSpec::Numeric {
            field,
            min,
            max,
            default,
            kind: NumericKind::Integer,
        }
    }

    pub const fn one_of(
        field: &'static str,
        allowed: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        FieldSpec::Enum {
            field,
            allowed,
            default,
        }
    }

    pub const fn text(field: &'static str, fallback: &'static str) -> Self {
        FieldSpec::Text { field, fallback }
    }

    pub const fn text_list(field: &'static str, max_items: usize) -> Self {
        FieldSpec::TextList { field, max_items }
    }

    pub const fn cohort_floor(field: &'static str, k: i64) -> Self {
        FieldSpec::CohortFloor { field, k }
    }

    pub const fn nested(field: &'static str, shape: NestedShape) -> Self {
        FieldSpec::NestedDefault { field, shape }
    }

    pub const fn ordering(fields: &'static [&'static str]) -> Self {
        FieldSpec::OrderingGroup { fields }
    }

    /// The single field this spec owns. `None` for ordering groups, which
    /// constrain fields declared elsewhere.
    pub fn field(&self) -> Option<&'static str> {
        match *self {
            FieldSpec::Numeric { field, .. }
            | FieldSpec::Enum { field, .. }
            | FieldSpec::Text { field, .. }
            | FieldSpec::TextList { field, .. }
            | FieldSpec::CohortFloor { field, .. }
            | FieldSpec::NestedDefault { field, .. } => Some(field),
            FieldSpec::OrderingGroup { .. } => None,
        }
    }
}
