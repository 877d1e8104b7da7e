//! Output Validator. Repairs an untyped model payload into a `ValidatedRecord`.
//!
//! Every operation here is total: wrong types, missing keys, NaN and
//! out-of-range values all degrade to declared defaults. Nothing returns an
//! error. Each correction is reported as a `Repair` so callers can log how
//! often a prompt produces bad output.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::intelligence::fields::{FieldSpec, NestedShape, NumericKind, RawOutput, StaticValue};
use crate::intelligence::policy::Domain;
use crate::intelligence::record::{FieldValue, ValidatedRecord};

/// Upper bound on any single user-facing text field taken from model output.
pub const MAX_TEXT_CHARS: usize = 2000;

/// Why a field was corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairKind {
    Missing,
    WrongType,
    NonFinite,
    OutOfRange,
    NotAllowed,
    Blank,
    Reordered,
    BelowFloor,
    MalformedNested,
    Truncated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repair {
    pub field: &'static str,
    pub kind: RepairKind,
}

/// A validated record plus every correction applied while building it.
#[derive(Debug, Clone)]
pub struct Validation {
    pub record: ValidatedRecord,
    pub repairs: Vec<Repair>,
}

// ────────────────────────────────────────────────────────────────────────────
// Field-level operations
// ────────────────────────────────────────────────────────────────────────────

/// Clamps a payload value into `[min, max]`. Absent, non-numeric, NaN or
/// infinite input yields `default`. Integer- and float-typed JSON numbers are
/// accepted interchangeably.
pub fn clamp_numeric(value: Option<&Value>, min: f64, max: f64, default: f64) -> f64 {
    match coerce_number(value) {
        Ok(n) => clamp_f64(n, min, max, default),
        Err(_) => default,
    }
}

/// `clamp_numeric` for an already-extracted float.
pub fn clamp_f64(value: f64, min: f64, max: f64, default: f64) -> f64 {
    if !value.is_finite() {
        return default;
    }
    min.max(value.min(max))
}

/// Case-sensitive membership test. Non-members and non-strings become `default`.
pub fn validate_enum<'a>(value: Option<&Value>, allowed: &[&'a str], default: &'a str) -> &'a str {
    match value {
        Some(Value::String(s)) => allowed
            .iter()
            .copied()
            .find(|a| *a == s.as_str())
            .unwrap_or(default),
        _ => default,
    }
}

/// Sorts ascending. Used for min/median/max style triples a model may return
/// out of order.
pub fn reconcile_ordering(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// `max(value, k)` after numeric coercion, rounded to an integer.
/// Non-numeric input yields `k`.
pub fn enforce_floor(value: Option<&Value>, k: i64) -> i64 {
    match coerce_number(value) {
        Ok(n) if n.is_finite() && n.round() >= k as f64 => n.round() as i64,
        _ => k,
    }
}

/// Returns the object only if it matches `shape` key for key; otherwise the
/// shape's defaults, wholesale. Extra keys on a conforming object are dropped.
pub fn default_nested(value: Option<&Value>, shape: NestedShape) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) if conforms(map, shape) => shape
            .iter()
            .filter_map(|(key, _)| map.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect(),
        _ => shape_default(shape),
    }
}

/// Trimmed text, or `fallback` when the value is missing, blank or not a string.
pub fn ensure_nonempty_text(value: Option<&Value>, fallback: &str) -> String {
    match value.and_then(Value::as_str).map(str::trim) {
        Some(s) if !s.is_empty() => s.chars().take(MAX_TEXT_CHARS).collect(),
        _ => fallback.to_string(),
    }
}

/// Trimmed, de-duplicated, non-blank strings, at most `max_items` of them.
pub fn validate_text_list(value: Option<&Value>, max_items: usize) -> Vec<String> {
    let mut kept = usable_items(value);
    kept.truncate(max_items);
    kept
}

/// The mapping a nested shape falls back to.
pub fn shape_default(shape: NestedShape) -> Map<String, Value> {
    shape
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_json()))
        .collect()
}

fn coerce_number(value: Option<&Value>) -> Result<f64, RepairKind> {
    match value {
        None | Some(Value::Null) => Err(RepairKind::Missing),
        Some(Value::Number(n)) => n.as_f64().ok_or(RepairKind::WrongType),
        Some(_) => Err(RepairKind::WrongType),
    }
}

fn conforms(map: &Map<String, Value>, shape: NestedShape) -> bool {
    shape
        .iter()
        .all(|(key, expected)| matches_shape(map.get(*key), expected))
}

pub(crate) fn matches_shape(value: Option<&Value>, expected: &StaticValue) -> bool {
    match (value, expected) {
        (Some(Value::Number(n)), StaticValue::Number(_)) => n.as_f64().is_some_and(f64::is_finite),
        (Some(Value::String(s)), StaticValue::Text(_)) => !s.trim().is_empty(),
        _ => false,
    }
}

fn usable_items(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    let mut kept: Vec<String> = Vec::new();
    for item in items {
        if let Some(s) = item.as_str().map(str::trim) {
            if !s.is_empty() && !kept.iter().any(|k| k == s) {
                kept.push(s.to_string());
            }
        }
    }
    kept
}

// ────────────────────────────────────────────────────────────────────────────
// Repair classification
// ────────────────────────────────────────────────────────────────────────────

fn numeric_repair(value: Option<&Value>, clamped: f64) -> Option<RepairKind> {
    match coerce_number(value) {
        Err(kind) => Some(kind),
        Ok(n) if !n.is_finite() => Some(RepairKind::NonFinite),
        Ok(n) => (n != clamped).then_some(RepairKind::OutOfRange),
    }
}

fn enum_repair(value: Option<&Value>, label: &str) -> Option<RepairKind> {
    match value {
        None | Some(Value::Null) => Some(RepairKind::Missing),
        Some(Value::String(s)) => (s != label).then_some(RepairKind::NotAllowed),
        Some(_) => Some(RepairKind::WrongType),
    }
}

fn floor_repair(value: Option<&Value>, k: i64) -> Option<RepairKind> {
    match coerce_number(value) {
        Err(kind) => Some(kind),
        Ok(n) if !n.is_finite() => Some(RepairKind::NonFinite),
        Ok(n) => (n.round() < k as f64).then_some(RepairKind::BelowFloor),
    }
}

fn nested_repair(value: Option<&Value>, shape: NestedShape) -> Option<RepairKind> {
    match value {
        None | Some(Value::Null) => Some(RepairKind::Missing),
        Some(Value::Object(map)) if conforms(map, shape) => None,
        Some(_) => Some(RepairKind::MalformedNested),
    }
}

fn text_repair(value: Option<&Value>) -> Option<RepairKind> {
    match value {
        Some(Value::String(s)) if s.trim().is_empty() => Some(RepairKind::Blank),
        Some(Value::String(s)) => {
            (s.trim().chars().count() > MAX_TEXT_CHARS).then_some(RepairKind::Truncated)
        }
        None | Some(Value::Null) => Some(RepairKind::Missing),
        Some(_) => Some(RepairKind::WrongType),
    }
}

fn text_list_repair(value: Option<&Value>, max_items: usize) -> Option<RepairKind> {
    let items = match value {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Some(RepairKind::Missing),
        Some(_) => return Some(RepairKind::WrongType),
    };
    let usable = usable_items(value).len();
    if usable > max_items {
        Some(RepairKind::Truncated)
    } else {
        (usable != items.len()).then_some(RepairKind::WrongType)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record-level validation
// ────────────────────────────────────────────────────────────────────────────

/// Applies every per-field spec, then every ordering group, to `raw`.
///
/// Ordering groups run last so they see already-clamped values. Keys in
/// `raw` that no spec declares are ignored, which is how model-reported
/// composites get dropped before the composer recomputes them.
pub fn validate_record(domain: Domain, raw: &RawOutput, specs: &[FieldSpec]) -> Validation {
    let mut record = ValidatedRecord::new(domain);
    let mut repairs = Vec::new();

    for spec in specs {
        let Some((field, value, repair)) = apply_field(spec, raw) else {
            continue;
        };
        record.set(field, value);
        if let Some(kind) = repair {
            repairs.push(Repair { field, kind });
        }
    }

    for spec in specs {
        if let FieldSpec::OrderingGroup { fields } = spec {
            repairs.extend(apply_ordering(&mut record, fields));
        }
    }

    Validation { record, repairs }
}

fn apply_field(
    spec: &FieldSpec,
    raw: &RawOutput,
) -> Option<(&'static str, FieldValue, Option<RepairKind>)> {
    let applied = match *spec {
        FieldSpec::Numeric {
            field,
            min,
            max,
            default,
            kind,
        } => {
            let input = raw.get(field);
            let n = clamp_numeric(input, min, max, default);
            let value = match kind {
                NumericKind::Float => FieldValue::Number(n),
                NumericKind::Integer => FieldValue::Integer(n.round() as i64),
            };
            (field, value, numeric_repair(input, n))
        }
        FieldSpec::Enum {
            field,
            allowed,
            default,
        } => {
            let input = raw.get(field);
            let label = validate_enum(input, allowed, default);
            (field, FieldValue::Label(label), enum_repair(input, label))
        }
        FieldSpec::Text { field, fallback } => {
            let input = raw.get(field);
            let text = ensure_nonempty_text(input, fallback);
            (field, FieldValue::Text(text), text_repair(input))
        }
        FieldSpec::TextList { field, max_items } => {
            let input = raw.get(field);
            let items = validate_text_list(input, max_items);
            (field, FieldValue::List(items), text_list_repair(input, max_items))
        }
        FieldSpec::CohortFloor { field, k } => {
            let input = raw.get(field);
            let n = enforce_floor(input, k);
            (field, FieldValue::Integer(n), floor_repair(input, k))
        }
        FieldSpec::NestedDefault { field, shape } => {
            let input = raw.get(field);
            let map = default_nested(input, shape);
            (field, FieldValue::Nested(map), nested_repair(input, shape))
        }
        FieldSpec::OrderingGroup { .. } => return None,
    };
    Some(applied)
}

fn apply_ordering(record: &mut ValidatedRecord, fields: &'static [&'static str]) -> Vec<Repair> {
    let Some(values) = fields
        .iter()
        .map(|f| record.number(f))
        .collect::<Option<Vec<f64>>>()
    else {
        tracing::debug!(?fields, "ordering group references a non-numeric field; skipped");
        return Vec::new();
    };

    let sorted = reconcile_ordering(&values);
    let mut repairs = Vec::new();
    for ((field, before), after) in fields.iter().zip(&values).zip(&sorted) {
        if before == after {
            continue;
        }
        let value = match record.get(field) {
            Some(FieldValue::Integer(_)) => FieldValue::Integer(*after as i64),
            _ => FieldValue::Number(*after),
        };
        record.set(*field, value);
        repairs.push(Repair {
            field: *field,
            kind: RepairKind::Reordered,
        });
    }
    repairs
}
