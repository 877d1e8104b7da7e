//! Score Composer: fixed weighted formulas over validated sub-scores.
//!
//! Composites are always recomputed here from validated fields. A composite
//! the model reported in its raw output is never read; `discarded_composites`
//! exists only so the orchestrator can log how far off it was.

use serde::Serialize;
use serde_json::Value;

use crate::intelligence::fields::RawOutput;
use crate::intelligence::record::ValidatedRecord;
use crate::intelligence::validator::clamp_f64;

/// Label → normalized score (0.0 – 1.0) for a discrete level field.
pub type LevelTable = &'static [(&'static str, f64)];

/// Four-level demand intensity shared by several domains.
pub const DEMAND_LABELS: &[&str] = &["low", "moderate", "high", "very_high"];
pub const DEMAND_LEVELS: LevelTable = &[
    ("low", 0.2),
    ("moderate", 0.5),
    ("high", 0.75),
    ("very_high", 1.0),
];

/// Where a component reads its value from. Values are brought onto the
/// formula's scale and clamped to `[0, scale]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// A numeric field already on the formula's scale.
    Field(&'static str),
    /// `scale - value`, for signals where lower is better.
    Inverted(&'static str),
    /// A label field mapped through a level table, times the scale.
    Level(&'static str, LevelTable),
}

impl Signal {
    pub fn field(&self) -> &'static str {
        match *self {
            Signal::Field(f) | Signal::Inverted(f) | Signal::Level(f, _) => f,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    pub name: &'static str,
    pub weight: f64,
    pub signal: Signal,
}

impl Component {
    pub const fn new(name: &'static str, weight: f64, signal: Signal) -> Self {
        Self {
            name,
            weight,
            signal,
        }
    }
}

/// Ordered `(upper_bound, label)` tiers plus a catch-all for everything above.
///
/// Bounds must be strictly increasing. That is a property of the table, not
/// something `categorize` checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    pub tiers: &'static [(f64, &'static str)],
    pub catch_all: &'static str,
}

impl ThresholdTable {
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tiers
            .iter()
            .map(|(_, label)| *label)
            .chain(std::iter::once(self.catch_all))
    }
}

/// One named composite: weight vector, ceiling and category table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeFormula {
    /// Output field for the score.
    pub field: &'static str,
    /// Maximum of the component scale (1.0 or 100.0).
    pub scale: f64,
    /// Hard upper bound on the composite, strictly below `scale`.
    pub ceiling: f64,
    pub components: &'static [Component],
    pub thresholds: ThresholdTable,
    /// Output field for the category label.
    pub category_field: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub name: &'static str,
    pub weight: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeScore {
    pub field: &'static str,
    pub value: f64,
    pub ceiling: f64,
    pub category_field: &'static str,
    pub category: &'static str,
    pub components: Vec<ScoreComponent>,
}

/// A model-reported composite that disagreed with the recomputed one.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscardedComposite {
    pub field: &'static str,
    pub reported: Value,
    pub recomputed: Value,
}

/// Σ weight·value, clamped to `[0, ceiling]`. Weights are not re-normalized.
/// A non-finite sum yields 0.
pub fn compose(components: &[(f64, f64)], ceiling: f64) -> f64 {
    let sum: f64 = components.iter().map(|(weight, value)| weight * value).sum();
    if !sum.is_finite() {
        return 0.0;
    }
    sum.clamp(0.0, ceiling)
}

/// First tier whose upper bound the score does not exceed, else the catch-all.
pub fn categorize(score: f64, thresholds: &ThresholdTable) -> &'static str {
    thresholds
        .tiers
        .iter()
        .find(|(upper, _)| score <= *upper)
        .map(|(_, label)| *label)
        .unwrap_or(thresholds.catch_all)
}

/// Normalized score for a level label; unknown labels score 0.
pub fn level_score(label: &str, table: LevelTable) -> f64 {
    table
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, score)| *score)
        .unwrap_or(0.0)
}

impl CompositeFormula {
    /// Component values read from the record, each on `[0, scale]`.
    pub fn components_of(&self, record: &ValidatedRecord) -> Vec<ScoreComponent> {
        self.components
            .iter()
            .map(|c| ScoreComponent {
                name: c.name,
                weight: c.weight,
                value: self.signal_value(record, &c.signal),
            })
            .collect()
    }

    fn signal_value(&self, record: &ValidatedRecord, signal: &Signal) -> f64 {
        let raw = match *signal {
            Signal::Field(field) => record.number(field).unwrap_or(0.0),
            Signal::Inverted(field) => self.scale - record.number(field).unwrap_or(self.scale),
            Signal::Level(field, table) => {
                record.label(field).map_or(0.0, |l| level_score(l, table)) * self.scale
            }
        };
        clamp_f64(raw, 0.0, self.scale, 0.0)
    }

    pub fn evaluate(&self, record: &ValidatedRecord) -> CompositeScore {
        let components = self.components_of(record);
        let pairs: Vec<(f64, f64)> = components.iter().map(|c| (c.weight, c.value)).collect();
        let value = compose(&pairs, self.ceiling);
        CompositeScore {
            field: self.field,
            value,
            ceiling: self.ceiling,
            category_field: self.category_field,
            category: categorize(value, &self.thresholds),
            components,
        }
    }
}

pub fn score_record(record: &ValidatedRecord, formulas: &[CompositeFormula]) -> Vec<CompositeScore> {
    formulas.iter().map(|f| f.evaluate(record)).collect()
}

/// Composite or category values the model reported that do not match what
/// was recomputed. The reported values have already been ignored.
pub fn discarded_composites(raw: &RawOutput, scores: &[CompositeScore]) -> Vec<DiscardedComposite> {
    let mut discarded = Vec::new();
    for score in scores {
        if let Some(reported) = raw.get(score.field) {
            let agrees = reported
                .as_f64()
                .is_some_and(|n| (n - score.value).abs() < 1e-6);
            if !agrees {
                discarded.push(DiscardedComposite {
                    field: score.field,
                    reported: reported.clone(),
                    recomputed: Value::from(score.value),
                });
            }
        }
        if let Some(reported) = raw.get(score.category_field) {
            if reported.as_str() != Some(score.category) {
                discarded.push(DiscardedComposite {
                    field: score.category_field,
                    reported: reported.clone(),
                    recomputed: Value::from(score.category),
                });
            }
        }
    }
    discarded
}
