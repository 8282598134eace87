//! Pairwise Pearson correlation with strength, significance and a fixed
//! plain-language interpretation.

use crate::error::StatsError;
use crate::table::Table;
use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};

/// |t| above this is reported as significant.
pub const SIGNIFICANCE_T: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
}

impl Strength {
    /// Classifies on |r|.
    pub fn classify(r: f64) -> Self {
        let r = r.abs();
        if r >= 0.7 {
            Strength::Strong
        } else if r >= 0.3 {
            Strength::Moderate
        } else if r >= 0.1 {
            Strength::Weak
        } else {
            Strength::VeryWeak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::VeryWeak => "very weak",
            Strength::Weak => "weak",
            Strength::Moderate => "moderate",
            Strength::Strong => "strong",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
    None,
}

impl Direction {
    pub fn of(r: f64) -> Self {
        if r > 0.0 {
            Direction::Positive
        } else if r < 0.0 {
            Direction::Negative
        } else {
            Direction::None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub column_a: String,
    pub column_b: String,
    pub coefficient: f64,
    pub strength: Strength,
    pub direction: Direction,
    pub significant: bool,
    pub sample_size: usize,
    pub interpretation: String,
}

impl CorrelationResult {
    /// Whether this result describes the unordered pair `{a, b}`.
    pub fn is_pair(&self, a: &str, b: &str) -> bool {
        (self.column_a == a && self.column_b == b) || (self.column_a == b && self.column_b == a)
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize)]
pub struct CorrelationOutcome {
    pub results: Vec<CorrelationResult>,
    pub skipped: Vec<StatsError>,
}

/// Pearson coefficient from the running-sums formula. A zero denominator
/// (no variance on one side) yields 0; the result is clamped to [-1, 1].
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let (mut sx, mut sy, mut sxy, mut sx2, mut sy2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        sx += a;
        sy += b;
        sxy += a * b;
        sx2 += a * a;
        sy2 += b * b;
    }

    let numerator = n * sxy - sx * sy;
    let spread = (n * sx2 - sx * sx) * (n * sy2 - sy * sy);
    if spread <= 0.0 || !spread.is_finite() {
        return 0.0;
    }
    let r = numerator / spread.sqrt();
    if r.is_finite() { r.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Student t statistic for `r` over `n` pairs. A perfect correlation gives an
/// infinite statistic carrying the sign of `r`.
pub fn t_statistic(r: f64, n: usize) -> f64 {
    let residual = 1.0 - r * r;
    if residual <= 0.0 {
        return if r < 0.0 { f64::NEG_INFINITY } else { f64::INFINITY };
    }
    r * ((n as f64 - 2.0) / residual).sqrt()
}

/// Fixed `(direction, strength)` template table.
pub fn interpret(a: &str, b: &str, direction: Direction, strength: Strength) -> String {
    match (direction, strength) {
        (_, Strength::VeryWeak) | (Direction::None, _) => {
            format!("There is little to no linear relationship between {a} and {b}.")
        }
        (Direction::Positive, Strength::Strong) => format!(
            "Strong positive relationship: as {a} increases, {b} tends to increase as well."
        ),
        (Direction::Positive, Strength::Moderate) => format!(
            "Moderate positive relationship: higher {a} is often associated with higher {b}."
        ),
        (Direction::Positive, Strength::Weak) => format!(
            "Weak positive relationship: {b} rises slightly with {a}, but the pattern is loose."
        ),
        (Direction::Negative, Strength::Strong) => format!(
            "Strong negative relationship: as {a} increases, {b} tends to decrease."
        ),
        (Direction::Negative, Strength::Moderate) => format!(
            "Moderate negative relationship: higher {a} is often associated with lower {b}."
        ),
        (Direction::Negative, Strength::Weak) => format!(
            "Weak negative relationship: {b} falls slightly as {a} rises, but the pattern is loose."
        ),
    }
}

/// Pairwise-complete vectors: rows where either cell fails to parse are
/// dropped from both sides.
pub fn aligned_values(table: &Table, a: &str, b: &str) -> Option<(Vec<f64>, Vec<f64>)> {
    let left = table.column(a)?;
    let right = table.column(b)?;
    let (x, y) = left
        .iter()
        .zip(right)
        .filter_map(|(l, r)| Some((l.as_number()?, r.as_number()?)))
        .unzip();
    Some((x, y))
}

/// Correlates one pair; `None` when fewer than two complete rows exist.
pub fn correlate(table: &Table, a: &str, b: &str) -> Option<CorrelationResult> {
    let (x, y) = aligned_values(table, a, b)?;
    if x.len() < 2 || x.len() != y.len() {
        return None;
    }

    let coefficient = pearson(&x, &y);
    let strength = Strength::classify(coefficient);
    let direction = Direction::of(coefficient);
    let significant = t_statistic(coefficient, x.len()).abs() > SIGNIFICANCE_T;

    Some(CorrelationResult {
        column_a: a.to_string(),
        column_b: b.to_string(),
        coefficient,
        strength,
        direction,
        significant,
        sample_size: x.len(),
        interpretation: interpret(a, b, direction, strength),
    })
}

/// One result per unordered pair `i < j` of the requested columns. Repeated
/// names keep their first position.
pub fn correlate_all(table: &Table, columns: &[String]) -> CorrelationOutcome {
    let columns: Vec<&String> = columns.iter().collect::<IndexSet<_>>().into_iter().collect();
    let mut outcome = CorrelationOutcome::default();
    for (i, &a) in columns.iter().enumerate() {
        for &b in &columns[i + 1..] {
            match correlate(table, a, b) {
                Some(result) => outcome.results.push(result),
                None => {
                    debug!("skipping pair ({:?}, {:?}): fewer than two complete rows", a, b);
                    outcome.skipped.push(StatsError::InsufficientPairData {
                        column_a: a.clone(),
                        column_b: b.clone(),
                    });
                }
            }
        }
    }
    outcome
}
