use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Fixed ascending set of permitted box magnitudes.
///
/// Raw box values are snapped onto this table so that small upstream
/// fluctuations land in stable visual buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct BoxSizeTable {
    sizes: Vec<f64>,
}

impl BoxSizeTable {
    /// Builds a validated table.
    ///
    /// Invariants:
    /// - at least one entry
    /// - every entry is finite and `> 0`
    /// - entries are strictly ascending
    pub fn new(sizes: Vec<f64>) -> TimelineResult<Self> {
        if sizes.is_empty() {
            return Err(TimelineError::InvalidConfig(
                "box size table must not be empty".to_owned(),
            ));
        }
        if sizes.iter().any(|size| !size.is_finite() || *size <= 0.0) {
            return Err(TimelineError::InvalidConfig(
                "box size table entries must be finite and > 0".to_owned(),
            ));
        }
        if sizes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TimelineError::InvalidConfig(
                "box size table must be strictly ascending".to_owned(),
            ));
        }
        Ok(Self { sizes })
    }

    #[must_use]
    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// Snaps `value` to the closest permitted magnitude, keeping its sign.
    ///
    /// Equidistant candidates resolve to the earlier (smaller) entry. Zero is
    /// treated as non-negative and therefore snaps to the smallest entry.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        let magnitude = value.abs();
        let mut best = self.sizes[0];
        let mut best_distance = (best - magnitude).abs();
        for &size in &self.sizes[1..] {
            let distance = (size - magnitude).abs();
            if distance < best_distance {
                best = size;
                best_distance = distance;
            }
        }

        if value < 0.0 { -best } else { best }
    }
}

impl Default for BoxSizeTable {
    fn default() -> Self {
        Self {
            sizes: default_box_sizes(),
        }
    }
}

impl TryFrom<Vec<f64>> for BoxSizeTable {
    type Error = TimelineError;

    fn try_from(sizes: Vec<f64>) -> TimelineResult<Self> {
        Self::new(sizes)
    }
}

impl From<BoxSizeTable> for Vec<f64> {
    fn from(table: BoxSizeTable) -> Self {
        table.sizes
    }
}

/// Roughly geometric ladder (ratio ~1.46) used when no table is configured.
#[must_use]
pub fn default_box_sizes() -> Vec<f64> {
    vec![
        2.0, 3.0, 4.0, 6.0, 9.0, 13.0, 19.0, 28.0, 41.0, 60.0, 88.0, 129.0, 189.0, 277.0, 405.0,
        593.0, 868.0, 1271.0, 1861.0, 2725.0,
    ]
}
