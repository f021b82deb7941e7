//! Per-sample derived features.

use serde::Serialize;

/// Derived features of one sample.
///
/// Rows correspond to samples by position only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRow {
    /// The original sample.
    pub value: f64,
    /// The squared sample, emphasizing large magnitudes.
    pub square: f64,
}

impl FeatureRow {
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        Self {
            value,
            square: value * value,
        }
    }
}

/// Extracts one [`FeatureRow`] per sample, in input order.
///
/// Non-finite samples pass through unchanged (`NaN² = NaN`, `∞² = ∞`).
///
/// # Examples
///
/// ```
/// # use sigmascan_detector::feature::{extract_features, FeatureRow};
/// let rows = extract_features(&[3.0, -2.0]);
/// assert_eq!(
///     rows,
///     [
///         FeatureRow { value: 3.0, square: 9.0 },
///         FeatureRow { value: -2.0, square: 4.0 },
///     ]
/// );
/// ```
#[must_use]
pub fn extract_features(samples: &[f64]) -> Vec<FeatureRow> {
    samples.iter().copied().map(FeatureRow::from_value).collect()
}
