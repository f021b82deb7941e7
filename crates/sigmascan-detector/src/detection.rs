//! Two-sigma outlier classification.
//!
//! [`detect`] makes two passes over the samples: the first accumulates the
//! population statistics ([`SampleStats`]), the second flags every sample with
//! `|x - mean| > SIGMA_THRESHOLD * std_dev`. The comparison is strict, so a
//! sample sitting exactly on the threshold is not an anomaly.
//!
//! Non-finite samples are not special-cased. A NaN anywhere makes the mean
//! NaN, every comparison false, and therefore nothing is flagged.

use sigmascan_stats::descriptive::SampleStats;

use crate::{
    DetectError,
    report::{self, AnomalyRecord},
};

/// Number of standard deviations a sample must exceed to be flagged.
pub const SIGMA_THRESHOLD: f64 = 2.0;

/// A sample together with its anomaly flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedSample {
    pub value: f64,
    pub is_anomaly: bool,
}

/// Non-fatal conditions observed while computing statistics.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::IsVariant)]
pub enum Diagnostic {
    #[display("variance {raw_variance:e} was negative due to rounding and has been clamped to 0")]
    NumericDegenerate { raw_variance: f64 },
}

/// Result of one detection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    stats: SampleStats,
    samples: Vec<ClassifiedSample>,
}

impl Detection {
    #[must_use]
    pub fn stats(&self) -> &SampleStats {
        &self.stats
    }

    /// One classified sample per input sample, in input order.
    #[must_use]
    pub fn samples(&self) -> &[ClassifiedSample] {
        &self.samples
    }

    /// The absolute deviation a sample must exceed to be flagged.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        SIGMA_THRESHOLD * self.stats.std_dev
    }

    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];
        if self.stats.is_degenerate() {
            diagnostics.push(Diagnostic::NumericDegenerate {
                raw_variance: self.stats.raw_variance,
            });
        }
        diagnostics
    }

    /// Shorthand for [`report::collect_anomalies`].
    #[must_use]
    pub fn anomalies(&self) -> Vec<AnomalyRecord> {
        report::collect_anomalies(self)
    }
}

/// Classifies every sample against the two-sigma rule.
///
/// # Errors
///
/// Returns [`DetectError::InvalidInput`] if `samples` is empty.
///
/// # Examples
///
/// ```
/// # use sigmascan_detector::detection::detect;
/// let detection = detect(&[0.0, 0.0, 0.0, 0.0, 0.0, 6.0])?;
/// assert_eq!(detection.stats().mean, 1.0);
/// assert!(detection.samples()[5].is_anomaly);
/// # Ok::<(), sigmascan_detector::DetectError>(())
/// ```
pub fn detect(samples: &[f64]) -> Result<Detection, DetectError> {
    let stats = SampleStats::new(samples).ok_or(DetectError::InvalidInput)?;
    let threshold = SIGMA_THRESHOLD * stats.std_dev;

    let samples = samples
        .iter()
        .map(|&value| ClassifiedSample {
            value,
            is_anomaly: stats.deviation(value) > threshold,
        })
        .collect();

    Ok(Detection { stats, samples })
}
