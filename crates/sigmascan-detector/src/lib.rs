//! Sigma-rule outlier detection over a flat sample sequence.
//!
//! The crate is split into three small pure steps:
//!
//! 1. **Feature extraction** ([`feature::extract_features`]): one
//!    [`feature::FeatureRow`] `(value, value²)` per sample
//! 2. **Detection** ([`detection::detect`]): population mean and standard
//!    deviation, then a per-sample `|x - mean| > 2σ` test
//! 3. **Projection** ([`report::collect_anomalies`]): the flagged samples as
//!    `(index, value)` records in ascending index order
//!
//! Feature rows are informational; detection works on the raw samples.
//!
//! # Examples
//!
//! ```
//! use sigmascan_detector::{detection, feature, report};
//!
//! let samples = [10.0, 12.0, 11.0, 13.0, 10.0, 12.0, 11.0, 13.0, 1000.0];
//!
//! let features = feature::extract_features(&samples);
//! assert_eq!(features[8].square, 1_000_000.0);
//!
//! let detection = detection::detect(&samples)?;
//! let anomalies = report::collect_anomalies(&detection);
//! assert_eq!(anomalies.len(), 1);
//! assert_eq!(anomalies[0].index, 8);
//! # Ok::<(), sigmascan_detector::DetectError>(())
//! ```

pub mod detection;
pub mod feature;
pub mod report;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DetectError {
    #[display("invalid input: sample sequence is empty")]
    InvalidInput,
}
