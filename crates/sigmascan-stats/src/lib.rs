//! Sample statistics for the sigmascan outlier detector.
//!
//! This crate computes the population moments a sigma-rule detector needs:
//! mean, variance and standard deviation, accumulated from running sums in a
//! single pass.
//!
//! # Modules
//!
//! - [`descriptive`]: Two-pass-friendly summary statistics with variance clamping
//!
//! # Examples
//!
//! ```
//! use sigmascan_stats::descriptive::SampleStats;
//!
//! let stats = SampleStats::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, 2.0);
//! ```
//!
//! Floating-point cancellation never yields a NaN standard deviation:
//!
//! ```
//! use sigmascan_stats::descriptive::SampleStats;
//!
//! let stats = SampleStats::from_sums(3, 3.0, 2.9).unwrap();
//! assert!(stats.is_degenerate());
//! assert_eq!(stats.std_dev, 0.0);
//! ```

pub mod descriptive;
