/// Population statistics of a sample sequence, computed from running sums.
///
/// The variance uses the computational formula `E[X²] - E[X]²` without
/// Bessel's correction. Cancellation can drive that expression slightly below
/// zero; the unclamped value is kept in [`raw_variance`](Self::raw_variance)
/// while [`variance`](Self::variance) is clamped to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SampleStats {
    /// Number of samples.
    pub count: usize,
    /// The minimum sample, ignoring NaN.
    pub min: f64,
    /// The maximum sample, ignoring NaN.
    pub max: f64,
    /// The arithmetic mean, bounded to `[min, max]`.
    pub mean: f64,
    /// The population variance, clamped to be non-negative.
    pub variance: f64,
    /// The standard deviation (`sqrt(variance)`).
    pub std_dev: f64,
    /// The variance before clamping.
    pub raw_variance: f64,
}

impl SampleStats {
    /// Computes statistics in a single pass over `values`.
    ///
    /// # Returns
    ///
    /// * `Some(SampleStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use sigmascan_stats::descriptive::SampleStats;
    /// let stats = SampleStats::new(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.variance, 4.0);
    /// assert_eq!(stats.std_dev, 2.0);
    /// ```
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let mut sums = RunningSums::default();
        for &value in values {
            sums.push(value);
        }
        sums.finish()
    }

    /// Derives statistics from precomputed sums, without range information.
    ///
    /// The mean is left unbounded since no min/max is known.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sigmascan_stats::descriptive::SampleStats;
    /// // sums that cannot come from real data: E[X^2] < E[X]^2
    /// let stats = SampleStats::from_sums(2, 2.0, 1.5).unwrap();
    /// assert_eq!(stats.variance, 0.0);
    /// assert!(stats.is_degenerate());
    /// ```
    #[must_use]
    pub fn from_sums(count: usize, sum: f64, sum_sq: f64) -> Option<Self> {
        RunningSums {
            count,
            sum,
            sum_sq,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
        .finish()
    }

    /// Returns `true` if floating-point cancellation produced a negative
    /// variance that had to be clamped.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.raw_variance < 0.0
    }

    /// Absolute distance of `value` from the mean.
    #[must_use]
    pub fn deviation(&self, value: f64) -> f64 {
        (value - self.mean).abs()
    }
}

#[derive(Debug, Clone, Copy)]
struct RunningSums {
    count: usize,
    sum: f64,
    sum_sq: f64,
    min: f64,
    max: f64,
}

impl Default for RunningSums {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl RunningSums {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    #[expect(clippy::cast_precision_loss)]
    fn finish(self) -> Option<SampleStats> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        let mean = bound(self.sum / n, self.min, self.max);
        let raw_variance = self.sum_sq / n - mean * mean;
        // NaN must survive here, so no `f64::max`
        let variance = if raw_variance < 0.0 { 0.0 } else { raw_variance };
        let std_dev = variance.sqrt();

        Some(SampleStats {
            count: self.count,
            min: self.min,
            max: self.max,
            mean,
            variance,
            std_dev,
            raw_variance,
        })
    }
}

/// Keeps a rounded mean inside the observed range. NaN passes through.
fn bound(mean: f64, min: f64, max: f64) -> f64 {
    if mean < min {
        min
    } else if mean > max {
        max
    } else {
        mean
    }
}
