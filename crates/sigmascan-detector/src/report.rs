//! Projection of a [`Detection`] onto its flagged samples.

use serde::Serialize;

use crate::detection::Detection;

/// A flagged sample and its 0-based position in the sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyRecord {
    pub index: usize,
    pub value: f64,
}

/// Collects every flagged sample in ascending index order.
#[must_use]
pub fn collect_anomalies(detection: &Detection) -> Vec<AnomalyRecord> {
    detection
        .samples()
        .iter()
        .enumerate()
        .filter(|(_, sample)| sample.is_anomaly)
        .map(|(index, sample)| AnomalyRecord {
            index,
            value: sample.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::detect;

    #[test]
    fn test_no_anomalies() {
        let detection = detect(&[1.0, 2.0, 3.0]).unwrap();
        assert!(collect_anomalies(&detection).is_empty());
    }

    #[test]
    fn test_indices_are_ascending() {
        let mut samples = vec![0.0; 20];
        samples[3] = 50.0;
        samples[17] = -50.0;
        let detection = detect(&samples).unwrap();
        let anomalies = collect_anomalies(&detection);
        assert_eq!(
            anomalies,
            [
                AnomalyRecord { index: 3, value: 50.0 },
                AnomalyRecord { index: 17, value: -50.0 },
            ]
        );
    }

    #[test]
    fn test_matches_flags() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 100.0, -100.0];
        let detection = detect(&samples).unwrap();
        let anomalies = collect_anomalies(&detection);
        let flagged = detection.samples().iter().filter(|s| s.is_anomaly).count();
        assert_eq!(anomalies.len(), flagged);
        for record in &anomalies {
            assert_eq!(record.value, samples[record.index]);
        }
    }

    #[test]
    fn test_serializes_as_object() {
        let record = AnomalyRecord {
            index: 4,
            value: 1000.0,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"index":4,"value":1000.0}"#);
    }
}
