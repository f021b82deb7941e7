//! Console and JSON rendering of scan results.

use std::io::{self, Write};

use serde::Serialize;
use sigmascan_detector::{feature::FeatureRow, report::AnomalyRecord};
use sigmascan_stats::descriptive::SampleStats;

const BANNER_LINES: usize = 5;

#[derive(Debug, Serialize)]
pub(crate) struct ScanReport<'a> {
    pub stats: &'a SampleStats,
    pub features: &'a [FeatureRow],
    pub anomalies: &'a [AnomalyRecord],
}

#[derive(Debug, Serialize)]
pub(crate) struct FeatureReport<'a> {
    pub features: &'a [FeatureRow],
}

pub(crate) fn write_banner<W>(w: &mut W) -> io::Result<()>
where
    W: Write,
{
    for _ in 0..BANNER_LINES {
        writeln!(w, "******")?;
    }
    Ok(())
}

pub(crate) fn write_welcome<W>(w: &mut W) -> io::Result<()>
where
    W: Write,
{
    write_banner(w)?;
    writeln!(w, "Welcome to Anomaly Detector!")?;
    writeln!(w, "Input your data in CSV format below:")?;
    write_banner(w)
}

/// Echoes the raw fields, one record per line.
pub(crate) fn write_records<W>(w: &mut W, records: &[Vec<&str>]) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "You entered these:")?;
    for record in records {
        writeln!(w, "{}", record.join(", "))?;
    }
    Ok(())
}

pub(crate) fn write_numeric<W>(w: &mut W, records: &[Vec<f64>]) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "Preprocessed data...")?;
    writeln!(w, "Numeric data:")?;
    for record in records {
        for value in record {
            write!(w, "{value} ")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

pub(crate) fn write_features<W>(w: &mut W, features: &[FeatureRow]) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "Data received for extraction:")?;
    for row in features {
        write!(w, "{:.6} ", row.value)?;
    }
    writeln!(w)?;
    writeln!(w, "Extracted features (value, square):")?;
    for row in features {
        writeln!(w, "{:.6}, {:.6}", row.value, row.square)?;
    }
    Ok(())
}

pub(crate) fn write_stats<W>(w: &mut W, stats: &SampleStats) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        w,
        "Samples: {}, mean: {:.6}, std dev: {:.6}",
        stats.count, stats.mean, stats.std_dev
    )
}

pub(crate) fn write_anomalies<W>(w: &mut W, anomalies: &[AnomalyRecord]) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "Detected anomalies:")?;
    for AnomalyRecord { index, value } in anomalies {
        writeln!(w, "Anomaly at index {index}: {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sigmascan_detector::detection::detect;

    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = vec![];
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_banner() {
        let text = render(|w| write_banner(w));
        assert_eq!(text, "******\n".repeat(5));
    }

    #[test]
    fn test_records_echo() {
        let records = vec![vec!["1", "2"], vec!["3"]];
        let text = render(|w| write_records(w, &records));
        assert_eq!(text, "You entered these:\n1, 2\n3\n");
    }

    #[test]
    fn test_anomaly_lines() {
        let anomalies = [
            AnomalyRecord { index: 8, value: 1000.0 },
            AnomalyRecord { index: 9, value: -2.5 },
        ];
        let text = render(|w| write_anomalies(w, &anomalies));
        assert_eq!(
            text,
            "Detected anomalies:\nAnomaly at index 8: 1000\nAnomaly at index 9: -2.5\n"
        );
    }

    #[test]
    fn test_features_block() {
        let features = [FeatureRow::from_value(3.0)];
        let text = render(|w| write_features(w, &features));
        assert!(text.starts_with("Data received for extraction:\n3.000000 \n"));
        assert!(text.ends_with("3.000000, 9.000000\n"));
    }

    #[test]
    fn test_scan_report_json_shape() {
        let samples = [0.0, 0.0, 0.0, 0.0, 0.0, 6.0];
        let detection = detect(&samples).unwrap();
        let features = sigmascan_detector::feature::extract_features(&samples);
        let anomalies = detection.anomalies();
        let report = ScanReport {
            stats: detection.stats(),
            features: &features,
            anomalies: &anomalies,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stats"]["count"], 6);
        assert_eq!(json["stats"]["mean"], 1.0);
        assert_eq!(json["features"].as_array().unwrap().len(), 6);
        assert_eq!(json["anomalies"][0]["index"], 5);
        assert_eq!(json["anomalies"][0]["value"], 6.0);
    }
}
