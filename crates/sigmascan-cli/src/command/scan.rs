//! Outlier scan command
//!
//! Reads loose CSV from stdin, flattens every field into one sample sequence
//! and reports the samples lying more than two standard deviations from the
//! mean.

use std::io;

use anyhow::Context;
use clap::Args;
use sigmascan_detector::{
    detection::{self, Detection},
    feature::{self, FeatureRow},
    report::AnomalyRecord,
};
use tracing::{info, warn};

use super::{InputArg, OutputArg, OutputFormat};
use crate::{
    input,
    report::{self, ScanReport},
    util::{self, ReportSink},
};

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct ScanArg {
    #[clap(flatten)]
    input: InputArg,
    #[clap(flatten)]
    output: OutputArg,
    /// Do not print the decorative star banners
    #[arg(long)]
    no_banner: bool,
}

pub(crate) fn run(arg: &ScanArg) -> anyhow::Result<()> {
    let mut sink = ReportSink::create(arg.output.output.clone())?;
    let result = scan(arg, io::stdin().lock(), &mut sink);
    let finished = sink.finish();
    result?;
    finished
}

/// Runs the whole pipeline from `reader` to `w`.
///
/// When the CSV gate rejects the input, the closing banner is still written
/// before the [`input::InputError`] is returned.
fn scan<R, W>(arg: &ScanArg, reader: R, w: &mut W) -> anyhow::Result<()>
where
    R: io::BufRead,
    W: io::Write,
{
    let banner = arg.output.format == OutputFormat::Text && !arg.no_banner;

    if banner {
        report::write_welcome(w)
            .and_then(|()| w.flush())
            .context("Failed to write banner")?;
    }

    let text = match super::read_input(&arg.input, reader) {
        Ok(text) => text,
        Err(err) => {
            if banner {
                report::write_banner(w).context("Failed to write banner")?;
            }
            return Err(err);
        }
    };

    let records = input::split_records(&text);
    let numeric = input::parse_records(&records);
    let samples = input::flatten(&numeric);
    info!(
        records = records.len(),
        samples = samples.len(),
        "parsed input"
    );

    let features = feature::extract_features(&samples);
    let detection = detection::detect(&samples).context("Failed to detect anomalies")?;
    for diagnostic in detection.diagnostics() {
        warn!("{diagnostic}");
    }
    let anomalies = detection.anomalies();
    info!(
        mean = detection.stats().mean,
        std_dev = detection.stats().std_dev,
        anomalies = anomalies.len(),
        "detection finished"
    );

    match arg.output.format {
        OutputFormat::Text => TextReport {
            banner,
            records: &records,
            numeric: &numeric,
            features: &features,
            detection: &detection,
            anomalies: &anomalies,
        }
        .write(w)
        .context("Failed to write text report")?,
        OutputFormat::Json => util::write_json(
            w,
            &ScanReport {
                stats: detection.stats(),
                features: &features,
                anomalies: &anomalies,
            },
        )
        .context("Failed to write JSON report")?,
    }

    Ok(())
}

struct TextReport<'a> {
    banner: bool,
    records: &'a [Vec<&'a str>],
    numeric: &'a [Vec<f64>],
    features: &'a [FeatureRow],
    detection: &'a Detection,
    anomalies: &'a [AnomalyRecord],
}

impl TextReport<'_> {
    fn write<W>(&self, w: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        if self.banner {
            report::write_banner(w)?;
        }
        report::write_records(w, self.records)?;
        if self.banner {
            report::write_banner(w)?;
        }
        report::write_numeric(w, self.numeric)?;
        if self.banner {
            report::write_banner(w)?;
        }
        report::write_features(w, self.features)?;
        report::write_stats(w, self.detection.stats())?;
        report::write_anomalies(w, self.anomalies)?;
        if self.banner {
            report::write_banner(w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sigmascan_detector::DetectError;

    use super::*;

    fn render(text: &str, banner: bool) -> String {
        let records = input::split_records(text);
        let numeric = input::parse_records(&records);
        let samples = input::flatten(&numeric);
        let features = feature::extract_features(&samples);
        let detection = detection::detect(&samples).unwrap();
        let anomalies = detection.anomalies();
        let report = TextReport {
            banner,
            records: &records,
            numeric: &numeric,
            features: &features,
            detection: &detection,
            anomalies: &anomalies,
        };
        let mut buf = vec![];
        report.write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_lists_flagged_sample() {
        let text = render("10,12,11\n13,10,12\n11,13,1000\n", false);
        assert!(text.contains("You entered these:\n10, 12, 11\n"));
        assert!(text.contains("Numeric data:\n10 12 11 \n"));
        assert!(text.ends_with("Detected anomalies:\nAnomaly at index 8: 1000\n"));
    }

    #[test]
    fn test_report_without_anomalies() {
        let text = render("5,5\n5,5\n", false);
        assert!(text.ends_with("Detected anomalies:\n"));
    }

    fn scan_arg(format: OutputFormat, no_banner: bool, skip_format_check: bool) -> ScanArg {
        ScanArg {
            input: InputArg {
                max_input_bytes: 10_000,
                skip_format_check,
            },
            output: OutputArg {
                format,
                output: None,
            },
            no_banner,
        }
    }

    fn run_scan(arg: &ScanArg, stdin: &str) -> (anyhow::Result<()>, String) {
        let mut buf = vec![];
        let result = scan(arg, stdin.as_bytes(), &mut buf);
        (result, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_rejects_non_csv_input_between_banners() {
        let arg = scan_arg(OutputFormat::Text, false, false);
        let (result, text) = run_scan(&arg, "42\n");
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<input::InputError>(),
            Some(input::InputError::NotCsv)
        ));
        let mut expected = vec![];
        report::write_welcome(&mut expected).unwrap();
        report::write_banner(&mut expected).unwrap();
        assert_eq!(text, String::from_utf8(expected).unwrap());
    }

    #[test]
    fn test_rejects_non_csv_input_without_banner() {
        let arg = scan_arg(OutputFormat::Text, true, false);
        let (result, text) = run_scan(&arg, "1\n2\n3\n");
        assert!(result.unwrap_err().is::<input::InputError>());
        assert!(text.is_empty());
    }

    #[test]
    fn test_skipped_check_on_empty_input_is_invalid() {
        let arg = scan_arg(OutputFormat::Text, true, true);
        let (result, _) = run_scan(&arg, "");
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DetectError>(),
            Some(&DetectError::InvalidInput)
        );
    }

    #[test]
    fn test_skipped_check_accepts_single_column() {
        let arg = scan_arg(OutputFormat::Text, true, true);
        let (result, text) = run_scan(&arg, "1\n1\n1\n1\n1\n1\n1\n1\n40\n");
        result.unwrap();
        assert!(text.ends_with("Anomaly at index 8: 40\n"));
    }

    #[test]
    fn test_json_report() {
        let arg = scan_arg(OutputFormat::Json, false, false);
        let (result, text) = run_scan(&arg, "10,12,11\n13,10,12\n11,13,1000\n");
        result.unwrap();
        let json = serde_json::from_str::<serde_json::Value>(&text).unwrap();
        assert_eq!(json["stats"]["count"], 9);
        assert_eq!(json["features"].as_array().unwrap().len(), 9);
        assert_eq!(json["anomalies"].as_array().unwrap().len(), 1);
        assert_eq!(json["anomalies"][0]["index"], 8);
    }

    #[test]
    fn test_banner_toggle() {
        assert!(render("1,2\n", true).starts_with("******\n"));
        assert!(!render("1,2\n", false).contains("******"));
    }
}
