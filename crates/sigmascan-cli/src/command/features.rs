//! Feature-only command: prints each sample with its square, without detection.

use std::io;

use anyhow::Context;
use clap::Args;
use sigmascan_detector::feature;

use super::{InputArg, OutputArg, OutputFormat};
use crate::{
    input,
    report::{self, FeatureReport},
    util::{self, ReportSink},
};

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FeaturesArg {
    #[clap(flatten)]
    input: InputArg,
    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &FeaturesArg) -> anyhow::Result<()> {
    let mut sink = ReportSink::create(arg.output.output.clone())?;
    let result = features(arg, io::stdin().lock(), &mut sink);
    let finished = sink.finish();
    result?;
    finished
}

fn features<R, W>(arg: &FeaturesArg, reader: R, w: &mut W) -> anyhow::Result<()>
where
    R: io::BufRead,
    W: io::Write,
{
    let text = super::read_input(&arg.input, reader)?;
    let records = input::split_records(&text);
    let samples = input::flatten(&input::parse_records(&records));
    let features = feature::extract_features(&samples);
    tracing::info!(features = features.len(), "extracted features");

    match arg.output.format {
        OutputFormat::Text => report::write_features(w, &features),
        OutputFormat::Json => util::write_json(
            w,
            &FeatureReport {
                features: &features,
            },
        ),
    }
    .context("Failed to write features")
}
