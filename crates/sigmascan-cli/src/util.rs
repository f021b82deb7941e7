use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write},
    path::PathBuf,
};

use anyhow::Context;

/// Where a report ends up: stdout, or a file given with `--output`.
#[derive(Debug)]
pub enum ReportSink {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl ReportSink {
    pub fn create(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(ReportSink::Stdout(io::stdout().lock()));
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        Ok(ReportSink::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn describe(&self) -> String {
        match self {
            ReportSink::Stdout(_) => "stdout".to_string(),
            ReportSink::File { path, .. } => path.display().to_string(),
        }
    }

    /// Flushes buffered report text, naming the sink on failure.
    pub fn finish(mut self) -> anyhow::Result<()> {
        self.flush()
            .with_context(|| format!("Failed to flush report to {}", self.describe()))
    }
}

impl Write for ReportSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ReportSink::Stdout(writer) => writer.write(buf),
            ReportSink::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ReportSink::Stdout(writer) => writer.flush(),
            ReportSink::File { writer, .. } => writer.flush(),
        }
    }
}

/// Pretty-prints `value` as JSON followed by a newline.
pub fn write_json<W, T>(w: &mut W, value: &T) -> io::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)
}
